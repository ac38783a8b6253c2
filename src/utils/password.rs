//! Salted password digests for storage.
//!
//! Stored form: `<salt hex>$<HMAC-SHA256(salt, password) hex>` with a fresh
//! random salt per digest.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Digests `password` under a newly generated salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the MAC cannot be keyed.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt: [u8; SALT_LEN] = rand::random();
    let digest = mac(&salt, password)
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e })))?
        .finalize()
        .into_bytes();

    Ok(format!("{}${}", hex::encode(salt), hex::encode(digest)))
}

/// Checks `password` against a digest produced by [`hash_password`].
///
/// Malformed digests never verify. The comparison is constant-time.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(digest)) = (hex::decode(salt), hex::decode(digest)) else {
        return false;
    };

    mac(&salt, password).is_ok_and(|mac| mac.verify_slice(&digest).is_ok())
}

fn mac(salt: &[u8], password: &str) -> Result<HmacSha256, String> {
    let mut mac = HmacSha256::new_from_slice(salt).map_err(|e| e.to_string())?;
    mac.update(password.as_bytes());
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies() {
        let hash = hash_password("password").unwrap();

        assert!(verify_password("password", &hash));
        assert!(!verify_password("Password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("password").unwrap();
        let second = hash_password("password").unwrap();

        assert_ne!(first, second);

        let (salt, digest) = first.split_once('$').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64);
        assert!(!first.contains("password"));
    }

    #[test]
    fn test_malformed_digest_never_verifies() {
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "no-separator"));
        assert!(!verify_password("password", "zz$zz"));
        assert!(!verify_password(
            "password",
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        ));
    }
}
