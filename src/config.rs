//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `LOG_HEADERS` - Include request headers in trace spans (default: `false`)
//! - `API_BASE_PATH` - Mount point of the users resource (default: `/v1/users`)
//! - `PUBLIC_URL` - Server URL advertised in the OpenAPI document
//!   (default: `http://localhost:3000`)
//! - `API_TITLE`, `API_DESCRIPTION`, `API_CONTACT` - OpenAPI `info` fields
//! - `MAX_BODY_BYTES` - Request body size limit (default: 1 MiB)

use anyhow::{Context, Result};
use std::env;

use crate::pipeline::openapi::ApiInfo;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub log_headers: bool,
    pub base_path: String,
    pub public_url: String,
    pub api_title: String,
    pub api_description: String,
    pub api_contact: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            log_headers: false,
            base_path: "/v1/users".to_string(),
            public_url: "http://localhost:3000".to_string(),
            api_title: "Top Coding SAP API".to_string(),
            api_description: "Top Coding API Information".to_string(),
            api_contact: "Todor Vasilev".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `MAX_BODY_BYTES` is set but not a number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("MAX_BODY_BYTES must be a number, got '{v}'"))?,
            Err(_) => defaults.max_body_bytes,
        };

        let log_headers = env::var("LOG_HEADERS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.log_headers);

        Ok(Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            log_headers,
            base_path: env::var("API_BASE_PATH").unwrap_or(defaults.base_path),
            public_url: env::var("PUBLIC_URL").unwrap_or(defaults.public_url),
            api_title: env::var("API_TITLE").unwrap_or(defaults.api_title),
            api_description: env::var("API_DESCRIPTION").unwrap_or(defaults.api_description),
            api_contact: env::var("API_CONTACT").unwrap_or(defaults.api_contact),
            max_body_bytes,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_path` does not start with `/`
    /// - `public_url` is not an http(s) URL
    /// - `max_body_bytes` is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_path.starts_with('/') {
            anyhow::bail!(
                "API_BASE_PATH must start with '/', got '{}'",
                self.base_path
            );
        }

        match url::Url::parse(&self.public_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => anyhow::bail!(
                "PUBLIC_URL must be an http(s) URL, got '{}'",
                self.public_url
            ),
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be greater than 0");
        }

        Ok(())
    }

    /// Metadata for the OpenAPI document.
    pub fn api_info(&self) -> ApiInfo {
        ApiInfo {
            title: self.api_title.clone(),
            description: self.api_description.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact: self.api_contact.clone(),
            server_url: self.public_url.clone(),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base path: {}", self.base_path);
        tracing::info!("  Public URL: {}", self.public_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Max body size: {} bytes", self.max_body_bytes);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.base_path = "v1/users".to_string();
        assert!(config.validate().is_err());
        config.base_path = "/v1/users".to_string();

        config.public_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.public_url = "https://api.example.com".to_string();
        assert!(config.validate().is_ok());

        config.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_info_uses_config() {
        let config = Config {
            api_title: "Users".to_string(),
            public_url: "https://api.example.com".to_string(),
            ..Config::default()
        };

        let info = config.api_info();

        assert_eq!(info.title, "Users");
        assert_eq!(info.server_url, "https://api.example.com");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("API_BASE_PATH", "/api/users");
            env::set_var("LOG_HEADERS", "1");
            env::set_var("MAX_BODY_BYTES", "2048");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.base_path, "/api/users");
        assert!(config.log_headers);
        assert_eq!(config.max_body_bytes, 2048);

        // Cleanup
        unsafe {
            env::remove_var("API_BASE_PATH");
            env::remove_var("LOG_HEADERS");
            env::remove_var("MAX_BODY_BYTES");
        }
    }

    #[test]
    #[serial]
    fn test_invalid_body_limit_is_rejected() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("MAX_BODY_BYTES", "lots");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("MAX_BODY_BYTES");
        }
    }
}
