#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use users_api::config::Config;
use users_api::prelude::*;
use users_api::routes::app_router;

pub const BASE: &str = "/v1/users";

pub fn create_test_state() -> AppState {
    let config = Config::default();
    let pipeline = users_pipeline(&config.base_path).unwrap();
    AppState::in_memory(pipeline, &config.api_info())
}

pub fn create_test_router() -> Router {
    let config = Config::default();
    app_router(create_test_state(), config.max_body_bytes, false)
}

pub fn create_test_server() -> TestServer {
    TestServer::new(create_test_router()).unwrap()
}

pub fn create_test_server_with_body_limit(max_body_bytes: usize) -> TestServer {
    TestServer::new(app_router(create_test_state(), max_body_bytes, false)).unwrap()
}

pub async fn create_test_user(server: &TestServer, name: &str, email: &str) -> serde_json::Value {
    let response = server
        .post(BASE)
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": "password"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()
}
