//! Handlers serving the API documentation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;

use crate::state::AppState;

/// Swagger UI page rendered from `templates/swagger.html`.
#[derive(Template, WebTemplate)]
#[template(path = "swagger.html")]
pub struct SwaggerTemplate {
    pub title: String,
    pub spec_url: &'static str,
}

/// Returns the OpenAPI document.
///
/// # Endpoint
///
/// `GET /swagger.json`
pub async fn openapi_handler(State(state): State<AppState>) -> Json<Value> {
    Json(state.openapi.as_ref().clone())
}

/// Renders the documentation page.
///
/// # Endpoint
///
/// `GET /swagger`
pub async fn swagger_handler(State(state): State<AppState>) -> impl IntoResponse {
    SwaggerTemplate {
        title: state.openapi["info"]["title"]
            .as_str()
            .unwrap_or("API")
            .to_string(),
        spec_url: "/swagger.json",
    }
}
