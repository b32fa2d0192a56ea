use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

// CORS для фронтенда, который может жить на другом origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
