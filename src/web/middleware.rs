use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS so the demo pages can be served from another origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
