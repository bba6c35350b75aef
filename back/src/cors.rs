use axum::http::{header::CONTENT_TYPE, Method};
use tower_http::cors::{Any, CorsLayer};

/// Permissive cross-origin policy. Any `OPTIONS` request is answered with an
/// empty 200 before it reaches the router.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}
