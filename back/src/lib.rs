pub mod config;
pub mod cors;
pub mod error;
pub mod store;
mod v1;

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub use config::Config;
pub use error::{Error, Result};
pub use store::Store;

/// Method and path of every route, for the startup banner.
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET/POST", "/", "List/Create todos"),
    ("POST", "/toggle/", "Toggle completion"),
    ("DELETE", "/delete/", "Delete todo"),
    ("PUT", "/update/", "Update todo"),
    ("GET", "/search", "Search todos"),
    ("GET", "/stats", "Get statistics"),
];

pub fn app(store: Arc<Store>) -> Router {
    Router::new()
        .merge(v1::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                ))
                .layer(cors::layer()),
        )
        .with_state(store)
}
