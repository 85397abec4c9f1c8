use axum::{
    http::{header, HeaderName, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Headers the front-end may send along with a cross-origin request.
pub const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// Allow any origin. Every `OPTIONS` request is answered here with an empty
/// `200` and never reaches the routes.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers(ALLOWED_HEADERS),
    )
}
