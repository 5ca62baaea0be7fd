//! Routers for the two applications. Both share the common health routes and request layers.

mod admin;
mod blog;
mod common;
mod university;

pub use admin::admin_routes;
pub use blog::blog_routes;
pub use common::common_routes;
pub use university::university_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// University pages plus the admin surface under `/admin`.
pub fn university_app(state: AppState) -> Router {
    let limit = state.settings.body_limit;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(university_routes(state.clone()))
        .nest("/admin", admin_routes(state))
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(TraceLayer::new_for_http())
}

pub fn blog_app(state: AppState) -> Router {
    let limit = state.settings.body_limit;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(blog_routes(state))
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(TraceLayer::new_for_http())
}
