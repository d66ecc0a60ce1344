//! Routers: students resource, operational endpoints, OpenAPI document.

mod common;
mod docs;
mod students;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc, OPENAPI_PATH};
pub use students::student_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router: all route groups plus request tracing and a body size limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(student_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
