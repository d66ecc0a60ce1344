//! OpenAPI document for the students API.

use crate::handlers::students;
use crate::model::Student;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

/// Where the generated document is served.
pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        students::list,
        students::read,
        students::create,
        students::update,
        students::delete
    ),
    components(schemas(Student)),
    tags((name = "students", description = "Student records"))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route(OPENAPI_PATH, get(openapi))
}
