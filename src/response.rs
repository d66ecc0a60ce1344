//! Response helpers for the students resource.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 201 with a `Location` header pointing at the new resource and the created body.
pub fn created_at<T: Serialize>(location: String, data: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(data)).into_response()
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
