//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::model::Student;
use crate::response::{created_at, no_content, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Path prefix under which the students resource is mounted.
pub const STUDENTS_PATH: &str = "/api/students";

pub fn student_location(id: i32) -> String {
    format!("{}/{}", STUDENTS_PATH, id)
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("student {}", id))
}

#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    responses((status = 200, description = "All students", body = Vec<Student>))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = state.store.list_all().await?;
    Ok(ok(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn read(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    let student = state.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(ok(student))
}

#[utoipa::path(
    post,
    path = "/api/students",
    tag = "students",
    request_body = Student,
    responses(
        (status = 201, description = "Created; Location points at the new student", body = Student),
        (status = 500, description = "Store rejected the record")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(student): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.store.add(student).await?;
    tracing::info!(id = created.id, "student created");
    Ok(created_at(student_location(created.id), created))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = Student,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut student): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    // An omitted body id means "the one in the path"; a different one matches nothing.
    if student.has_unset_id() {
        student.id = id;
    } else if student.id != id {
        return Err(not_found(id));
    }
    state.store.update(&student).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(id, "student updated");
    Ok(no_content())
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    state.store.delete(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(id, "student deleted");
    Ok(no_content())
}
