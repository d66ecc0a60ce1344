//! Persistence context for students: one trait, one engine per backing store.
//!
//! Every mutating call is its own unit of work and is committed before it returns.
//! Absence is reported as `Ok(None)`; only store failures are errors.

mod memory;
mod pg;

pub use memory::MemoryStudentStore;
pub use pg::{ensure_database_exists, PgStudentStore, STUDENTS_TABLE};

use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a student, generating the id when it is unset (0). Returns the stored record.
    async fn add(&self, student: Student) -> Result<Student, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// All students ordered by id.
    async fn list_all(&self) -> Result<Vec<Student>, AppError>;

    /// Replace first name, last name and age of the record with `student.id`.
    /// Returns `None` (and writes nothing) when no such record exists.
    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError>;

    async fn delete(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// Cheap liveness check of the backing engine.
    async fn ping(&self) -> Result<(), AppError>;
}
