//! In-memory engine. Used by tests and for running without a database (`STUDENT_STORE=memory`).

use super::StudentStore;
use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i32, Student>,
    /// Highest id ever stored; generated ids continue from here.
    last_id: i32,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given students (ids generated where unset).
    pub async fn with_students(students: impl IntoIterator<Item = Student>) -> Result<Self, AppError> {
        let store = Self::new();
        for s in students {
            store.add(s).await?;
        }
        Ok(store)
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn add(&self, mut student: Student) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;
        if student.has_unset_id() {
            student.id = inner
                .last_id
                .checked_add(1)
                .ok_or_else(|| AppError::Persistence("student id space exhausted".into()))?;
        } else if inner.rows.contains_key(&student.id) {
            return Err(AppError::Persistence(format!(
                "duplicate key: student {} already exists",
                student.id
            )));
        }
        inner.last_id = inner.last_id.max(student.id);
        tracing::debug!(id = student.id, "memory: insert student");
        inner.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&student.id) else {
            return Ok(None);
        };
        row.first_name.clone_from(&student.first_name);
        row.last_name.clone_from(&student.last_name);
        row.age = student.age;
        tracing::debug!(id = student.id, "memory: update student");
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Student>, AppError> {
        let removed = self.inner.write().await.rows.remove(&id);
        if removed.is_some() {
            tracing::debug!(id, "memory: delete student");
        }
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
