//! Student management: REST API for student records over PostgreSQL or an in-memory store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::Student;
pub use routes::{app, common_routes, docs_routes, student_routes, ApiDoc};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStudentStore, PgStudentStore, StudentStore};
