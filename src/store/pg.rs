//! PostgreSQL engine over a sqlx pool. Students live in a single `"Students"` table.

use super::StudentStore;
use crate::error::{AppError, ConfigError};
use crate::model::Student;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

pub const STUDENTS_TABLE: &str = "\"Students\"";

const COLUMNS: &str = "id, first_name, last_name, age";

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the students table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                age INTEGER NOT NULL
            )
            "#,
            STUDENTS_TABLE
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn add(&self, student: Student) -> Result<Student, AppError> {
        let mut tx = self.pool.begin().await?;
        let row = if student.has_unset_id() {
            let sql = format!(
                "INSERT INTO {} (first_name, last_name, age) VALUES ($1, $2, $3) RETURNING {}",
                STUDENTS_TABLE, COLUMNS
            );
            tracing::debug!(sql = %sql, "query");
            sqlx::query(&sql)
                .bind(&student.first_name)
                .bind(&student.last_name)
                .bind(student.age)
                .fetch_one(&mut *tx)
                .await?
        } else {
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4) RETURNING {}",
                STUDENTS_TABLE, COLUMNS, COLUMNS
            );
            tracing::debug!(sql = %sql, id = student.id, "query");
            let row = sqlx::query(&sql)
                .bind(student.id)
                .bind(&student.first_name)
                .bind(&student.last_name)
                .bind(student.age)
                .fetch_one(&mut *tx)
                .await?;
            // Keep the identity sequence ahead of explicitly supplied ids (its minimum is 1).
            if student.id > 0 {
                let bump = sequence_bump_sql();
                sqlx::query(&bump).execute(&mut *tx).await?;
            }
            row
        };
        let created = student_from_row(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, STUDENTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(student_from_row).transpose()?)
    }

    async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, STUDENTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(student_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "UPDATE {} SET first_name = $2, last_name = $3, age = $4 WHERE id = $1 RETURNING {}",
            STUDENTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = student.id, "query");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&sql)
            .bind(student.id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.age)
            .fetch_optional(&mut *tx)
            .await?;
        let updated = row.as_ref().map(student_from_row).transpose()?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<Student>, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", STUDENTS_TABLE, COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(student_from_row).transpose()?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn student_from_row(row: &PgRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        age: row.try_get("age")?,
    })
}

/// Connect to the server's `postgres` database and create the target database when missing.
/// A URL without a database name is left alone.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connection options for the server's `postgres` database plus the target database name.
/// `None` when the URL names no database, or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|_| invalid_url(database_url))?;
    let db_name = match opts.get_database().map(str::trim) {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn sequence_bump_sql() -> String {
    format!(
        "SELECT setval(pg_get_serial_sequence('{0}', 'id'), GREATEST((SELECT MAX(id) FROM {0}), 1))",
        STUDENTS_TABLE
    )
}

fn invalid_url(url: &str) -> AppError {
    AppError::Config(ConfigError::InvalidValue {
        var: "DATABASE_URL",
        value: url.to_string(),
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_point_at_postgres_database_on_same_server() {
        let (admin, db) = admin_options("postgres://u:p@dbhost:5433/students")
            .unwrap()
            .expect("database named");
        assert_eq!(db, "students");
        assert_eq!(admin.get_host(), "dbhost");
        assert_eq!(admin.get_port(), 5433);
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn query_parameters_do_not_leak_into_database_name() {
        let (_, db) = admin_options("postgres://localhost/students?sslmode=disable")
            .unwrap()
            .expect("database named");
        assert_eq!(db, "students");
    }

    #[test]
    fn url_without_database_path_never_uses_host_as_database() {
        let parsed = admin_options("postgres://user:pw@dbhost:5432").unwrap();
        // Without a path sqlx falls back to PGDATABASE, if set.
        match std::env::var("PGDATABASE").ok().filter(|d| !d.is_empty() && d != "postgres") {
            None => assert!(parsed.is_none()),
            Some(env_db) => {
                let (admin, db) = parsed.expect("database from PGDATABASE");
                assert_eq!(db, env_db);
                assert_eq!(admin.get_host(), "dbhost");
            }
        }
    }

    #[test]
    fn postgres_database_itself_needs_no_creation() {
        assert!(admin_options("postgres://localhost/postgres").unwrap().is_none());
    }

    #[test]
    fn unparsable_url_is_a_config_error() {
        let err = admin_options("not a url").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidValue { var: "DATABASE_URL", .. })));
    }

    #[test]
    fn sequence_bump_never_goes_below_one() {
        let sql = sequence_bump_sql();
        assert!(sql.contains("GREATEST((SELECT MAX(id) FROM \"Students\"), 1)"));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}
