//! Runs against a live PostgreSQL. `DATABASE_URL=... cargo test --test pg_store -- --ignored`

use student_management::{ensure_database_exists, PgStudentStore, Student, StudentStore};

async fn store() -> PgStudentStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for pg tests");
    ensure_database_exists(&url).await.expect("ensure database");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect");
    let store = PgStudentStore::new(pool);
    store.ensure_schema().await.expect("ensure schema");
    store
}

#[tokio::test]
#[ignore]
async fn pg_add_find_update_delete() {
    let store = store().await;

    let created = store.add(Student::new("Erkki", "Pekkanen", 45)).await.unwrap();
    assert_ne!(created.id, 0);
    assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created.clone()));

    let changed = Student::new("Jukka", "Kukkanen", 38).with_id(created.id);
    assert_eq!(store.update(&changed).await.unwrap(), Some(changed.clone()));
    assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(changed.clone()));
    assert!(store.list_all().await.unwrap().iter().any(|s| s.id == created.id));

    assert_eq!(store.delete(created.id).await.unwrap(), Some(changed));
    assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn pg_update_missing_returns_none() {
    let store = store().await;
    let ghost = Student::new("Ghost", "Student", 1).with_id(i32::MAX);
    assert_eq!(store.update(&ghost).await.unwrap(), None);
    assert_eq!(store.find_by_id(i32::MAX).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn pg_explicit_id_then_generated_id_does_not_collide() {
    let store = store().await;
    let max = store.list_all().await.unwrap().iter().map(|s| s.id).max().unwrap_or(0);
    let explicit = store
        .add(Student::new("A", "B", 20).with_id(max + 100))
        .await
        .unwrap();
    let generated = store.add(Student::new("C", "D", 21)).await.unwrap();
    assert!(generated.id > explicit.id);
    store.delete(explicit.id).await.unwrap();
    store.delete(generated.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn pg_negative_explicit_id_is_accepted() {
    let store = store().await;
    let id = -(store.list_all().await.unwrap().len() as i32) - 3;
    let created = store.add(Student::new("A", "B", 20).with_id(id)).await.unwrap();
    assert_eq!(created.id, id);
    let generated = store.add(Student::new("C", "D", 21)).await.unwrap();
    assert!(generated.id > 0);
    store.delete(created.id).await.unwrap();
    store.delete(generated.id).await.unwrap();
}
