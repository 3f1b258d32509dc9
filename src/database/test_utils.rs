use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::database::open_store;

/// Creates an on-disk store in a fresh temp dir with all migrations applied.
/// Keep the returned `TempDir` alive for as long as the connection is used.
pub async fn setup_test_db() -> (TempDir, DatabaseConnection) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp_dir.path().join("test.sqlite");
    let db = open_store(&db_path, 5)
        .await
        .expect("Failed to open test database");
    (tmp_dir, db)
}

/// Inserts a department and returns its id.
pub async fn insert_department(db: &DatabaseConnection, name: &str) -> i32 {
    use crate::database::entities::department;
    use sea_orm::{ActiveModelTrait, Set};

    department::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert department")
    .id
}
