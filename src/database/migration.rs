//! Schema migrations for the records database.
pub mod m20250101_000001_create_tables;
pub mod m20250101_000002_unique_department_name;

use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Migrator for the records database.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn sea_orm_migration::MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_tables::Migration),
            Box::new(m20250101_000002_unique_department_name::Migration),
        ]
    }
}

/// Applies every pending migration. Already-applied ones are skipped, so this
/// is safe to call on every startup.
///
/// # Arguments
/// * `db_conn` - The database connection.
///
/// # Returns
/// * `Result<(), DbErr>` - Ok if successful, Err otherwise.
pub async fn run_migrations(db_conn: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db_conn, None).await
}
