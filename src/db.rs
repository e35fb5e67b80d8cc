use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

use crate::error::AppResult;

pub async fn connect_and_migrate(
    options: impl Into<ConnectOptions>,
) -> AppResult<DatabaseConnection> {
    let mut options: ConnectOptions = options.into();
    options.sqlx_logging(false);

    let in_memory = options.get_url().contains(":memory:");
    let db = Database::connect(options).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite && !in_memory {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA journal_mode=WAL".to_string(),
        ))
        .await?;

        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA synchronous=NORMAL".to_string(),
        ))
        .await?;
    }

    Migrator::up(&db, None).await?;
    Ok(db)
}
