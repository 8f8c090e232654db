use sea_orm::{Database, DatabaseConnection};

use crate::error::{AppError, AppResult};

pub async fn connect(database_url: &str) -> AppResult<DatabaseConnection> {
    Database::connect(database_url)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))
}
