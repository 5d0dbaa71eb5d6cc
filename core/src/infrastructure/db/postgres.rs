use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
}

#[derive(Debug, Clone)]
pub struct Postgres {
    db: DatabaseConnection,
}

impl Postgres {
    pub async fn new(config: PostgresConfig) -> Result<Self, CoreError> {
        let mut options = ConnectOptions::new(config.database_url);
        options
            .max_connections(20)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(false);

        let db = Database::connect(options).await.map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
