use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;

use crate::{
    domain::{
        authentication::{entities::Session, ports::AuthSessionRepository},
        common::entities::app_errors::CoreError,
    },
    entity::sessions::{Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresSessionRepository {
    pub db: DatabaseConnection,
}

impl PostgresSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AuthSessionRepository for PostgresSessionRepository {
    async fn get_by_token_hash(&self, token_hash: String) -> Result<Option<Session>, CoreError> {
        let session = Entity::find()
            .filter(Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get session: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(session.map(Session::from))
    }
}
