use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        user::{entities::UserHealthRecord, ports::UserRepository},
    },
    entity::users::Entity,
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_health_record(&self, user_id: Uuid) -> Result<Option<UserHealthRecord>, CoreError> {
        let user = Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user health record: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(UserHealthRecord::from))
    }
}
