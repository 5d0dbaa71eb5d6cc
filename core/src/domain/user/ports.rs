use std::future::Future;
use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::UserHealthRecord};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn get_health_record(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<UserHealthRecord>, CoreError>> + Send;
}
