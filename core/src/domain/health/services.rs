use crate::domain::{
    authentication::ports::AuthSessionRepository,
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    menu_scan::ports::LLMClient,
    user::ports::UserRepository,
};

impl<U, AS, HC, LLM> HealthCheckService for Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }
}
