use tracing::instrument;

use crate::domain::{
    authentication::{ports::AuthSessionRepository, value_objects::Identity},
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    health_profile::{
        assembler::assemble_health_profile, entities::HealthProfile, ports::HealthProfileService,
        value_objects::HealthProfileView,
    },
    menu_scan::ports::LLMClient,
    user::{entities::UserHealthRecord, ports::UserRepository},
};

impl<U, AS, HC, LLM> Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    async fn fetch_record(&self, identity: &Identity) -> Result<UserHealthRecord, CoreError> {
        self.user_repository
            .get_health_record(identity.id())
            .await?
            .ok_or(CoreError::NotFound)
    }

    /// Fetch the caller's record and assemble a profile, logging (not
    /// failing on) degraded stored data.
    pub(crate) async fn load_health_profile(
        &self,
        identity: &Identity,
    ) -> Result<HealthProfile, CoreError> {
        let record = self.fetch_record(identity).await?;

        match assemble_health_profile(&record) {
            Ok(profile) => Ok(profile),
            Err(warning) => {
                tracing::warn!(
                    user_id = %record.id,
                    issues = ?warning.issues,
                    "{}",
                    warning
                );
                Ok(warning.into_profile())
            }
        }
    }
}

impl<U, AS, HC, LLM> HealthProfileService for Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    #[instrument(skip(self), fields(user_id = %identity.id()))]
    async fn get_health_profile(&self, identity: Identity) -> Result<HealthProfileView, CoreError> {
        let record = self.fetch_record(&identity).await?;

        Ok(HealthProfileView::from(assemble_health_profile(&record)))
    }
}
