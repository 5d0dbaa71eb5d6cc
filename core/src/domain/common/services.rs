use crate::domain::{
    authentication::ports::AuthSessionRepository, health::ports::HealthCheckRepository,
    menu_scan::ports::LLMClient, user::ports::UserRepository,
};

/// Application service holding every collaborator handle.
///
/// Handles are injected by the process entry point (see
/// [`crate::application::create_service`]); nothing in the core reaches for a
/// global client.
#[derive(Clone)]
pub struct Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    pub(crate) user_repository: U,
    pub(crate) session_repository: AS,
    pub(crate) health_check_repository: HC,
    pub(crate) llm_client: LLM,
}

impl<U, AS, HC, LLM> Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    pub fn new(
        user_repository: U,
        session_repository: AS,
        health_check_repository: HC,
        llm_client: LLM,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            health_check_repository,
            llm_client,
        }
    }
}
