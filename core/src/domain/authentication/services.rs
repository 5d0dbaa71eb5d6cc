use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::{
    authentication::{
        ports::{AuthService, AuthSessionRepository},
        value_objects::Identity,
    },
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    menu_scan::ports::LLMClient,
    user::ports::UserRepository,
};

/// Session tokens are stored as their SHA-256 hex digest
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn require_identity(identity: Option<Identity>) -> Result<Identity, CoreError> {
    identity.ok_or(CoreError::Unauthenticated)
}

impl<U, AS, HC, LLM> AuthService for Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    #[instrument(skip(self, token))]
    async fn authenticate(&self, token: String) -> Result<Identity, CoreError> {
        if token.trim().is_empty() {
            return Err(CoreError::Unauthenticated);
        }

        let session = self
            .session_repository
            .get_by_token_hash(hash_session_token(token.trim()))
            .await?
            .ok_or(CoreError::Unauthenticated)?;

        if session.is_expired(Utc::now()) {
            tracing::debug!(session_id = %session.id, "Session expired");
            return Err(CoreError::Unauthenticated);
        }

        Ok(Identity {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}
