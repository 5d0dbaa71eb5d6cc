use std::future::Future;

use crate::domain::{
    authentication::{entities::Session, value_objects::Identity},
    common::entities::app_errors::CoreError,
};

/// Read access to the session store owned by the auth provider
#[cfg_attr(test, mockall::automock)]
pub trait AuthSessionRepository: Send + Sync {
    fn get_by_token_hash(
        &self,
        token_hash: String,
    ) -> impl Future<Output = Result<Option<Session>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    /// Resolve a raw session token (bearer or cookie) into an identity
    fn authenticate(
        &self,
        token: String,
    ) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}
