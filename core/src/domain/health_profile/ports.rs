use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
    health_profile::value_objects::HealthProfileView,
};

#[cfg_attr(test, mockall::automock)]
pub trait HealthProfileService: Send + Sync {
    /// The profile a scan would use for this caller, with its degrade report
    fn get_health_profile(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<HealthProfileView, CoreError>> + Send;
}
