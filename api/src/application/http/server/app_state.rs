use std::sync::Arc;

use platewise_core::domain::{
    authentication::ports::AuthService, health::ports::HealthCheckService,
    health_profile::ports::HealthProfileService, menu_scan::ports::MenuScanService,
};

use crate::args::Args;

/// Everything the HTTP layer asks of the core.
pub trait AppServices:
    AuthService + MenuScanService + HealthProfileService + HealthCheckService + 'static
{
}

impl<T> AppServices for T where
    T: AuthService + MenuScanService + HealthProfileService + HealthCheckService + 'static
{
}

pub struct AppState<S> {
    pub args: Arc<Args>,
    pub service: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            args: self.args.clone(),
            service: self.service.clone(),
        }
    }
}

impl<S: AppServices> AppState<S> {
    pub fn new(args: Arc<Args>, service: S) -> Self {
        Self {
            args,
            service: Arc::new(service),
        }
    }
}
