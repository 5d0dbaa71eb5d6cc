use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    menu_scan::{
        entities::MenuAnalysisResult,
        value_objects::{ModelRequest, ScanMenuInput},
    },
};

/// LLM Client trait for calling vision-capable models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Send one request and return the raw text of the model's answer
    fn generate_with_image(
        &self,
        request: ModelRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the menu scan pipeline
#[cfg_attr(test, mockall::automock)]
pub trait MenuScanService: Send + Sync {
    fn scan_menu(
        &self,
        identity: Option<Identity>,
        input: ScanMenuInput,
    ) -> impl Future<Output = Result<MenuAnalysisResult, CoreError>> + Send;
}
