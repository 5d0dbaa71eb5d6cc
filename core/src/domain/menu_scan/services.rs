use tracing::instrument;

use crate::domain::{
    authentication::{
        ports::AuthSessionRepository, services::require_identity, value_objects::Identity,
    },
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    menu_scan::{
        analysis::analyze,
        entities::MenuAnalysisResult,
        ports::{LLMClient, MenuScanService},
        prompt::build_model_request,
        validation::validate_image,
        value_objects::{ScanMenuInput, ScanRequest},
    },
    user::ports::UserRepository,
};

pub const SCAN_FAILURE_MESSAGE: &str =
    "Failed to analyze menu. Please try a clearer image or a different angle.";

impl<U, AS, HC, LLM> MenuScanService for Service<U, AS, HC, LLM>
where
    U: UserRepository,
    AS: AuthSessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
{
    #[instrument(
        skip(self, identity, input),
        fields(
            user_id = tracing::field::Empty,
            image_bytes = input.image_data.len(),
            mime_type = %input.mime_type,
        )
    )]
    async fn scan_menu(
        &self,
        identity: Option<Identity>,
        input: ScanMenuInput,
    ) -> Result<MenuAnalysisResult, CoreError> {
        // 1. Caller must be authenticated
        let identity = require_identity(identity)?;
        tracing::Span::current().record("user_id", tracing::field::display(identity.id()));

        // 2. Validate image before touching storage or the model
        let mime_type = validate_image(&input.image_data, &input.mime_type)?;

        // 3. Assemble the health profile
        let profile = self.load_health_profile(&identity).await?;

        let scan = ScanRequest {
            image_data: input.image_data,
            mime_type,
            profile,
        };

        // 4. Build the model request
        let request = build_model_request(&scan.profile, &scan.image_data, scan.mime_type);

        // 5. Call the model and validate its answer
        let result = analyze(&self.llm_client, request).await.map_err(|e| match e {
            CoreError::UpstreamError(cause) => {
                tracing::error!(cause = %cause, "Menu analysis failed");
                CoreError::UpstreamError(format!("{} ({})", SCAN_FAILURE_MESSAGE, cause))
            }
            other => other,
        })?;

        tracing::info!(
            items = result.items.len(),
            conditions = scan.profile.conditions.len(),
            "Menu scanned"
        );

        Ok(result)
    }
}
