use crate::{
    domain::common::{PlatewiseConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        health::PostgresHealthCheckRepository,
        llm::GeminiLLMClient,
        session::PostgresSessionRepository,
        user::PostgresUserRepository,
    },
};

pub type PlatewiseService = Service<
    PostgresUserRepository,
    PostgresSessionRepository,
    PostgresHealthCheckRepository,
    GeminiLLMClient,
>;

/// Wire the production collaborators into a [`Service`].
pub async fn create_service(config: PlatewiseConfig) -> Result<PlatewiseService, CoreError> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    let llm_client = GeminiLLMClient::new(&config.llm)?;

    tracing::info!(
        database = %config.database.name,
        model = %config.llm.gemini_model,
        "Service initialized"
    );

    Ok(Service::new(
        PostgresUserRepository::new(postgres.get_db()),
        PostgresSessionRepository::new(postgres.get_db()),
        PostgresHealthCheckRepository::new(postgres.get_db()),
        llm_client,
    ))
}
