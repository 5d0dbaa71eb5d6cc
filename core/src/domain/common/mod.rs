pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct PlatewiseConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub request_timeout_secs: u64,
}
