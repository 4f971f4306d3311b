use anyhow::{Context, Result};
use std::env;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    #[allow(dead_code)]
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,

    // Parser service
    pub parser_base_url: String,
    pub wake_timeout_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        // Parser service
        let parser_base_url =
            env::var("PARSER_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        Url::parse(&parser_base_url).context("PARSER_BASE_URL must be a valid URL")?;

        let wake_timeout_seconds = env::var("WAKE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30); // hosted backend cold-starts; give it time

        Ok(Settings {
            env,
            parser_base_url,
            wake_timeout_seconds,
        })
    }
}
