use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    /// Chat model used for every feedback request (e.g., gpt-3.5-turbo)
    pub model: String,
    /// API root; the client appends `/chat/completions`
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// The single browser origin allowed to call the API with credentials
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub otlp_endpoint: Option<String>,
}

impl FeedbackConfig {
    /// Load from the process environment (and `.env`, if present).
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_env = |key: &str, default: Option<&str>| -> Result<String, AppError> {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(val) => Ok(val),
                None => default.map(str::to_string).ok_or_else(|| {
                    AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
                }),
            }
        };

        let timeout_secs = get_env("OPENAI_TIMEOUT_SECS", Some(&DEFAULT_TIMEOUT_SECS.to_string()))?
            .parse::<u64>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("OPENAI_TIMEOUT_SECS is invalid: {}", e))
            })?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "OPENAI_TIMEOUT_SECS must be at least 1"
            )));
        }

        Ok(FeedbackConfig {
            common,
            openai: OpenAiConfig {
                api_key: Secret::new(get_env("OPENAI_API_KEY", None)?),
                model: get_env("OPENAI_MODEL", Some(DEFAULT_MODEL))?,
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_BASE_URL))?
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs,
            },
            cors: CorsConfig {
                allowed_origin: get_env("CORS_ALLOWED_ORIGIN", Some(DEFAULT_ALLOWED_ORIGIN))?,
            },
            observability: ObservabilityConfig {
                otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
            },
        })
    }
}
