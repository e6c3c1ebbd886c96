use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;
use crate::generation::generator::{
    DEFAULT_BODY_MAX_TOKENS, DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_TITLE_MAX_TOKENS,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub url: String,
}

/// Language-model provider settings, read once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub body_max_tokens: u32,
    pub title_max_tokens: u32,
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    expectation: &str,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Configuration(format!("{} must be {}", key, expectation))),
        None => Ok(default),
    }
}

impl AppSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        // App config
        let app_name = lookup("APP_NAME").unwrap_or_else(|| "inspiration-server".to_string());
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        // Server config
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_or(&lookup, "SERVER_PORT", 8080u16, "a valid port number")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_url = lookup("SERVER_URL")
            .unwrap_or_else(|| format!("http://{}:{}", server_host, server_port));

        // Language model
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("OPENAI_API_KEY must be set".to_string()))?;

        let base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        Url::parse(&base_url).map_err(|e| {
            AppError::Configuration(format!("OPENAI_BASE_URL must be a valid URL: {}", e))
        })?;

        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".to_string());

        let request_timeout_secs = parse_or(
            &lookup,
            "LLM_REQUEST_TIMEOUT_SECS",
            DEFAULT_CALL_TIMEOUT_SECS,
            "a valid number of seconds",
        )?;
        if request_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "LLM_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let body_max_tokens = parse_or(
            &lookup,
            "LLM_BODY_MAX_TOKENS",
            DEFAULT_BODY_MAX_TOKENS,
            "a valid token count",
        )?;
        let title_max_tokens = parse_or(
            &lookup,
            "LLM_TITLE_MAX_TOKENS",
            DEFAULT_TITLE_MAX_TOKENS,
            "a valid token count",
        )?;

        Ok(Self {
            app: AppConfig {
                name: app_name,
                environment,
            },
            server: ServerConfig {
                host: server_host,
                port: server_port,
                cors_origins,
                url: server_url,
            },
            llm: LlmConfig {
                api_key,
                base_url,
                model,
                request_timeout_secs,
                body_max_tokens,
                title_max_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<AppSettings, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.cors_origins, vec!["*".to_string()]);
        assert_eq!(settings.llm.model, "gpt-3.5-turbo");
        assert_eq!(settings.llm.body_max_tokens, 200);
        assert_eq!(settings.llm.title_max_tokens, 30);
        assert_eq!(settings.llm.request_timeout_secs, 30);
    }

    #[test]
    fn test_api_key_required() {
        assert!(matches!(settings_from(&[]), Err(AppError::Configuration(_))));
        assert!(matches!(
            settings_from(&[("OPENAI_API_KEY", "  ")]),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_port = settings_from(&[("OPENAI_API_KEY", "sk"), ("SERVER_PORT", "eighty")]);
        assert!(matches!(bad_port, Err(AppError::Configuration(_))));

        let bad_url = settings_from(&[("OPENAI_API_KEY", "sk"), ("OPENAI_BASE_URL", "not a url")]);
        assert!(matches!(bad_url, Err(AppError::Configuration(_))));

        let zero_timeout =
            settings_from(&[("OPENAI_API_KEY", "sk"), ("LLM_REQUEST_TIMEOUT_SECS", "0")]);
        assert!(matches!(zero_timeout, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_cors_origins_split() {
        let settings = settings_from(&[
            ("OPENAI_API_KEY", "sk"),
            ("CORS_ORIGINS", "http://localhost:3000, https://app.example.com"),
        ])
        .unwrap();
        assert_eq!(
            settings.server.cors_origins,
            vec!["http://localhost:3000".to_string(), "https://app.example.com".to_string()]
        );
    }

    #[test]
    fn test_api_key_not_serialized() {
        let settings = settings_from(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
