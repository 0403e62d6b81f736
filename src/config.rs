use secrecy::{ExposeSecret, SecretBox};
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid API key for {service}: {reason}")]
    InvalidKey { service: String, reason: String },
}

/// Configuration for the hosted speech-synthesis service
#[derive(Debug)]
pub struct ApiConfig {
    gemini_key: SecretBox<String>,
}

impl ApiConfig {
    /// Load API configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        let gemini_key = Self::load_api_key("GEMINI_API_KEY", "Gemini")?;

        Ok(Self { gemini_key })
    }

    fn load_api_key(env_var: &str, service: &str) -> Result<SecretBox<String>, ConfigError> {
        let key = env::var(env_var).map_err(|_| ConfigError::MissingEnvVar(env_var.to_string()))?;
        Self::validate_key(&key, service)?;
        Ok(SecretBox::new(Box::new(key)))
    }

    fn validate_key(key: &str, service: &str) -> Result<(), ConfigError> {
        if key.trim().is_empty() {
            return Err(ConfigError::InvalidKey {
                service: service.to_string(),
                reason: "API key cannot be empty".to_string(),
            });
        }
        if key.len() < 10 {
            return Err(ConfigError::InvalidKey {
                service: service.to_string(),
                reason: "API key should be at least 10 characters".to_string(),
            });
        }
        Ok(())
    }

    /// Get the Gemini API key (use only when making API calls)
    pub fn gemini_key(&self) -> &str {
        self.gemini_key.expose_secret()
    }
}

/// Load configuration with helpful error messages for development
pub fn load_config() -> Result<ApiConfig, ConfigError> {
    match ApiConfig::load() {
        Ok(config) => {
            log::info!("Successfully loaded API configuration");
            Ok(config)
        }
        Err(ConfigError::MissingEnvVar(var)) => {
            log::error!("Missing required environment variable: {}", var);
            log::error!("Create a .env file in the project root with:");
            log::error!("{}=your_api_key_here", var);
            Err(ConfigError::MissingEnvVar(var))
        }
        Err(e) => {
            log::error!("Configuration error: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(ApiConfig::validate_key("AIzaSyExample123", "Gemini").is_ok());
        assert!(ApiConfig::validate_key("", "Gemini").is_err());
        assert!(ApiConfig::validate_key("   ", "Gemini").is_err());
        assert!(ApiConfig::validate_key("short", "Gemini").is_err());
    }

    #[test]
    fn test_key_is_not_debug_printed() {
        let config = ApiConfig {
            gemini_key: SecretBox::new(Box::new("AIzaSySecretValue".to_string())),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("AIzaSySecretValue"));
    }
}
