//! Configuration validation

use crate::config::{CaptureConfig, GenerationConfig, LlmConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Capture configuration error: {message}")]
    Capture { message: String },

    #[error("Model configuration error: {message}")]
    Llm { message: String },

    #[error("Generation configuration error: {message}")]
    Generation { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so only zero needs rejecting
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty".to_string()));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for CaptureConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.navigation_timeout_ms == 0 {
            return Err(ValidationError::capture(
                "Navigation timeout must be greater than 0 ms".to_string(),
            ));
        }

        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ValidationError::capture(
                "Viewport dimensions must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ValidationError::llm(format!(
                "api_url must start with http:// or https://, got: {}",
                self.api_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm(
                "Model timeout must be greater than 0 seconds".to_string(),
            ));
        }

        if self.model.is_empty() {
            return Err(ValidationError::llm("Model name cannot be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        Ok(())
    }
}

impl Validate for GenerationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::generation(
                "Output directory cannot be empty".to_string(),
            ));
        }

        if self.max_concurrent_renders == 0 {
            return Err(ValidationError::generation(
                "max_concurrent_renders must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_validation() {
        let valid = ServerConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = ServerConfig {
            port: 0,
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = ServerConfig {
            host: String::new(),
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = ServerConfig {
            request_timeout_seconds: 0,
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_capture_config_validation() {
        let valid = CaptureConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = CaptureConfig {
            navigation_timeout_ms: 0,
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = CaptureConfig {
            viewport_width: 0,
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_llm_config_validation() {
        let valid = LlmConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = LlmConfig {
            api_url: "not-a-url".into(),
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = LlmConfig {
            temperature: 3.5,
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = LlmConfig {
            model: String::new(),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_generation_config_validation() {
        let valid = GenerationConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = GenerationConfig {
            max_concurrent_renders: 0,
            ..valid
        };
        assert!(invalid.validate().is_err());
    }
}
