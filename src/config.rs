//! Startup configuration read from the environment

use crate::llm::{LlmConfig, ModelRegistry, Provider};
use crate::reply::{
    LlmGenerator, ResponseGenerator, TemplateGenerator, DEFAULT_TIMEOUT, MAX_HISTORY_WINDOW,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("LLM generator selected but no model is available; set {openai}, {gemini} or LLM_GATEWAY")]
    NoModelAvailable {
        openai: &'static str,
        gemini: &'static str,
    },
}

/// Which reply strategy serves coaching turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    #[default]
    Template,
    Llm,
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub port: u16,
    pub generator: GeneratorKind,
    pub history_window: usize,
    pub safety_notice: bool,
    pub llm_timeout: Duration,
    pub llm: LlmConfig,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            generator: GeneratorKind::Template,
            history_window: MAX_HISTORY_WINDOW,
            safety_notice: true,
            llm_timeout: DEFAULT_TIMEOUT,
            llm: LlmConfig::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parse settings through `lookup`. Unset or blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match var("STUDY_ADVISOR_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: "STUDY_ADVISOR_PORT",
                value,
                expected: "a port number",
            })?,
            None => defaults.port,
        };

        let generator = match var("STUDY_ADVISOR_GENERATOR") {
            Some(value) => match value.to_lowercase().as_str() {
                "template" => GeneratorKind::Template,
                "llm" => GeneratorKind::Llm,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "STUDY_ADVISOR_GENERATOR",
                        value,
                        expected: "\"template\" or \"llm\"",
                    })
                }
            },
            None => defaults.generator,
        };

        let history_window = match var("STUDY_ADVISOR_HISTORY_WINDOW") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "STUDY_ADVISOR_HISTORY_WINDOW",
                    value,
                    expected: "a positive integer",
                })?
                .clamp(1, MAX_HISTORY_WINDOW),
            None => defaults.history_window,
        };

        let safety_notice = match var("STUDY_ADVISOR_SAFETY_NOTICE") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                var: "STUDY_ADVISOR_SAFETY_NOTICE",
                value,
                expected: "true or false",
            })?,
            None => defaults.safety_notice,
        };

        let llm_timeout = match var("STUDY_ADVISOR_LLM_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "STUDY_ADVISOR_LLM_TIMEOUT_SECS",
                        value,
                        expected: "a positive number of seconds",
                    })
                }
            },
            None => defaults.llm_timeout,
        };

        Ok(Self {
            port,
            generator,
            history_window,
            safety_notice,
            llm_timeout,
            llm: LlmConfig::from_lookup(&lookup),
        })
    }

    /// Build the configured reply strategy.
    ///
    /// Fails when the LLM strategy is selected and the registry has no
    /// usable model; the template strategy always succeeds.
    pub fn build_generator(
        &self,
        registry: &ModelRegistry,
    ) -> Result<Arc<dyn ResponseGenerator>, ConfigError> {
        match self.generator {
            GeneratorKind::Template => Ok(Arc::new(TemplateGenerator)),
            GeneratorKind::Llm => {
                let service = registry
                    .default_service()
                    .ok_or(ConfigError::NoModelAvailable {
                        openai: Provider::OpenAI.api_key_env_var(),
                        gemini: Provider::Gemini.api_key_env_var(),
                    })?;
                Ok(Arc::new(
                    LlmGenerator::new(service)
                        .with_history_window(self.history_window)
                        .with_safety_notice(self.safety_notice)
                        .with_timeout(self.llm_timeout),
                ))
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AdvisorConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdvisorConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.generator, GeneratorKind::Template);
        assert_eq!(config.history_window, 12);
        assert!(config.safety_notice);
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert!(config.llm.openai_api_key.is_none());
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("STUDY_ADVISOR_PORT", "9090"),
            ("STUDY_ADVISOR_GENERATOR", "LLM"),
            ("STUDY_ADVISOR_HISTORY_WINDOW", "6"),
            ("STUDY_ADVISOR_SAFETY_NOTICE", "off"),
            ("STUDY_ADVISOR_LLM_TIMEOUT_SECS", "15"),
            ("GEMINI_API_KEY", "g-test"),
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.generator, GeneratorKind::Llm);
        assert_eq!(config.history_window, 6);
        assert!(!config.safety_notice);
        assert_eq!(config.llm_timeout, Duration::from_secs(15));
        assert_eq!(config.llm.gemini_api_key.as_deref(), Some("g-test"));
    }

    #[test]
    fn test_history_window_clamped() {
        let wide = config_from(&[("STUDY_ADVISOR_HISTORY_WINDOW", "50")]).unwrap();
        assert_eq!(wide.history_window, 12);
        let zero = config_from(&[("STUDY_ADVISOR_HISTORY_WINDOW", "0")]).unwrap();
        assert_eq!(zero.history_window, 1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = config_from(&[("STUDY_ADVISOR_GENERATOR", "magic")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "STUDY_ADVISOR_GENERATOR",
                ..
            }
        ));
        assert!(config_from(&[("STUDY_ADVISOR_PORT", "eighty")]).is_err());
        assert!(config_from(&[("STUDY_ADVISOR_SAFETY_NOTICE", "maybe")]).is_err());
        assert!(config_from(&[("STUDY_ADVISOR_LLM_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_llm_without_credentials_is_fatal() {
        let config = config_from(&[("STUDY_ADVISOR_GENERATOR", "llm")]).unwrap();
        let registry = ModelRegistry::new(&config.llm);
        let err = config.build_generator(&registry).err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_llm_with_credentials() {
        let config = config_from(&[
            ("STUDY_ADVISOR_GENERATOR", "llm"),
            ("OPENAI_API_KEY", "sk-test"),
        ])
        .unwrap();
        let registry = ModelRegistry::new(&config.llm);
        let generator = config.build_generator(&registry).unwrap();
        assert_eq!(generator.name(), "llm");
        assert_eq!(generator.model_id(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_template_needs_no_credentials() {
        let config = config_from(&[]).unwrap();
        let registry = ModelRegistry::new(&config.llm);
        let generator = config.build_generator(&registry).unwrap();
        assert_eq!(generator.name(), "template");
    }
}
