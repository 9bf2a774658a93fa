//! Centralized model definitions for all LLM providers

use super::gemini::GeminiModel;
use super::openai::OpenAIModel;
use super::{GeminiService, LlmService, OpenAIService};
use std::sync::Arc;

/// LLM provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl Provider {
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Gemini => "Google Gemini",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Model definition with metadata
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// User-facing model ID (e.g., "gpt-4o-mini")
    pub id: &'static str,
    pub provider: Provider,
    pub description: &'static str,
    /// Factory function to create the service
    pub factory: fn(&str, Option<&str>) -> Result<Arc<dyn LlmService>, String>,
}

/// Get all available model definitions, in order of preference
pub fn all_models() -> &'static [ModelDef] {
    &[
        ModelDef {
            id: "gpt-4o-mini",
            provider: Provider::OpenAI,
            description: "GPT-4o mini (fast, inexpensive)",
            factory: |api_key, gateway| {
                let service = OpenAIService::new(api_key.to_string(), OpenAIModel::GPT4oMini, gateway)
                    .map_err(|e| e.to_string())?;
                Ok(Arc::new(service))
            },
        },
        ModelDef {
            id: "gpt-4o",
            provider: Provider::OpenAI,
            description: "GPT-4o",
            factory: |api_key, gateway| {
                let service = OpenAIService::new(api_key.to_string(), OpenAIModel::GPT4o, gateway)
                    .map_err(|e| e.to_string())?;
                Ok(Arc::new(service))
            },
        },
        ModelDef {
            id: "gemini-2.5-flash",
            provider: Provider::Gemini,
            description: "Gemini 2.5 Flash (fast)",
            factory: |api_key, gateway| {
                let service =
                    GeminiService::new(api_key.to_string(), GeminiModel::Gemini25Flash, gateway)
                        .map_err(|e| e.to_string())?;
                Ok(Arc::new(service))
            },
        },
        ModelDef {
            id: "gemini-2.5-pro",
            provider: Provider::Gemini,
            description: "Gemini 2.5 Pro",
            factory: |api_key, gateway| {
                let service =
                    GeminiService::new(api_key.to_string(), GeminiModel::Gemini25Pro, gateway)
                        .map_err(|e| e.to_string())?;
                Ok(Arc::new(service))
            },
        },
    ]
}
