//! Model registry for managing available LLM providers

use super::{all_models, LlmService, LoggingService, ModelDef, Provider};
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration for LLM providers
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    /// Gateway URL that authenticates upstream on our behalf
    pub gateway: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
}

impl LlmConfig {
    /// Read settings through `lookup`; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: var(Provider::OpenAI.api_key_env_var()),
            gemini_api_key: var(Provider::Gemini.api_key_env_var()),
            gateway: var("LLM_GATEWAY"),
            default_model: var("DEFAULT_MODEL"),
        }
    }
}

/// Registry of available LLM models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: Option<String>,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();

        for model_def in all_models() {
            if let Some(service) = Self::try_create_model(model_def, config) {
                services.insert(model_def.id.to_string(), service);
            }
        }

        // An explicit default wins only if it is actually available
        let default_model = config
            .default_model
            .clone()
            .filter(|id| services.contains_key(id))
            .or_else(|| {
                all_models()
                    .iter()
                    .find(|def| services.contains_key(def.id))
                    .map(|def| def.id.to_string())
            });

        if let Some(requested) = &config.default_model {
            if default_model.as_deref() != Some(requested.as_str()) {
                tracing::warn!(requested = %requested, "Requested default model is not available");
            }
        }

        Self {
            services,
            default_model,
        }
    }

    /// Try to create a model service, validating prerequisites
    fn try_create_model(model_def: &ModelDef, config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
        // In gateway mode, use "implicit" as the API key
        let api_key = if config.gateway.is_some() {
            "implicit".to_string()
        } else {
            match model_def.provider {
                Provider::OpenAI => config.openai_api_key.as_ref()?,
                Provider::Gemini => config.gemini_api_key.as_ref()?,
            }
            .clone()
        };

        match (model_def.factory)(&api_key, config.gateway.as_deref()) {
            Ok(service) => Some(Arc::new(LoggingService::new(service))),
            Err(e) => {
                tracing::warn!(model = model_def.id, error = %e, "Failed to create model service");
                None
            }
        }
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default_service(&self) -> Option<Arc<dyn LlmService>> {
        self.default_model.as_deref().and_then(|id| self.get(id))
    }

    pub fn default_model_id(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// List all available model IDs
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }

    /// Definitions of the available models, in order of preference
    pub fn available_model_defs(&self) -> Vec<&'static ModelDef> {
        all_models()
            .iter()
            .filter(|def| self.services.contains_key(def.id))
            .collect()
    }

    pub fn has_models(&self) -> bool {
        !self.services.is_empty()
    }
}
