//! Process configuration
//!
//! Built once at startup from the environment (and an optional `.env` file),
//! then handed explicitly to the relay client and the router state.

use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Generation parameters sent alongside a model name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPreset {
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

/// Fixed table of supported models plus the one used for unknown requests.
#[derive(Debug, Clone)]
pub struct ModelPresets {
    default_model: String,
    presets: BTreeMap<String, ModelPreset>,
}

impl ModelPresets {
    /// Build a table. The default model must be present in `presets`.
    pub fn new(
        default_model: impl Into<String>,
        presets: BTreeMap<String, ModelPreset>,
    ) -> crate::Result<Self> {
        let default_model = default_model.into();
        if !presets.contains_key(&default_model) {
            return Err(crate::Error::Invariant(format!(
                "default model '{}' has no preset",
                default_model
            )));
        }
        Ok(Self {
            default_model,
            presets,
        })
    }

    pub fn builtin() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(
            "gpt-5-mini".to_string(),
            ModelPreset {
                max_output_tokens: 4096,
                temperature: 0.2,
                top_p: 0.8,
            },
        );
        presets.insert(
            "gpt-4o".to_string(),
            ModelPreset {
                max_output_tokens: 3072,
                temperature: 0.6,
                top_p: 0.9,
            },
        );
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            presets,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Resolve a requested model name to a supported model and its preset.
    ///
    /// Unknown or missing names fall back to the default model.
    pub fn resolve(&self, requested: Option<&str>) -> (&str, ModelPreset) {
        if let Some((name, preset)) = requested.and_then(|m| self.presets.get_key_value(m)) {
            return (name.as_str(), *preset);
        }

        if let Some(model) = requested {
            tracing::warn!(
                "Unsupported model requested: {}. Falling back to {}",
                model,
                self.default_model
            );
        }

        let preset = self.presets[&self.default_model];
        (self.default_model.as_str(), preset)
    }
}

impl Default for ModelPresets {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` keeps the server up but makes every analysis call fail fast.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub presets: ModelPresets,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; /analyze requests will be rejected");
        }

        Self {
            openai_api_key,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            presets: ModelPresets::builtin(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai_base_url = base_url.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            presets: ModelPresets::builtin(),
        }
    }
}
