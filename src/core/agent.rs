//! # Agent Configuration
//!
//! Everything the sidebar edits: role prompt, provider, model, web search,
//! temperature and max tokens.
//!
//! The only enforced relationship is provider → model: a model always belongs
//! to the selected provider's catalogue, and choosing a provider clears the
//! model so the user picks again.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ROLE_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
const TEMPERATURE_STEP: f32 = 0.1;

pub const MIN_MAX_TOKENS: u32 = 256;
pub const MAX_MAX_TOKENS: u32 = 8192;
const MAX_TOKENS_STEP: u32 = 256;

const GROQ_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
];

const OPENAI_MODELS: &[&str] = &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "gpt-3.5-turbo"];

/// Simulated backend category.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    #[value(name = "openai")]
    OpenAI,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Groq, Provider::OpenAI];

    pub fn label(self) -> &'static str {
        match self {
            Provider::Groq => "Groq",
            Provider::OpenAI => "OpenAI",
        }
    }

    /// Model catalogue offered for this provider.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            Provider::Groq => GROQ_MODELS,
            Provider::OpenAI => OPENAI_MODELS,
        }
    }

    pub fn offers(self, model: &str) -> bool {
        self.models().contains(&model)
    }

    /// Cycles to the next provider (wraps around)
    pub fn next(self) -> Provider {
        match self {
            Provider::Groq => Provider::OpenAI,
            Provider::OpenAI => Provider::Groq,
        }
    }

    pub fn prev(self) -> Provider {
        // Two providers, so stepping back is the same as stepping forward.
        self.next()
    }

    /// Parses the lowercase config spelling ("groq", "openai").
    pub fn from_name(name: &str) -> Option<Provider> {
        match name.trim().to_ascii_lowercase().as_str() {
            "groq" => Some(Provider::Groq),
            "openai" => Some(Provider::OpenAI),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a model could not be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A model was chosen before any provider.
    NoProvider,
    /// The model is not in the provider's catalogue.
    UnknownModel { provider: Provider, model: String },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoProvider => write!(f, "select a provider first"),
            SelectionError::UnknownModel { provider, model } => {
                write!(f, "{provider} does not offer model '{model}'")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Direction for stepped numeric settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub role_prompt: String,
    provider: Option<Provider>,
    model: Option<String>,
    /// Search on every message until turned off.
    pub web_search: bool,
    /// Search on the next message only.
    pub message_web_search: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            role_prompt: DEFAULT_ROLE_PROMPT.to_string(),
            provider: None,
            model: None,
            web_search: false,
            message_web_search: false,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AgentConfig {
    pub fn provider(&self) -> Option<Provider> {
        self.provider
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Sets the provider and clears any previously chosen model.
    pub fn select_provider(&mut self, provider: Provider) {
        self.provider = Some(provider);
        self.model = None;
    }

    pub fn select_model(&mut self, model: &str) -> Result<(), SelectionError> {
        let provider = self.provider.ok_or(SelectionError::NoProvider)?;
        if !provider.offers(model) {
            return Err(SelectionError::UnknownModel {
                provider,
                model: model.to_string(),
            });
        }
        self.model = Some(model.to_string());
        Ok(())
    }

    /// Provider and model are both selected.
    pub fn is_ready(&self) -> bool {
        self.provider.is_some() && self.model.is_some()
    }

    pub fn search_enabled(&self) -> bool {
        self.web_search || self.message_web_search
    }

    pub fn step_temperature(&mut self, step: Step) {
        let delta = match step {
            Step::Up => TEMPERATURE_STEP,
            Step::Down => -TEMPERATURE_STEP,
        };
        let next = (self.temperature + delta).clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        // Keep one decimal so repeated steps don't accumulate float noise
        self.temperature = (next * 10.0).round() / 10.0;
    }

    pub fn step_max_tokens(&mut self, step: Step) {
        let next = match step {
            Step::Up => self.max_tokens.saturating_add(MAX_TOKENS_STEP),
            Step::Down => self.max_tokens.saturating_sub(MAX_TOKENS_STEP),
        };
        self.max_tokens = next.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS);
    }
}
