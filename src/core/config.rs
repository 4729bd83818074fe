//! # Configuration
//!
//! Centralizes startup settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.aurora/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Changes made in the sidebar are never written back.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::simulated::DEFAULT_REPLY_DELAY;
use crate::core::agent::{
    DEFAULT_MAX_TOKENS, DEFAULT_ROLE_PROMPT, DEFAULT_TEMPERATURE, MAX_MAX_TOKENS, MAX_TEMPERATURE,
    MIN_MAX_TOKENS, MIN_TEMPERATURE, Provider,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuroraConfig {
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AgentSection {
    pub role_prompt: Option<String>,
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub web_search: Option<bool>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulationSection {
    pub reply_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiSection {
    pub sidebar_open: Option<bool>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub no_sidebar: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub role_prompt: String,
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub web_search: bool,
    pub temperature: f32,
    pub max_tokens: u32,
    pub reply_delay: Duration,
    pub sidebar_open: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&AuroraConfig::default(), &CliOverrides::default(), |_| None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.aurora/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".aurora").join("config.toml"))
}

/// Load config from `~/.aurora/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AuroraConfig::default()`.
pub fn load_config() -> Result<AuroraConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(AuroraConfig::default());
    };
    load_config_from(&path)
}

/// Load config from an explicit path. Malformed files return `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<AuroraConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AuroraConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AuroraConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Aurora Agent Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [agent]
# role_prompt = "You are a helpful assistant."
# provider = "groq"                  # "groq" or "openai"
# model = "llama-3.3-70b-versatile"  # must be offered by the provider
# web_search = false
# temperature = 0.7                  # 0.0 to 2.0
# max_tokens = 1024                  # 256 to 8192

# [simulation]
# reply_delay_ms = 1000              # Or set AURORA_REPLY_DELAY_MS

# [ui]
# sidebar_open = true
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AuroraConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an explicit environment lookup.
pub fn resolve_with(
    config: &AuroraConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let env_provider = env("AURORA_PROVIDER").and_then(|name| {
        let parsed = Provider::from_name(&name);
        if parsed.is_none() {
            warn!("Ignoring unknown AURORA_PROVIDER '{}'", name);
        }
        parsed
    });

    // Provider: CLI → env → config
    let provider = cli.provider.or(env_provider).or(config.agent.provider);

    // Model: CLI → env → config, then checked against the provider
    let requested_model = cli
        .model
        .clone()
        .or_else(|| env("AURORA_MODEL"))
        .or_else(|| config.agent.model.clone());
    let model = validate_model(provider, requested_model);

    let env_delay = env("AURORA_REPLY_DELAY_MS").and_then(|ms| match ms.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring invalid AURORA_REPLY_DELAY_MS '{}': {}", ms, e);
            None
        }
    });
    let reply_delay = cli
        .reply_delay_ms
        .or(env_delay)
        .or(config.simulation.reply_delay_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REPLY_DELAY);

    ResolvedConfig {
        role_prompt: config
            .agent
            .role_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_ROLE_PROMPT.to_string()),
        provider,
        model,
        web_search: config.agent.web_search.unwrap_or(false),
        temperature: finite_temperature(config.agent.temperature)
            .clamp(MIN_TEMPERATURE, MAX_TEMPERATURE),
        max_tokens: config
            .agent
            .max_tokens
            .unwrap_or(DEFAULT_MAX_TOKENS)
            .clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS),
        reply_delay,
        sidebar_open: !cli.no_sidebar && config.ui.sidebar_open.unwrap_or(true),
    }
}

/// NaN and infinities count as unset; clamp would pass NaN through.
fn finite_temperature(temperature: Option<f32>) -> f32 {
    match temperature {
        Some(t) if t.is_finite() => t,
        Some(t) => {
            warn!("Ignoring non-finite temperature {}", t);
            DEFAULT_TEMPERATURE
        }
        None => DEFAULT_TEMPERATURE,
    }
}

/// Drops a model that the resolved provider does not offer.
fn validate_model(provider: Option<Provider>, model: Option<String>) -> Option<String> {
    let model = model?;
    match provider {
        Some(p) if p.offers(&model) => Some(model),
        Some(p) => {
            warn!("Model '{}' is not offered by {}, ignoring", model, p);
            None
        }
        None => {
            warn!("Model '{}' configured without a provider, ignoring", model);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&AuroraConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.role_prompt, DEFAULT_ROLE_PROMPT);
        assert_eq!(resolved.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(resolved.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(!resolved.web_search);
        assert!(resolved.sidebar_open);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AuroraConfig {
            agent: AgentSection {
                role_prompt: Some("Answer in French.".to_string()),
                provider: Some(Provider::OpenAI),
                model: Some("gpt-4o-mini".to_string()),
                web_search: Some(true),
                temperature: Some(1.2),
                max_tokens: Some(2048),
            },
            simulation: SimulationSection {
                reply_delay_ms: Some(250),
            },
            ui: UiSection {
                sidebar_open: Some(false),
            },
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.role_prompt, "Answer in French.");
        assert_eq!(resolved.provider, Some(Provider::OpenAI));
        assert_eq!(resolved.model.as_deref(), Some("gpt-4o-mini"));
        assert!(resolved.web_search);
        assert_eq!(resolved.temperature, 1.2);
        assert_eq!(resolved.max_tokens, 2048);
        assert_eq!(resolved.reply_delay, Duration::from_millis(250));
        assert!(!resolved.sidebar_open);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = AuroraConfig {
            agent: AgentSection {
                provider: Some(Provider::Groq),
                model: Some("gemma2-9b-it".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            provider: Some(Provider::OpenAI),
            model: Some("gpt-4o".to_string()),
            reply_delay_ms: Some(0),
            no_sidebar: true,
        };
        let resolved = resolve_with(&config, &cli, no_env);
        assert_eq!(resolved.provider, Some(Provider::OpenAI));
        assert_eq!(resolved.model.as_deref(), Some("gpt-4o"));
        assert_eq!(resolved.reply_delay, Duration::ZERO);
        assert!(!resolved.sidebar_open);
    }

    #[test]
    fn test_model_from_other_provider_is_dropped() {
        let cli = CliOverrides {
            provider: Some(Provider::Groq),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with(&AuroraConfig::default(), &cli, no_env);
        assert_eq!(resolved.provider, Some(Provider::Groq));
        assert_eq!(resolved.model, None);
    }

    #[test]
    fn test_model_without_provider_is_dropped() {
        assert_eq!(validate_model(None, Some("gpt-4o".to_string())), None);
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped() {
        let config = AuroraConfig {
            agent: AgentSection {
                temperature: Some(9.0),
                max_tokens: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.temperature, MAX_TEMPERATURE);
        assert_eq!(resolved.max_tokens, MIN_MAX_TOKENS);
    }

    #[test]
    fn test_non_finite_temperature_falls_back_to_default() {
        for temperature in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let config = AuroraConfig {
                agent: AgentSection {
                    temperature: Some(temperature),
                    ..Default::default()
                },
                ..Default::default()
            };
            let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
            assert_eq!(resolved.temperature, DEFAULT_TEMPERATURE);
        }
    }

    #[test]
    fn test_env_overrides_config_file() {
        let config = AuroraConfig {
            agent: AgentSection {
                provider: Some(Provider::Groq),
                model: Some("gemma2-9b-it".to_string()),
                ..Default::default()
            },
            simulation: SimulationSection {
                reply_delay_ms: Some(5000),
            },
            ..Default::default()
        };
        let env = env_of(&[
            ("AURORA_PROVIDER", "openai"),
            ("AURORA_MODEL", "gpt-4o"),
            ("AURORA_REPLY_DELAY_MS", "250"),
        ]);
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.provider, Some(Provider::OpenAI));
        assert_eq!(resolved.model.as_deref(), Some("gpt-4o"));
        assert_eq!(resolved.reply_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = CliOverrides {
            provider: Some(Provider::Groq),
            model: Some("llama-3.3-70b-versatile".to_string()),
            reply_delay_ms: Some(10),
            no_sidebar: false,
        };
        let env = env_of(&[
            ("AURORA_PROVIDER", "openai"),
            ("AURORA_MODEL", "gpt-4o"),
            ("AURORA_REPLY_DELAY_MS", "250"),
        ]);
        let resolved = resolve_with(&AuroraConfig::default(), &cli, env);
        assert_eq!(resolved.provider, Some(Provider::Groq));
        assert_eq!(resolved.model.as_deref(), Some("llama-3.3-70b-versatile"));
        assert_eq!(resolved.reply_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_bad_env_values_fall_back_to_config_file() {
        let config = AuroraConfig {
            agent: AgentSection {
                provider: Some(Provider::Groq),
                ..Default::default()
            },
            simulation: SimulationSection {
                reply_delay_ms: Some(40),
            },
            ..Default::default()
        };
        let env = env_of(&[
            ("AURORA_PROVIDER", "anthropic"),
            ("AURORA_REPLY_DELAY_MS", "soon"),
        ]);
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.provider, Some(Provider::Groq));
        assert_eq!(resolved.reply_delay, Duration::from_millis(40));
    }

    #[test]
    fn test_env_model_is_checked_against_provider() {
        let env = env_of(&[("AURORA_PROVIDER", "groq"), ("AURORA_MODEL", "gpt-4o")]);
        let resolved = resolve_with(&AuroraConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.provider, Some(Provider::Groq));
        assert_eq!(resolved.model, None);
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[agent]
role_prompt = "You are terse."
provider = "openai"
model = "gpt-4-turbo"
temperature = 0.3

[simulation]
reply_delay_ms = 50
"#;
        let config: AuroraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.provider, Some(Provider::OpenAI));
        assert_eq!(config.agent.model.as_deref(), Some("gpt-4-turbo"));
        assert_eq!(config.agent.temperature, Some(0.3));
        assert_eq!(config.simulation.reply_delay_ms, Some(50));
        assert!(config.ui.sidebar_open.is_none());
    }

    #[test]
    fn test_unknown_provider_is_a_parse_error() {
        let toml_str = r#"
[agent]
provider = "anthropic"
"#;
        assert!(toml::from_str::<AuroraConfig>(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("aurora-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.agent.provider.is_none());
        assert!(path.exists());

        // The generated file is entirely commented out, so it parses to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.agent.model.is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = std::env::temp_dir().join(format!("aurora-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[agent\nprovider = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));

        let _ = fs::remove_dir_all(dir);
    }
}
