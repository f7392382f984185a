//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. All sizing and
//! gating parameters are externalized here - nothing is hardcoded in the
//! domain layer, and there is no process-wide mutable settings object:
//! callers receive a validated `SizingConfig` value per invocation.

pub mod loader;

use serde::Deserialize;

use crate::domain::sizing::SizingConfig;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated before
/// any sizing begins.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Engine identity and metadata.
  pub bot: BotConfig,
  /// Sizing and gating parameters.
  pub sizing: SizingConfig,
}

/// Engine identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Human-readable engine name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Enable dry-run mode (plans logged, never acted on).
  #[serde(default)]
  pub dry_run: bool,
}

fn default_log_level() -> String {
  "info".to_string()
}
