//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    bankroll = config.sizing.bankroll,
    kelly = config.sizing.kelly_fraction,
    max_impact = config.sizing.max_prob_impact,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// The numeric sizing invariants live with the domain type; this layer
/// adds the file-level checks and wraps everything in one error chain.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.bot.name.is_empty(),
    "Bot name must not be empty"
  );

  config
    .sizing
    .validate()
    .context("Invalid [sizing] section")?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_parse_minimal_config() {
    let raw = r#"
      [bot]
      name = "kelly-engine"

      [sizing]
      max_bet = 250.0
      bankroll = 1000.0
      market_subsidy = 100.0
    "#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.sizing.kelly_fraction, 0.25);
    assert_eq!(config.sizing.max_prob_impact, 0.05);
    assert_eq!(config.sizing.min_confidence, 0.6);
    assert_eq!(config.bot.log_level, "info");
    assert!(config.sizing.validate().is_ok());
  }

  #[test]
  fn test_invalid_sizing_section_rejected() {
    let raw = r#"
      [bot]
      name = "kelly-engine"

      [sizing]
      kelly_fraction = 3.0
      max_bet = 250.0
      bankroll = 1000.0
      market_subsidy = 100.0
    "#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert!(validate_config(&config).is_err());
  }
}
