//! Manifold Kelly Engine — Demo Entry Point
//!
//! Sizes a single bet from command-line inputs against the configured
//! bankroll and risk limits, printing the decision as JSON.
//!
//! Usage:
//!   manifold-kelly-engine <true_prob> <market_prob> <confidence> [subsidy]
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build a static estimator from the CLI belief/confidence
//! 4. Plan the bet through the decision gate
//! 5. Print the sizing result as JSON

use anyhow::{Context, Result, bail};
use tracing::info;

mod config;
mod domain;
mod ports;
mod usecases;

use domain::sizing::Probability;
use ports::estimator::{Estimate, MarketSnapshot, StaticEstimator};
use usecases::bet_planner::BetPlanner;

fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.bot.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        dry_run = config.bot.dry_run,
        "Starting Kelly sizing engine"
    );

    // ── 3. Parse the sizing request from CLI args ───────────
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: manifold-kelly-engine <true_prob> <market_prob> <confidence> [subsidy]");
    }

    let true_prob = Probability::new(
        args[0]
            .parse()
            .context("true_prob must be a number in (0, 1)")?,
    )?;
    let market_prob = Probability::new(
        args[1]
            .parse()
            .context("market_prob must be a number in (0, 1)")?,
    )?;
    let confidence: f64 = args[2].parse().context("confidence must be a number")?;
    let subsidy: f64 = match args.get(3) {
        Some(raw) => raw.parse().context("subsidy must be a number")?,
        None => config.sizing.market_subsidy,
    };

    // ── 4. Plan the bet through the decision gate ───────────
    let estimator = StaticEstimator::new(Estimate {
        true_prob,
        confidence,
    });
    let planner = BetPlanner::new(estimator, config.sizing.clone());
    let markets = vec![MarketSnapshot {
        id: "cli".to_string(),
        question: "Command-line sizing request".to_string(),
        market_prob,
        subsidy,
    }];
    let plans = planner.plan(&markets)?;

    // ── 5. Print the sizing result ──────────────────────────
    for plan in &plans {
        println!("{}", serde_json::to_string_pretty(&plan.result)?);
    }

    Ok(())
}
