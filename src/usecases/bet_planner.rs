//! Bet Planner - Estimator-to-Gate Orchestration
//!
//! Evaluates market snapshots against a probability estimator and the
//! decision gate, producing one plan per market the estimator formed a
//! view on. A separate order-placement collaborator consumes the plans;
//! this crate never submits anything.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::sizing::{BetSide, SizingConfig, SizingError, SizingResult};
use crate::ports::estimator::{MarketSnapshot, ProbabilityEstimator};

use super::decision_gate::DecisionGate;

/// A sized decision for a single market.
#[derive(Debug, Clone, Serialize)]
pub struct BetPlan {
  /// Market the plan applies to.
  pub market_id: String,
  /// Question text carried through for audit logging.
  pub question: String,
  /// The sizing decision.
  pub result: SizingResult,
}

/// Planner wiring an estimator into per-market decision gates.
pub struct BetPlanner<E: ProbabilityEstimator> {
  estimator: E,
  config: SizingConfig,
}

impl<E: ProbabilityEstimator> BetPlanner<E> {
  /// Create a planner with the given estimator and base configuration.
  pub fn new(estimator: E, config: SizingConfig) -> Self {
    Self { estimator, config }
  }

  /// Evaluate every snapshot, skipping markets the estimator declines.
  ///
  /// Each market's subsidy overrides the configured default, so one
  /// planner serves markets of different depth.
  pub fn plan(&self, markets: &[MarketSnapshot]) -> Result<Vec<BetPlan>, SizingError> {
    let mut plans = Vec::with_capacity(markets.len());

    for market in markets {
      let Some(estimate) = self.estimator.estimate(market) else {
        debug!(market = %market.id, "Estimator declined, skipping market");
        continue;
      };

      let mut config = self.config.clone();
      config.market_subsidy = market.subsidy;

      let gate = DecisionGate::new(config)?;
      let result = gate.size_bet(estimate.true_prob, market.market_prob, estimate.confidence)?;

      if result.side == BetSide::NoBet {
        debug!(
          market = %market.id,
          reason = ?result.skip_reason,
          "No bet"
        );
      } else {
        info!(
          market = %market.id,
          side = %result.side,
          amount = result.bet_amount,
          impact = result.realized_impact,
          iterations = result.iterations_used,
          "Bet sized"
        );
      }

      plans.push(BetPlan {
        market_id: market.id.clone(),
        question: market.question.clone(),
        result,
      });
    }

    Ok(plans)
  }
}
