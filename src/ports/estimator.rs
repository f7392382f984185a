//! Probability Estimator Port - Decision-Maker Capability
//!
//! The sizing core consumes a belief (true probability) and a confidence
//! from whatever produces them: rule-based heuristics, ensembles, or an
//! LLM analyst. This trait is that single seam. Implementations live with
//! the adapters that own their transports; only the trivial fixed-value
//! estimator ships here for wiring tests and the demo binary.

use crate::domain::sizing::Probability;

/// Immutable view of one market, as supplied by a market-data collaborator.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
  /// Platform market identifier.
  pub id: String,
  /// Market question text, context for estimators that read it.
  pub question: String,
  /// Current quoted probability.
  pub market_prob: Probability,
  /// Liquidity subsidy parameter for this market.
  pub subsidy: f64,
}

/// A belief about a market outcome, with the estimator's own confidence.
#[derive(Debug, Clone, Copy)]
pub struct Estimate {
  /// Estimated true probability of the YES outcome.
  pub true_prob: Probability,
  /// Confidence in the estimate, in [0, 1].
  pub confidence: f64,
}

/// Capability producing probability estimates for markets.
///
/// Returning `None` means the estimator declines to form a view and the
/// caller skips the market entirely.
pub trait ProbabilityEstimator: Send + Sync {
  /// Form a belief about the given market.
  fn estimate(&self, market: &MarketSnapshot) -> Option<Estimate>;
}

/// Fixed-estimate implementation.
#[derive(Debug, Clone, Copy)]
pub struct StaticEstimator {
  estimate: Estimate,
}

impl StaticEstimator {
  /// Create an estimator that returns the same estimate for every market.
  pub fn new(estimate: Estimate) -> Self {
    Self { estimate }
  }
}

impl ProbabilityEstimator for StaticEstimator {
  fn estimate(&self, _market: &MarketSnapshot) -> Option<Estimate> {
    Some(self.estimate)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_static_estimator_echoes_estimate() {
    let estimate = Estimate {
      true_prob: Probability::new(0.7).unwrap(),
      confidence: 0.8,
    };
    let estimator = StaticEstimator::new(estimate);
    let market = MarketSnapshot {
      id: "m1".to_string(),
      question: "Will it resolve YES?".to_string(),
      market_prob: Probability::new(0.5).unwrap(),
      subsidy: 100.0,
    };
    let out = estimator.estimate(&market).unwrap();
    assert_eq!(out.true_prob.value(), 0.7);
    assert_eq!(out.confidence, 0.8);
  }
}
