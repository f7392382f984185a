//! Decision Gate - Confidence/Edge Thresholds and Risk Clamps
//!
//! Wraps the Kelly fixed-point engine with the pre-conditions that must
//! hold before sizing is attempted and the bound clamps applied to its
//! output, in fixed order:
//! 1. Absolute cap (`max_bet`)
//! 2. Minimum-bet floor (round up only if the floor respects the impact cap)
//! 3. Impact cap (closed-form inversion of the logistic shift)
//! 4. Zero amount becomes NO_BET
//!
//! Rejections are reason-coded results, never errors; only invalid input
//! fails hard.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::domain::impact::ImpactModel;
use crate::domain::kelly::{KellyEngine, SideView};
use crate::domain::sizing::{
  BetSide, ClampReason, Probability, SizingConfig, SizingError, SizingResult, SkipReason,
};

/// Sizing gate for a single market, holding validated configuration.
#[derive(Debug, Clone)]
pub struct DecisionGate {
  config: SizingConfig,
  impact: ImpactModel,
}

impl DecisionGate {
  /// Build a gate from configuration, validating every parameter.
  pub fn new(config: SizingConfig) -> Result<Self, SizingError> {
    config.validate()?;
    let impact = ImpactModel::new(config.market_subsidy)?;
    Ok(Self { config, impact })
  }

  /// The validated configuration this gate enforces.
  pub fn config(&self) -> &SizingConfig {
    &self.config
  }

  /// Size a bet for the given belief, quote, and estimator confidence.
  ///
  /// Fails only on invalid confidence (probabilities are validated at
  /// construction of `Probability`); every rejection path produces a
  /// `NO_BET` result with its reason recorded.
  pub fn size_bet(
    &self,
    true_prob: Probability,
    market_prob: Probability,
    confidence: f64,
  ) -> Result<SizingResult, SizingError> {
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
      return Err(SizingError::ConfidenceOutOfRange(confidence));
    }

    let p = market_prob.value();
    let edge = true_prob.value() - p;

    // Pre-conditions: cheap threshold checks before any iteration.
    if confidence < self.config.min_confidence {
      debug!(
        confidence,
        min = self.config.min_confidence,
        "Confidence below minimum, skipping"
      );
      return Ok(SizingResult::no_bet(p, edge, SkipReason::LowConfidence));
    }
    if edge.abs() < self.config.min_probability_diff {
      debug!(
        edge,
        min = self.config.min_probability_diff,
        "Edge below threshold, skipping"
      );
      return Ok(SizingResult::no_bet(p, edge, SkipReason::EdgeBelowThreshold));
    }

    let Some(view) = SideView::select(true_prob, market_prob) else {
      return Ok(SizingResult::no_bet(p, edge, SkipReason::NoEdge));
    };

    let engine = KellyEngine::new(self.config.kelly_fraction, self.config.bankroll, self.impact);
    let Some(fixed_point) = engine.solve(&view, self.config.bankroll) else {
      return Ok(SizingResult::no_bet(p, edge, SkipReason::NoEdge));
    };

    if !fixed_point.converged {
      warn!(
        amount = fixed_point.amount,
        iterations = fixed_point.iterations,
        "Bisection stopped at iteration cap, using best estimate"
      );
    }

    let mut amount = fixed_point.amount;
    let mut clamped_by = None;
    let mut skip_reason = None;

    // 1. Absolute cap.
    if amount > self.config.max_bet {
      amount = self.config.max_bet;
      clamped_by = Some(ClampReason::MaxBet);
    }

    // 2. Floor: round up to min_bet only when the floor itself respects
    //    the impact cap; a bet that cannot do both is not placed.
    if amount > 0.0 && amount < self.config.min_bet {
      let floor_impact = self.impact.impact_of(view.quote, self.config.min_bet);
      if floor_impact <= self.config.max_prob_impact {
        amount = self.config.min_bet;
      } else {
        amount = 0.0;
        skip_reason = Some(SkipReason::BelowMinimumBet);
      }
      clamped_by = Some(ClampReason::MinBet);
    }

    // 3. Impact cap. The logistic shift inverts exactly, so the binding
    //    amount is closed-form rather than another search. The mirrored
    //    frame always pushes upward.
    if amount > 0.0 {
      let realized = self.impact.impact_of(view.quote, amount);
      if realized > self.config.max_prob_impact {
        let limit = self
          .impact
          .amount_for_impact(view.quote, self.config.max_prob_impact, true);
        if limit < amount {
          amount = limit;
          clamped_by = Some(ClampReason::ImpactLimit);
        }
        // The floor may have become unreachable under the cap.
        if amount < self.config.min_bet {
          amount = 0.0;
          skip_reason = Some(SkipReason::BelowMinimumBet);
        }
      }
    }

    // 4. Settle the final amount in whole cents, never rounding upward
    //    across a bound just applied.
    let bet_amount = round_to_cents(amount);
    let placed = bet_amount > 0.0;

    let marginal = self.impact.marginal_probability(view.quote, bet_amount);
    let expected_resulting_prob = if view.side == BetSide::BuyYes {
      marginal
    } else {
      1.0 - marginal
    };

    Ok(SizingResult {
      bet_amount,
      side: if placed { view.side } else { BetSide::NoBet },
      expected_resulting_prob,
      realized_impact: (marginal - view.quote).abs(),
      edge,
      iterations_used: fixed_point.iterations,
      converged: fixed_point.converged,
      clamped_by,
      skip_reason: if placed {
        None
      } else {
        skip_reason.or(Some(SkipReason::BelowMinimumBet))
      },
    })
  }
}

/// One-shot sizing entry point: validate, gate, and size in a single call.
pub fn size_bet(
  true_prob: Probability,
  market_prob: Probability,
  confidence: f64,
  config: &SizingConfig,
) -> Result<SizingResult, SizingError> {
  DecisionGate::new(config.clone())?.size_bet(true_prob, market_prob, confidence)
}

/// Round a currency amount down to whole cents.
fn round_to_cents(amount: f64) -> f64 {
  Decimal::from_f64(amount)
    .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::ToZero))
    .and_then(|d| d.to_f64())
    .unwrap_or(0.0)
}
