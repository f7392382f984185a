//! Sizing value types: probabilities, configuration, and results.
//!
//! Every sizing request constructs these fresh and discards them once the
//! caller has read its `SizingResult`. Nothing here is shared or mutated
//! across calls, which is what makes the engine freely concurrent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Probabilities closer than this to 0 or 1 denote a resolved market and
/// are rejected: the Kelly odds diverge at the endpoints.
pub const PROB_EPSILON: f64 = 1e-6;

/// Validation failures for sizing inputs and configuration.
///
/// These signal a configuration or upstream bug and are never silently
/// corrected. Recoverable outcomes (no edge, gate rejection, convergence
/// cap) travel through `SizingResult` reason codes instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error("probability {0} must lie strictly inside (0, 1)")]
    ProbabilityOutOfRange(f64),
    #[error("bankroll must be positive, got {0}")]
    NonPositiveBankroll(f64),
    #[error("market_subsidy must be positive, got {0}")]
    NonPositiveSubsidy(f64),
    #[error("min_bet must be non-negative, got {0}")]
    NegativeMinBet(f64),
    #[error("max_bet ({max_bet}) must exceed min_bet ({min_bet})")]
    InvertedBetBounds { min_bet: f64, max_bet: f64 },
    #[error("kelly_fraction must be in (0, 1], got {0}")]
    KellyFractionOutOfRange(f64),
    #[error("max_prob_impact must be in (0, 1], got {0}")]
    ImpactCapOutOfRange(f64),
    #[error("min_probability_diff must be in [0, 1), got {0}")]
    EdgeThresholdOutOfRange(f64),
    #[error("confidence must be in [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),
}

/// A probability strictly inside the open interval (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Validates and wraps a raw probability.
    ///
    /// Values within `PROB_EPSILON` of either endpoint are rejected as
    /// degenerate, as are non-finite values.
    pub fn new(value: f64) -> Result<Self, SizingError> {
        if !value.is_finite() || value < PROB_EPSILON || value > 1.0 - PROB_EPSILON {
            return Err(SizingError::ProbabilityOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability of the complementary outcome.
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Which side of the market a sized bet takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetSide {
    /// Buy the YES outcome, pushing the quote toward 1.
    BuyYes,
    /// Buy the NO outcome, pushing the quote toward 0.
    BuyNo,
    /// No bet placed.
    NoBet,
}

impl std::fmt::Display for BetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuyYes => write!(f, "BUY_YES"),
            Self::BuyNo => write!(f, "BUY_NO"),
            Self::NoBet => write!(f, "NO_BET"),
        }
    }
}

/// The configured bound that determined the final amount, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampReason {
    MinBet,
    MaxBet,
    ImpactLimit,
}

/// Why a request produced `NO_BET` instead of a sized amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Belief and quote coincide, or the implied side has negative Kelly.
    NoEdge,
    /// Estimator confidence below the configured minimum.
    LowConfidence,
    /// Absolute probability edge below the configured minimum.
    EdgeBelowThreshold,
    /// Amount cannot reach the minimum-bet floor within the impact cap.
    BelowMinimumBet,
}

/// Immutable sizing configuration for one market.
///
/// Loaded from `config.toml` or constructed directly by embedding callers.
/// `validate()` must pass before the gate will accept it.
#[derive(Debug, Clone, Deserialize)]
pub struct SizingConfig {
    /// Fraction of full Kelly to take (0.25 = quarter-Kelly).
    #[serde(default = "default_kelly_fraction")]
    pub kelly_fraction: f64,
    /// Smallest placeable bet. Sub-floor recommendations round up or drop.
    #[serde(default)]
    pub min_bet: f64,
    /// Absolute cap on a single bet.
    pub max_bet: f64,
    /// Maximum tolerated absolute change in the quoted probability.
    #[serde(default = "default_max_prob_impact")]
    pub max_prob_impact: f64,
    /// Total capital the Kelly fraction applies to.
    pub bankroll: f64,
    /// Market liquidity parameter. Larger absorbs size with less movement.
    pub market_subsidy: f64,
    /// Minimum estimator confidence required to size at all.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    /// Minimum absolute edge required to size at all.
    #[serde(default = "default_min_probability_diff")]
    pub min_probability_diff: f64,
}

fn default_kelly_fraction() -> f64 {
    0.25
}

fn default_max_prob_impact() -> f64 {
    0.05
}

fn default_min_confidence() -> f64 {
    0.6
}

fn default_min_probability_diff() -> f64 {
    0.05
}

impl SizingConfig {
    /// Checks every configuration invariant, failing fast on the first
    /// violation. NaN fails every comparison and is caught here too.
    pub fn validate(&self) -> Result<(), SizingError> {
        if !(self.kelly_fraction > 0.0 && self.kelly_fraction <= 1.0) {
            return Err(SizingError::KellyFractionOutOfRange(self.kelly_fraction));
        }
        if !(self.min_bet >= 0.0) || !self.min_bet.is_finite() {
            return Err(SizingError::NegativeMinBet(self.min_bet));
        }
        if !(self.max_bet > self.min_bet) {
            return Err(SizingError::InvertedBetBounds {
                min_bet: self.min_bet,
                max_bet: self.max_bet,
            });
        }
        if !(self.max_prob_impact > 0.0 && self.max_prob_impact <= 1.0) {
            return Err(SizingError::ImpactCapOutOfRange(self.max_prob_impact));
        }
        if !(self.bankroll > 0.0) || !self.bankroll.is_finite() {
            return Err(SizingError::NonPositiveBankroll(self.bankroll));
        }
        if !(self.market_subsidy > 0.0) || !self.market_subsidy.is_finite() {
            return Err(SizingError::NonPositiveSubsidy(self.market_subsidy));
        }
        if !(self.min_confidence >= 0.0 && self.min_confidence <= 1.0) {
            return Err(SizingError::ConfidenceOutOfRange(self.min_confidence));
        }
        if !(self.min_probability_diff >= 0.0 && self.min_probability_diff < 1.0) {
            return Err(SizingError::EdgeThresholdOutOfRange(self.min_probability_diff));
        }
        Ok(())
    }
}

/// Output of one sizing request.
#[derive(Debug, Clone, Serialize)]
pub struct SizingResult {
    /// Recommended bet amount in currency units, rounded to whole cents.
    pub bet_amount: f64,
    /// Side the amount applies to; `NO_BET` whenever the amount is zero.
    pub side: BetSide,
    /// Quoted probability the executed bet is expected to leave behind.
    pub expected_resulting_prob: f64,
    /// Absolute probability change the bet causes.
    pub realized_impact: f64,
    /// Signed belief-minus-quote edge at request time.
    pub edge: f64,
    /// Bisection iterations consumed (0 on closed-form paths).
    pub iterations_used: u32,
    /// False only when the iteration cap cut the search short.
    pub converged: bool,
    /// Bound that determined the final amount, if one did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamped_by: Option<ClampReason>,
    /// Present on every `NO_BET` outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
}

impl SizingResult {
    /// A zero-amount result that never reached the fixed-point search.
    pub(crate) fn no_bet(market_prob: f64, edge: f64, reason: SkipReason) -> Self {
        Self {
            bet_amount: 0.0,
            side: BetSide::NoBet,
            expected_resulting_prob: market_prob,
            realized_impact: 0.0,
            edge,
            iterations_used: 0,
            converged: true,
            clamped_by: None,
            skip_reason: Some(reason),
        }
    }

    /// True when the request produced an actionable bet.
    pub fn is_bet(&self) -> bool {
        self.side != BetSide::NoBet && self.bet_amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SizingConfig {
        SizingConfig {
            kelly_fraction: 0.25,
            min_bet: 1.0,
            max_bet: 100.0,
            max_prob_impact: 0.05,
            bankroll: 1000.0,
            market_subsidy: 100.0,
            min_confidence: 0.6,
            min_probability_diff: 0.05,
        }
    }

    #[test]
    fn test_probability_accepts_interior() {
        assert!(Probability::new(0.5).is_ok());
        assert!(Probability::new(0.0001).is_ok());
        assert!(Probability::new(0.9999).is_ok());
    }

    #[test]
    fn test_probability_rejects_endpoints() {
        assert!(Probability::new(0.0).is_err());
        assert!(Probability::new(1.0).is_err());
        assert!(Probability::new(-0.2).is_err());
        assert!(Probability::new(1.5).is_err());
        assert!(Probability::new(f64::NAN).is_err());
    }

    #[test]
    fn test_probability_complement() {
        let p = Probability::new(0.3).unwrap();
        assert!((p.complement().value() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_kelly_fraction() {
        let mut cfg = valid_config();
        cfg.kelly_fraction = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(SizingError::KellyFractionOutOfRange(_))
        ));
        cfg.kelly_fraction = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_rejects_inverted_bounds() {
        let mut cfg = valid_config();
        cfg.max_bet = 0.5; // below min_bet
        assert!(matches!(
            cfg.validate(),
            Err(SizingError::InvertedBetBounds { .. })
        ));
    }

    #[test]
    fn test_config_rejects_non_positive_bankroll() {
        let mut cfg = valid_config();
        cfg.bankroll = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(SizingError::NonPositiveBankroll(_))
        ));
    }

    #[test]
    fn test_config_rejects_non_positive_subsidy() {
        let mut cfg = valid_config();
        cfg.market_subsidy = -5.0;
        assert!(matches!(
            cfg.validate(),
            Err(SizingError::NonPositiveSubsidy(_))
        ));
    }

    #[test]
    fn test_config_rejects_nan() {
        let mut cfg = valid_config();
        cfg.bankroll = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_side_serializes_screaming_snake() {
        let json = serde_json::to_string(&BetSide::BuyYes).unwrap();
        assert_eq!(json, "\"BUY_YES\"");
        let json = serde_json::to_string(&BetSide::NoBet).unwrap();
        assert_eq!(json, "\"NO_BET\"");
    }

    #[test]
    fn test_no_bet_result_shape() {
        let result = SizingResult::no_bet(0.4, 0.1, SkipReason::LowConfidence);
        assert!(!result.is_bet());
        assert_eq!(result.bet_amount, 0.0);
        assert_eq!(result.expected_resulting_prob, 0.4);
        assert_eq!(result.skip_reason, Some(SkipReason::LowConfidence));
    }
}
