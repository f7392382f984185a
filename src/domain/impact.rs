//! Log-odds market impact model.
//!
//! Approximates the price response of a liquidity-subsidized automated
//! market maker: a signed bet shifts the quoted probability linearly in
//! log-odds space by `amount / subsidy`, and the logistic maps the shift
//! back to a probability. This is the only module that evaluates
//! transcendental functions; everything downstream relies solely on the
//! monotonicity of the curve.

use super::sizing::{PROB_EPSILON, SizingError};

/// Natural log-odds of a probability: `ln(p / (1 - p))`.
#[inline]
#[must_use]
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Logistic function, the inverse of `logit`.
#[inline]
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Price-response model for a single market with fixed liquidity.
#[derive(Debug, Clone, Copy)]
pub struct ImpactModel {
    /// Liquidity parameter. Larger absorbs more size per unit of movement.
    subsidy: f64,
}

impl ImpactModel {
    /// Creates a model with the given subsidy parameter.
    pub fn new(subsidy: f64) -> Result<Self, SizingError> {
        if !(subsidy > 0.0) || !subsidy.is_finite() {
            return Err(SizingError::NonPositiveSubsidy(subsidy));
        }
        Ok(Self { subsidy })
    }

    /// Returns the subsidy parameter.
    pub fn subsidy(&self) -> f64 {
        self.subsidy
    }

    /// Quoted probability after a signed bet executes.
    ///
    /// Positive amounts push the quote toward 1, negative toward 0, and
    /// zero is the identity. The logistic saturates to exactly 0 or 1 in
    /// double precision once the shift passes ~37, so the output is
    /// clamped to the same open interval `Probability` accepts.
    #[must_use]
    pub fn marginal_probability(&self, market_prob: f64, signed_amount: f64) -> f64 {
        if signed_amount == 0.0 {
            return market_prob;
        }
        sigmoid(logit(market_prob) + signed_amount / self.subsidy)
            .clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
    }

    /// Absolute probability change caused by a signed bet.
    #[must_use]
    pub fn impact_of(&self, market_prob: f64, signed_amount: f64) -> f64 {
        (self.marginal_probability(market_prob, signed_amount) - market_prob).abs()
    }

    /// Largest amount whose absolute impact stays within `max_impact` when
    /// pushing in the given direction.
    ///
    /// The logistic shift inverts exactly: the answer is the subsidy times
    /// the log-odds distance to the shifted target quote. The target is
    /// clamped inside (0, 1) so a cap that would cross an endpoint maps to
    /// the asymptote instead.
    #[must_use]
    pub fn amount_for_impact(&self, market_prob: f64, max_impact: f64, toward_yes: bool) -> f64 {
        let target = if toward_yes {
            (market_prob + max_impact).min(1.0 - PROB_EPSILON)
        } else {
            (market_prob - max_impact).max(PROB_EPSILON)
        };
        self.subsidy * (logit(target) - logit(market_prob)).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amount_is_identity() {
        let model = ImpactModel::new(100.0).unwrap();
        assert_eq!(model.marginal_probability(0.37, 0.0), 0.37);
    }

    #[test]
    fn test_positive_amount_raises_probability() {
        let model = ImpactModel::new(100.0).unwrap();
        let after = model.marginal_probability(0.5, 50.0);
        assert!(after > 0.5, "Expected upward move, got {after}");
    }

    #[test]
    fn test_negative_amount_lowers_probability() {
        let model = ImpactModel::new(100.0).unwrap();
        let after = model.marginal_probability(0.5, -50.0);
        assert!(after < 0.5, "Expected downward move, got {after}");
    }

    #[test]
    fn test_known_shift_value() {
        // sigmoid(logit(0.5) + 1) = sigmoid(1) ≈ 0.731059
        let model = ImpactModel::new(100.0).unwrap();
        let after = model.marginal_probability(0.5, 100.0);
        assert!((after - 0.731_058_578_630_004_9).abs() < 1e-12);
    }

    #[test]
    fn test_saturates_inside_unit_interval() {
        let model = ImpactModel::new(10.0).unwrap();
        let up = model.marginal_probability(0.9, 1_000_000.0);
        let down = model.marginal_probability(0.1, -1_000_000.0);
        assert!(up < 1.0 && up > 0.99);
        assert!(down > 0.0 && down < 0.01);
    }

    #[test]
    fn test_monotone_in_amount() {
        let model = ImpactModel::new(50.0).unwrap();
        let mut prev = 0.0;
        for step in 0..100 {
            let amount = f64::from(step) * 5.0 - 250.0;
            let p = model.marginal_probability(0.4, amount);
            assert!(p > prev, "Not strictly increasing at amount {amount}");
            prev = p;
        }
    }

    #[test]
    fn test_logit_sigmoid_round_trip() {
        for &p in &[0.01, 0.25, 0.5, 0.75, 0.99] {
            assert!((sigmoid(logit(p)) - p).abs() < 1e-12);
        }
    }

    #[test]
    fn test_amount_for_impact_inverts_forward_model() {
        let model = ImpactModel::new(100.0).unwrap();
        let amount = model.amount_for_impact(0.5, 0.1, true);
        let realized = model.impact_of(0.5, amount);
        assert!(
            (realized - 0.1).abs() < 1e-9,
            "Expected impact 0.1, got {realized}"
        );
    }

    #[test]
    fn test_amount_for_impact_downward() {
        let model = ImpactModel::new(100.0).unwrap();
        let amount = model.amount_for_impact(0.3, 0.05, false);
        let after = model.marginal_probability(0.3, -amount);
        assert!((after - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_subsidy() {
        assert!(ImpactModel::new(0.0).is_err());
        assert!(ImpactModel::new(-10.0).is_err());
        assert!(ImpactModel::new(f64::NAN).is_err());
    }
}
