//! Fixed-point fractional Kelly sizing against the post-trade price.
//!
//! A naive Kelly bet prices its edge at the current quote, but a bet large
//! enough to matter moves the quote before it fills, so the naive amount
//! overstates the edge. The growth-optimal amount is the fixed point
//! between "Kelly-optimal size at the marginal probability" and "the size
//! that produces that marginal probability". The right-hand side shrinks
//! monotonically as the probe grows (more size, worse price), so its
//! crossing with `y = amount` is unique and bisection brackets it.

use super::impact::ImpactModel;
use super::sizing::{BetSide, Probability};

/// Hard cap on bisection iterations. Double precision over any realistic
/// bankroll converges well before this.
pub const MAX_ITERATIONS: u32 = 30;

/// Absolute convergence tolerance in currency units.
const ABS_TOLERANCE: f64 = 0.01;

/// Relative convergence tolerance as a fraction of bankroll.
const REL_TOLERANCE: f64 = 1e-4;

/// Impact below which the naive closed-form bet is returned unmodified.
const NEGLIGIBLE_IMPACT: f64 = 1e-6;

/// Instantaneous fractional-Kelly fraction for a bet at quote `p`.
///
/// `b = 1/p − 1` is the net odds; the fraction is `(b·t − (1 − t)) / b`.
/// Zero when belief and quote coincide, negative when the market already
/// overprices the outcome.
#[must_use]
pub fn naive_kelly_fraction(true_prob: f64, quote: f64) -> f64 {
    let b = 1.0 / quote - 1.0;
    (b * true_prob - (1.0 - true_prob)) / b
}

/// Outcome of a fixed-point search.
#[derive(Debug, Clone, Copy)]
pub struct FixedPoint {
    /// Recommended unclamped bet amount.
    pub amount: f64,
    /// Bisection iterations consumed (0 on the closed-form fast path).
    pub iterations: u32,
    /// Whether the bracket met tolerance before the iteration cap.
    pub converged: bool,
}

/// The side implied by a sizing request plus the mirrored probabilities
/// the search runs on.
///
/// NO bets view the market from the complementary outcome, which keeps the
/// search pushing in a single direction: a positive probe amount always
/// worsens the mirrored quote.
#[derive(Debug, Clone, Copy)]
pub struct SideView {
    /// Side a positive amount buys.
    pub side: BetSide,
    /// Belief probability in the mirrored frame.
    pub true_prob: f64,
    /// Quoted probability in the mirrored frame.
    pub quote: f64,
}

impl SideView {
    /// Picks the side implied by belief vs. quote.
    ///
    /// Equal probabilities have no edge on either side and yield `None`.
    #[must_use]
    pub fn select(true_prob: Probability, market_prob: Probability) -> Option<Self> {
        let t = true_prob.value();
        let p = market_prob.value();
        if t > p {
            Some(Self {
                side: BetSide::BuyYes,
                true_prob: t,
                quote: p,
            })
        } else if t < p {
            Some(Self {
                side: BetSide::BuyNo,
                true_prob: true_prob.complement().value(),
                quote: market_prob.complement().value(),
            })
        } else {
            None
        }
    }
}

/// Kelly sizing engine for a single request.
#[derive(Debug, Clone, Copy)]
pub struct KellyEngine {
    /// Fraction of full Kelly to take.
    fraction: f64,
    /// Capital base the fraction applies to.
    bankroll: f64,
    /// Price-response model for the target market.
    impact: ImpactModel,
}

impl KellyEngine {
    /// Creates an engine. Parameters are validated upstream by
    /// `SizingConfig::validate` and `ImpactModel::new`.
    #[must_use]
    pub fn new(fraction: f64, bankroll: f64, impact: ImpactModel) -> Self {
        Self {
            fraction,
            bankroll,
            impact,
        }
    }

    /// Solves for the impact-consistent fractional Kelly amount on the
    /// mirrored `view`, searching `[0, upper]`.
    ///
    /// Returns `None` when the naive fraction is non-positive: the market
    /// already prices the outcome at or beyond the belief and there is
    /// nothing to search for.
    #[must_use]
    pub fn solve(&self, view: &SideView, upper: f64) -> Option<FixedPoint> {
        let naive = naive_kelly_fraction(view.true_prob, view.quote);
        if naive <= 0.0 {
            return None;
        }

        let naive_amount = (self.fraction * self.bankroll * naive).min(upper);

        // Deep liquidity: the naive bet barely moves the quote, so the
        // fixed point coincides with the closed form.
        if self.impact.impact_of(view.quote, naive_amount) <= NEGLIGIBLE_IMPACT {
            return Some(FixedPoint {
                amount: naive_amount,
                iterations: 0,
                converged: true,
            });
        }

        let tolerance = ABS_TOLERANCE.max(REL_TOLERANCE * self.bankroll);
        let mut low = 0.0_f64;
        let mut high = upper;
        let mut iterations = 0;

        while iterations < MAX_ITERATIONS && high - low > tolerance {
            let mid = 0.5 * (low + high);
            let marginal = self.impact.marginal_probability(view.quote, mid);
            let desired =
                self.fraction * self.bankroll * naive_kelly_fraction(view.true_prob, marginal);
            if desired > mid {
                low = mid;
            } else {
                high = mid;
            }
            iterations += 1;
        }

        Some(FixedPoint {
            amount: 0.5 * (low + high),
            iterations,
            converged: high - low <= tolerance,
        })
    }
}
