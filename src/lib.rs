//! Manifold Kelly Engine — Library Root
//!
//! Market-impact-aware fractional Kelly sizing for binary prediction
//! markets. Re-exports the sizing entry points for integration tests,
//! benchmarks, and embedding callers.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;

pub use domain::impact::ImpactModel;
pub use domain::kelly::KellyEngine;
pub use domain::sizing::{
    BetSide, ClampReason, Probability, SizingConfig, SizingError, SizingResult, SkipReason,
};
pub use usecases::decision_gate::{DecisionGate, size_bet};
