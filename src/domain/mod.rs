//! Domain layer - Core sizing math and value types.
//!
//! This module contains the pure numerical core of the engine.
//! No I/O, no async, no shared state (hexagonal architecture inner ring).
//! Every type is constructed per request and testable in isolation.

pub mod impact;
pub mod kelly;
pub mod sizing;

// Re-export core types for convenience
pub use impact::ImpactModel;
pub use kelly::KellyEngine;
pub use sizing::{
    BetSide, ClampReason, Probability, SizingConfig, SizingError, SizingResult, SkipReason,
};
