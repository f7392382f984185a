//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces the sizing core requires from the outside
//! world. Collaborators (market-data providers, analysis components,
//! order placement) implement these traits; the core never reaches out
//! to a network or storage interface itself.
//!
//! Port categories:
//! - `ProbabilityEstimator`: Decision-maker capability producing a belief
//!   and a confidence for a market snapshot

pub mod estimator;
