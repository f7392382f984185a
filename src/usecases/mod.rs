//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates the domain math with port interfaces to implement the
//! engine's workflows. Each use case is a self-contained operation.
//!
//! Use cases:
//! - `DecisionGate`: Confidence/edge pre-conditions + risk clamps around
//!   the Kelly fixed-point engine
//! - `BetPlanner`: Batch evaluation of market snapshots through an
//!   estimator and per-market gates

pub mod bet_planner;
pub mod decision_gate;
