//! Contexts that hold the addresses an authority's prover instructions need.

pub mod prover;

pub use prover::ProverContext;
