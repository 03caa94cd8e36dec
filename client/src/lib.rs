//! Client-side utilities for working with the Polymer prover program.
//!
//! Includes the instruction-building context, pretty-printing utilities, and PDA derivations.

pub mod context;
pub mod logs;
pub mod pda;
pub mod pretty;
pub mod program_ids;

pub use logs::LogColor;
