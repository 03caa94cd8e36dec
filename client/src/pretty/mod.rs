//! Helpers for pretty-printing decoded prover instructions in a readable, colorized format.

pub mod instruction;
pub mod transaction;
