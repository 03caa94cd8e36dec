//! Resolves Solana transaction messages into per-instruction program IDs and accounts, and decodes
//! the instructions that target the Polymer prover program.

mod decode;
mod encoded;
mod error;
mod parse;
mod parsed_account;

pub use decode::*;
pub use encoded::*;
pub use error::*;
pub use parse::*;
pub use parsed_account::*;
