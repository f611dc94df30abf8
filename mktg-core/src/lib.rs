//! Character-level Markov chain text generation library.
//!
//! This crate provides the full pipeline of a fixed-order character chain:
//! - Training a probability table from a corpus (`model::trainer`)
//! - Weighted sampling helpers with injectable randomness (`model::sampling`)
//! - Text generation from a trained table (`model::generator`)
//! - Configuration values and the crate error taxonomy
//!
//! The trainer and the generator never touch the filesystem. Loading a
//! corpus from disk is done by the `io` collaborator.

/// Probability table, trainer, sampling and generation.
pub mod model;

/// Configuration values shared by the trainer and the generator.
pub mod config;

/// Error taxonomy.
pub mod error;

/// Corpus loading (file to single string).
pub mod io;

pub use config::ChainConfig;
pub use error::{MarkovError, Result};
pub use model::generator::{MarkovChain, generate};
pub use model::sampling::{RngSource, UniformSource};
pub use model::table::{Distribution, ProbabilityTable};
pub use model::trainer::train;
