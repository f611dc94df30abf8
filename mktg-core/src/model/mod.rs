//! Character-level Markov chain model.
//!
//! - Probability table and per-context distributions (`table`)
//! - Training from a corpus (`trainer`)
//! - Weighted and uniform random picks (`sampling`)
//! - Text generation (`generator`)

/// Trained probability table.
///
/// Maps each `K`-character context to the distribution of the character
/// that follows it.
pub mod table;

/// Corpus to probability table.
pub mod trainer;

/// Injectable randomness and the pick helpers used by the generator.
pub mod sampling;

/// Text generation from a trained table.
pub mod generator;
