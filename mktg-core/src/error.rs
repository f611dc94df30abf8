use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;

/// Errors raised by training, generation and corpus loading.
///
/// Every variant is terminal for the operation that raised it.
/// The two in-algorithm fallbacks of the generator (off-chain space and
/// sampling exhaustion) are not errors and never surface here.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// Training or configuration parameters are incompatible
	/// (context length of zero, corpus too short for a single window...).
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// A hand-built distribution is empty or does not sum to 1.0.
	#[error("invalid distribution for context {context:?}: {reason}")]
	InvalidDistribution {
		context: String,
		reason: String,
	},

	/// Generation was requested from a table with no contexts.
	#[error("cannot generate from an empty probability table")]
	EmptyTable,

	/// The corpus file is missing or unreadable.
	#[error("I/O failure: {0}")]
	Io(#[from] std::io::Error),
}
