use std::path::PathBuf;

use crate::error::{MarkovError, Result};

/// Default context length (order of the chain).
pub const DEFAULT_CONTEXT_LEN: usize = 4;

/// Default number of characters generated after the seed context.
pub const DEFAULT_OUTPUT_LEN: usize = 500;

/// Default corpus location, relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "./corpus.txt";

/// Parameters of a training + generation run.
///
/// These values are passed explicitly to the trainer and the generator.
///
/// # Invariants
/// - `context_len` is always >= 1
#[derive(Clone, Debug, PartialEq)]
pub struct ChainConfig {
	/// Context length `K` used both to train and to generate.
	context_len: usize,

	/// Number of characters appended after the seed context.
	pub output_len: usize,

	/// Corpus file read by the CLI.
	pub corpus_path: PathBuf,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			context_len: DEFAULT_CONTEXT_LEN,
			output_len: DEFAULT_OUTPUT_LEN,
			corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
		}
	}
}

impl ChainConfig {
	/// Returns the context length `K`.
	pub fn context_len(&self) -> usize {
		self.context_len
	}

	/// Sets the context length.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `context_len` is 0.
	pub fn set_context_len(&mut self, context_len: usize) -> Result<()> {
		if context_len == 0 {
			return Err(MarkovError::InvalidConfiguration(
				"context length must be >= 1".to_owned(),
			));
		}
		self.context_len = context_len;
		Ok(())
	}

	/// Builder-style variant of [`ChainConfig::set_context_len`].
	pub fn with_context_len(mut self, context_len: usize) -> Result<Self> {
		self.set_context_len(context_len)?;
		Ok(self)
	}

	/// Builder-style setter for the output length.
	pub fn with_output_len(mut self, output_len: usize) -> Self {
		self.output_len = output_len;
		self
	}

	/// Builder-style setter for the corpus path.
	pub fn with_corpus_path<P: Into<PathBuf>>(mut self, corpus_path: P) -> Self {
		self.corpus_path = corpus_path.into();
		self
	}
}
