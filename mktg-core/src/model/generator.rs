use std::collections::VecDeque;

use log::{debug, trace};

use super::sampling::{UniformSource, pick_next_char, pick_random_context};
use super::table::ProbabilityTable;
use super::trainer::train;
use crate::config::ChainConfig;
use crate::error::{MarkovError, Result};

/// Generates text from a trained table.
///
/// The seed context is picked uniformly among the table keys, then `n`
/// characters are appended. The result is `K + n` characters long.
///
/// # Errors
/// Returns `EmptyTable` if the table has no context.
pub fn generate<S>(table: &ProbabilityTable, n: usize, source: &mut S) -> Result<String>
where
	S: UniformSource + ?Sized,
{
	let seed = pick_random_context(table, source).ok_or(MarkovError::EmptyTable)?;
	debug!("seed context {:?}", seed);
	Ok(walk(table, seed, n, source))
}

/// Generates text starting from a caller-chosen seed context.
///
/// The seed does not have to be a key of the table; an unknown seed simply
/// produces `n` spaces.
///
/// # Errors
/// - `EmptyTable` if the table has no context
/// - `InvalidConfiguration` if the seed is not exactly `K` characters long
pub fn generate_from_seed<S>(table: &ProbabilityTable, seed: &str, n: usize, source: &mut S) -> Result<String>
where
	S: UniformSource + ?Sized,
{
	if table.is_empty() {
		return Err(MarkovError::EmptyTable);
	}
	let len = seed.chars().count();
	if len != table.context_len() {
		return Err(MarkovError::InvalidConfiguration(format!(
			"seed {:?} has {} chars, expected {}",
			seed,
			len,
			table.context_len()
		)));
	}
	Ok(walk(table, seed, n, source))
}

/// Appends exactly `n` characters after `seed`.
///
/// The current context is the last `K` characters of the output, kept in a
/// rolling window. When the context is not in the table a space is appended
/// and the context is left as it is.
fn walk<S>(table: &ProbabilityTable, seed: &str, n: usize, source: &mut S) -> String
where
	S: UniformSource + ?Sized,
{
	let mut output = String::with_capacity(seed.len() + n);
	output.push_str(seed);

	let mut window: VecDeque<char> = seed.chars().collect();
	let mut context = seed.to_owned();
	let mut off_chain = 0usize;

	for _ in 0..n {
		match table.get(&context).and_then(|row| pick_next_char(row, source.draw())) {
			Some(next_char) => {
				output.push(next_char);
				window.pop_front();
				window.push_back(next_char);
				context = window.iter().collect();
			}
			None => {
				trace!("context {:?} is off-chain, appending a space", context);
				output.push(' ');
				off_chain += 1;
			}
		}
	}

	if off_chain > 0 {
		debug!("{} of {} steps were off-chain", off_chain, n);
	}
	output
}

/// A trained table bundled with the configuration it was trained with.
///
/// Convenient when generating several texts from one corpus.
#[derive(Clone, Debug)]
pub struct MarkovChain {
	config: ChainConfig,
	table: ProbabilityTable,
}

impl MarkovChain {
	/// Trains a chain on `corpus` with `config.context_len()`.
	///
	/// # Errors
	/// Same as [`train`].
	pub fn train(corpus: &str, config: &ChainConfig) -> Result<Self> {
		let table = train(corpus, config.context_len())?;
		Ok(Self { config: config.clone(), table })
	}

	pub fn table(&self) -> &ProbabilityTable {
		&self.table
	}

	pub fn config(&self) -> &ChainConfig {
		&self.config
	}

	/// Generates `config.output_len` characters after a random seed context.
	pub fn generate<S>(&self, source: &mut S) -> Result<String>
	where
		S: UniformSource + ?Sized,
	{
		generate(&self.table, self.config.output_len, source)
	}
}
