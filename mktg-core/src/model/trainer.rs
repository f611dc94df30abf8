use std::collections::BTreeMap;

use log::debug;

use super::table::{Distribution, ProbabilityTable};
use crate::error::{MarkovError, Result};

/// Builds the probability table of a corpus for a context length `k`.
///
/// Slides a `k`-character window over the corpus one character at a time.
/// Each window is a context and the character right after it is an
/// observation. Windows without a following character are not counted.
///
/// Counts are accumulated first, then every row is normalized in a
/// separate pass so that the totals are final.
///
/// Training is deterministic: the same corpus and `k` always give the same
/// table, bit for bit.
///
/// # Errors
/// Returns `InvalidConfiguration` if `k` is 0 or if the corpus is not longer
/// than `k` characters (no window would have a next character).
pub fn train(corpus: &str, k: usize) -> Result<ProbabilityTable> {
	let chars: Vec<char> = corpus.chars().collect();
	if k == 0 {
		return Err(MarkovError::InvalidConfiguration(
			"context length must be >= 1".to_owned(),
		));
	}
	if k >= chars.len() {
		return Err(MarkovError::InvalidConfiguration(format!(
			"corpus of {} chars is too short for context length {}",
			chars.len(),
			k
		)));
	}

	let mut counts: BTreeMap<String, BTreeMap<char, usize>> = BTreeMap::new();
	let windows = chars.len() - k;
	for i in 0..windows {
		let context: String = chars[i..i + k].iter().collect();
		let next_char = chars[i + k];
		*counts.entry(context).or_default().entry(next_char).or_insert(0) += 1;
	}

	let contexts: BTreeMap<String, Distribution> = counts
		.into_iter()
		.map(|(context, row)| (context, Distribution::from_counts(&row)))
		.collect();

	debug!("trained {} contexts from {} windows (k = {})", contexts.len(), windows, k);

	Ok(ProbabilityTable::new(k, contexts))
}
