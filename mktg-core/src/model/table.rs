use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};

/// Tolerance used when checking that a distribution sums to 1.0.
pub const SUM_EPSILON: f64 = 1e-9;

/// Probabilities of the characters observed after one context.
///
/// Entries are kept ordered by character, so iteration (and therefore the
/// weighted sampling walk) is stable from one run to the next.
///
/// # Invariants
/// - Never empty once built by the trainer
/// - Every probability is in [0, 1] and the total is 1.0 (within `SUM_EPSILON`)
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct Distribution {
	/// Example: { 'a' => 0.75, 'e' => 0.25 }
	probabilities: BTreeMap<char, f64>,
}

impl Distribution {
	/// Converts raw occurrence counts into probabilities.
	///
	/// Each count is divided by the total of the row. Must only be called
	/// once all counts for the context are final.
	pub(crate) fn from_counts(counts: &BTreeMap<char, usize>) -> Self {
		let total: usize = counts.values().sum();
		let probabilities = counts
			.iter()
			.map(|(next_char, count)| (*next_char, *count as f64 / total as f64))
			.collect();
		Self { probabilities }
	}

	/// Returns the probability of `next_char`, if it was observed.
	pub fn get(&self, next_char: char) -> Option<f64> {
		self.probabilities.get(&next_char).copied()
	}

	/// Iterates over `(char, probability)` pairs in ascending char order.
	pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
		self.probabilities.iter().map(|(c, p)| (*c, *p))
	}

	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// Sum of every probability in the row.
	pub fn total(&self) -> f64 {
		self.probabilities.values().sum()
	}
}

impl fmt::Display for Distribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (next_char, probability)) in self.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}={:?}", next_char, probability)?;
		}
		write!(f, "}}")
	}
}

/// Trained lookup table from a context (exactly `K` characters) to the
/// distribution of the character that follows it.
///
/// The table is built once and is read-only afterwards. It can be shared
/// between several generation calls.
///
/// # Invariants
/// - `context_len` >= 1
/// - Every key is exactly `context_len` characters long
/// - Every distribution is non-empty and sums to 1.0
///
/// Deserialization goes through [`ProbabilityTable::from_distributions`],
/// so a decoded table upholds the same invariants as a trained one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawTable")]
pub struct ProbabilityTable {
	/// Context length `K` the table was built with.
	context_len: usize,

	/// Context -> next character distribution.
	contexts: BTreeMap<String, Distribution>,
}

/// Unchecked wire shape of a `ProbabilityTable`.
#[derive(Deserialize)]
struct RawTable {
	context_len: usize,
	contexts: BTreeMap<String, BTreeMap<char, f64>>,
}

impl TryFrom<RawTable> for ProbabilityTable {
	type Error = MarkovError;

	fn try_from(raw: RawTable) -> Result<Self> {
		Self::from_distributions(raw.context_len, raw.contexts)
	}
}

impl ProbabilityTable {
	pub(crate) fn new(context_len: usize, contexts: BTreeMap<String, Distribution>) -> Self {
		Self { context_len, contexts }
	}

	/// Builds a table from already normalized rows.
	///
	/// Useful to replay a known table or to drive the generator in tests.
	///
	/// # Errors
	/// - `InvalidConfiguration` if `context_len` is 0 or a key is not
	///   `context_len` characters long
	/// - `InvalidDistribution` if a row is empty, holds a probability outside
	///   [0, 1], or does not sum to 1.0
	pub fn from_distributions<I, S, D>(context_len: usize, rows: I) -> Result<Self>
	where
		I: IntoIterator<Item = (S, D)>,
		S: Into<String>,
		D: IntoIterator<Item = (char, f64)>,
	{
		if context_len == 0 {
			return Err(MarkovError::InvalidConfiguration(
				"context length must be >= 1".to_owned(),
			));
		}

		let mut contexts = BTreeMap::new();
		for (context, row) in rows {
			let context: String = context.into();
			let len = context.chars().count();
			if len != context_len {
				return Err(MarkovError::InvalidConfiguration(format!(
					"context {:?} has {} chars, expected {}",
					context, len, context_len
				)));
			}

			let probabilities: BTreeMap<char, f64> = row.into_iter().collect();
			let invalid = |reason: String| MarkovError::InvalidDistribution {
				context: context.clone(),
				reason,
			};
			if probabilities.is_empty() {
				return Err(invalid("no next character".to_owned()));
			}
			if let Some((c, p)) = probabilities.iter().find(|(_, p)| !(0.0..=1.0).contains(*p)) {
				return Err(invalid(format!("probability {} for {:?} is outside [0, 1]", p, c)));
			}
			let distribution = Distribution { probabilities };
			let total = distribution.total();
			if (total - 1.0).abs() > SUM_EPSILON {
				return Err(invalid(format!("probabilities sum to {}", total)));
			}

			contexts.insert(context, distribution);
		}

		Ok(Self { context_len, contexts })
	}

	/// Returns the context length `K`.
	pub fn context_len(&self) -> usize {
		self.context_len
	}

	/// Returns the distribution following `context`, if it was trained.
	pub fn get(&self, context: &str) -> Option<&Distribution> {
		self.contexts.get(context)
	}

	pub fn contains(&self, context: &str) -> bool {
		self.contexts.contains_key(context)
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Context keys in ascending order.
	pub fn contexts(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
		self.contexts.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Distribution)> + '_ {
		self.contexts.iter().map(|(k, v)| (k.as_str(), v))
	}
}

/// One-line dump: `{abc={a=1.0}, bca={b=1.0}}`.
impl fmt::Display for ProbabilityTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (context, distribution)) in self.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}={}", context, distribution)?;
		}
		write!(f, "}}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_are_normalized() {
		let counts = BTreeMap::from([('a', 3), ('e', 1)]);
		let distribution = Distribution::from_counts(&counts);
		assert_eq!(distribution.get('a'), Some(0.75));
		assert_eq!(distribution.get('e'), Some(0.25));
		assert_eq!(distribution.get('z'), None);
		assert_eq!(distribution.total(), 1.0);
	}

	#[test]
	fn rows_are_validated() {
		let table = ProbabilityTable::from_distributions(3, [("xyz", [('a', 0.5), ('b', 0.5)])]).unwrap();
		assert_eq!(table.len(), 1);
		assert_eq!(table.context_len(), 3);
		assert!(table.contains("xyz"));

		let wrong_len = ProbabilityTable::from_distributions(3, [("xy", [('a', 1.0)])]);
		assert!(matches!(wrong_len, Err(MarkovError::InvalidConfiguration(_))));

		let bad_sum = ProbabilityTable::from_distributions(3, [("xyz", [('a', 0.5), ('b', 0.4)])]);
		assert!(matches!(bad_sum, Err(MarkovError::InvalidDistribution { .. })));

		let empty_row = ProbabilityTable::from_distributions(3, [("xyz", Vec::<(char, f64)>::new())]);
		assert!(matches!(empty_row, Err(MarkovError::InvalidDistribution { .. })));

		let negative = ProbabilityTable::from_distributions(3, [("xyz", [('a', 1.5), ('b', -0.5)])]);
		assert!(matches!(negative, Err(MarkovError::InvalidDistribution { .. })));
	}

	#[test]
	fn zero_context_len_is_rejected() {
		let table = ProbabilityTable::from_distributions(0, Vec::<(String, Vec<(char, f64)>)>::new());
		assert!(matches!(table, Err(MarkovError::InvalidConfiguration(_))));
	}

	#[test]
	fn decoding_keeps_valid_tables() {
		let table = ProbabilityTable::from_distributions(2, [("ab", vec![('c', 0.25), ('d', 0.75)])]).unwrap();
		let bytes = postcard::to_stdvec(&table).unwrap();
		let decoded: ProbabilityTable = postcard::from_bytes(&bytes).unwrap();
		assert_eq!(decoded, table);
	}

	#[test]
	fn decoding_rejects_broken_tables() {
		type Wire = (usize, BTreeMap<String, BTreeMap<char, f64>>);
		let decode = |wire: Wire| {
			let bytes = postcard::to_stdvec(&wire).unwrap();
			postcard::from_bytes::<ProbabilityTable>(&bytes)
		};

		let row = BTreeMap::from([('a', 1.0)]);
		assert!(decode((0, BTreeMap::new())).is_err());
		assert!(decode((3, BTreeMap::from([("ab".to_owned(), row.clone())]))).is_err());
		assert!(decode((2, BTreeMap::from([("ab".to_owned(), BTreeMap::new())]))).is_err());
		assert!(decode((2, BTreeMap::from([("ab".to_owned(), BTreeMap::from([('a', 0.5)]))]))).is_err());
		assert!(decode((2, BTreeMap::from([("ab".to_owned(), row)]))).is_ok());
	}

	#[test]
	fn display_matches_map_dump() {
		let table = ProbabilityTable::from_distributions(
			2,
			[("ab", vec![('c', 1.0)]), ("bc", vec![('a', 0.5), ('d', 0.5)])],
		)
		.unwrap();
		assert_eq!(table.to_string(), "{ab={c=1.0}, bc={a=0.5, d=0.5}}");
	}
}
