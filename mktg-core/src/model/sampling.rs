use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use super::table::{Distribution, ProbabilityTable};

/// Source of uniform random values in [0, 1).
///
/// Both the seed context choice and the per-step character choice draw from
/// it, so a scripted or seeded source makes generation reproducible.
pub trait UniformSource {
	/// Returns a value in [0, 1).
	fn draw(&mut self) -> f64;
}

/// Adapter turning any `rand` generator into a `UniformSource`.
#[derive(Clone, Debug)]
pub struct RngSource<R: Rng> {
	rng: R,
}

impl<R: Rng> RngSource<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RngSource<ThreadRng> {
	/// Thread-local, entropy seeded source.
	pub fn thread() -> Self {
		Self::new(rand::rng())
	}
}

impl RngSource<StdRng> {
	/// Deterministic source for a given seed.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> UniformSource for RngSource<R> {
	fn draw(&mut self) -> f64 {
		self.rng.random::<f64>()
	}
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
	fn draw(&mut self) -> f64 {
		(**self).draw()
	}
}

/// Maps a draw in [0, 1) to an index in `0..len`.
///
/// `len` must be > 0. Out of range draws are clamped.
pub(crate) fn index_from_draw(len: usize, r: f64) -> usize {
	let index = (len as f64 * r).floor();
	if index <= 0.0 { 0 } else { (index as usize).min(len - 1) }
}

/// Picks a context uniformly among all the keys of `table`.
///
/// Returns `None` if the table is empty.
pub fn pick_random_context<'a, S>(table: &'a ProbabilityTable, source: &mut S) -> Option<&'a str>
where
	S: UniformSource + ?Sized,
{
	if table.is_empty() {
		return None;
	}
	let index = index_from_draw(table.len(), source.draw());
	table.contexts().nth(index)
}

/// Weighted choice of the next character for a draw `r` in [0, 1).
///
/// Walks the distribution accumulating probabilities and returns the first
/// character whose running sum is strictly greater than `r`.
///
/// If rounding leaves the running sum at or below `r` after the last entry,
/// the last iterated character is returned. Returns `None` only for an empty
/// distribution.
pub fn pick_next_char(distribution: &Distribution, r: f64) -> Option<char> {
	let mut sum = 0.0;
	let mut last = None;
	for (next_char, probability) in distribution.iter() {
		sum += probability;
		if r < sum {
			return Some(next_char);
		}
		last = Some(next_char);
	}

	// Exhausted by rounding error
	last
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn weighted_pick_follows_running_sum() {
		let table = ProbabilityTable::from_distributions(3, [("xyz", [('a', 0.5), ('b', 0.5)])]).unwrap();
		let distribution = table.get("xyz").unwrap();
		assert_eq!(pick_next_char(distribution, 0.3), Some('a'));
		assert_eq!(pick_next_char(distribution, 0.7), Some('b'));
		assert_eq!(pick_next_char(distribution, 0.0), Some('a'));
		// Boundary: sum must strictly exceed the draw
		assert_eq!(pick_next_char(distribution, 0.5), Some('b'));
	}

	#[test]
	fn exhausted_walk_falls_back_to_last_char() {
		let table = ProbabilityTable::from_distributions(
			1,
			[("q", [('a', 0.1), ('b', 0.2), ('c', 0.7 - 1e-12)])],
		)
		.unwrap();
		let distribution = table.get("q").unwrap();
		assert!(distribution.total() < 1.0);
		assert_eq!(pick_next_char(distribution, 1.0 - 1e-13), Some('c'));
	}

	#[test]
	fn empty_distribution_has_no_pick() {
		let empty = Distribution::from_counts(&std::collections::BTreeMap::new());
		assert_eq!(pick_next_char(&empty, 0.5), None);
	}

	#[test]
	fn index_is_uniform_and_clamped() {
		assert_eq!(index_from_draw(4, 0.0), 0);
		assert_eq!(index_from_draw(4, 0.24), 0);
		assert_eq!(index_from_draw(4, 0.25), 1);
		assert_eq!(index_from_draw(4, 0.99), 3);
		assert_eq!(index_from_draw(4, 1.0), 3);
		assert_eq!(index_from_draw(4, -0.5), 0);
	}

	#[test]
	fn random_context_comes_from_table() {
		let table = ProbabilityTable::from_distributions(
			2,
			[("ab", [('c', 1.0)]), ("bc", [('a', 1.0)]), ("ca", [('b', 1.0)])],
		)
		.unwrap();
		let mut source = RngSource::seeded(7);
		for _ in 0..50 {
			let context = pick_random_context(&table, &mut source).unwrap();
			assert!(table.contains(context));
		}
	}

	#[test]
	fn seeded_sources_repeat() {
		let mut a = RngSource::seeded(42);
		let mut b = RngSource::seeded(42);
		for _ in 0..10 {
			let r = a.draw();
			assert!((0.0..1.0).contains(&r));
			assert_eq!(r, b.draw());
		}
	}
}
