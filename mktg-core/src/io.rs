use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::error::Result;

/// Reads a text file and returns its content as a single string.
///
/// - Reads the whole file
/// - Joins lines with no separator: `\n`, `\r\n` and a lone `\r` all end a
///   line and are dropped, not replaced
///
/// # Errors
/// Returns `MarkovError::Io` if the file cannot be opened or read
/// (including invalid UTF-8). Nothing is returned on a partial read.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<String> {
	let reader = BufReader::new(File::open(&filename)?);
	let corpus = join_lines(reader)?;
	debug!(
		"loaded corpus {} ({} chars)",
		filename.as_ref().display(),
		corpus.chars().count()
	);
	Ok(corpus)
}

/// Concatenates every line of `reader`, stripping line terminators.
pub(crate) fn join_lines<R: BufRead>(mut reader: R) -> Result<String> {
	let mut raw = String::new();
	reader.read_to_string(&mut raw)?;
	Ok(raw.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MarkovError;
	use std::io::Cursor;

	#[test]
	fn lines_are_joined_without_separator() {
		let text = "the cat\nsat on\r\nthe mat\n";
		let joined = join_lines(Cursor::new(text)).unwrap();
		assert_eq!(joined, "the catsat onthe mat");
	}

	#[test]
	fn carriage_returns_end_lines() {
		assert_eq!(join_lines(Cursor::new("abc\rdef\r")).unwrap(), "abcdef");
		assert_eq!(join_lines(Cursor::new("ab\r\rcd\r\nef")).unwrap(), "abcdef");
	}

	#[test]
	fn empty_input_gives_empty_corpus() {
		assert_eq!(join_lines(Cursor::new("")).unwrap(), "");
	}

	#[test]
	fn reads_file_from_disk() {
		let path = std::env::temp_dir().join(format!("mktg-io-{}.txt", std::process::id()));
		std::fs::write(&path, "abc\ndef\n").unwrap();
		let corpus = read_corpus(&path);
		std::fs::remove_file(&path).unwrap();
		assert_eq!(corpus.unwrap(), "abcdef");
	}

	#[test]
	fn missing_file_is_an_io_failure() {
		let path = std::env::temp_dir().join("mktg-io-does-not-exist.txt");
		assert!(matches!(read_corpus(path), Err(MarkovError::Io(_))));
	}
}
