// Copyright 2019 The Grin Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The fixed 1024-word list and its word⇄index lookup tables.

use std::collections::HashMap;

use crate::error::{Error, ErrorKind};

const WORDLIST_TEXT: &str = include_str!("english.txt");

lazy_static! {
	/// The 1024-word list, in order. Index 0 is "academic", index 1023 is
	/// "zero".
	pub static ref WORDLIST: Vec<String> =
		WORDLIST_TEXT.split_whitespace().map(str::to_owned).collect();

	/// Reverse lookup, lowercase word -> index.
	pub static ref WORD_INDEX_MAP: HashMap<String, usize> = WORDLIST
		.iter()
		.enumerate()
		.map(|(i, w)| (w.clone(), i))
		.collect();
}

/// Number of words in the list. Always 1024.
pub fn len() -> usize {
	WORDLIST.len()
}

/// Looks up a word's index, case-insensitively. Fails with InvalidWord if
/// the word (lowercased) is not in the list.
pub fn index_of(word: &str) -> Result<usize, Error> {
	let lower = word.to_lowercase();
	WORD_INDEX_MAP
		.get(&lower)
		.copied()
		.ok_or_else(|| ErrorKind::InvalidWord(format!("'{}' is not in the word list", word)).into())
}

/// Looks up the word at `index`. Fails with InvalidWord if out of range.
pub fn word_at(index: usize) -> Result<&'static str, Error> {
	WORDLIST
		.get(index)
		.map(String::as_str)
		.ok_or_else(|| ErrorKind::InvalidWord(format!("index {} is out of range", index)).into())
}
