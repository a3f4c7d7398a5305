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

//! Cryptography and bit-packing utility functions, plus the randomness
//! boundary the rest of the crate draws through.

pub mod bitpacker;

use rand::{thread_rng, Rng, RngCore};

/// Capability used for every random draw in the crate (the random part of
/// a digest, the `T-2` random shares in SSS.split, and the 15-bit group
/// identifier). Letting callers inject this is what makes deterministic
/// test fixtures possible without touching the OS RNG.
pub trait RandomSource {
	fn fill(&mut self, buf: &mut [u8]);
}

/// Default source, backed by the thread-local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
	fn fill(&mut self, buf: &mut [u8]) {
		thread_rng().fill_bytes(buf);
	}
}

/// Fills a new vector of `n` bytes using `rng`.
pub fn fill_vec_rand(rng: &mut dyn RandomSource, n: usize) -> Vec<u8> {
	let mut v = vec![0u8; n];
	rng.fill(&mut v);
	v
}


#[cfg(test)]
mod tests {
	use super::test_support::FixedRandomSource;
	use super::*;

	#[test]
	fn fixed_source_is_deterministic() {
		let mut rng = FixedRandomSource::new(vec![1, 2, 3]);
		let a = fill_vec_rand(&mut rng, 7);
		let mut rng = FixedRandomSource::new(vec![1, 2, 3]);
		let b = fill_vec_rand(&mut rng, 7);
		assert_eq!(a, b);
		assert_eq!(a, vec![1, 2, 3, 1, 2, 3, 1]);
	}

	#[test]
	fn os_source_produces_requested_length() {
		let mut rng = OsRandomSource;
		let v = fill_vec_rand(&mut rng, 16);
		assert_eq!(v.len(), 16);
	}
}
