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

//! SLIP-39 Shamir's Secret Sharing for Mnemonic Codes.
//!
//! Splits a master secret into one or more groups of mnemonic shares, a
//! threshold of groups and a threshold of members within each group being
//! required to recover it. See [`generate_mnemonics`] and
//! [`combine_mnemonics`] for the two top-level entry points.

#[macro_use]
extern crate lazy_static;

pub mod checksum;
pub mod cipher;
pub mod config;
pub mod error;
pub mod field;
pub mod passphrase;
pub mod shamir;
pub mod util;
pub mod wordlist;

pub use config::ShamirMnemonicConfig;
pub use error::{Error, ErrorKind};
pub use shamir::{generate_mnemonics_random, GroupShare, Share};
pub use util::{OsRandomSource, RandomSource};

use util::fill_vec_rand;

/// Splits `master_secret` into mnemonic shares, drawing randomness from the
/// OS CSPRNG. See [`shamir::generator::generate_mnemonics`] for the
/// injectable-RNG variant used in tests.
#[allow(clippy::too_many_arguments)]
pub fn generate_mnemonics(
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase: Option<&str>,
	extendable: bool,
	iteration_exponent: u8,
) -> Result<Vec<GroupShare>, Error> {
	let mut rng = OsRandomSource;
	shamir::generator::generate_mnemonics(
		&mut rng,
		group_threshold,
		groups,
		master_secret,
		passphrase,
		extendable,
		iteration_exponent,
	)
}

/// Draws a random `strength_bits`-bit master secret from the OS CSPRNG and
/// splits it into mnemonic shares.
#[allow(clippy::too_many_arguments)]
pub fn generate_mnemonics_with_random_secret(
	group_threshold: u8,
	groups: &[(u8, u8)],
	strength_bits: u16,
	passphrase: Option<&str>,
	extendable: bool,
	iteration_exponent: u8,
) -> Result<Vec<GroupShare>, Error> {
	let mut rng = OsRandomSource;
	shamir::generator::generate_mnemonics_random(
		&mut rng,
		group_threshold,
		groups,
		strength_bits,
		passphrase,
		extendable,
		iteration_exponent,
	)
}

/// Recovers the master secret from a set of mnemonics. See
/// [`shamir::combiner::combine_mnemonics`].
pub fn combine_mnemonics(
	mnemonics: &[String],
	passphrase: Option<&str>,
	extendable: bool,
) -> Result<Vec<u8>, Error> {
	shamir::combiner::combine_mnemonics(mnemonics, passphrase, extendable)
}

/// Fills a fresh vector of `n` bytes from the OS CSPRNG. Exposed as a
/// convenience for callers who want to draw their own master secret outside
/// of [`generate_mnemonics_with_random_secret`].
pub fn random_bytes(n: usize) -> Vec<u8> {
	let mut rng = OsRandomSource;
	fill_vec_rand(&mut rng, n)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn top_level_round_trip() {
		let secret = vec![0x42u8; 16];
		let groups = generate_mnemonics(1, &[(3, 5)], &secret, None, false, 0).unwrap();
		let mnemonics: Vec<String> = groups[0].mnemonic_list_flat().unwrap();
		let recovered = combine_mnemonics(&mnemonics, None, false).unwrap();
		assert_eq!(recovered, secret);
	}

	#[test]
	fn top_level_random_secret_round_trip() {
		let groups =
			generate_mnemonics_with_random_secret(1, &[(2, 3)], 128, None, false, 0).unwrap();
		let mnemonics: Vec<String> = groups[0].mnemonic_list_flat().unwrap();
		let recovered = combine_mnemonics(&mnemonics, None, false).unwrap();
		assert_eq!(recovered.len(), 16);
	}
}
