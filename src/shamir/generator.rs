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

//! Two-level split: master secret -> encrypted master secret -> group
//! shares -> member shares -> mnemonics.

use std::fmt;

use crate::cipher::feistel::Feistel;
use crate::config::ShamirMnemonicConfig;
use crate::error::{Error, ErrorKind};
use crate::passphrase;
use crate::shamir::share::Share;
use crate::shamir::sss;
use crate::util::{fill_vec_rand, OsRandomSource, RandomSource};

/// One group's share of the master secret: the group's own threshold and
/// member shares, plus the header fields shared by every share in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupShare {
	pub group_id: u16,
	pub extendable: bool,
	pub iteration_exponent: u8,
	pub group_index: u8,
	pub group_threshold: u8,
	pub group_count: u8,
	pub member_threshold: u8,
	pub member_shares: Vec<Share>,
}

impl fmt::Display for GroupShare {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(
			f,
			"Group {} of {} - {} of {} shares required:",
			self.group_index + 1,
			self.group_count,
			self.member_threshold,
			self.member_shares.len()
		)?;
		for s in &self.member_shares {
			for w in s.to_mnemonic().unwrap_or_default() {
				write!(f, "{} ", w)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

impl GroupShare {
	/// Encodes every member share in this group to its mnemonic words.
	pub fn mnemonic_list(&self) -> Result<Vec<Vec<String>>, Error> {
		self.member_shares.iter().map(Share::to_mnemonic).collect()
	}

	/// Same, as space-joined strings.
	pub fn mnemonic_list_flat(&self) -> Result<Vec<String>, Error> {
		self.member_shares
			.iter()
			.map(|s| s.to_mnemonic().map(|w| w.join(" ")))
			.collect()
	}
}

/// Splits `master_secret` into mnemonic shares across `groups.len()` groups,
/// `group_threshold` of which are required to recombine.
///
/// `groups` is a list of `(member_threshold, member_count)` pairs, one per
/// group. A member threshold of 1 requires a member count of exactly 1 (a
/// single-share group can't meaningfully have more than one share, since
/// every member share would just equal the group secret).
pub fn generate_mnemonics(
	rng: &mut dyn RandomSource,
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase_in: Option<&str>,
	extendable: bool,
	iteration_exponent: u8,
) -> Result<Vec<GroupShare>, Error> {
	let config = ShamirMnemonicConfig::new();

	if master_secret.len() * 8 < config.min_strength_bits as usize {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"master secret length ({} bytes) must be at least {} bytes",
			master_secret.len(),
			(f64::from(config.min_strength_bits) / 8f64).ceil(),
		)))?;
	}
	if master_secret.len() % 2 != 0 {
		return Err(ErrorKind::InvalidConfiguration(
			"master secret length in bytes must be even".to_string(),
		))?;
	}
	if iteration_exponent >= 16 {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"iteration exponent {} is out of range [0, 16)",
			iteration_exponent
		)))?;
	}
	if groups.is_empty() || groups.len() > config.max_share_count as usize {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"group count must be between 1 and {}",
			config.max_share_count
		)))?;
	}
	if group_threshold == 0 || group_threshold as usize > groups.len() {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"group threshold ({}) must not exceed the number of groups ({})",
			group_threshold,
			groups.len()
		)))?;
	}
	for &(member_threshold, member_count) in groups {
		if member_threshold == 1 && member_count != 1 {
			return Err(ErrorKind::InvalidConfiguration(
				"a group with a member threshold of 1 must have exactly 1 member".to_string(),
			))?;
		}
		if member_threshold > member_count {
			return Err(ErrorKind::InvalidConfiguration(format!(
				"member threshold ({}) must not exceed member count ({})",
				member_threshold, member_count
			)))?;
		}
	}

	let identifier = fill_vec_rand(rng, 2)
		.iter()
		.fold(0u16, |acc, b| (acc << 8) | u16::from(*b))
		& ((1u16 << config.id_length_bits) - 1);

	let normalized_passphrase = passphrase::normalize(passphrase_in)?;
	let cipher = Feistel::new();
	let encrypted_master_secret = cipher.encrypt(
		master_secret,
		&normalized_passphrase,
		iteration_exponent,
		identifier,
		extendable,
	);

	let group_count = groups.len() as u8;
	let group_points = sss::split_secret(
		rng,
		group_threshold,
		group_count,
		&encrypted_master_secret,
	)?;

	let mut retval = Vec::with_capacity(group_points.len());
	for (group_index, group_secret) in group_points {
		let (member_threshold, member_count) = groups[group_index as usize];
		let member_points = sss::split_secret(rng, member_threshold, member_count, &group_secret)?;

		let mut member_shares = Vec::with_capacity(member_points.len());
		for (member_index, share_value) in member_points {
			member_shares.push(Share::new(
				identifier,
				extendable,
				iteration_exponent,
				group_index,
				group_threshold,
				group_count,
				member_index,
				member_threshold,
				share_value,
			)?);
		}

		retval.push(GroupShare {
			group_id: identifier,
			extendable,
			iteration_exponent,
			group_index,
			group_threshold,
			group_count,
			member_threshold,
			member_shares,
		});
	}

	Ok(retval)
}

/// Same as [`generate_mnemonics`], but draws a random master secret of
/// `strength_bits` bits instead of taking one as input.
pub fn generate_mnemonics_random(
	rng: &mut dyn RandomSource,
	group_threshold: u8,
	groups: &[(u8, u8)],
	strength_bits: u16,
	passphrase_in: Option<&str>,
	extendable: bool,
	iteration_exponent: u8,
) -> Result<Vec<GroupShare>, Error> {
	let config = ShamirMnemonicConfig::new();
	if strength_bits < config.min_strength_bits {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"requested master secret strength ({} bits) must be at least {} bits",
			strength_bits, config.min_strength_bits,
		)))?;
	}
	if strength_bits % 16 != 0 {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"requested master secret strength ({} bits) must be a multiple of 16 bits",
			strength_bits,
		)))?;
	}
	let master_secret = fill_vec_rand(rng, strength_bits as usize / 8);
	generate_mnemonics(
		rng,
		group_threshold,
		groups,
		&master_secret,
		passphrase_in,
		extendable,
		iteration_exponent,
	)
}

/// Convenience entry points backed by the OS CSPRNG.
pub fn generate_mnemonics_with_os_rng(
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase_in: Option<&str>,
	extendable: bool,
	iteration_exponent: u8,
) -> Result<Vec<GroupShare>, Error> {
	let mut rng = OsRandomSource;
	generate_mnemonics(
		&mut rng,
		group_threshold,
		groups,
		master_secret,
		passphrase_in,
		extendable,
		iteration_exponent,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::test_support::FixedRandomSource;

	fn rng() -> FixedRandomSource {
		FixedRandomSource::new((0..=255u8).collect())
	}

	#[test]
	fn rejects_short_master_secret() {
		let mut rng = rng();
		assert!(generate_mnemonics(&mut rng, 1, &[(3, 5)], &[0u8; 8], None, false, 0).is_err());
	}

	#[test]
	fn rejects_odd_length_master_secret() {
		let mut rng = rng();
		assert!(generate_mnemonics(&mut rng, 1, &[(3, 5)], &[0u8; 17], None, false, 0).is_err());
	}

	#[test]
	fn rejects_group_threshold_over_group_count() {
		let mut rng = rng();
		let secret = [0u8; 16];
		assert!(generate_mnemonics(&mut rng, 3, &[(2, 3), (2, 3)], &secret, None, false, 0).is_err());
	}

	#[test]
	fn rejects_single_threshold_group_with_multiple_members() {
		let mut rng = rng();
		let secret = [0u8; 16];
		assert!(generate_mnemonics(&mut rng, 1, &[(1, 2)], &secret, None, false, 0).is_err());
	}

	#[test]
	fn produces_requested_shape() {
		let mut rng = rng();
		let secret = [0x42u8; 16];
		let groups = generate_mnemonics(&mut rng, 2, &[(3, 5), (2, 3)], &secret, None, false, 0).unwrap();
		assert_eq!(groups.len(), 2);
		assert_eq!(groups[0].member_shares.len(), 5);
		assert_eq!(groups[1].member_shares.len(), 3);
		assert_eq!(groups[0].group_threshold, 2);
		assert_eq!(groups[0].group_count, 2);
		let ids: std::collections::HashSet<u16> =
			groups.iter().map(|g| g.group_id).collect();
		assert_eq!(ids.len(), 1);
	}

	#[test]
	fn random_master_secret_rejects_bad_strength() {
		let mut rng = rng();
		assert!(generate_mnemonics_random(&mut rng, 1, &[(3, 5)], 64, None, false, 0).is_err());
		assert!(generate_mnemonics_random(&mut rng, 1, &[(3, 5)], 129, None, false, 0).is_err());
	}

	#[test]
	fn random_master_secret_produces_requested_member_count() {
		let mut rng = rng();
		let groups =
			generate_mnemonics_random(&mut rng, 1, &[(3, 5)], 128, None, false, 0).unwrap();
		assert_eq!(groups[0].member_shares.len(), 5);
	}
}
