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

//! Recombination: mnemonics -> member shares -> group shares -> encrypted
//! master secret -> master secret.

use std::collections::BTreeMap;

use crate::cipher::feistel::Feistel;
use crate::error::{Error, ErrorKind};
use crate::passphrase;
use crate::shamir::generator::GroupShare;
use crate::shamir::share::Share;
use crate::shamir::sss;

/// Recovers the master secret from a set of mnemonics.
///
/// Every mnemonic is parsed with the same `extendable` expectation, so
/// callers must already know whether the backup was created in extendable
/// mode (the checksum customization string differs between the two, so a
/// mismatched guess fails with InvalidChecksum on the first share).
pub fn combine_mnemonics(
	mnemonics: &[String],
	passphrase_in: Option<&str>,
	extendable: bool,
) -> Result<Vec<u8>, Error> {
	let groups = decode_mnemonics(mnemonics, extendable)?;

	let mut group_points: Vec<(u8, Vec<u8>)> = Vec::with_capacity(groups.len());
	let group_threshold = groups[0].group_threshold;
	let identifier = groups[0].group_id;
	let iteration_exponent = groups[0].iteration_exponent;

	for g in &groups {
		let member_points: Vec<(u8, Vec<u8>)> = g
			.member_shares
			.iter()
			.map(|s| (s.member_index, s.share_value.clone()))
			.collect();
		let group_secret = sss::recover_secret(&member_points, g.member_threshold)?;
		group_points.push((g.group_index, group_secret));
	}

	let encrypted_master_secret = sss::recover_secret(&group_points, group_threshold)?;

	let normalized_passphrase = passphrase::normalize(passphrase_in)?;
	let cipher = Feistel::new();
	let master_secret = cipher.decrypt(
		&encrypted_master_secret,
		&normalized_passphrase,
		iteration_exponent,
		identifier,
		extendable,
	);

	Ok(master_secret)
}

/// Parses every mnemonic and groups the resulting shares by group index,
/// validating cross-share consistency along the way.
fn decode_mnemonics(mnemonics: &[String], extendable: bool) -> Result<Vec<GroupShare>, Error> {
	if mnemonics.is_empty() {
		return Err(ErrorKind::InvalidShareSet(
			"list of mnemonics is empty".to_string(),
		))?;
	}

	let mut shares = Vec::with_capacity(mnemonics.len());
	for m in mnemonics {
		shares.push(Share::from_mnemonic(extendable, m)?);
	}

	let first = shares[0].clone();
	for s in &shares {
		if s.identifier != first.identifier || s.iteration_exponent != first.iteration_exponent {
			return Err(ErrorKind::InvalidShareSet(
				"all mnemonics must share the same identifier and iteration exponent".to_string(),
			))?;
		}
		if s.group_threshold != first.group_threshold {
			return Err(ErrorKind::InvalidShareSet(
				"all mnemonics must have the same group threshold".to_string(),
			))?;
		}
		if s.group_count != first.group_count {
			return Err(ErrorKind::InvalidShareSet(
				"all mnemonics must have the same group count".to_string(),
			))?;
		}
	}

	let mut by_group: BTreeMap<u8, Vec<Share>> = BTreeMap::new();
	for s in shares {
		by_group.entry(s.group_index).or_default().push(s);
	}

	for (group_index, members) in &by_group {
		let first_member = &members[0];
		for m in members {
			if m.member_threshold != first_member.member_threshold {
				return Err(ErrorKind::InvalidShareSet(format!(
					"mismatching member thresholds in group {}",
					group_index
				)))?;
			}
		}
		let distinct_members: std::collections::HashSet<u8> =
			members.iter().map(|m| m.member_index).collect();
		if distinct_members.len() != members.len() {
			return Err(ErrorKind::InvalidShareSet(format!(
				"duplicate member index in group {}",
				group_index
			)))?;
		}
		if members.len() < first_member.member_threshold as usize {
			return Err(ErrorKind::InvalidShareSet(format!(
				"group {} has {} members, but needs at least {}",
				group_index,
				members.len(),
				first_member.member_threshold
			)))?;
		}
	}

	// Every group still in by_group already met its own member threshold
	// (checked above), so this is just a reshape into GroupShare records.
	let usable_groups: Vec<GroupShare> = by_group
		.into_iter()
		.map(|(group_index, members)| GroupShare {
			group_id: members[0].identifier,
			extendable: members[0].extendable,
			iteration_exponent: members[0].iteration_exponent,
			group_index,
			group_threshold: members[0].group_threshold,
			group_count: members[0].group_count,
			member_threshold: members[0].member_threshold,
			member_shares: members,
		})
		.collect();

	let group_threshold = usable_groups[0].group_threshold;

	// Deliberately an exact match, not a lower bound: presenting more
	// distinct groups than the threshold calls for is itself invalid input,
	// since SSS.recover_secret expects exactly `group_threshold` points.
	if usable_groups.len() != group_threshold as usize {
		return Err(ErrorKind::InvalidShareSet(format!(
			"expected exactly {} usable groups, got {}",
			group_threshold,
			usable_groups.len()
		)))?;
	}

	Ok(usable_groups)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::shamir::generator::generate_mnemonics;
	use crate::util::test_support::FixedRandomSource;

	fn rng() -> FixedRandomSource {
		FixedRandomSource::new((0..=255u8).collect())
	}

	fn flatten(groups: &[GroupShare]) -> Vec<String> {
		groups
			.iter()
			.flat_map(|g| g.mnemonic_list_flat().unwrap())
			.collect()
	}

	#[test]
	fn round_trips_a_single_group() {
		let mut rng = rng();
		let secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups = generate_mnemonics(&mut rng, 1, &[(3, 5)], &secret, None, false, 0).unwrap();
		let mnemonics = flatten(&groups);
		let recovered = combine_mnemonics(&mnemonics, None, false).unwrap();
		assert_eq!(recovered, secret);
	}

	#[test]
	fn round_trips_multiple_groups_with_extras() {
		let mut rng = rng();
		let secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups =
			generate_mnemonics(&mut rng, 2, &[(3, 5), (2, 5), (3, 3)], &secret, None, false, 0)
				.unwrap();
		let mnemonics = flatten(&groups);
		let recovered = combine_mnemonics(&mnemonics, None, false).unwrap();
		assert_eq!(recovered, secret);
	}

	#[test]
	fn too_few_groups_is_an_error() {
		let mut rng = rng();
		let secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups =
			generate_mnemonics(&mut rng, 2, &[(3, 5), (2, 5), (3, 3)], &secret, None, false, 0)
				.unwrap();
		let mnemonics: Vec<String> = groups[0].mnemonic_list_flat().unwrap();
		assert!(combine_mnemonics(&mnemonics, None, false).is_err());
	}

	#[test]
	fn more_groups_than_threshold_is_rejected() {
		let mut rng = rng();
		let secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups =
			generate_mnemonics(&mut rng, 2, &[(3, 5), (2, 5), (3, 3)], &secret, None, false, 0)
				.unwrap();
		let mnemonics = flatten(&groups);
		assert!(combine_mnemonics(&mnemonics, None, false).is_err());
	}

	#[test]
	fn wrong_passphrase_does_not_recover_the_secret() {
		let mut rng = rng();
		let secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups = generate_mnemonics(
			&mut rng,
			1,
			&[(3, 5)],
			&secret,
			Some("correct horse battery staple"),
			false,
			0,
		)
		.unwrap();
		let mnemonics = flatten(&groups);
		let recovered = combine_mnemonics(&mnemonics, Some("wrong"), false).unwrap();
		assert_ne!(recovered, secret);
	}

	#[test]
	fn extendable_flag_must_match() {
		let mut rng = rng();
		let secret = [0u8; 16];
		let groups =
			generate_mnemonics(&mut rng, 1, &[(3, 5)], &secret, None, true, 0).unwrap();
		let mnemonics = flatten(&groups);
		assert!(combine_mnemonics(&mnemonics, None, false).is_err());
		assert_eq!(combine_mnemonics(&mnemonics, None, true).unwrap(), secret);
	}

	#[test]
	fn empty_mnemonic_list_is_an_error() {
		assert!(combine_mnemonics(&[], None, false).is_err());
	}

	#[test]
	fn varying_secret_lengths_round_trip() {
		let mut rng = rng();
		let mut secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		for _ in 0..4 {
			secret.push(0);
			secret.push(1);
			let groups =
				generate_mnemonics(&mut rng, 1, &[(3, 5)], &secret, None, false, 0).unwrap();
			let mnemonics = flatten(&groups);
			let recovered = combine_mnemonics(&mnemonics, None, false).unwrap();
			assert_eq!(recovered, secret);
		}
	}
}
