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

//! The encoded share value object, and its bit-packed mnemonic ⇄ word
//! sequence encoding.

use crate::checksum::rs1024;
use crate::config::ShamirMnemonicConfig;
use crate::error::{Error, ErrorKind};
use crate::util::bitpacker::BitPacker;
use crate::wordlist;

/// One encoded share: the header fields plus a share value, corresponding
/// to a single mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
	/// Random 15-bit value shared by every share of one set.
	pub identifier: u16,
	/// Extendable backup flag.
	pub extendable: bool,
	/// PBKDF2 iteration exponent, e ∈ [0, 16).
	pub iteration_exponent: u8,
	/// Group index (x-coordinate of the outer polynomial), GI ∈ [0, 16).
	pub group_index: u8,
	/// Actual group threshold GT ∈ [1, 16].
	pub group_threshold: u8,
	/// Actual group count G ∈ [1, 16].
	pub group_count: u8,
	/// Member index (x-coordinate of the inner polynomial), I ∈ [0, 16).
	pub member_index: u8,
	/// Actual member threshold T ∈ [1, 16].
	pub member_threshold: u8,
	/// The share value itself, |MS| bytes.
	pub share_value: Vec<u8>,
}

impl Share {
	/// Builds a share, validating every locally-checkable invariant from
	/// the data model (field ranges, GT ≤ G, GI < G, minimum value
	/// length). Invariants that depend on the rest of the share set (T=1
	/// ⇒ N=1, cross-share consistency) are enforced by the generator and
	/// combiner instead, since a lone `Share` doesn't carry its group's
	/// member count.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		identifier: u16,
		extendable: bool,
		iteration_exponent: u8,
		group_index: u8,
		group_threshold: u8,
		group_count: u8,
		member_index: u8,
		member_threshold: u8,
		share_value: Vec<u8>,
	) -> Result<Share, Error> {
		let config = ShamirMnemonicConfig::new();

		if identifier >= (1u16 << config.id_length_bits) {
			return Err(ErrorKind::InvalidShare(format!(
				"identifier {} does not fit in {} bits",
				identifier, config.id_length_bits
			)))?;
		}
		if iteration_exponent >= 16 {
			return Err(ErrorKind::InvalidShare(format!(
				"iteration exponent {} is out of range [0, 16)",
				iteration_exponent
			)))?;
		}
		if group_threshold == 0 || group_threshold > config.max_share_count {
			return Err(ErrorKind::InvalidShare(format!(
				"group threshold {} is out of range [1, {}]",
				group_threshold, config.max_share_count
			)))?;
		}
		if group_count == 0 || group_count > config.max_share_count {
			return Err(ErrorKind::InvalidShare(format!(
				"group count {} is out of range [1, {}]",
				group_count, config.max_share_count
			)))?;
		}
		if group_threshold > group_count {
			return Err(ErrorKind::InvalidShare(format!(
				"group threshold {} exceeds group count {}",
				group_threshold, group_count
			)))?;
		}
		if group_index >= group_count {
			return Err(ErrorKind::InvalidShare(format!(
				"group index {} is out of range [0, {})",
				group_index, group_count
			)))?;
		}
		if member_threshold == 0 || member_threshold > config.max_share_count {
			return Err(ErrorKind::InvalidShare(format!(
				"member threshold {} is out of range [1, {}]",
				member_threshold, config.max_share_count
			)))?;
		}
		if member_index >= config.max_share_count {
			return Err(ErrorKind::InvalidShare(format!(
				"member index {} is out of range [0, {})",
				member_index, config.max_share_count
			)))?;
		}
		if share_value.len() < 16 {
			return Err(ErrorKind::InvalidShare(
				"share value must be at least 16 bytes".to_string(),
			))?;
		}

		Ok(Share {
			identifier,
			extendable,
			iteration_exponent,
			group_index,
			group_threshold,
			group_count,
			member_index,
			member_threshold,
			share_value,
		})
	}

	/// Encodes this share into its mnemonic word sequence.
	pub fn to_mnemonic(&self) -> Result<Vec<String>, Error> {
		let bp = self.pack_bits()?;
		let config = ShamirMnemonicConfig::new();
		let words = bp.to_words(config.radix_bits)?;
		words
			.iter()
			.map(|w| wordlist::word_at(*w as usize).map(str::to_owned))
			.collect()
	}

	/// Parses a mnemonic (whitespace-tolerant, case-insensitive) back into
	/// a share, verifying its RS1024 checksum and header consistency.
	pub fn from_mnemonic(extendable: bool, mnemonic: &str) -> Result<Share, Error> {
		let config = ShamirMnemonicConfig::new();
		let tokens: Vec<&str> = mnemonic.split_whitespace().collect();
		if tokens.len() < config.min_mnemonic_length_words as usize {
			return Err(ErrorKind::InvalidShare(format!(
				"mnemonic must be at least {} words, got {}",
				config.min_mnemonic_length_words,
				tokens.len()
			)))?;
		}

		let mut words = Vec::with_capacity(tokens.len());
		for t in &tokens {
			words.push(wordlist::index_of(t)? as u16);
		}
		let bp = BitPacker::from_words(&words, config.radix_bits)?;

		let data: Vec<u32> = words.iter().map(|w| u32::from(*w)).collect();
		rs1024::verify_checksum(rs1024::customization_string(extendable), &data)?;

		let identifier = bp.get_u16(0, config.id_length_bits)?;
		let ext_bit = bp.get_u8(config.id_length_bits as usize, config.ext_length_bits)?;
		if (ext_bit == 1) != extendable {
			return Err(ErrorKind::InvalidShare(
				"extendable flag in mnemonic does not match the checksum customization used"
					.to_string(),
			))?;
		}
		let e_offset = config.id_length_bits as usize + config.ext_length_bits as usize;
		let iteration_exponent = bp.get_u8(e_offset, config.iteration_exp_length_bits)?;

		let f = config.group_member_field_bits;
		let gi_offset = e_offset + config.iteration_exp_length_bits as usize;
		let group_index = bp.get_u8(gi_offset, f)?;
		let group_threshold = bp.get_u8(gi_offset + f as usize, f)? + 1;
		let group_count = bp.get_u8(gi_offset + 2 * f as usize, f)? + 1;
		let member_index = bp.get_u8(gi_offset + 3 * f as usize, f)?;
		let member_threshold = bp.get_u8(gi_offset + 4 * f as usize, f)? + 1;

		if group_count < group_threshold {
			return Err(ErrorKind::InvalidShare(
				"group threshold cannot exceed group count".to_string(),
			))?;
		}
		if group_index >= group_count {
			return Err(ErrorKind::InvalidShare(
				"group index out of range for group count".to_string(),
			))?;
		}

		let header_bits = config.header_bits() as usize;
		let checksum_bits = config.checksum_length_words as usize * config.radix_bits as usize;
		let total_bits = bp.len();
		let (ms_len, padding_bits) =
			solve_share_value_length(total_bits, header_bits, checksum_bits, config.radix_bits)?;

		let body = bp.split_out(header_bits, total_bits - checksum_bits)?;
		if padding_bits > 0 {
			let pad = body.get_u16(0, padding_bits as u8)?;
			if pad != 0 {
				return Err(ErrorKind::InvalidShare(
					"padding bits must be zero".to_string(),
				))?;
			}
		}
		let share_value = body.get_vec_u8(padding_bits as usize, ms_len)?;

		Share::new(
			identifier,
			extendable,
			iteration_exponent,
			group_index,
			group_threshold,
			group_count,
			member_index,
			member_threshold,
			share_value,
		)
	}

	/// Two-pass encode: header + padding + value first, RS1024 checksum
	/// computed over that and appended last, to avoid a circular
	/// dependency between the checksum and its own field width.
	fn pack_bits(&self) -> Result<BitPacker, Error> {
		let config = ShamirMnemonicConfig::new();
		let mut padding_bit_count =
			config.radix_bits - (self.share_value.len() * 8 % config.radix_bits as usize) as u8;
		if padding_bit_count == config.radix_bits {
			padding_bit_count = 0;
		}

		let mut bp = BitPacker::new();
		bp.append_u16(self.identifier, config.id_length_bits)?;
		bp.append_u8(u8::from(self.extendable), config.ext_length_bits)?;
		bp.append_u8(self.iteration_exponent, config.iteration_exp_length_bits)?;
		bp.append_u8(self.group_index, config.group_member_field_bits)?;
		bp.append_u8(self.group_threshold - 1, config.group_member_field_bits)?;
		bp.append_u8(self.group_count - 1, config.group_member_field_bits)?;
		bp.append_u8(self.member_index, config.group_member_field_bits)?;
		bp.append_u8(self.member_threshold - 1, config.group_member_field_bits)?;
		bp.append_padding(padding_bit_count as usize);
		bp.append_vec_u8(&self.share_value)?;

		if bp.len() % config.radix_bits as usize != 0 {
			return Err(ErrorKind::BitPacking(format!(
				"encoded share length {} is not a multiple of {}",
				bp.len(),
				config.radix_bits
			)))?;
		}

		let data_words = bp.to_words(config.radix_bits)?;
		let data: Vec<u32> = data_words.iter().map(|w| u32::from(*w)).collect();
		let checksum = rs1024::create_checksum(rs1024::customization_string(self.extendable), &data);
		for c in checksum {
			bp.append_u32(c, config.radix_bits)?;
		}

		Ok(bp)
	}
}

/// Finds the share-value byte length and padding-bit count consistent
/// with a decoded bit stream of `total_bits`, per spec: P + 8·|MS| =
/// total_bits − header_bits − checksum_bits, with 0 ≤ P < radix_bits and
/// |MS| even and ≥ 16.
fn solve_share_value_length(
	total_bits: usize,
	header_bits: usize,
	checksum_bits: usize,
	radix_bits: u8,
) -> Result<(usize, u8), Error> {
	if total_bits < header_bits + checksum_bits {
		return Err(ErrorKind::InvalidShare(
			"mnemonic is too short to contain a header and checksum".to_string(),
		))?;
	}
	let v = total_bits - header_bits - checksum_bits;
	let mut ms_len = 16usize;
	loop {
		if 8 * ms_len > v {
			break;
		}
		let p = v - 8 * ms_len;
		if p < radix_bits as usize {
			return Ok((ms_len, p as u8));
		}
		ms_len += 2;
	}
	Err(ErrorKind::InvalidShare(
		"could not determine a consistent share value length".to_string(),
	))?
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_share() -> Share {
		Share::new(
			21219,
			false,
			0,
			0,
			1,
			1,
			4,
			3,
			b"\x84\x06\xce\xa0p\xbfe~\rA\x01\t5\xaf\xd3Z".to_vec(),
		)
		.unwrap()
	}

	#[test]
	fn to_mnemonic_produces_twenty_words() {
		let share = sample_share();
		let m = share.to_mnemonic().unwrap();
		assert_eq!(m.len(), 20);
	}

	#[test]
	fn mnemonic_round_trips() {
		let share = sample_share();
		let words = share.to_mnemonic().unwrap();
		let decoded = Share::from_mnemonic(false, &words.join(" ")).unwrap();
		assert_eq!(share, decoded);
	}

	#[test]
	fn round_trip_tolerates_whitespace_and_case() {
		let share = sample_share();
		let words = share.to_mnemonic().unwrap();
		let messy = format!("  {}  ", words.join("   ").to_uppercase());
		let decoded = Share::from_mnemonic(false, &messy).unwrap();
		assert_eq!(share, decoded);
	}

	#[test]
	fn wrong_extendable_flag_is_rejected() {
		let share = sample_share();
		let words = share.to_mnemonic().unwrap();
		assert!(Share::from_mnemonic(true, &words.join(" ")).is_err());
	}

	#[test]
	fn flipping_a_word_breaks_the_checksum() {
		let share = sample_share();
		let mut words = share.to_mnemonic().unwrap();
		let last = words.len() - 1;
		words[last] = if words[last] == "zero" {
			"academic".to_string()
		} else {
			"zero".to_string()
		};
		assert!(Share::from_mnemonic(false, &words.join(" ")).is_err());
	}

	#[test]
	fn rejects_short_share_value() {
		assert!(Share::new(1, false, 0, 0, 1, 1, 0, 1, vec![0u8; 8]).is_err());
	}

	#[test]
	fn rejects_group_threshold_over_group_count() {
		assert!(Share::new(1, false, 0, 0, 3, 2, 0, 1, vec![0u8; 16]).is_err());
	}

	#[test]
	fn sixty_four_byte_secret_encodes_to_fifty_nine_words() {
		let share = Share::new(1, false, 0, 0, 1, 1, 0, 1, vec![0u8; 64]).unwrap();
		assert_eq!(share.to_mnemonic().unwrap().len(), 59);
	}
}
