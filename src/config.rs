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

//! The fixed parameters of the scheme: field widths, reserved indices,
//! length limits. One struct, instead of the duplicated configuration
//! structs an earlier snapshot of this crate carried in both a top-level
//! config type and the share encoder.

/// Bit width of each header field, and the derived word-count constants
/// that follow from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShamirMnemonicConfig {
	/// Bits per wordlist symbol (log2(1024) = 10).
	pub radix_bits: u8,
	/// Wordlist size (2^radix_bits).
	pub radix: u16,
	/// Width of the `id` header field.
	pub id_length_bits: u8,
	/// Width of the `ext` header field.
	pub ext_length_bits: u8,
	/// Width of the `e` (iteration exponent) header field.
	pub iteration_exp_length_bits: u8,
	/// Width of each of GI, GT-1, G-1, I, T-1.
	pub group_member_field_bits: u8,
	/// Width of the RS1024 checksum, in 10-bit words.
	pub checksum_length_words: u8,
	/// Length of the header, in 10-bit words (40 bits / radix_bits).
	pub metadata_length_words: u8,
	/// Minimum total mnemonic length, in words, for the minimum-strength
	/// master secret.
	pub min_mnemonic_length_words: u8,
	/// Minimum accepted master secret strength, in bits.
	pub min_strength_bits: u16,
	/// Maximum group or member count.
	pub max_share_count: u8,
	/// Length of the HMAC-SHA256 digest truncation used in SSS.split, in
	/// bytes.
	pub digest_length_bytes: u8,
	/// Reserved SSS x-coordinate carrying the digest.
	pub digest_index: u8,
	/// Reserved SSS x-coordinate carrying the secret.
	pub secret_index: u8,
}

impl Default for ShamirMnemonicConfig {
	fn default() -> Self {
		let radix_bits = 10u8;
		let id_length_bits = 15u8;
		let ext_length_bits = 1u8;
		let iteration_exp_length_bits = 4u8;
		let group_member_field_bits = 4u8;
		let checksum_length_words = 3u8;
		let min_strength_bits = 128u16;

		let header_bits = u16::from(id_length_bits)
			+ u16::from(ext_length_bits)
			+ u16::from(iteration_exp_length_bits)
			+ 5 * u16::from(group_member_field_bits);
		debug_assert_eq!(header_bits, 40);

		let metadata_length_words =
			(header_bits / u16::from(radix_bits)) as u8 + checksum_length_words;
		let min_mnemonic_length_words = metadata_length_words
			+ (f64::from(min_strength_bits) / f64::from(radix_bits)).ceil() as u8;

		ShamirMnemonicConfig {
			radix_bits,
			radix: 2u16.pow(u32::from(radix_bits)),
			id_length_bits,
			ext_length_bits,
			iteration_exp_length_bits,
			group_member_field_bits,
			checksum_length_words,
			metadata_length_words,
			min_mnemonic_length_words,
			min_strength_bits,
			max_share_count: 16,
			digest_length_bytes: 4,
			digest_index: 254,
			secret_index: 255,
		}
	}
}

impl ShamirMnemonicConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Total header width in bits (id + ext + e + GI + GT-1 + G-1 + I + T-1).
	pub fn header_bits(&self) -> u16 {
		u16::from(self.id_length_bits)
			+ u16::from(self.ext_length_bits)
			+ u16::from(self.iteration_exp_length_bits)
			+ 5 * u16::from(self.group_member_field_bits)
	}
}
