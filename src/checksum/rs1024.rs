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

//! Reed-Solomon style checksum over GF(1024), 10-bit symbols, 30-bit
//! checksums, domain-separated by a customization string.

use crate::error::{Error, ErrorKind};

const GEN: [u32; 10] = [
	0xe0e040, 0x1c1c080, 0x3838100, 0x7070200, 0xe0e0009, 0x1c0c2412, 0x38086c24, 0x3090fc48,
	0x21b1f890, 0x3f3f120,
];

/// Customization string used when the extendable backup flag is clear.
pub const CUSTOMIZATION_SHAMIR: &[u8] = b"shamir";
/// Customization string used when the extendable backup flag is set.
pub const CUSTOMIZATION_SHAMIR_EXTENDABLE: &[u8] = b"shamir_extendable";

/// Picks the customization string dictated by the `extendable` flag.
pub fn customization_string(extendable: bool) -> &'static [u8] {
	if extendable {
		CUSTOMIZATION_SHAMIR_EXTENDABLE
	} else {
		CUSTOMIZATION_SHAMIR
	}
}

/// `values` interpreted as a sequence of 10-bit symbols.
fn polymod(values: &[u32]) -> u32 {
	let mut chk: u32 = 1;
	for v in values {
		let b = chk >> 20;
		chk = ((chk & 0xfffff) << 10) ^ v;
		for i in 0..10 {
			if (b >> i) & 1 == 1 {
				chk ^= GEN[i];
			}
		}
	}
	chk
}

/// Computes the three checksum words for `data`, given a customization
/// string, via the RS1024 polymod.
pub fn create_checksum(custom_string: &[u8], data: &[u32]) -> Vec<u32> {
	let mut values: Vec<u32> = custom_string.iter().map(|d| u32::from(*d)).collect();
	values.extend_from_slice(data);
	values.extend([0, 0, 0]);
	let polymod = polymod(&values) ^ 1;
	(0..3).map(|i| (polymod >> (10 * (2 - i))) & 1023).collect()
}

/// Verifies that `data` (payload words followed by its three checksum
/// words) validates under the given customization string.
pub fn verify_checksum(custom_string: &[u8], data: &[u32]) -> Result<(), Error> {
	let mut values: Vec<u32> = custom_string.iter().map(|d| u32::from(*d)).collect();
	values.extend_from_slice(data);
	if polymod(&values) != 1 {
		return Err(ErrorKind::InvalidChecksum(
			"RS1024 checksum does not validate".to_string(),
		))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn checksum_vectors() {
		let mut test_vec = vec![
			663u32, 96, 0, 66, 132, 27, 234, 28, 191, 405, 992, 848, 257, 36, 858, 1012, 858,
		];
		let expected = vec![1001u32, 340, 369];
		let checksum = create_checksum(CUSTOMIZATION_SHAMIR, &test_vec);
		assert_eq!(checksum, expected);
		test_vec.extend_from_slice(&checksum);
		verify_checksum(CUSTOMIZATION_SHAMIR, &test_vec).unwrap();
		assert!(verify_checksum(b"fhamir", &test_vec).is_err());
		test_vec[0] = 23;
		assert!(verify_checksum(CUSTOMIZATION_SHAMIR, &test_vec).is_err());
	}

	#[test]
	fn checksum_vectors_second_set() {
		let mut test_vec = vec![
			663u32, 96, 0, 66, 177, 310, 288, 156, 827, 77, 232, 34, 965, 772, 962, 966, 754,
		];
		let expected = vec![247u32, 29, 757];
		let checksum = create_checksum(CUSTOMIZATION_SHAMIR, &test_vec);
		assert_eq!(checksum, expected);
		test_vec.extend_from_slice(&checksum);
		verify_checksum(CUSTOMIZATION_SHAMIR, &test_vec).unwrap();
		test_vec[1] = 99;
		assert!(verify_checksum(CUSTOMIZATION_SHAMIR, &test_vec).is_err());
	}

	#[test]
	fn extendable_customization_changes_the_checksum() {
		let data = vec![1u32, 2, 3, 4, 5];
		let a = create_checksum(CUSTOMIZATION_SHAMIR, &data);
		let b = create_checksum(CUSTOMIZATION_SHAMIR_EXTENDABLE, &data);
		assert_ne!(a, b);
	}

	#[test]
	fn single_bit_corruption_is_detected() {
		let data = vec![5u32, 10, 20, 1, 900];
		let checksum = create_checksum(CUSTOMIZATION_SHAMIR, &data);
		let mut full = data.clone();
		full.extend_from_slice(&checksum);
		verify_checksum(CUSTOMIZATION_SHAMIR, &full).unwrap();
		for i in 0..full.len() {
			for bit in 0..10 {
				let mut corrupted = full.clone();
				corrupted[i] ^= 1 << bit;
				if corrupted == full {
					continue;
				}
				assert!(verify_checksum(CUSTOMIZATION_SHAMIR, &corrupted).is_err());
			}
		}
	}
}
