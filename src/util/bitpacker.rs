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

//! Operations that allow packing/unpacking bits into primitives on top of a
//! bitvec. Slower, but easier to follow and modify than hand-rolled bit
//! twiddling. Big-endian within each field, as the share header layout
//! requires.

use bitvec::prelude::*;

use crate::error::{Error, ErrorKind};

type Bits = BitVec<u8, Msb0>;

/// Wraps a big-endian bitvec and defines the packing/unpacking operations
/// the share encoder needs: appending fixed-width integers and byte
/// vectors, slicing a sub-range back out, and reading fixed-width integers
/// back from a range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitPacker {
	bv: Bits,
}

impl BitPacker {
	pub fn new() -> Self {
		BitPacker { bv: Bits::new() }
	}

	pub fn len(&self) -> usize {
		self.bv.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bv.is_empty()
	}

	/// Append num_bits of zero padding.
	pub fn append_padding(&mut self, num_bits: usize) {
		for _ in 0..num_bits {
			self.bv.push(false);
		}
	}

	/// Append each byte of `data` as a full 8-bit field.
	pub fn append_vec_u8(&mut self, data: &[u8]) -> Result<(), Error> {
		for b in data {
			self.append_u8(*b, 8)?;
		}
		Ok(())
	}

	/// Append the low num_bits bits of val, num_bits must be <= 8.
	pub fn append_u8(&mut self, val: u8, num_bits: u8) -> Result<(), Error> {
		if num_bits > 8 {
			return Err(ErrorKind::BitPacking(
				"number of bits to pack into a u8 must be <= 8".to_string(),
			))?;
		}
		for i in (0..num_bits).rev() {
			self.bv.push((val >> i) & 1 == 1);
		}
		Ok(())
	}

	/// Append the low num_bits bits of val, num_bits must be <= 16.
	pub fn append_u16(&mut self, val: u16, num_bits: u8) -> Result<(), Error> {
		if num_bits > 16 {
			return Err(ErrorKind::BitPacking(
				"number of bits to pack into a u16 must be <= 16".to_string(),
			))?;
		}
		for i in (0..num_bits).rev() {
			self.bv.push((val >> i) & 1 == 1);
		}
		Ok(())
	}

	/// Append the low num_bits bits of val, num_bits must be <= 32.
	pub fn append_u32(&mut self, val: u32, num_bits: u8) -> Result<(), Error> {
		if num_bits > 32 {
			return Err(ErrorKind::BitPacking(
				"number of bits to pack into a u32 must be <= 32".to_string(),
			))?;
		}
		for i in (0..num_bits).rev() {
			self.bv.push((val >> i) & 1 == 1);
		}
		Ok(())
	}

	fn get_bits(&self, start: usize, num_bits: usize) -> Result<&BitSlice<u8, Msb0>, Error> {
		if start + num_bits > self.bv.len() {
			return Err(ErrorKind::BitPacking(format!(
				"cannot read {} bits at offset {} from a {}-bit buffer",
				num_bits,
				start,
				self.bv.len()
			)))?;
		}
		Ok(&self.bv[start..start + num_bits])
	}

	/// Read num_bits bits at `start` as a u8, num_bits must be <= 8.
	pub fn get_u8(&self, start: usize, num_bits: u8) -> Result<u8, Error> {
		if num_bits > 8 {
			return Err(ErrorKind::BitPacking(
				"number of bits to unpack into a u8 must be <= 8".to_string(),
			))?;
		}
		let bits = self.get_bits(start, num_bits as usize)?;
		Ok(bits.iter().fold(0u8, |acc, b| (acc << 1) | (*b as u8)))
	}

	/// Read num_bits bits at `start` as a u16, num_bits must be <= 16.
	pub fn get_u16(&self, start: usize, num_bits: u8) -> Result<u16, Error> {
		if num_bits > 16 {
			return Err(ErrorKind::BitPacking(
				"number of bits to unpack into a u16 must be <= 16".to_string(),
			))?;
		}
		let bits = self.get_bits(start, num_bits as usize)?;
		Ok(bits.iter().fold(0u16, |acc, b| (acc << 1) | (*b as u16)))
	}

	/// Read num_bits bits at `start` as a u32, num_bits must be <= 32.
	pub fn get_u32(&self, start: usize, num_bits: u8) -> Result<u32, Error> {
		if num_bits > 32 {
			return Err(ErrorKind::BitPacking(
				"number of bits to unpack into a u32 must be <= 32".to_string(),
			))?;
		}
		let bits = self.get_bits(start, num_bits as usize)?;
		Ok(bits.iter().fold(0u32, |acc, b| (acc << 1) | (*b as u32)))
	}

	/// Read num_bytes full bytes starting at `start` (in bits).
	pub fn get_vec_u8(&self, start: usize, num_bytes: usize) -> Result<Vec<u8>, Error> {
		let mut out = Vec::with_capacity(num_bytes);
		for i in 0..num_bytes {
			out.push(self.get_u8(start + i * 8, 8)?);
		}
		Ok(out)
	}

	/// Returns the bit range [start, end) as a standalone BitPacker.
	pub fn split_out(&self, start: usize, end: usize) -> Result<BitPacker, Error> {
		if end < start || end > self.bv.len() {
			return Err(ErrorKind::BitPacking(format!(
				"cannot slice [{}, {}) from a {}-bit buffer",
				start,
				end,
				self.bv.len()
			)))?;
		}
		Ok(BitPacker {
			bv: self.bv[start..end].to_bitvec(),
		})
	}

	/// Splits the buffer into words of `word_bits` bits each, most
	/// significant bit first. Fails if the buffer length is not a
	/// multiple of word_bits.
	pub fn to_words(&self, word_bits: u8) -> Result<Vec<u16>, Error> {
		if word_bits == 0 || self.bv.len() % word_bits as usize != 0 {
			return Err(ErrorKind::BitPacking(format!(
				"{}-bit buffer is not a multiple of the {}-bit word size",
				self.bv.len(),
				word_bits
			)))?;
		}
		let mut words = Vec::with_capacity(self.bv.len() / word_bits as usize);
		let mut offset = 0;
		while offset < self.bv.len() {
			words.push(self.get_u16(offset, word_bits)?);
			offset += word_bits as usize;
		}
		Ok(words)
	}

	/// Builds a buffer from a sequence of `word_bits`-bit words.
	pub fn from_words(words: &[u16], word_bits: u8) -> Result<BitPacker, Error> {
		let mut bp = BitPacker::new();
		for w in words {
			bp.append_u16(*w, word_bits)?;
		}
		Ok(bp)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn append_and_read_back_fields() {
		let mut bp = BitPacker::new();
		bp.append_u16(21219, 15).unwrap();
		bp.append_u8(1, 1).unwrap();
		bp.append_u8(3, 4).unwrap();
		assert_eq!(bp.len(), 20);
		assert_eq!(bp.get_u16(0, 15).unwrap(), 21219);
		assert_eq!(bp.get_u8(15, 1).unwrap(), 1);
		assert_eq!(bp.get_u8(16, 4).unwrap(), 3);
	}

	#[test]
	fn append_vec_u8_round_trips() {
		let mut bp = BitPacker::new();
		let data = vec![0xDE, 0xAD, 0xBE, 0xEF];
		bp.append_vec_u8(&data).unwrap();
		assert_eq!(bp.get_vec_u8(0, 4).unwrap(), data);
	}

	#[test]
	fn words_round_trip() {
		let words = vec![1, 2, 3, 1023, 0];
		let bp = BitPacker::from_words(&words, 10).unwrap();
		assert_eq!(bp.to_words(10).unwrap(), words);
	}

	#[test]
	fn split_out_extracts_a_range() {
		let mut bp = BitPacker::new();
		bp.append_u32(0x0000_ABCD, 32).unwrap();
		let sub = bp.split_out(16, 32).unwrap();
		assert_eq!(sub.get_u16(0, 16).unwrap(), 0xABCD);
	}

	#[test]
	fn reading_past_the_end_is_an_error() {
		let bp = BitPacker::new();
		assert!(bp.get_u8(0, 8).is_err());
	}

	#[test]
	fn oversized_field_width_is_an_error() {
		let mut bp = BitPacker::new();
		assert!(bp.append_u8(1, 9).is_err());
	}

	#[test]
	fn non_multiple_length_fails_to_words() {
		let mut bp = BitPacker::new();
		bp.append_padding(5);
		assert!(bp.to_words(10).is_err());
	}
}
