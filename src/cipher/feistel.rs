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

//! Four-round Feistel cipher over the master secret, using PBKDF2-HMAC-
//! SHA256 as the round function.

#[cfg(feature = "rust_crypto_pbkdf2")]
use hmac::Hmac;
#[cfg(feature = "rust_crypto_pbkdf2")]
use pbkdf2::pbkdf2;
#[cfg(feature = "ring_pbkdf2")]
use ring::{digest, pbkdf2};
#[cfg(feature = "ring_pbkdf2")]
use std::num::NonZeroU32;
#[cfg(feature = "rust_crypto_pbkdf2")]
use sha2::Sha256;

use zeroize::Zeroizing;

const CUSTOMIZATION_STRING: &[u8] = b"shamir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeistelConfig {
	/// Total PBKDF2 iterations budgeted across all rounds, before the
	/// `2^e` scaling: `min_iteration_count * 2^e / round_count` per round.
	pub min_iteration_count: u32,
	/// Number of Feistel rounds.
	pub round_count: u8,
}

impl Default for FeistelConfig {
	fn default() -> Self {
		FeistelConfig {
			min_iteration_count: 10000,
			round_count: 4,
		}
	}
}

/// The Feistel cipher used to encrypt/decrypt the master secret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feistel {
	config: FeistelConfig,
}

impl Feistel {
	pub fn new() -> Self {
		Feistel::default()
	}

	/// Encrypts `master_secret` (even length) under `passphrase` (already
	/// NFKD-normalized UTF-8 bytes), returning an equal-length ciphertext.
	pub fn encrypt(
		&self,
		master_secret: &[u8],
		passphrase: &[u8],
		iteration_exponent: u8,
		identifier: u16,
		extendable: bool,
	) -> Vec<u8> {
		self.feistel(
			master_secret,
			passphrase,
			iteration_exponent,
			identifier,
			extendable,
			false,
		)
	}

	/// Inverse of [`Feistel::encrypt`].
	pub fn decrypt(
		&self,
		encrypted_master_secret: &[u8],
		passphrase: &[u8],
		iteration_exponent: u8,
		identifier: u16,
		extendable: bool,
	) -> Vec<u8> {
		self.feistel(
			encrypted_master_secret,
			passphrase,
			iteration_exponent,
			identifier,
			extendable,
			true,
		)
	}

	fn feistel(
		&self,
		input: &[u8],
		passphrase: &[u8],
		iteration_exponent: u8,
		identifier: u16,
		extendable: bool,
		reverse: bool,
	) -> Vec<u8> {
		let mut l = Zeroizing::new(input.to_owned());
		let mut r = Zeroizing::new(l.split_off(l.len() / 2));
		let salt = self.get_salt(identifier, extendable);

		let rounds: Box<dyn Iterator<Item = u8>> = if reverse {
			Box::new((0..self.config.round_count).rev())
		} else {
			Box::new(0..self.config.round_count)
		};

		for i in rounds {
			let f = self.round_function(i, passphrase, iteration_exponent, &salt, &r);
			let new_r = Zeroizing::new(xor(&l, &f));
			l = r;
			r = new_r;
		}

		// Ciphertext is R_4 || L_4 (the halves have swapped one extra time
		// at the end of the loop relative to the round index they came from).
		let mut out = r.to_vec();
		out.extend_from_slice(&l);
		out
	}

	fn get_salt(&self, identifier: u16, extendable: bool) -> Vec<u8> {
		if extendable {
			Vec::new()
		} else {
			let mut salt = CUSTOMIZATION_STRING.to_vec();
			salt.extend_from_slice(&identifier.to_be_bytes());
			salt
		}
	}

	/// The round function F(i, R) of the Feistel network.
	fn round_function(
		&self,
		i: u8,
		passphrase: &[u8],
		e: u8,
		salt: &[u8],
		r: &[u8],
	) -> Vec<u8> {
		let iterations = (u32::from(self.config.min_iteration_count) << e)
			/ u32::from(self.config.round_count);
		let out_length = r.len();

		let mut full_salt = Zeroizing::new(salt.to_owned());
		full_salt.extend_from_slice(r);

		let mut password = Zeroizing::new(vec![i]);
		password.extend_from_slice(passphrase);

		self.pbkdf2_derive(iterations, &full_salt, &password, out_length)
	}

	#[cfg(feature = "rust_crypto_pbkdf2")]
	fn pbkdf2_derive(&self, iterations: u32, salt: &[u8], password: &[u8], out_length: usize) -> Vec<u8> {
		let mut out = vec![0u8; out_length];
		pbkdf2::<Hmac<Sha256>>(password, salt, iterations as usize, &mut out);
		out
	}

	#[cfg(feature = "ring_pbkdf2")]
	fn pbkdf2_derive(&self, iterations: u32, salt: &[u8], password: &[u8], out_length: usize) -> Vec<u8> {
		let mut out = vec![0u8; out_length];
		pbkdf2::derive(
			&digest::SHA256,
			// Always safe: iterations is min_iteration_count << e, and
			// min_iteration_count defaults to 10000, so this is never zero.
			NonZeroU32::new(iterations).expect("iteration count is always positive"),
			salt,
			password,
			&mut out,
		);
		out
	}
}

fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
	a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{thread_rng, Rng};

	fn enc_dec_round_trip(secret: &[u8], passphrase: &[u8], id: u16, e: u8, ext: bool) {
		let cipher = Feistel::new();
		let encrypted = cipher.encrypt(secret, passphrase, e, id, ext);
		let decrypted = cipher.decrypt(&encrypted, passphrase, e, id, ext);
		assert_eq!(secret, decrypted.as_slice());
	}

	#[test]
	fn round_trips_known_vector() {
		let s = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P";
		enc_dec_round_trip(s, b"", 7470, 0, false);
	}

	#[test]
	fn round_trips_random_secrets() {
		let mut rng = thread_rng();
		for _ in 0..20 {
			let s: [u8; 16] = rng.gen();
			let id: u16 = rng.gen();
			enc_dec_round_trip(&s, b"", id, 0, false);
		}
		for _ in 0..10 {
			let s: [u8; 32] = rng.gen();
			let id: u16 = rng.gen();
			enc_dec_round_trip(&s, b"pebkac", id, 1, false);
		}
	}

	#[test]
	fn extendable_flag_changes_ciphertext() {
		let s = [1u8; 16];
		let cipher = Feistel::new();
		let a = cipher.encrypt(&s, b"", 0, 1234, false);
		let b = cipher.encrypt(&s, b"", 0, 1234, true);
		assert_ne!(a, b);
	}

	#[test]
	fn extendable_ciphertext_is_identifier_independent() {
		let s = [2u8; 16];
		let cipher = Feistel::new();
		let a = cipher.encrypt(&s, b"", 0, 1, true);
		let b = cipher.encrypt(&s, b"", 0, 2, true);
		assert_eq!(a, b);
	}

	#[test]
	fn wrong_passphrase_decrypts_to_something_else() {
		let s = [9u8; 16];
		let cipher = Feistel::new();
		let encrypted = cipher.encrypt(&s, b"correct horse", 0, 99, false);
		let decrypted = cipher.decrypt(&encrypted, b"wrong horse", 0, 99, false);
		assert_ne!(decrypted, s);
		assert_eq!(decrypted.len(), s.len());
	}
}
