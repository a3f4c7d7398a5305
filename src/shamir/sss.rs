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

//! Shamir's Secret Sharing over byte-vector secrets, with a built-in
//! digest check on recovery. Operates on raw `(x, value)` points rather
//! than on the encoded `Share` header, since splitting/recovering a group
//! or member polynomial has nothing to do with the bit-packed mnemonic
//! layout.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::ShamirMnemonicConfig;
use crate::error::{Error, ErrorKind};
use crate::field::lagrange;
use crate::util::{fill_vec_rand, RandomSource};

type HmacSha256 = Hmac<Sha256>;

/// Splits `secret` into `share_count` points on a degree-(threshold-1)
/// polynomial, `threshold` of which reconstruct it.
///
/// `threshold == 1 && share_count > 1` is rejected: a 1-of-N share set
/// with N > 1 is semantically ambiguous (every share already equals the
/// secret, so "threshold" carries no meaning).
pub fn split_secret(
	rng: &mut dyn RandomSource,
	threshold: u8,
	share_count: u8,
	secret: &[u8],
) -> Result<Vec<(u8, Vec<u8>)>, Error> {
	let config = ShamirMnemonicConfig::new();

	if threshold == 0 || threshold > config.max_share_count {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"threshold must be between 1 and {}",
			config.max_share_count
		)))?;
	}
	if share_count < threshold || share_count > config.max_share_count {
		return Err(ErrorKind::InvalidConfiguration(format!(
			"share count must be between {} and {}",
			threshold, config.max_share_count
		)))?;
	}
	if threshold == 1 && share_count > 1 {
		return Err(ErrorKind::InvalidConfiguration(
			"a threshold of 1 requires exactly 1 share".to_string(),
		))?;
	}
	if secret.len() < 16 || secret.len() % 2 != 0 {
		return Err(ErrorKind::InvalidConfiguration(
			"secret must be at least 16 bytes and of even length".to_string(),
		))?;
	}

	if threshold == 1 {
		return Ok((0..share_count).map(|i| (i, secret.to_vec())).collect());
	}

	let mut shares: Vec<(u8, Vec<u8>)> = Vec::with_capacity(share_count as usize);
	let random_share_count = threshold - 2;
	for i in 0..random_share_count {
		shares.push((i, fill_vec_rand(rng, secret.len())));
	}

	let random_part = Zeroizing::new(fill_vec_rand(rng, secret.len() - config.digest_length_bytes as usize));
	let digest = create_digest(&random_part, secret);
	let mut digest_value = digest;
	digest_value.extend_from_slice(&random_part);

	let mut base_points = shares.clone();
	base_points.push((config.digest_index, digest_value));
	base_points.push((config.secret_index, secret.to_vec()));

	for i in random_share_count..share_count {
		let value = lagrange::interpolate_bytes(i, &base_points)?;
		shares.push((i, value));
	}

	Ok(shares)
}

/// Recovers the secret from `threshold` or more `(x, value)` points,
/// validating the digest embedded at the reserved digest index.
pub fn recover_secret(points: &[(u8, Vec<u8>)], threshold: u8) -> Result<Vec<u8>, Error> {
	if points.is_empty() {
		return Err(ErrorKind::InvalidShareSet(
			"share set must not be empty".to_string(),
		))?;
	}

	if threshold == 1 {
		return Ok(points[0].1.clone());
	}

	let config = ShamirMnemonicConfig::new();
	let secret = lagrange::interpolate_bytes(config.secret_index, points)?;
	check_digest(points, &secret)?;
	Ok(secret)
}

fn create_digest(random_part: &[u8], secret: &[u8]) -> Vec<u8> {
	let mut mac = HmacSha256::new_from_slice(random_part).expect("HMAC accepts any key length");
	mac.update(secret);
	let full = mac.finalize().into_bytes();
	full[..4].to_vec()
}

fn check_digest(points: &[(u8, Vec<u8>)], secret: &[u8]) -> Result<(), Error> {
	let config = ShamirMnemonicConfig::new();
	let digest_value = Zeroizing::new(lagrange::interpolate_bytes(config.digest_index, points)?);
	if digest_value.len() < config.digest_length_bytes as usize {
		return Err(ErrorKind::InvalidShare(
			"digest share value is shorter than the digest length".to_string(),
		))?;
	}
	let (tag, random_part) = digest_value.split_at(config.digest_length_bytes as usize);
	if tag != create_digest(random_part, secret).as_slice() {
		return Err(ErrorKind::InvalidShare(
			"digest mismatch on recovered secret".to_string(),
		))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::test_support::FixedRandomSource;
	use rand::{thread_rng, Rng};

	fn split_recover_round_trip(secret_len: usize, threshold: u8, share_count: u8) -> Result<(), Error> {
		let mut rng = FixedRandomSource::new((0..=255u8).collect());
		let secret: Vec<u8> = (0..secret_len).map(|i| (i % 256) as u8).collect();
		let mut shares = split_secret(&mut rng, threshold, share_count, &secret)?;
		assert_eq!(shares.len(), share_count as usize);

		while shares.len() > threshold as usize {
			let idx = thread_rng().gen_range(0..shares.len());
			shares.remove(idx);
		}
		let recovered = recover_secret(&shares, threshold)?;
		assert_eq!(recovered, secret);

		if shares.len() > 1 {
			shares.remove(0);
			assert!(recover_secret(&shares, threshold).is_err());
		}
		Ok(())
	}

	#[test]
	fn rejects_bad_configuration() {
		let mut rng = FixedRandomSource::new(vec![1, 2, 3]);
		assert!(split_secret(&mut rng, 0, 5, &[0u8; 16]).is_err());
		assert!(split_secret(&mut rng, 5, 3, &[0u8; 16]).is_err());
		assert!(split_secret(&mut rng, 3, 20, &[0u8; 16]).is_err());
		assert!(split_secret(&mut rng, 2, 3, &[0u8; 15]).is_err());
		assert!(split_secret(&mut rng, 2, 3, &[0u8; 14]).is_err());
	}

	#[test]
	fn threshold_one_with_more_than_one_share_is_rejected() {
		let mut rng = FixedRandomSource::new(vec![1, 2, 3]);
		assert!(split_secret(&mut rng, 1, 2, &[0u8; 16]).is_err());
	}

	#[test]
	fn threshold_one_every_share_is_the_secret() {
		let mut rng = FixedRandomSource::new(vec![9, 8, 7]);
		let secret = vec![5u8; 16];
		let shares = split_secret(&mut rng, 1, 1, &secret).unwrap();
		assert_eq!(shares.len(), 1);
		assert_eq!(shares[0].1, secret);
		assert_eq!(recover_secret(&shares, 1).unwrap(), secret);
	}

	#[test]
	fn split_recover_across_thresholds_and_lengths() -> Result<(), Error> {
		for sc in 1..=8u8 {
			for t in 1..=sc {
				split_recover_round_trip(16, t, sc)?;
			}
		}
		for len in [16, 32, 64] {
			split_recover_round_trip(len, 3, 5)?;
		}
		Ok(())
	}

	#[test]
	fn corrupting_a_share_value_breaks_the_digest_check() {
		let mut rng = FixedRandomSource::new((0..=255u8).collect());
		let secret = vec![7u8; 16];
		let mut shares = split_secret(&mut rng, 3, 5, &secret).unwrap();
		shares.truncate(3);
		shares[0].1[0] ^= 0xFF;
		assert!(recover_secret(&shares, 3).is_err());
	}
}
