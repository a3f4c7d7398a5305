// Derived from RustySecrets Project at
// https://github.com/SpinResearch/RustySecrets.git
//
// BSD 3-Clause License
//
// Copyright (c) 2016-2018, Spin Research
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// * Redistributions of source code must retain the above copyright notice, this
//   list of conditions and the following disclaimer.
//
// * Redistributions in binary form must reproduce the above copyright notice,
//   this list of conditions and the following disclaimer in the documentation
//   and/or other materials provided with the distribution.
//
// * Neither the name of the copyright holder nor the names of its
//   contributors may be used to endorse or promote products derived from
//   this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
//
// Modifications Copyright 2019 The Grin Developers
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

use crate::error::{Error, ErrorKind};
use crate::field::gf256::Gf256;
use crate::field::poly::Poly;

/// Computes the coefficients of the Lagrange polynomial interpolated
/// from the given `points`, in the GF(2^8) field.
///
/// Fails with InvalidShareSet if points is empty or two points share an
/// x-coordinate (the shares they came from would be duplicates).
pub fn interpolate(points: &[(Gf256, Gf256)]) -> Result<Poly, Error> {
	if points.is_empty() {
		return Err(ErrorKind::InvalidShareSet(
			"cannot interpolate an empty set of shares".to_string(),
		))?;
	}

	let len = points.len();
	let mut poly = vec![Gf256::zero(); len];

	for &(x, y) in points {
		let mut coeffs = vec![Gf256::zero(); len];
		coeffs[0] = y;

		let mut prod = Gf256::one();
		for &(x1, _) in points {
			if x != x1 {
				prod = prod * (x - x1);

				let mut prec = Gf256::zero();
				coeffs = coeffs
					.into_iter()
					.map(|coeff| {
						let new_coeff = coeff * (-x1) + prec;
						prec = coeff;
						new_coeff
					})
					.collect();
			}
		}

		if prod == Gf256::zero() {
			return Err(ErrorKind::InvalidShareSet(
				"duplicate x-coordinate among shares".to_string(),
			))?;
		}

		let inv_prod = prod.checked_inv()?;
		poly = poly
			.iter()
			.zip(coeffs.iter())
			.map(|(&old_coeff, &add)| old_coeff + add * inv_prod)
			.collect();
	}

	Ok(Poly::new(poly))
}

/// Interpolates a byte-vector secret at `x`, component-wise, from a set of
/// byte-vector shares of common length. This is the entry point SSS split
/// and recover actually call: each of the L byte positions is its own
/// independent GF(256) interpolation problem.
///
/// Fails with InvalidShareSet on empty input, mismatched share-value
/// lengths, or duplicate x-coordinates.
pub fn interpolate_bytes(x: u8, points: &[(u8, Vec<u8>)]) -> Result<Vec<u8>, Error> {
	if points.is_empty() {
		return Err(ErrorKind::InvalidShareSet(
			"cannot interpolate an empty set of shares".to_string(),
		))?;
	}
	let len = points[0].1.len();
	if points.iter().any(|(_, v)| v.len() != len) {
		return Err(ErrorKind::InvalidShareSet(
			"shares in a set must all have the same value length".to_string(),
		))?;
	}

	let mut result = vec![0u8; len];
	for byte_pos in 0..len {
		let byte_points: Vec<(Gf256, Gf256)> = points
			.iter()
			.map(|(px, v)| (Gf256::from_byte(*px), Gf256::from_byte(v[byte_pos])))
			.collect();
		let poly = interpolate(&byte_points)?;
		result[byte_pos] = poly.evaluate_at(Gf256::from_byte(x)).to_byte();
	}
	Ok(result)
}

#[cfg(test)]
#[allow(trivial_casts)]
mod tests {

	use super::*;
	use crate::field::gf256::*;
	use quickcheck::*;
	use std;

	quickcheck! {

		fn interpolate_evaluate_at_works(ys: Vec<Gf256>) -> TestResult {
			if ys.is_empty() || ys.len() > std::u8::MAX as usize {
				return TestResult::discard();
			}

			let points = ys.into_iter()
						   .zip(1..std::u8::MAX)
						   .map(|(y, x)| (gf256!(x), y))
						   .collect::<Vec<_>>();
			let poly = interpolate(&points).unwrap();

			for (x, y) in points {
				if poly.evaluate_at(x) != y {
					return TestResult::failed();
				}
			}

			TestResult::passed()
		}
	}

	#[test]
	fn empty_point_set_is_an_error() {
		assert!(interpolate(&[]).is_err());
	}

	#[test]
	fn duplicate_x_is_an_error() {
		let pts = [
			(Gf256::from_byte(1), Gf256::from_byte(2)),
			(Gf256::from_byte(1), Gf256::from_byte(3)),
		];
		assert!(interpolate(&pts).is_err());
	}

	#[test]
	fn single_point_gives_constant_poly() {
		let pts = [(Gf256::from_byte(9), Gf256::from_byte(42))];
		let poly = interpolate(&pts).unwrap();
		assert_eq!(poly.evaluate_at(Gf256::from_byte(0)), Gf256::from_byte(42));
		assert_eq!(
			poly.evaluate_at(Gf256::from_byte(200)),
			Gf256::from_byte(42)
		);
	}

	#[test]
	fn interpolate_bytes_round_trips_constant_shares() {
		// T = 1: every share equals the secret, so any single point recovers it.
		let secret = vec![1u8, 2, 3, 4];
		let points = vec![(0u8, secret.clone()), (1u8, secret.clone())];
		let recovered = interpolate_bytes(255, &points).unwrap();
		assert_eq!(recovered, secret);
	}

	#[test]
	fn interpolate_bytes_rejects_length_mismatch() {
		let points = vec![(0u8, vec![1, 2, 3]), (1u8, vec![1, 2])];
		assert!(interpolate_bytes(255, &points).is_err());
	}

	#[test]
	fn interpolate_bytes_rejects_empty_set() {
		assert!(interpolate_bytes(255, &[]).is_err());
	}
}
