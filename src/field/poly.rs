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

//! A polynomial over GF(256), represented by its coefficients in order of
//! increasing degree. Produced by Lagrange interpolation, then evaluated at
//! the x-coordinates needed to recover or derive share values.

use crate::field::gf256::Gf256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
	coeffs: Vec<Gf256>,
}

impl Poly {
	pub fn new(coeffs: Vec<Gf256>) -> Poly {
		Poly { coeffs }
	}

	/// Evaluates the polynomial at `x` using Horner's method.
	pub fn evaluate_at(&self, x: Gf256) -> Gf256 {
		let mut result = Gf256::zero();
		for coeff in self.coeffs.iter().rev() {
			result = result * x + *coeff;
		}
		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constant_poly_evaluates_to_itself() {
		let c = Gf256::from_byte(42);
		let p = Poly::new(vec![c]);
		assert_eq!(p.evaluate_at(Gf256::from_byte(7)), c);
	}

	#[test]
	fn evaluate_at_zero_returns_constant_term() {
		let p = Poly::new(vec![
			Gf256::from_byte(5),
			Gf256::from_byte(9),
			Gf256::from_byte(3),
		]);
		assert_eq!(p.evaluate_at(Gf256::zero()), Gf256::from_byte(5));
	}
}
