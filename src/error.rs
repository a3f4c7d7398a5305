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

//! Error types for the slip39 crate

use failure::{Backtrace, Context, Fail};
use std::env;
use std::fmt::{self, Display};

/// Error definition
#[derive(Debug, Fail)]
pub struct Error {
	inner: Context<ErrorKind>,
}

/// Kinds of errors the crate can return. Every fallible operation resolves
/// to one of these; the field-misuse variants should never reach a caller
/// going through the public Generator/Combiner entry points.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
	/// Bad group/member threshold or count, bad master secret length, bad
	/// iteration exponent.
	#[fail(display = "Invalid Configuration: {}", _0)]
	InvalidConfiguration(String),

	/// Forbidden control character, or normalized length over the limit.
	#[fail(display = "Invalid Passphrase: {}", _0)]
	InvalidPassphrase(String),

	/// Bad field range, non-zero padding, digest mismatch on recover, or a
	/// share value shorter than 16 bytes.
	#[fail(display = "Invalid Share: {}", _0)]
	InvalidShare(String),

	/// RS1024 verification failed.
	#[fail(display = "Invalid Checksum: {}", _0)]
	InvalidChecksum(String),

	/// A mnemonic token is not present in the wordlist.
	#[fail(display = "Invalid Word: {}", _0)]
	InvalidWord(String),

	/// Cross-share mismatch (id/ext/e/GT/G/length), wrong number of
	/// groups, duplicate member indices, or insufficient members.
	#[fail(display = "Invalid Share Set: {}", _0)]
	InvalidShareSet(String),

	/// Division by the zero element of GF(256).
	#[fail(display = "Division By Zero")]
	DivisionByZero,

	/// The zero element of GF(256) has no multiplicative inverse.
	#[fail(display = "No Inverse")]
	NoInverse,

	/// GF(256) exponentiation does not accept a negative exponent.
	#[fail(display = "Negative Exponent")]
	NegativeExponent,

	/// Misuse of the bit-packing primitive (num_bits longer than the
	/// source integer width, or non-zero padding on decode).
	#[fail(display = "Bit Packing Error: {}", _0)]
	BitPacking(String),
}

impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let show_bt = match env::var("RUST_BACKTRACE") {
			Ok(r) => r == "1",
			Err(_) => false,
		};
		let backtrace = match self.backtrace() {
			Some(b) => format!("{}", b),
			None => String::from("Unknown"),
		};
		let inner_output = format!("{}", self.inner,);
		let backtrace_output = format!("\n Backtrace: {}", backtrace);
		let mut output = inner_output;
		if show_bt {
			output.push_str(&backtrace_output);
		}
		Display::fmt(&output, f)
	}
}

impl Error {
	/// get kind
	pub fn kind(&self) -> ErrorKind {
		self.inner.get_context().clone()
	}
	/// get cause string
	pub fn cause_string(&self) -> String {
		match self.cause() {
			Some(k) => format!("{}", k),
			None => "Unknown".to_string(),
		}
	}
	/// get cause
	pub fn cause(&self) -> Option<&dyn Fail> {
		self.inner.cause()
	}
	/// get backtrace
	pub fn backtrace(&self) -> Option<&Backtrace> {
		self.inner.backtrace()
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error {
			inner: Context::new(kind),
		}
	}
}

impl From<Context<ErrorKind>> for Error {
	fn from(inner: Context<ErrorKind>) -> Error {
		Error { inner }
	}
}
