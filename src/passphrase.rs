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

//! Passphrase normalization: NFKD, default-to-"TREZOR", length and
//! control-character validation.

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, ErrorKind};

const DEFAULT_PASSPHRASE: &str = "TREZOR";
const MAX_CODEPOINTS: usize = 1000;

/// Normalizes a passphrase to the UTF-8 bytes fed into the Feistel round
/// function: NFKD, defaulting an empty/absent passphrase to `"TREZOR"`,
/// rejecting anything over 1000 code points or containing a forbidden
/// control character.
pub fn normalize(passphrase: Option<&str>) -> Result<Vec<u8>, Error> {
	let raw = match passphrase {
		Some(s) if !s.is_empty() => s,
		_ => DEFAULT_PASSPHRASE,
	};

	let normalized: String = raw.nfkd().collect();

	if normalized.chars().count() > MAX_CODEPOINTS {
		return Err(ErrorKind::InvalidPassphrase(format!(
			"passphrase exceeds the {}-codepoint limit after normalization",
			MAX_CODEPOINTS
		)))?;
	}

	for c in normalized.chars() {
		if is_forbidden_control(c) {
			return Err(ErrorKind::InvalidPassphrase(format!(
				"passphrase contains a forbidden control character: {:?}",
				c
			)))?;
		}
	}

	Ok(normalized.into_bytes())
}

fn is_forbidden_control(c: char) -> bool {
	matches!(c, '\t' | '\n' | '\r' | ' ') == false && c.is_control()
}
