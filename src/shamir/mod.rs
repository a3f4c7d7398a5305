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

//! The two-level SLIP-39 scheme: byte-vector Shamir splitting (`sss`), the
//! encoded share object (`share`), and the group/member orchestration that
//! sits on top of it (`generator`, `combiner`).

pub mod combiner;
pub mod generator;
pub mod share;
pub mod sss;

pub use combiner::combine_mnemonics;
pub use generator::{generate_mnemonics, generate_mnemonics_random, GroupShare};
pub use share::Share;
