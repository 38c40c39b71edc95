// niemgraph - NIEM schema and document to property graph conversion
//
// Copyright (c) 2025 niemgraph contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deterministic schema-identity digests.
//!
//! Compiled specifications are persisted keyed by the identity of the CMF
//! text they were derived from. The digest is FNV-1a 64-bit: a stability and
//! identity tool, not a security primitive — the orchestrator controls which
//! schema texts reach the compiler.

/// Prefix used in serialized schema digests.
pub const SCHEMA_DIGEST_PREFIX: &str = "fnv1a64:";

/// Compute FNV-1a 64-bit over arbitrary bytes.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x00000100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Compute the identity digest of a CMF text, `"fnv1a64:<16 hex digits>"`.
pub fn schema_digest(text: &str) -> String {
    format!("{SCHEMA_DIGEST_PREFIX}{:016x}", fnv1a64(text.as_bytes()))
}
