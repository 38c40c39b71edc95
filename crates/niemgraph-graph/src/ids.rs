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

//! Batch-scoped node identifiers.
//!
//! Every node id is prefixed with a digest of the batch identity, so two
//! documents ingested in different batches can reuse the same document-local
//! identifiers without colliding in the graph. Synthetic ids for elements
//! without explicit identifiers are pure functions of (parent id, qname,
//! structural ordinal), so re-running a conversion on identical input is
//! bit-reproducible.

use niemgraph_mapping::fnv1a64;

/// One ingestion batch: the scope of identifier uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchId {
    prefix: String,
}

impl BatchId {
    /// Derive a batch id from an identity string (e.g. dataset id plus
    /// document URI). The prefix is a deterministic hash, never random.
    pub fn derive(identity: &str) -> Self {
        Self {
            prefix: format!("{:016x}", fnv1a64(identity.as_bytes())),
        }
    }

    /// The batch prefix (16 hex digits).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Qualify a document-local identifier with the batch prefix.
    pub fn qualify(&self, raw: &str) -> String {
        format!("{}:{}", self.prefix, raw)
    }

    /// Derive a synthetic node id for an element without an explicit
    /// identifier. Deterministic in (parent id, qname, ordinal).
    pub fn synthetic(&self, parent_id: &str, qname: &str, ordinal: usize) -> String {
        let hash = fnv1a64(format!("{parent_id}|{qname}|{ordinal}").as_bytes());
        format!("{}:~{:016x}", self.prefix, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_identity_same_prefix() {
        assert_eq!(BatchId::derive("ds1/doc1"), BatchId::derive("ds1/doc1"));
    }

    #[test]
    fn test_different_identity_different_prefix() {
        assert_ne!(
            BatchId::derive("ds1/doc1").prefix(),
            BatchId::derive("ds1/doc2").prefix()
        );
    }

    #[test]
    fn test_qualify() {
        let batch = BatchId::derive("b");
        let id = batch.qualify("P1");
        assert!(id.ends_with(":P1"));
        assert!(id.starts_with(batch.prefix()));
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let batch = BatchId::derive("b");
        let a = batch.synthetic("root", "nc:Person", 2);
        let b = batch.synthetic("root", "nc:Person", 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_synthetic_varies_with_inputs() {
        let batch = BatchId::derive("b");
        let base = batch.synthetic("root", "nc:Person", 0);
        assert_ne!(base, batch.synthetic("root", "nc:Person", 1));
        assert_ne!(base, batch.synthetic("root", "nc:Vehicle", 0));
        assert_ne!(base, batch.synthetic("other", "nc:Person", 0));
    }
}
