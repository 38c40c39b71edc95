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

//! Cypher statement emission for niemgraph.
//!
//! Serializes a finished [`GraphModel`](niemgraph_graph::GraphModel) into
//! ordered, idempotent write statements:
//!
//! - one `MERGE (n:Label {id: ...}) ON CREATE SET ...` per node — scalar,
//!   augmentation, and provenance properties are set only on first
//!   creation, never overwritten by later merges (safe because ids are
//!   batch-scoped);
//! - one `MATCH ... MATCH ... MERGE (a)-[r:TYPE]->(b)` per distinct
//!   (endpoints, type) triple — endpoints are matched by id, with the label
//!   included only when it resolved;
//! - all node statements strictly precede all edge statements, so each
//!   batch's edges find their endpoints within the same execution unit.
//!
//! The emitter opens no connections: statements are handed to the
//! orchestrator's database driver, grouped into bounded batches (default
//! 1000 statements per transaction).
//!
//! All identifiers and values pass through escaping with NFC normalization
//! and dangerous-character filtering before entering query text.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod emit;
mod escape;
mod statements;

pub use config::{EmitConfig, EmitConfigBuilder, DEFAULT_BATCH_SIZE};
pub use emit::{emit, emit_batches};
pub use escape::{
    escape_identifier, escape_label, escape_relationship_type, escape_string, is_valid_identifier,
    quote_string,
};
pub use statements::{CypherScript, CypherStatement, CypherValue, StatementType};
