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

//! # niemgraph
//!
//! Converts NIEM-conformant schemas and instance documents into property
//! graphs, preserving full document fidelity while adding derived semantic
//! relationships.
//!
//! The engine has two halves:
//!
//! 1. **Mapping compilation** — a CMF schema representation (produced by an
//!    external schema-conversion tool) compiles once into an immutable
//!    [`MappingSpec`]: object rules with recursively flattened scalar
//!    paths, association rules with ordered endpoints, declared reference
//!    rules, and the element index that separates schema content from
//!    augmentations.
//! 2. **Document conversion** — XML or JSON instance documents are parsed
//!    into a shared source tree and transformed, using the compiled
//!    specification, into graph nodes and edges, then serialized as
//!    ordered idempotent Cypher write statements.
//!
//! The engine is a pure transformation library: it opens no sockets,
//! touches no files, and holds no credentials. The orchestrator owns
//! storage, authentication, and the database driver.
//!
//! ## Quick start
//!
//! ```no_run
//! use niemgraph::{compile, convert_xml, ConvertOptions};
//!
//! # fn example(cmf_text: &str, xml_text: &str) -> Result<(), Box<dyn std::error::Error>> {
//! // Once per schema version:
//! let spec = compile(cmf_text)?;
//!
//! // Once per document:
//! let options = ConvertOptions::new("dataset-7/crash-report-1");
//! let conversion = convert_xml(xml_text, &spec, &options)?;
//!
//! println!(
//!     "{} nodes, {} edges, {} warnings",
//!     conversion.node_count,
//!     conversion.edge_count,
//!     conversion.warnings.len()
//! );
//! // Hand to the database driver, nodes first, then edges:
//! println!("{}", conversion.render_script(true));
//! # Ok(())
//! # }
//! ```
//!
//! ## Parallel batches
//!
//! Conversions of independent documents share only the read-only
//! specification and are embarrassingly parallel; [`convert_batch`] fans a
//! document set out over a bounded worker pool. A parse failure in one
//! document never aborts its siblings.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod batch;
mod convert;
mod error;

pub use batch::{convert_batch, DocumentFormat, DocumentResult, DocumentSource};
pub use convert::{compile, convert_json, convert_xml, Conversion, ConvertOptions};
pub use error::CompileError;

// Re-export the member-crate types that appear in this crate's API.
pub use niemgraph_cmf::{parse_cmf, CmfError, CmfModel, QName};
pub use niemgraph_cypher::{CypherScript, CypherStatement, CypherValue, EmitConfig};
pub use niemgraph_graph::{
    BatchId, ConvertError, ConvertWarning, EdgeKind, GraphEdge, GraphModel, GraphNode,
    PropertyValue,
};
pub use niemgraph_mapping::{schema_digest, MappingError, MappingSpec};
