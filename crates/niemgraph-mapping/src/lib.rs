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

//! Mapping compiler for niemgraph.
//!
//! Analyzes a parsed CMF model and derives the declarative transformation
//! specification ([`MappingSpec`]) that the format converters apply to
//! instance documents:
//!
//! - **Objects**: every element declaration whose class is not rooted in the
//!   association base type, with its recursively flattened scalar paths.
//! - **Associations**: every element whose class ancestry reaches
//!   `AssociationType`, with ordered endpoint roles and a transliterated
//!   relationship type.
//! - **References**: object-valued child properties of non-association
//!   classes, each yielding a declared reference-edge rule.
//! - **Element index**: every declared qname, used by the converters to
//!   distinguish schema content from augmentations.
//!
//! The specification is immutable once compiled, serializable (versioned,
//! keyed by a digest of the CMF text), and safely shared across concurrent
//! conversions. The CMF model it was compiled from can be discarded.
//!
//! # Example
//!
//! ```no_run
//! use niemgraph_cmf::parse_cmf;
//! use niemgraph_mapping::compile;
//!
//! # fn example(cmf_text: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let model = parse_cmf(cmf_text)?;
//! let spec = compile(&model)?;
//!
//! // Persist for reuse across conversions of the same schema version
//! println!("{}", spec.to_json()?);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod classify;
mod compile;
mod digest;
mod error;
mod flatten;
mod spec;

pub use classify::{classify, TypeShape};
pub use compile::{compile, compile_with_options, CompileOptions};
pub use digest::{fnv1a64, schema_digest, SCHEMA_DIGEST_PREFIX};
pub use error::{MappingError, MappingResult};
pub use flatten::{flatten_property, ScalarPath, DEFAULT_MAX_DEPTH};
pub use spec::{
    AssociationRule, Direction, EndpointRule, MappingSpec, ObjectRule, ReferenceRule,
    SPEC_FORMAT_VERSION,
};
