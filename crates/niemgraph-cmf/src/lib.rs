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

//! CMF data model and parser.
//!
//! CMF (Common Model Format) is the schema-level intermediate representation
//! produced by the external NIEM schema-conversion tool. This crate parses
//! the CMF XML serialization into an in-memory [`CmfModel`]:
//!
//! | CMF element | Model type |
//! |-------------|-----------|
//! | `Namespace` | [`CmfNamespace`] (prefix + URI) |
//! | `Class` | [`CmfClass`] (parent ref + ordered child properties) |
//! | `ObjectProperty` / `DataProperty` | [`CmfProperty`] |
//! | `Datatype` | [`CmfDatatype`] |
//!
//! All entries are indexed by their `structures:id` attribute; references
//! between entries (`structures:ref`) are recorded verbatim and resolved by
//! the mapping compiler, not here. The model exists only for the duration of
//! one compilation and is discarded once a mapping specification has been
//! produced.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod model;
mod parser;
mod qname;

pub use error::{CmfError, CmfResult};
pub use model::{
    CmfClass, CmfChildProperty, CmfDatatype, CmfModel, CmfNamespace, CmfProperty,
    CmfPropertyTarget, Occurs,
};
pub use parser::parse_cmf;
pub use qname::QName;
