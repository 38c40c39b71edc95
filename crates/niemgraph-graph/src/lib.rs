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

//! Shared graph model and builder.
//!
//! Both format converters parse their input into the same [`SourceElement`]
//! tree and drive one [`GraphBuilder`]. Structural parity between XML and
//! JSON conversions is enforced by this shared post-parse logic, not by
//! shared parsing:
//!
//! ```text
//! XML text  --niemgraph-xml-->  SourceElement \
//!                                              +--> GraphBuilder --> GraphModel
//! JSON text --niemgraph-json--> SourceElement /
//! ```
//!
//! The builder applies the compiled mapping specification element by
//! element: associations degenerate to edges unless they carry data,
//! reference pointers contribute containment edges only, entities become
//! nodes with batch-scoped deterministic ids, and role elements link to the
//! entities they represent through deferred-label `Represents` edges that a
//! final pass resolves against the completed node table.
//!
//! A [`GraphModel`] is exclusively owned by one conversion; the
//! specification it reads is shared immutably. Abandoning a build at any
//! point corrupts nothing — no output exists until the caller serializes
//! the finished model into write statements.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod builder;
mod decide;
mod error;
mod ids;
mod model;
mod source;

pub use builder::GraphBuilder;
pub use decide::{classify_element, ElementRole, IdPlan};
pub use error::{ConvertError, ConvertResult, ConvertWarning};
pub use ids::BatchId;
pub use model::{EdgeKind, GraphEdge, GraphModel, GraphNode, PropertyValue};
pub use source::SourceElement;
