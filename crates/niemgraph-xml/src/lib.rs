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

//! XML instance document conversion.
//!
//! Parses a NIEM XML document into the shared
//! [`SourceElement`](niemgraph_graph::SourceElement) tree and drives the
//! shared graph builder. Only this parsing layer is XML-specific; all graph
//! semantics live in `niemgraph-graph`, which is what keeps XML and JSON
//! conversions structurally identical.
//!
//! Structural markers recognized:
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `structures:id` | explicit identifier |
//! | `structures:ref` (+ `xsi:nil="true"`) | reference pointer |
//! | `structures:uri` | URI pointer to an entity defined elsewhere |
//! | `structures:metadata` | metadata references (IDREFS) |
//!
//! Namespace prefixes are canonicalized against the specification's
//! namespace table by URI, so the graph sees the same qnames regardless of
//! which prefixes the document declared.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod from_xml;

pub use from_xml::{convert_xml, parse_document};
