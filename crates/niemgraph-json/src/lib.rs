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

//! JSON instance document conversion.
//!
//! Parses a NIEM JSON document into the shared
//! [`SourceElement`](niemgraph_graph::SourceElement) tree and drives the
//! shared graph builder — the same builder the XML converter drives, which
//! is what guarantees structural parity between the two formats.
//!
//! Structural markers recognized:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `"@id"` | explicit identifier |
//! | `"@ref"` (only content of its object) | reference pointer |
//! | `"@uri"` | URI pointer to an entity defined elsewhere |
//! | `"@metadata"` | metadata references |
//! | `"@context"` | namespace bindings, canonicalized against the spec |
//!
//! Arrays fan out into repeated sibling elements; scalar values become
//! text-carrying leaves with their JSON types preserved.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod from_json;

pub use from_json::{convert_json, parse_document};
