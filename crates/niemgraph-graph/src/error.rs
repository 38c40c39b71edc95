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

//! Conversion errors and warnings.
//!
//! A conversion either fails as a whole ([`ConvertError`], fatal to that
//! document only — siblings in a batch proceed) or completes with a list of
//! element-recoverable [`ConvertWarning`]s, each of which has a defined
//! fallback. There is no partial output: a failed document yields no
//! statements at all.

use serde::Serialize;
use thiserror::Error;

/// Fatal conversion error: the document produced no graph.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The document text could not be parsed.
    #[error("parse error in document '{document}': {message}")]
    Parse {
        /// Document label, for batch reporting.
        document: String,
        /// Parser diagnostic.
        message: String,
    },
}

impl ConvertError {
    /// Construct a [`ConvertError::Parse`].
    pub fn parse(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            document: document.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Element-recoverable conversion warning.
///
/// Warnings are recorded on the graph model (and logged through `tracing`)
/// while conversion continues with the documented fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConvertWarning {
    /// An element looked like an entity but matched no mapping rule; it was
    /// converted with its local name as label and no declared properties.
    #[error("unresolved mapping reference for element '{qname}'")]
    UnresolvedMappingRef {
        /// The unmatched element qname.
        qname: String,
    },

    /// An explicit identifier occurred more than once in the document;
    /// the first occurrence won and later property values merged only where
    /// absent.
    #[error("duplicate identifier '{id}' on element '{qname}'")]
    DuplicateIdentifier {
        /// The duplicated raw identifier.
        id: String,
        /// The element carrying the later occurrence.
        qname: String,
    },

    /// An edge pointed at an identifier never defined in the document; the
    /// edge was dropped.
    #[error("dangling reference to '{target}' (relationship {rel_type})")]
    DanglingReference {
        /// The unresolved target id.
        target: String,
        /// The relationship type of the dropped edge.
        rel_type: String,
    },

    /// An association resolved fewer than two endpoints; no edge could be
    /// emitted.
    #[error("association '{qname}' resolved only {resolved} endpoint(s)")]
    IncompleteAssociation {
        /// The association element qname.
        qname: String,
        /// How many endpoints resolved.
        resolved: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_document() {
        let err = ConvertError::parse("crash-report-1", "unexpected end of input");
        let msg = err.to_string();
        assert!(msg.contains("crash-report-1"));
        assert!(msg.contains("unexpected end of input"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ConvertWarning::DanglingReference {
            target: "b:P9".to_string(),
            rel_type: "DRIVES".to_string(),
        };
        assert!(warning.to_string().contains("b:P9"));
        assert!(warning.to_string().contains("DRIVES"));
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = ConvertWarning::UnresolvedMappingRef {
            qname: "x:Thing".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("unresolved_mapping_ref"));
        assert!(json.contains("x:Thing"));
    }
}
