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

//! Error types for mapping compilation.
//!
//! Every variant is fatal to the compilation: the compiler never produces a
//! partial specification.

use thiserror::Error;

/// Error type for mapping compilation.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The CMF model is structurally unusable (dangling internal reference,
    /// SubClassOf cycle, unresolvable namespace).
    #[error("invalid CMF: {message} ({path})")]
    InvalidCmf {
        /// What was wrong.
        message: String,
        /// The offending entry or reference chain.
        path: String,
    },

    /// A property's type reference is absent from the datatype/class index.
    #[error("unknown datatype reference '{reference}' on property '{property}'")]
    UnknownDatatypeRef {
        /// The unresolved type reference.
        reference: String,
        /// The property that carried it.
        property: String,
    },

    /// Flattening recursed past the depth bound (self-referential schema).
    #[error("mapping depth exceeded at '{path}' (max {max_depth})")]
    MappingDepthExceeded {
        /// The property path where the bound was hit.
        path: String,
        /// The configured bound.
        max_depth: usize,
    },

    /// Two distinct property paths collapse to the same flat key.
    #[error("mapping conflict: '{first}' and '{second}' both collapse to key '{key}'")]
    MappingConflict {
        /// The colliding flat key.
        key: String,
        /// First path.
        first: String,
        /// Second path.
        second: String,
    },

    /// Specification (de)serialization failure.
    #[error("specification serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MappingError {
    /// Construct an [`MappingError::InvalidCmf`].
    pub fn invalid(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidCmf {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Result type alias for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_datatype_ref_display() {
        let err = MappingError::UnknownDatatypeRef {
            reference: "xs.missing".to_string(),
            property: "nc:PersonGivenName".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("xs.missing"));
        assert!(msg.contains("nc:PersonGivenName"));
    }

    #[test]
    fn test_depth_exceeded_display() {
        let err = MappingError::MappingDepthExceeded {
            path: "nc:A/nc:B".to_string(),
            max_depth: 10,
        };
        assert!(err.to_string().contains("max 10"));
    }

    #[test]
    fn test_conflict_display_names_both_paths() {
        let err = MappingError::MappingConflict {
            key: "a_b".to_string(),
            first: "a:b".to_string(),
            second: "a_b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a:b"));
        assert!(msg.contains("a_b"));
    }
}
