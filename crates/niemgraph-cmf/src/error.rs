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

//! Error types for CMF parsing.

use thiserror::Error;

/// Error type for CMF parsing operations.
///
/// All variants are fatal to the compilation that requested the parse; a
/// malformed CMF document cannot yield a partial model.
#[derive(Debug, Error)]
pub enum CmfError {
    /// The document is not well-formed XML.
    #[error("invalid CMF: not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document is well-formed XML but structurally not CMF.
    #[error("invalid CMF at {path}: {message}")]
    InvalidCmf {
        /// What was wrong.
        message: String,
        /// Element path to the offending content (e.g. `Model/Class[nc.PersonType]`).
        path: String,
    },
}

impl CmfError {
    /// Construct an [`CmfError::InvalidCmf`] with the offending element path.
    pub fn invalid(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidCmf {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Result type alias for CMF operations.
pub type CmfResult<T> = Result<T, CmfError>;
