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

//! Top-level error types.

use niemgraph_cmf::CmfError;
use niemgraph_mapping::MappingError;
use thiserror::Error;

/// Error compiling a CMF text into a mapping specification.
///
/// All variants are fatal to the compilation and carry the offending
/// qname or path; the orchestrator maps them to user-facing responses.
#[derive(Debug, Error)]
pub enum CompileError {
    /// CMF parsing failed.
    #[error(transparent)]
    Cmf(#[from] CmfError),

    /// Mapping derivation failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}
