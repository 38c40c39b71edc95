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

//! Datatype classification.
//!
//! The shape of a declared type is a pure function of its declared
//! child-property count. Datatypes (restriction bases) have none and are
//! always [`TypeShape::Simple`].

use niemgraph_cmf::CmfModel;

use crate::error::{MappingError, MappingResult};

/// How a declared type behaves under flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    /// Zero declared child properties: a scalar leaf.
    Simple,
    /// Exactly one child property: transparently unwrapped.
    Wrapper,
    /// Two or more child properties: each child contributes its own paths.
    Complex,
}

/// Classify a type reference against the model's class and datatype indexes.
///
/// Deterministic and side-effect free. A reference absent from both indexes
/// yields [`MappingError::UnknownDatatypeRef`]; `property` names the
/// declaration that carried the reference, for error reporting.
pub fn classify(model: &CmfModel, type_ref: &str, property: &str) -> MappingResult<TypeShape> {
    if let Some(class) = model.classes.get(type_ref) {
        return Ok(match class.children.len() {
            0 => TypeShape::Simple,
            1 => TypeShape::Wrapper,
            _ => TypeShape::Complex,
        });
    }
    if model.datatypes.contains_key(type_ref) {
        return Ok(TypeShape::Simple);
    }
    Err(MappingError::UnknownDatatypeRef {
        reference: type_ref.to_string(),
        property: property.to_string(),
    })
}
