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

//! The per-element role decision.
//!
//! One pure function decides what an element becomes — an association, a
//! pure reference pointer, a node (with one of three id plans), or plain
//! structure. The traversal dispatches on the closed result instead of
//! scattering the conditions, which keeps the decision auditable and
//! independently testable.

use niemgraph_mapping::{AssociationRule, MappingSpec};

use crate::source::SourceElement;

/// What an element becomes in the graph.
#[derive(Debug, PartialEq)]
pub enum ElementRole<'a> {
    /// A declared association: edge between resolved endpoints, node only
    /// when data-bearing.
    Association(&'a AssociationRule),
    /// A pure pointer: contributes a containment edge to the referenced id,
    /// never a node.
    ReferenceOnly,
    /// An entity, role, or identified element: becomes a node.
    Node(IdPlan),
    /// Structural or property content: no node of its own; traversal
    /// continues through it.
    Structure,
}

/// How a node's id is derived, in resolution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPlan {
    /// Explicit document-local identifier, batch-prefixed.
    Explicit(String),
    /// URI-style pointer to an entity defined elsewhere: mint a synthetic
    /// role id and queue a represents-edge to the referenced entity, target
    /// label unresolved (the entity's concrete type is unknown here).
    RoleUri(String),
    /// Deterministic synthetic id from (parent id, qname, ordinal).
    Synthetic,
}

/// Decide what an element becomes. Pure; inspects only the element and the
/// specification.
pub fn classify_element<'a>(
    element: &SourceElement,
    spec: &'a MappingSpec,
) -> ElementRole<'a> {
    if let Some(rule) = spec.association(&element.qname) {
        return ElementRole::Association(rule);
    }

    if element.is_reference_pointer() {
        return ElementRole::ReferenceOnly;
    }

    if let Some(id) = &element.id {
        return ElementRole::Node(IdPlan::Explicit(id.clone()));
    }
    if let Some(uri) = &element.uri {
        return ElementRole::Node(IdPlan::RoleUri(uri.clone()));
    }
    if spec.object(&element.qname).is_some() || !element.metadata_refs.is_empty() {
        return ElementRole::Node(IdPlan::Synthetic);
    }

    ElementRole::Structure
}
