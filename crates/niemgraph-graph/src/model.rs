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

//! The in-memory property graph produced by one conversion.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::ConvertWarning;
use crate::ids::BatchId;

/// A scalar (or list-of-scalar) property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Repeated values (repeatable element).
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Render as a plain string (for augmentation capture and diagnostics).
    pub fn to_display_string(&self) -> String {
        match self {
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Int(i) => i.to_string(),
            PropertyValue::Float(f) => f.to_string(),
            PropertyValue::String(s) => s.clone(),
            PropertyValue::List(items) => items
                .iter()
                .map(PropertyValue::to_display_string)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

/// A graph node: one entity, role, or data-bearing association.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Batch-scoped unique id.
    pub id: String,
    /// Node label.
    pub label: String,
    /// Source element qname.
    pub qname: String,
    /// Declared scalar properties, by flat key.
    pub properties: BTreeMap<String, PropertyValue>,
    /// Augmentation properties (content absent from the element index),
    /// stored under their own key namespace by the emitter.
    pub augmentations: BTreeMap<String, PropertyValue>,
}

impl GraphNode {
    /// Create a node with no properties.
    pub fn new(id: impl Into<String>, label: impl Into<String>, qname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            qname: qname.into(),
            properties: BTreeMap::new(),
            augmentations: BTreeMap::new(),
        }
    }

    /// Whether the node carries any augmentation content.
    pub fn is_augmented(&self) -> bool {
        !self.augmentations.is_empty()
    }

    /// Merge a later occurrence of the same identifier into this node,
    /// first writer wins: only keys not already present are adopted.
    /// Returns true when any later value was dropped in conflict.
    fn merge_from(&mut self, other: GraphNode) -> bool {
        let mut dropped = false;
        for (key, value) in other.properties {
            match self.properties.get(&key) {
                None => {
                    self.properties.insert(key, value);
                }
                Some(existing) if *existing != value => dropped = true,
                Some(_) => {}
            }
        }
        for (key, value) in other.augmentations {
            match self.augmentations.get(&key) {
                None => {
                    self.augmentations.insert(key, value);
                }
                Some(existing) if *existing != value => dropped = true,
                Some(_) => {}
            }
        }
        dropped
    }
}

/// The relationship family an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Parent-child structural nesting in the source document.
    Containment,
    /// Declared semantic relationship, independent of nesting.
    Reference,
    /// Association-derived relationship (edge form or role edge).
    Association,
    /// Role element to the entity it denotes.
    Represents,
}

/// A graph edge. Endpoint ids are always present; labels may stay deferred
/// until (or beyond) the resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    /// Relationship family.
    pub kind: EdgeKind,
    /// Source node id.
    pub source_id: String,
    /// Source node label, if known.
    pub source_label: Option<String>,
    /// Target node id.
    pub target_id: String,
    /// Target node label; deferred (None) until resolution, and retained as
    /// None for represents-edges whose entity never appears.
    pub target_label: Option<String>,
    /// Relationship type.
    pub rel_type: String,
    /// Edge properties.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl GraphEdge {
    /// Create an edge with deferred labels and no properties.
    pub fn new(
        kind: EdgeKind,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source_id: source_id.into(),
            source_label: None,
            target_id: target_id.into(),
            target_label: None,
            rel_type: rel_type.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Set the source label.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }
}

/// The property graph built from one document conversion.
///
/// Exclusively owned by its conversion; never shared. Dropping it
/// mid-build discards everything — no partial output is observable.
#[derive(Debug)]
pub struct GraphModel {
    batch: BatchId,
    document_label: String,
    nodes: BTreeMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
    warnings: Vec<ConvertWarning>,
}

impl GraphModel {
    /// Create an empty model for one document.
    pub fn new(batch: BatchId, document_label: impl Into<String>) -> Self {
        Self {
            batch,
            document_label: document_label.into(),
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// The batch this model's ids are scoped to.
    pub fn batch(&self) -> &BatchId {
        &self.batch
    }

    /// The document label, recorded as provenance on every node.
    pub fn document_label(&self) -> &str {
        &self.document_label
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Iterate nodes in id order (deterministic).
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Iterate edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[ConvertWarning] {
        &self.warnings
    }

    /// Insert a node. A duplicate id merges with first-writer-wins
    /// semantics and records a [`ConvertWarning::DuplicateIdentifier`].
    /// Returns the id the node lives under.
    pub fn add_node(&mut self, node: GraphNode) -> String {
        let id = node.id.clone();
        match self.nodes.get_mut(&id) {
            Some(existing) => {
                let qname = node.qname.clone();
                existing.merge_from(node);
                self.record(ConvertWarning::DuplicateIdentifier {
                    id: id.clone(),
                    qname,
                });
            }
            None => {
                self.nodes.insert(id.clone(), node);
            }
        }
        id
    }

    /// Append an edge. Endpoint existence is checked at seal time, not here;
    /// forward references are the normal case.
    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    /// Record a warning (and log it).
    pub fn record(&mut self, warning: ConvertWarning) {
        warn!(document = %self.document_label, %warning, "conversion warning");
        self.warnings.push(warning);
    }

    /// Finish the build: resolve deferred endpoint labels against the
    /// completed node table, then drop dangling edges.
    ///
    /// Represents-edges survive an absent target (the entity may live
    /// outside this document and is matched by id alone downstream); every
    /// other kind is dropped with a [`ConvertWarning::DanglingReference`].
    pub fn seal(&mut self) {
        for edge in &mut self.edges {
            if edge.source_label.is_none() {
                edge.source_label = self.nodes.get(&edge.source_id).map(|n| n.label.clone());
            }
            if edge.target_label.is_none() {
                edge.target_label = self.nodes.get(&edge.target_id).map(|n| n.label.clone());
            }
        }

        let nodes = &self.nodes;
        let mut dropped = Vec::new();
        self.edges.retain(|edge| {
            if edge.kind == EdgeKind::Represents {
                return true;
            }
            let ok = nodes.contains_key(&edge.source_id) && nodes.contains_key(&edge.target_id);
            if !ok {
                let missing = if nodes.contains_key(&edge.source_id) {
                    &edge.target_id
                } else {
                    &edge.source_id
                };
                dropped.push(ConvertWarning::DanglingReference {
                    target: missing.clone(),
                    rel_type: edge.rel_type.clone(),
                });
            }
            ok
        });
        for warning in dropped {
            self.record(warning);
        }
    }
}
