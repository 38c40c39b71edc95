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

//! The shared graph builder.
//!
//! Walks a [`SourceElement`] tree and applies the mapping specification
//! element by element. Both format converters drive this builder, which is
//! what guarantees structurally identical graphs for semantically
//! equivalent XML and JSON inputs.
//!
//! Forward references are the normal case, so the builder never patches
//! labels during descent: edges are queued with deferred endpoint labels
//! and one final pass ([`GraphModel::seal`]) resolves them against the
//! completed node table.

use std::collections::BTreeSet;

use niemgraph_mapping::{AssociationRule, MappingSpec, ScalarPath};

use crate::decide::{classify_element, ElementRole, IdPlan};
use crate::error::ConvertWarning;
use crate::ids::BatchId;
use crate::model::{EdgeKind, GraphEdge, GraphModel, GraphNode, PropertyValue};
use crate::source::SourceElement;

/// Relationship type of represents-edges (role to entity).
const REPRESENTS: &str = "REPRESENTS";

/// Relationship type of metadata reference edges.
const METADATA: &str = "METADATA";

/// Synthetic-id parent marker for elements above the first node ancestor.
const ROOT_PARENT: &str = "$";

/// The nearest node ancestor threaded through recursion.
struct NodeCtx {
    id: String,
    label: String,
}

/// Builds a [`GraphModel`] from a source tree using a compiled
/// specification.
pub struct GraphBuilder<'a> {
    spec: &'a MappingSpec,
    model: GraphModel,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder for one document conversion.
    pub fn new(spec: &'a MappingSpec, batch: BatchId, document_label: impl Into<String>) -> Self {
        Self {
            spec,
            model: GraphModel::new(batch, document_label),
        }
    }

    /// Consume the builder, traversing from the document root element, and
    /// return the sealed graph.
    pub fn build(mut self, root: &SourceElement) -> GraphModel {
        self.visit(root, None, "", 0);
        self.model.seal();
        self.model
    }

    fn visit(
        &mut self,
        element: &SourceElement,
        parent: Option<&NodeCtx>,
        rel_path: &str,
        ordinal: usize,
    ) {
        match classify_element(element, self.spec) {
            ElementRole::Association(rule) => {
                self.visit_association(element, rule, parent, rel_path, ordinal);
            }
            ElementRole::ReferenceOnly => {
                // Guaranteed by the pointer test.
                let target = element.ref_target.as_deref().unwrap_or_default();
                if let Some(parent) = parent {
                    let target_id = self.model.batch().qualify(target);
                    self.model.add_edge(
                        GraphEdge::new(
                            EdgeKind::Containment,
                            &parent.id,
                            target_id,
                            element.qname.relationship_type(),
                        )
                        .with_source_label(&parent.label),
                    );
                }
                // A pointer has no content of its own.
            }
            ElementRole::Node(plan) => {
                self.visit_node(element, plan, parent, rel_path, ordinal);
            }
            ElementRole::Structure => {
                let self_path = structural_path(rel_path, element, ordinal);
                for (i, child) in element.children.iter().enumerate() {
                    self.visit(child, parent, &self_path, i);
                }
            }
        }
    }

    fn visit_node(
        &mut self,
        element: &SourceElement,
        plan: IdPlan,
        parent: Option<&NodeCtx>,
        rel_path: &str,
        ordinal: usize,
    ) {
        let parent_id = parent.map(|p| p.id.as_str()).unwrap_or(ROOT_PARENT);
        let qname_path = format!("{rel_path}/{}", element.qname);
        let batch = self.model.batch().clone();

        let (id, represents_target) = match plan {
            IdPlan::Explicit(raw) => (batch.qualify(&raw), None),
            IdPlan::RoleUri(uri) => {
                let target_raw = uri.strip_prefix('#').unwrap_or(&uri);
                (
                    batch.synthetic(parent_id, &qname_path, ordinal),
                    Some(batch.qualify(target_raw)),
                )
            }
            IdPlan::Synthetic => (batch.synthetic(parent_id, &qname_path, ordinal), None),
        };

        let rule = self.spec.object(&element.qname);
        let label = match rule {
            Some(rule) => rule.label.clone(),
            None => {
                self.model.record(ConvertWarning::UnresolvedMappingRef {
                    qname: element.qname.to_string(),
                });
                element.qname.local.clone()
            }
        };

        let mut node = GraphNode::new(&id, &label, element.qname.to_string());
        if let Some(rule) = rule {
            extract_scalars(element, &rule.scalar_paths, &mut node);
        }
        self.extract_attributes(element, &mut node);
        self.extract_augmentations(element, &mut node);
        let id = self.model.add_node(node);

        if let Some(target_id) = represents_target {
            // Target label stays unresolved here: the entity's concrete
            // type is unknown until (unless) it appears in the document.
            self.model.add_edge(
                GraphEdge::new(EdgeKind::Represents, &id, target_id, REPRESENTS)
                    .with_source_label(&label),
            );
        }
        for metadata_ref in &element.metadata_refs {
            self.model.add_edge(
                GraphEdge::new(
                    EdgeKind::Reference,
                    &id,
                    batch.qualify(metadata_ref),
                    METADATA,
                )
                .with_source_label(&label),
            );
        }

        if let Some(parent) = parent {
            self.model.add_edge(
                GraphEdge::new(
                    EdgeKind::Containment,
                    &parent.id,
                    &id,
                    element.qname.relationship_type(),
                )
                .with_source_label(&parent.label),
            );
        }

        self.add_reference_edges(element, &id, &label);

        let ctx = NodeCtx { id, label };
        for (i, child) in element.children.iter().enumerate() {
            self.visit(child, Some(&ctx), "", i);
        }
    }

    /// Declared reference edges: children matching a reference rule of this
    /// element's qname, with a resolvable target id.
    fn add_reference_edges(&mut self, element: &SourceElement, id: &str, label: &str) {
        let batch = self.model.batch().clone();
        let mut edges = Vec::new();
        for rule in self.spec.references_of(&element.qname) {
            for child in &element.children {
                if child.qname != rule.field {
                    continue;
                }
                if let Some(target_raw) = child.endpoint_id() {
                    edges.push(
                        GraphEdge::new(
                            EdgeKind::Reference,
                            id,
                            batch.qualify(target_raw),
                            &rule.rel_type,
                        )
                        .with_source_label(label),
                    );
                }
            }
        }
        for edge in edges {
            self.model.add_edge(edge);
        }
    }

    fn visit_association(
        &mut self,
        element: &SourceElement,
        rule: &AssociationRule,
        parent: Option<&NodeCtx>,
        rel_path: &str,
        ordinal: usize,
    ) {
        let batch = self.model.batch().clone();

        // Match declared endpoint roles among immediate children, in
        // endpoint declaration order then document order.
        let mut resolved: Vec<(usize, String)> = Vec::new();
        let mut consumed: BTreeSet<usize> = BTreeSet::new();
        for (endpoint_index, endpoint) in rule.endpoints.iter().enumerate() {
            for (child_index, child) in element.children.iter().enumerate() {
                if child.qname != endpoint.role {
                    continue;
                }
                if let Some(raw) = child.endpoint_id() {
                    resolved.push((endpoint_index, raw.to_string()));
                    if child.is_reference_pointer() {
                        consumed.insert(child_index);
                    }
                }
            }
        }

        if resolved.len() >= 2 {
            self.model.add_edge(GraphEdge::new(
                EdgeKind::Association,
                batch.qualify(&resolved[0].1),
                batch.qualify(&resolved[1].1),
                &rule.rel_type,
            ));
        } else {
            self.model.record(ConvertWarning::IncompleteAssociation {
                qname: element.qname.to_string(),
                resolved: resolved.len(),
            });
        }

        // The association materializes as a node only when it carries an
        // explicit identifier or metadata references; otherwise it
        // degenerates to the edge alone.
        let node_ctx = if element.id.is_some() || !element.metadata_refs.is_empty() {
            let parent_id = parent.map(|p| p.id.as_str()).unwrap_or(ROOT_PARENT);
            let qname_path = format!("{rel_path}/{}", element.qname);
            let id = match &element.id {
                Some(raw) => batch.qualify(raw),
                None => batch.synthetic(parent_id, &qname_path, ordinal),
            };

            let mut node = GraphNode::new(&id, &rule.label, element.qname.to_string());
            extract_scalars(element, &rule.scalar_paths, &mut node);
            self.extract_attributes(element, &mut node);
            self.extract_augmentations(element, &mut node);
            let id = self.model.add_node(node);

            for (endpoint_index, raw) in &resolved {
                self.model.add_edge(
                    GraphEdge::new(
                        EdgeKind::Association,
                        &id,
                        batch.qualify(raw),
                        rule.endpoints[*endpoint_index].role.relationship_type(),
                    )
                    .with_source_label(&rule.label),
                );
            }
            for metadata_ref in &element.metadata_refs {
                self.model.add_edge(
                    GraphEdge::new(EdgeKind::Reference, &id, batch.qualify(metadata_ref), METADATA)
                        .with_source_label(&rule.label),
                );
            }
            if let Some(parent) = parent {
                self.model.add_edge(
                    GraphEdge::new(
                        EdgeKind::Containment,
                        &parent.id,
                        &id,
                        element.qname.relationship_type(),
                    )
                    .with_source_label(&parent.label),
                );
            }
            Some(NodeCtx {
                id,
                label: rule.label.clone(),
            })
        } else {
            None
        };

        // Endpoint pointers were consumed above; everything else (inline
        // endpoint content, nested declared elements) is traversed.
        let next_parent = node_ctx.as_ref().or(parent);
        let self_path = structural_path(rel_path, element, ordinal);
        let child_path = if node_ctx.is_some() { "" } else { self_path.as_str() };
        for (i, child) in element.children.iter().enumerate() {
            if consumed.contains(&i) {
                continue;
            }
            self.visit(child, next_parent, child_path, i);
        }
    }

    /// Declared attributes become properties; undeclared ones become
    /// augmentations.
    fn extract_attributes(&self, element: &SourceElement, node: &mut GraphNode) {
        for (qname, value) in &element.attributes {
            if self.spec.is_declared(qname) {
                node.properties.insert(qname.flat_key(), value.clone());
            } else {
                node.augmentations.insert(qname.flat_key(), value.clone());
            }
        }
    }

    /// Immediate children absent from the element index are augmentations,
    /// captured as a single value unless they wrap declared content (which
    /// the traversal reaches on its own).
    fn extract_augmentations(&self, element: &SourceElement, node: &mut GraphNode) {
        for child in &element.children {
            if self.spec.is_declared(&child.qname) || contains_declared(child, self.spec) {
                continue;
            }
            let value = if child.children.is_empty() {
                child.text.clone()
            } else {
                let text = child.deep_text();
                (!text.is_empty()).then_some(PropertyValue::String(text))
            };
            if let Some(value) = value {
                node.augmentations.insert(child.qname.flat_key(), value);
            }
        }
    }
}

/// Whether any element of a subtree (root excluded) is schema-declared.
fn contains_declared(element: &SourceElement, spec: &MappingSpec) -> bool {
    element
        .children
        .iter()
        .any(|c| spec.is_declared(&c.qname) || contains_declared(c, spec))
}

fn structural_path(rel_path: &str, element: &SourceElement, ordinal: usize) -> String {
    format!("{rel_path}/{}[{ordinal}]", element.qname)
}

/// Extract scalar property values along the flattened paths, relative to
/// the element. Children that carry id/ref/uri markers are skipped: they
/// are nodes or references in their own right, not inline property
/// structure.
fn extract_scalars(element: &SourceElement, paths: &[ScalarPath], node: &mut GraphNode) {
    for path in paths {
        let mut values = Vec::new();
        collect_path_values(element, &path.segments, 0, &mut values);
        if values.is_empty() {
            continue;
        }
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            PropertyValue::List(values)
        };
        node.properties.insert(path.key.clone(), value);
    }
}

fn collect_path_values(
    element: &SourceElement,
    segments: &[niemgraph_cmf::QName],
    index: usize,
    out: &mut Vec<PropertyValue>,
) {
    let Some(segment) = segments.get(index) else {
        if let Some(text) = &element.text {
            out.push(text.clone());
        }
        return;
    };
    for child in &element.children {
        if child.qname == *segment
            && child.id.is_none()
            && child.ref_target.is_none()
            && child.uri.is_none()
        {
            collect_path_values(child, segments, index + 1, out);
        }
    }
}
