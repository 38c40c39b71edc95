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

//! The statement emitter.
//!
//! Serializes a sealed [`GraphModel`] into idempotent write statements,
//! all node upserts first, then all relationship upserts, each distinct
//! (endpoints, type) triple exactly once.

use std::collections::{BTreeMap, BTreeSet};

use niemgraph_graph::{GraphEdge, GraphModel, GraphNode, PropertyValue};

use crate::config::EmitConfig;
use crate::escape::{escape_identifier, escape_label, escape_relationship_type, quote_string};
use crate::statements::{property_map_literal, CypherStatement, CypherValue};

/// Key namespace for augmentation properties.
const AUGMENTATION_PREFIX: &str = "aug_";

/// Flag property set when a node carries augmentation content.
const AUGMENTED_FLAG: &str = "_augmented";

/// Property recording the source element qname.
const QNAME_PROPERTY: &str = "_qname";

/// Emit the ordered write statements for a finished graph.
///
/// Node properties are set `ON CREATE` only: a later merge of the same
/// batch-scoped id never overwrites what the first writer stored.
pub fn emit(model: &GraphModel, config: &EmitConfig) -> Vec<CypherStatement> {
    let mut statements = Vec::with_capacity(model.node_count() + model.edge_count());

    for node in model.nodes() {
        statements.push(node_statement(node, model.document_label(), config));
    }

    let mut seen: BTreeSet<(&str, &str, &str)> = BTreeSet::new();
    for edge in model.edges() {
        if seen.insert((&edge.source_id, &edge.target_id, &edge.rel_type)) {
            statements.push(edge_statement(edge, config));
        }
    }

    statements
}

/// Emit statements grouped into execution batches of
/// [`EmitConfig::batch_size`] statements each. Node statements still
/// strictly precede edge statements across the whole sequence, so executing
/// batches in order preserves endpoint-before-edge ordering.
pub fn emit_batches(model: &GraphModel, config: &EmitConfig) -> Vec<Vec<CypherStatement>> {
    let statements = emit(model, config);
    let mut batches = Vec::new();
    let mut current = Vec::with_capacity(config.batch_size.min(statements.len()));
    for statement in statements {
        if current.len() == config.batch_size {
            batches.push(std::mem::take(&mut current));
        }
        current.push(statement);
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

fn node_statement(node: &GraphNode, document_label: &str, config: &EmitConfig) -> CypherStatement {
    let mut id_props = BTreeMap::new();
    id_props.insert(
        config.id_property.clone(),
        CypherValue::String(node.id.clone()),
    );

    let mut on_create: BTreeMap<String, CypherValue> = BTreeMap::new();
    on_create.insert(
        QNAME_PROPERTY.to_string(),
        CypherValue::String(node.qname.clone()),
    );
    if let Some(provenance) = &config.provenance_property {
        on_create.insert(
            provenance.clone(),
            CypherValue::String(document_label.to_string()),
        );
    }
    for (key, value) in &node.properties {
        on_create.insert(key.clone(), property_to_cypher(value));
    }
    for (key, value) in &node.augmentations {
        on_create.insert(
            format!("{AUGMENTATION_PREFIX}{key}"),
            property_to_cypher(value),
        );
    }
    if node.is_augmented() {
        on_create.insert(AUGMENTED_FLAG.to_string(), CypherValue::Bool(true));
    }

    let mut query = format!(
        "MERGE (n{} {})",
        escape_label(&node.label),
        property_map_literal(&id_props)
    );
    if !on_create.is_empty() {
        let assignments: Vec<String> = on_create
            .iter()
            .map(|(k, v)| format!("n.{} = {}", escape_identifier(k), v.to_cypher_literal()))
            .collect();
        query.push_str("\nON CREATE SET ");
        query.push_str(&assignments.join(", "));
    }

    CypherStatement::merge_node(query).with_comment(format!("{} node", node.label))
}

fn edge_statement(edge: &GraphEdge, config: &EmitConfig) -> CypherStatement {
    let id_property = escape_identifier(&config.id_property);
    let source_label = edge
        .source_label
        .as_deref()
        .map(escape_label)
        .unwrap_or_default();
    // A deferred label means the endpoint is matched by id alone.
    let target_label = edge
        .target_label
        .as_deref()
        .map(escape_label)
        .unwrap_or_default();

    let mut query = format!(
        "MATCH (a{source_label} {{{id_property}: {}}})\nMATCH (b{target_label} {{{id_property}: {}}})\nMERGE (a)-[r:{}]->(b)",
        quote_string(&edge.source_id),
        quote_string(&edge.target_id),
        escape_relationship_type(&edge.rel_type),
    );
    if !edge.properties.is_empty() {
        let assignments: Vec<String> = edge
            .properties
            .iter()
            .map(|(k, v)| {
                format!(
                    "r.{} = {}",
                    escape_identifier(k),
                    property_to_cypher(v).to_cypher_literal()
                )
            })
            .collect();
        query.push_str("\nON CREATE SET ");
        query.push_str(&assignments.join(", "));
    }

    CypherStatement::merge_relationship(query)
        .with_comment(format!("{} relationship", edge.rel_type))
}

fn property_to_cypher(value: &PropertyValue) -> CypherValue {
    match value {
        PropertyValue::Bool(b) => CypherValue::Bool(*b),
        PropertyValue::Int(i) => CypherValue::Int(*i),
        PropertyValue::Float(f) => CypherValue::Float(*f),
        PropertyValue::String(s) => CypherValue::String(s.clone()),
        PropertyValue::List(items) => {
            CypherValue::List(items.iter().map(property_to_cypher).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::StatementType;
    use niemgraph_graph::{BatchId, EdgeKind, GraphEdge, GraphModel, GraphNode};

    fn sample_model() -> GraphModel {
        let batch = BatchId::derive("emit-test");
        let mut model = GraphModel::new(batch.clone(), "doc-1");
        let mut person = GraphNode::new(batch.qualify("P1"), "Person", "nc:Person");
        person
            .properties
            .insert("nc_PersonName_nc_PersonGivenName".to_string(), "Ann".into());
        model.add_node(person);
        model.add_node(GraphNode::new(batch.qualify("V1"), "Vehicle", "nc:Vehicle"));
        model.add_edge(GraphEdge::new(
            EdgeKind::Association,
            batch.qualify("P1"),
            batch.qualify("V1"),
            "DRIVES",
        ));
        model.seal();
        model
    }

    #[test]
    fn test_nodes_precede_edges() {
        let statements = emit(&sample_model(), &EmitConfig::default());
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].statement_type, StatementType::MergeNode);
        assert_eq!(statements[1].statement_type, StatementType::MergeNode);
        assert_eq!(
            statements[2].statement_type,
            StatementType::MergeRelationship
        );
    }

    #[test]
    fn test_node_statement_shape() {
        let statements = emit(&sample_model(), &EmitConfig::default());
        let person = statements
            .iter()
            .find(|s| s.query.contains(":Person"))
            .unwrap();
        assert!(person.query.starts_with("MERGE (n:Person {_niem_id: '"));
        assert!(person.query.contains("ON CREATE SET"));
        assert!(person
            .query
            .contains("n.nc_PersonName_nc_PersonGivenName = 'Ann'"));
        assert!(person.query.contains("n._doc = 'doc-1'"));
        assert!(person.query.contains("n._qname = 'nc:Person'"));
    }

    #[test]
    fn test_edge_statement_shape() {
        let statements = emit(&sample_model(), &EmitConfig::default());
        let edge = &statements[2];
        assert!(edge.query.contains("MATCH (a:Person {_niem_id: '"));
        assert!(edge.query.contains("MATCH (b:Vehicle {_niem_id: '"));
        assert!(edge.query.contains("MERGE (a)-[r:DRIVES]->(b)"));
    }

    #[test]
    fn test_deferred_label_matches_by_id_alone() {
        let batch = BatchId::derive("emit-test");
        let mut model = GraphModel::new(batch.clone(), "doc-1");
        model.add_node(GraphNode::new(batch.qualify("R1"), "CrashDriver", "j:CrashDriver"));
        model.add_edge(GraphEdge::new(
            EdgeKind::Represents,
            batch.qualify("R1"),
            batch.qualify("NEVER"),
            "REPRESENTS",
        ));
        model.seal();

        let statements = emit(&model, &EmitConfig::default());
        let edge = statements.last().unwrap();
        assert!(edge.query.contains("MATCH (b {_niem_id: '"));
    }

    #[test]
    fn test_duplicate_edges_emit_once() {
        let batch = BatchId::derive("emit-test");
        let mut model = GraphModel::new(batch.clone(), "doc-1");
        model.add_node(GraphNode::new(batch.qualify("A"), "Person", "nc:Person"));
        model.add_node(GraphNode::new(batch.qualify("B"), "Person", "nc:Person"));
        for _ in 0..3 {
            model.add_edge(GraphEdge::new(
                EdgeKind::Reference,
                batch.qualify("A"),
                batch.qualify("B"),
                "KNOWS",
            ));
        }
        model.seal();

        let statements = emit(&model, &EmitConfig::default());
        let edge_count = statements
            .iter()
            .filter(|s| s.statement_type == StatementType::MergeRelationship)
            .count();
        assert_eq!(edge_count, 1);
    }

    #[test]
    fn test_emission_is_deterministic() {
        let first = emit(&sample_model(), &EmitConfig::default());
        let second = emit(&sample_model(), &EmitConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_augmentations_prefixed_and_flagged() {
        let batch = BatchId::derive("emit-test");
        let mut model = GraphModel::new(batch.clone(), "doc-1");
        let mut node = GraphNode::new(batch.qualify("P1"), "Person", "nc:Person");
        node.augmentations
            .insert("x_FavoriteColor".to_string(), "teal".into());
        model.add_node(node);
        model.seal();

        let statements = emit(&model, &EmitConfig::default());
        let query = &statements[0].query;
        assert!(query.contains("n.aug_x_FavoriteColor = 'teal'"));
        assert!(query.contains("n._augmented = true"));
    }

    #[test]
    fn test_batching_respects_size_and_order() {
        let batch = BatchId::derive("emit-test");
        let mut model = GraphModel::new(batch.clone(), "doc-1");
        for i in 0..5 {
            model.add_node(GraphNode::new(
                batch.qualify(&format!("N{i}")),
                "Person",
                "nc:Person",
            ));
        }
        model.seal();

        let config = EmitConfig::default().with_batch_size(2);
        let batches = emit_batches(&model, &config);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 2);
        assert_eq!(batches[2].len(), 1);
    }

    #[test]
    fn test_provenance_can_be_omitted() {
        let statements = emit(&sample_model(), &EmitConfig::new().without_provenance());
        assert!(!statements[0].query.contains("_doc"));
    }
}
