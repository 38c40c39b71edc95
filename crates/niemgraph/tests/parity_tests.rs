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

//! Format parity: a hand-built XML document and its semantically
//! equivalent JSON document must convert to structurally identical graphs.

use std::collections::BTreeMap;

use niemgraph::{BatchId, GraphModel};
use niemgraph_test::{crash_driver_spec, CRASH_DRIVER_JSON, CRASH_DRIVER_XML};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn convert_both() -> (GraphModel, GraphModel) {
    init_tracing();
    let spec = crash_driver_spec();
    let xml = niemgraph_xml::convert_xml(
        CRASH_DRIVER_XML,
        &spec,
        BatchId::derive("parity"),
        "doc",
    )
    .unwrap();
    let json = niemgraph_json::convert_json(
        CRASH_DRIVER_JSON,
        &spec,
        BatchId::derive("parity"),
        "doc",
    )
    .unwrap();
    (xml, json)
}

fn rel_type_multiset(model: &GraphModel) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for edge in model.edges() {
        *counts.entry(edge.rel_type.clone()).or_insert(0) += 1;
    }
    counts
}

fn label_multiset(model: &GraphModel) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for node in model.nodes() {
        *counts.entry(node.label.clone()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_node_and_edge_counts_match() {
    let (xml, json) = convert_both();
    assert_eq!(xml.node_count(), json.node_count());
    assert_eq!(xml.edge_count(), json.edge_count());
}

#[test]
fn test_relationship_type_multisets_match() {
    let (xml, json) = convert_both();
    assert_eq!(rel_type_multiset(&xml), rel_type_multiset(&json));
}

#[test]
fn test_label_multisets_match() {
    let (xml, json) = convert_both();
    assert_eq!(label_multiset(&xml), label_multiset(&json));
}

#[test]
fn test_explicitly_identified_nodes_agree() {
    let (xml, json) = convert_both();
    let batch = BatchId::derive("parity");
    for raw in ["P1", "V1"] {
        let id = batch.qualify(raw);
        let xml_node = xml.node(&id).expect("node in XML graph");
        let json_node = json.node(&id).expect("node in JSON graph");
        assert_eq!(xml_node.label, json_node.label);
        assert_eq!(xml_node.qname, json_node.qname);
        assert_eq!(
            xml_node.properties.keys().collect::<Vec<_>>(),
            json_node.properties.keys().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_person_scalar_values_agree() {
    let (xml, json) = convert_both();
    let id = BatchId::derive("parity").qualify("P1");
    let xml_person = xml.node(&id).unwrap();
    let json_person = json.node(&id).unwrap();
    assert_eq!(
        xml_person.properties["nc_PersonName_nc_PersonGivenName"],
        json_person.properties["nc_PersonName_nc_PersonGivenName"]
    );
    assert_eq!(
        xml_person.properties["nc_PersonName_nc_PersonSurName"],
        json_person.properties["nc_PersonName_nc_PersonSurName"]
    );
}

#[test]
fn test_neither_format_warns_on_the_fixture() {
    let (xml, json) = convert_both();
    assert!(xml.warnings().is_empty());
    assert!(json.warnings().is_empty());
}
