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

//! JSON to source-tree conversion.

use std::collections::BTreeMap;

use niemgraph_cmf::QName;
use niemgraph_graph::{
    BatchId, ConvertError, ConvertResult, GraphBuilder, GraphModel, PropertyValue, SourceElement,
};
use niemgraph_mapping::MappingSpec;
use serde_json::{Map, Value};

/// Maps document prefixes to the specification's canonical prefixes,
/// derived from the document's `@context`.
struct PrefixContext {
    canonical: BTreeMap<String, String>,
}

impl PrefixContext {
    fn from_context(context: Option<&Value>, spec: &MappingSpec) -> Self {
        let mut canonical = BTreeMap::new();
        if let Some(Value::Object(bindings)) = context {
            for (prefix, uri) in bindings {
                if let Value::String(uri) = uri {
                    if let Some(known) = spec.canonical_prefix(uri) {
                        canonical.insert(prefix.clone(), known.to_string());
                    }
                }
            }
        }
        Self { canonical }
    }

    fn qname(&self, key: &str) -> QName {
        let parsed = QName::parse(key);
        match self.canonical.get(&parsed.prefix) {
            Some(canonical) => QName::new(canonical, parsed.local),
            None => parsed,
        }
    }
}

/// Convert a JSON document into a graph.
///
/// Fails with [`ConvertError::Parse`] on malformed JSON or a non-object
/// root; everything after parsing is element-recoverable and surfaces as
/// warnings on the model.
pub fn convert_json(
    json: &str,
    spec: &MappingSpec,
    batch: BatchId,
    document_label: &str,
) -> ConvertResult<GraphModel> {
    let root = parse_document(json, spec, document_label)?;
    Ok(GraphBuilder::new(spec, batch, document_label).build(&root))
}

/// Parse a JSON document into the shared source tree.
pub fn parse_document(
    json: &str,
    spec: &MappingSpec,
    document_label: &str,
) -> ConvertResult<SourceElement> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ConvertError::parse(document_label, e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ConvertError::parse(
            document_label,
            "document root is not a JSON object",
        ));
    };

    let context = PrefixContext::from_context(map.get("@context"), spec);

    let mut elements = Vec::new();
    for (key, value) in &map {
        if key.starts_with('@') {
            continue;
        }
        elements.extend(value_to_elements(context.qname(key), value, &context));
    }

    // A single top-level element is the document root; multiple top-level
    // elements get an anonymous root so the traversal sees one tree.
    if elements.len() == 1 {
        if let Some(root) = elements.pop() {
            return Ok(root);
        }
    }
    let mut root = SourceElement::new(QName::local_only(""));
    root.children = elements;
    Ok(root)
}

/// Expand a key/value pair into elements; arrays fan out into repeated
/// siblings.
fn value_to_elements(
    qname: QName,
    value: &Value,
    context: &PrefixContext,
) -> Vec<SourceElement> {
    match value {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| value_to_elements(qname.clone(), item, context))
            .collect(),
        _ => vec![value_to_element(qname, value, context)],
    }
}

fn value_to_element(qname: QName, value: &Value, context: &PrefixContext) -> SourceElement {
    let mut element = SourceElement::new(qname);
    match value {
        Value::Object(map) => populate_from_object(&mut element, map, context),
        Value::Null => {}
        scalar => element.text = scalar_value(scalar),
    }
    element
}

fn populate_from_object(
    element: &mut SourceElement,
    map: &Map<String, Value>,
    context: &PrefixContext,
) {
    for (key, value) in map {
        match key.as_str() {
            "@id" => element.id = string_value(value),
            "@ref" => element.ref_target = string_value(value),
            "@uri" => element.uri = string_value(value),
            "@metadata" => match value {
                Value::String(s) => {
                    element
                        .metadata_refs
                        .extend(s.split_whitespace().map(String::from));
                }
                Value::Array(items) => {
                    element
                        .metadata_refs
                        .extend(items.iter().filter_map(string_value));
                }
                _ => {}
            },
            // Unknown @-keys (e.g. a nested @context) carry no content.
            key if key.starts_with('@') => {}
            key => {
                element
                    .children
                    .extend(value_to_elements(context.qname(key), value, context));
            }
        }
    }

    // An object holding only a reference is the JSON form of the
    // "reference, not content" marker.
    element.pointer = element.ref_target.is_some()
        && element.id.is_none()
        && element.children.is_empty()
        && element.text.is_none();
}

fn scalar_value(value: &Value) -> Option<PropertyValue> {
    match value {
        Value::String(s) => Some(PropertyValue::String(s.clone())),
        Value::Bool(b) => Some(PropertyValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(PropertyValue::Int(i))
            } else {
                n.as_f64().map(PropertyValue::Float)
            }
        }
        _ => None,
    }
}

fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use niemgraph_test::{crash_driver_spec, CRASH_DRIVER_JSON};

    fn parse_fixture() -> SourceElement {
        parse_document(CRASH_DRIVER_JSON, &crash_driver_spec(), "doc").unwrap()
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = parse_document("{not json", &crash_driver_spec(), "bad-doc").unwrap_err();
        assert!(err.to_string().contains("bad-doc"));
    }

    #[test]
    fn test_non_object_root_is_a_parse_error() {
        let err = parse_document("[1, 2]", &crash_driver_spec(), "doc").unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_root_element() {
        let root = parse_fixture();
        assert_eq!(root.qname, QName::new("exch", "CrashReport"));
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn test_at_id_extracted() {
        let root = parse_fixture();
        let person = root
            .children
            .iter()
            .find(|c| c.qname == QName::new("nc", "Person"))
            .unwrap();
        assert_eq!(person.id.as_deref(), Some("P1"));
    }

    #[test]
    fn test_ref_only_object_is_a_pointer() {
        let root = parse_fixture();
        let drives = root
            .children
            .iter()
            .find(|c| c.qname == QName::new("j", "Drives"))
            .unwrap();
        assert_eq!(drives.children.len(), 2);
        assert!(drives.children.iter().all(SourceElement::is_reference_pointer));
    }

    #[test]
    fn test_scalar_types_preserved() {
        let json = r#"{
          "nc:Vehicle": {
            "@id": "V1",
            "x:SeatCount": 4,
            "x:Electric": true,
            "x:Mileage": 12345.5
          }
        }"#;
        let root = parse_document(json, &crash_driver_spec(), "doc").unwrap();
        let values: BTreeMap<String, PropertyValue> = root
            .children
            .iter()
            .map(|c| (c.qname.to_string(), c.text.clone().unwrap()))
            .collect();
        assert_eq!(values["x:SeatCount"], PropertyValue::Int(4));
        assert_eq!(values["x:Electric"], PropertyValue::Bool(true));
        assert_eq!(values["x:Mileage"], PropertyValue::Float(12345.5));
    }

    #[test]
    fn test_array_fans_out_to_siblings() {
        let json = r#"{
          "exch:CrashReport": {
            "nc:Person": [{"@id": "P1"}, {"@id": "P2"}]
          }
        }"#;
        let root = parse_document(json, &crash_driver_spec(), "doc").unwrap();
        assert_eq!(root.children.len(), 2);
        assert!(root.children.iter().all(|c| c.qname == QName::new("nc", "Person")));
    }

    #[test]
    fn test_context_canonicalizes_foreign_prefixes() {
        let json = r#"{
          "@context": {
            "core": "urn:example:niem-core"
          },
          "core:Person": {"@id": "P1"}
        }"#;
        let root = parse_document(json, &crash_driver_spec(), "doc").unwrap();
        assert_eq!(root.qname, QName::new("nc", "Person"));
    }

    #[test]
    fn test_multiple_roots_get_anonymous_parent() {
        let json = r#"{
          "nc:Person": {"@id": "P1"},
          "nc:Vehicle": {"@id": "V1"}
        }"#;
        let root = parse_document(json, &crash_driver_spec(), "doc").unwrap();
        assert_eq!(root.qname, QName::local_only(""));
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_metadata_refs_string_and_array() {
        let json = r#"{
          "nc:Person": {"@id": "P1", "@metadata": "M1 M2"}
        }"#;
        let root = parse_document(json, &crash_driver_spec(), "doc").unwrap();
        assert_eq!(root.metadata_refs, vec!["M1", "M2"]);

        let json = r#"{
          "nc:Person": {"@id": "P1", "@metadata": ["M1", "M2"]}
        }"#;
        let root = parse_document(json, &crash_driver_spec(), "doc").unwrap();
        assert_eq!(root.metadata_refs, vec!["M1", "M2"]);
    }

    #[test]
    fn test_full_conversion_counts_match_xml_shape() {
        let spec = crash_driver_spec();
        let model = convert_json(
            CRASH_DRIVER_JSON,
            &spec,
            BatchId::derive("json-test"),
            "doc",
        )
        .unwrap();
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.edge_count(), 5);
        assert!(model.warnings().is_empty());
    }

    #[test]
    fn test_full_conversion_drives_edge() {
        let spec = crash_driver_spec();
        let batch = BatchId::derive("json-test");
        let model = convert_json(CRASH_DRIVER_JSON, &spec, batch.clone(), "doc").unwrap();
        let drives: Vec<_> = model.edges().filter(|e| e.rel_type == "DRIVES").collect();
        assert_eq!(drives.len(), 1);
        assert_eq!(drives[0].source_id, batch.qualify("P1"));
        assert_eq!(drives[0].target_id, batch.qualify("V1"));
        assert!(model.nodes().all(|n| n.label != "Drives"));
    }
}
