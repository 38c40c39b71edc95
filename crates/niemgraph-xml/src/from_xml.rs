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

//! XML to source-tree conversion.

use niemgraph_cmf::QName;
use niemgraph_graph::{
    BatchId, ConvertError, ConvertResult, GraphBuilder, GraphModel, PropertyValue, SourceElement,
};
use niemgraph_mapping::MappingSpec;
use roxmltree::{Document, Node};

/// XML Schema instance namespace (`xsi:nil`).
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Maximum element nesting depth (prevents stack overflow).
const MAX_RECURSION_DEPTH: usize = 100;

/// Convert an XML document into a graph.
///
/// Fails with [`ConvertError::Parse`] on malformed XML; everything after
/// parsing is element-recoverable and surfaces as warnings on the model.
pub fn convert_xml(
    xml: &str,
    spec: &MappingSpec,
    batch: BatchId,
    document_label: &str,
) -> ConvertResult<GraphModel> {
    let root = parse_document(xml, spec, document_label)?;
    Ok(GraphBuilder::new(spec, batch, document_label).build(&root))
}

/// Parse an XML document into the shared source tree.
pub fn parse_document(
    xml: &str,
    spec: &MappingSpec,
    document_label: &str,
) -> ConvertResult<SourceElement> {
    let doc = Document::parse(xml)
        .map_err(|e| ConvertError::parse(document_label, e.to_string()))?;
    element_to_source(doc.root_element(), spec, 0).map_err(|message| {
        ConvertError::parse(document_label, message)
    })
}

fn element_to_source(
    node: Node,
    spec: &MappingSpec,
    depth: usize,
) -> Result<SourceElement, String> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(format!(
            "element nesting exceeds {MAX_RECURSION_DEPTH} levels"
        ));
    }
    let qname = canonical_qname(&node, node.tag_name().namespace(), node.tag_name().name(), spec);
    let mut element = SourceElement::new(qname);
    let mut nil = false;

    for attr in node.attributes() {
        let local = attr.name();
        match attr.namespace() {
            Some(ns) if is_structures_namespace(ns) => match local {
                "id" => element.id = Some(attr.value().to_string()),
                "ref" => element.ref_target = Some(attr.value().to_string()),
                "uri" => element.uri = Some(attr.value().to_string()),
                "metadata" => {
                    element
                        .metadata_refs
                        .extend(attr.value().split_whitespace().map(String::from));
                }
                _ => {}
            },
            Some(XSI_NS) => {
                if local == "nil" && attr.value() == "true" {
                    nil = true;
                }
            }
            ns => {
                let attr_qname = canonical_qname(&node, ns, local, spec);
                element.attributes.push((
                    attr_qname,
                    PropertyValue::String(attr.value().to_string()),
                ));
            }
        }
    }

    if let Some(text) = node.text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            element.text = Some(PropertyValue::String(trimmed.to_string()));
        }
    }

    for child in node.children().filter(Node::is_element) {
        element.children.push(element_to_source(child, spec, depth + 1)?);
    }

    // `xsi:nil` is the explicit "reference, not content" marker; a bare
    // structures:ref with no content of its own means the same thing.
    element.pointer = element.ref_target.is_some()
        && (nil || (element.children.is_empty() && element.text.is_none()));

    Ok(element)
}

/// NIEM structures namespaces across releases share the `structures` path
/// segment (`.../niem/structures/5.0/`,
/// `.../niemopen/ns/model/structures/6.0/`).
fn is_structures_namespace(uri: &str) -> bool {
    uri.contains("structures")
}

/// Resolve a (namespace, local) pair to a canonical qname: the
/// specification's prefix for the URI when declared there, otherwise the
/// document's own prefix.
fn canonical_qname(node: &Node, namespace: Option<&str>, local: &str, spec: &MappingSpec) -> QName {
    match namespace {
        Some(uri) => {
            let prefix = spec
                .canonical_prefix(uri)
                .or_else(|| node.lookup_prefix(uri))
                .unwrap_or("");
            QName::new(prefix, local)
        }
        None => QName::local_only(local),
    }
}
