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

//! CMF XML parser.
//!
//! Elements are matched by local name so the parser accepts CMF documents
//! regardless of which prefix binds the CMF namespace. Cross-references are
//! recorded verbatim (`structures:ref`); resolution happens in the compiler.

use roxmltree::{Document, Node};

use crate::error::{CmfError, CmfResult};
use crate::model::{
    CmfClass, CmfChildProperty, CmfDatatype, CmfModel, CmfNamespace, CmfProperty,
    CmfPropertyTarget, Occurs,
};

/// Parse a CMF XML document into a [`CmfModel`].
///
/// Fails with [`CmfError::Xml`] on malformed XML and
/// [`CmfError::InvalidCmf`] when the root element is not `Model` or an entry
/// is structurally incomplete (missing `structures:id`, `Name`, or
/// `Namespace`).
pub fn parse_cmf(text: &str) -> CmfResult<CmfModel> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "Model" {
        return Err(CmfError::invalid(
            format!("expected Model root, found '{}'", root.tag_name().name()),
            root.tag_name().name().to_string(),
        ));
    }

    let mut model = CmfModel::default();
    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "Namespace" => {
                let ns = parse_namespace(&child)?;
                model.namespaces.insert(ns.id.clone(), ns);
            }
            "Class" => {
                let class = parse_class(&child)?;
                model.classes.insert(class.id.clone(), class);
            }
            "ObjectProperty" | "DataProperty" => {
                let property = parse_property(&child)?;
                model.properties.insert(property.id.clone(), property);
            }
            "Datatype" => {
                let datatype = parse_datatype(&child)?;
                model.datatypes.insert(datatype.id.clone(), datatype);
            }
            // Unknown top-level entries are skipped; CMF revisions add
            // sections this engine does not consume.
            _ => {}
        }
    }

    Ok(model)
}

fn parse_namespace(node: &Node) -> CmfResult<CmfNamespace> {
    let id = structures_id(node, "Model/Namespace")?;
    let path = format!("Model/Namespace[{id}]");
    Ok(CmfNamespace {
        prefix: required_child_text(node, "NamespacePrefixText", &path)?,
        uri: required_child_text(node, "NamespaceURI", &path)?,
        id,
    })
}

fn parse_class(node: &Node) -> CmfResult<CmfClass> {
    let id = structures_id(node, "Model/Class")?;
    let path = format!("Model/Class[{id}]");

    let mut children = Vec::new();
    for assoc in element_children(node, "ChildPropertyAssociation") {
        children.push(parse_child_property(&assoc, &path)?);
    }

    Ok(CmfClass {
        name: required_child_text(node, "Name", &path)?,
        namespace_ref: required_child_ref(node, "Namespace", &path)?,
        parent_ref: child_ref(node, "SubClassOf"),
        children,
        id,
    })
}

fn parse_child_property(node: &Node, class_path: &str) -> CmfResult<CmfChildProperty> {
    let property_ref = child_ref(node, "ObjectProperty")
        .or_else(|| child_ref(node, "DataProperty"))
        .ok_or_else(|| {
            CmfError::invalid(
                "ChildPropertyAssociation without ObjectProperty or DataProperty ref",
                class_path.to_string(),
            )
        })?;

    let min_occurs = match child_text(node, "MinOccursQuantity") {
        Some(text) => text.parse::<u32>().map_err(|_| {
            CmfError::invalid(
                format!("MinOccursQuantity '{text}' is not a number"),
                format!("{class_path}/{property_ref}"),
            )
        })?,
        None => 1,
    };

    let max_occurs = match child_text(node, "MaxOccursQuantity") {
        Some(text) if text == "unbounded" => Occurs::Unbounded,
        Some(text) => Occurs::Bounded(text.parse::<u32>().map_err(|_| {
            CmfError::invalid(
                format!("MaxOccursQuantity '{text}' is not a number or 'unbounded'"),
                format!("{class_path}/{property_ref}"),
            )
        })?),
        None => Occurs::Bounded(1),
    };

    Ok(CmfChildProperty {
        property_ref,
        min_occurs,
        max_occurs,
    })
}

fn parse_property(node: &Node) -> CmfResult<CmfProperty> {
    let kind = node.tag_name().name().to_string();
    let id = structures_id(node, &format!("Model/{kind}"))?;
    let path = format!("Model/{kind}[{id}]");

    let target = if kind == "ObjectProperty" {
        match child_ref(node, "Class") {
            Some(class_ref) => CmfPropertyTarget::Class(class_ref),
            None => CmfPropertyTarget::Abstract,
        }
    } else {
        match child_ref(node, "Datatype") {
            Some(datatype_ref) => CmfPropertyTarget::Datatype(datatype_ref),
            None => CmfPropertyTarget::Abstract,
        }
    };

    Ok(CmfProperty {
        name: required_child_text(node, "Name", &path)?,
        namespace_ref: required_child_ref(node, "Namespace", &path)?,
        target,
        id,
    })
}

fn parse_datatype(node: &Node) -> CmfResult<CmfDatatype> {
    let id = structures_id(node, "Model/Datatype")?;
    let path = format!("Model/Datatype[{id}]");
    Ok(CmfDatatype {
        name: required_child_text(node, "Name", &path)?,
        namespace_ref: required_child_ref(node, "Namespace", &path)?,
        id,
    })
}

/// The `structures:id` attribute, matched by local name so any prefix works.
fn structures_id(node: &Node, path: &str) -> CmfResult<String> {
    node.attributes()
        .find(|a| a.name() == "id")
        .map(|a| a.value().to_string())
        .ok_or_else(|| CmfError::invalid("missing structures:id", path.to_string()))
}

/// The `structures:ref` attribute of a named child element.
fn child_ref(node: &Node, child_name: &str) -> Option<String> {
    element_children(node, child_name)
        .into_iter()
        .next()
        .and_then(|c| c.attributes().find(|a| a.name() == "ref").map(|a| a.value().to_string()))
}

fn required_child_ref(node: &Node, child_name: &str, path: &str) -> CmfResult<String> {
    child_ref(node, child_name).ok_or_else(|| {
        CmfError::invalid(format!("missing {child_name} ref"), path.to_string())
    })
}

fn child_text(node: &Node, child_name: &str) -> Option<String> {
    element_children(node, child_name)
        .into_iter()
        .next()
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
}

fn required_child_text(node: &Node, child_name: &str, path: &str) -> CmfResult<String> {
    child_text(node, child_name)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CmfError::invalid(format!("missing {child_name}"), path.to_string()))
}

fn element_children<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    node.children()
        .filter(|c| c.is_element() && c.tag_name().name() == name)
        .collect()
}
