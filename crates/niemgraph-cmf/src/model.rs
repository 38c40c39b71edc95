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

//! In-memory CMF model.
//!
//! Entries are indexed by their `structures:id`. References between entries
//! stay as raw id strings; the mapping compiler resolves them and reports
//! dangling ones.

use std::collections::BTreeMap;

use crate::qname::QName;

/// A parsed CMF model: the schema representation consumed by the mapping
/// compiler.
#[derive(Debug, Clone, Default)]
pub struct CmfModel {
    /// Namespaces by structures id.
    pub namespaces: BTreeMap<String, CmfNamespace>,
    /// Classes by structures id.
    pub classes: BTreeMap<String, CmfClass>,
    /// Object and data properties by structures id.
    pub properties: BTreeMap<String, CmfProperty>,
    /// Datatypes by structures id.
    pub datatypes: BTreeMap<String, CmfDatatype>,
}

impl CmfModel {
    /// Resolve the qualified name of a class, if its namespace ref resolves.
    pub fn class_qname(&self, class: &CmfClass) -> Option<QName> {
        self.namespaces
            .get(&class.namespace_ref)
            .map(|ns| QName::new(&ns.prefix, &class.name))
    }

    /// Resolve the qualified name of a property, if its namespace ref resolves.
    pub fn property_qname(&self, property: &CmfProperty) -> Option<QName> {
        self.namespaces
            .get(&property.namespace_ref)
            .map(|ns| QName::new(&ns.prefix, &property.name))
    }

    /// Resolve the qualified name of a datatype, if its namespace ref resolves.
    pub fn datatype_qname(&self, datatype: &CmfDatatype) -> Option<QName> {
        self.namespaces
            .get(&datatype.namespace_ref)
            .map(|ns| QName::new(&ns.prefix, &datatype.name))
    }

    /// Prefix-to-URI table for every declared namespace.
    pub fn namespace_table(&self) -> BTreeMap<String, String> {
        self.namespaces
            .values()
            .map(|ns| (ns.prefix.clone(), ns.uri.clone()))
            .collect()
    }
}

/// A CMF namespace declaration.
#[derive(Debug, Clone)]
pub struct CmfNamespace {
    /// The structures id of this entry.
    pub id: String,
    /// Namespace prefix (e.g. `nc`).
    pub prefix: String,
    /// Namespace URI.
    pub uri: String,
}

/// A CMF class: a complex content declaration with ordered child properties.
#[derive(Debug, Clone)]
pub struct CmfClass {
    /// The structures id of this entry.
    pub id: String,
    /// Local class name (e.g. `PersonType`).
    pub name: String,
    /// Reference to the owning namespace entry.
    pub namespace_ref: String,
    /// Reference to the parent class (`SubClassOf`), if any.
    pub parent_ref: Option<String>,
    /// Ordered child property declarations.
    pub children: Vec<CmfChildProperty>,
}

/// One `ChildPropertyAssociation` entry: a property reference plus
/// cardinality.
#[derive(Debug, Clone)]
pub struct CmfChildProperty {
    /// Reference to the property entry.
    pub property_ref: String,
    /// Minimum occurrences.
    pub min_occurs: u32,
    /// Maximum occurrences.
    pub max_occurs: Occurs,
}

/// Upper cardinality bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    /// A concrete bound.
    Bounded(u32),
    /// `unbounded`.
    Unbounded,
}

impl Occurs {
    /// Whether more than one occurrence is allowed.
    pub fn is_repeatable(&self) -> bool {
        match self {
            Occurs::Bounded(n) => *n > 1,
            Occurs::Unbounded => true,
        }
    }
}

/// A CMF property: an element declaration binding a name to a type.
#[derive(Debug, Clone)]
pub struct CmfProperty {
    /// The structures id of this entry.
    pub id: String,
    /// Local element name (e.g. `PersonGivenName`).
    pub name: String,
    /// Reference to the owning namespace entry.
    pub namespace_ref: String,
    /// What the property's content is typed as.
    pub target: CmfPropertyTarget,
}

/// The type a property's content resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmfPropertyTarget {
    /// Object property: content is a class instance.
    Class(String),
    /// Data property: content is a datatype value.
    Datatype(String),
    /// Abstract property with no declared content type.
    Abstract,
}

impl CmfPropertyTarget {
    /// Whether this property carries object (class-typed) content.
    pub fn is_object(&self) -> bool {
        matches!(self, CmfPropertyTarget::Class(_))
    }
}

/// A CMF datatype: a simple content declaration (restriction base), never
/// carrying child properties.
#[derive(Debug, Clone)]
pub struct CmfDatatype {
    /// The structures id of this entry.
    pub id: String,
    /// Local datatype name (e.g. `string`).
    pub name: String,
    /// Reference to the owning namespace entry.
    pub namespace_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_namespace() -> CmfModel {
        let mut model = CmfModel::default();
        model.namespaces.insert(
            "nc".to_string(),
            CmfNamespace {
                id: "nc".to_string(),
                prefix: "nc".to_string(),
                uri: "http://example.com/nc/".to_string(),
            },
        );
        model
    }

    #[test]
    fn test_class_qname_resolution() {
        let model = model_with_namespace();
        let class = CmfClass {
            id: "nc.PersonType".to_string(),
            name: "PersonType".to_string(),
            namespace_ref: "nc".to_string(),
            parent_ref: None,
            children: vec![],
        };
        assert_eq!(
            model.class_qname(&class),
            Some(QName::new("nc", "PersonType"))
        );
    }

    #[test]
    fn test_qname_resolution_missing_namespace() {
        let model = CmfModel::default();
        let class = CmfClass {
            id: "nc.PersonType".to_string(),
            name: "PersonType".to_string(),
            namespace_ref: "nc".to_string(),
            parent_ref: None,
            children: vec![],
        };
        assert_eq!(model.class_qname(&class), None);
    }

    #[test]
    fn test_occurs_repeatable() {
        assert!(!Occurs::Bounded(0).is_repeatable());
        assert!(!Occurs::Bounded(1).is_repeatable());
        assert!(Occurs::Bounded(2).is_repeatable());
        assert!(Occurs::Unbounded.is_repeatable());
    }

    #[test]
    fn test_namespace_table() {
        let model = model_with_namespace();
        let table = model.namespace_table();
        assert_eq!(table.get("nc").map(String::as_str), Some("http://example.com/nc/"));
    }
}
