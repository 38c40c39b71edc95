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

//! The mapping compiler.
//!
//! Walks every element declaration of a CMF model and derives object,
//! association, and reference rules plus the element index. Classes whose
//! `SubClassOf` ancestry reaches `AssociationType` become associations;
//! everything else becomes an object with flattened scalar paths.

use std::collections::{BTreeMap, BTreeSet};

use niemgraph_cmf::{CmfClass, CmfModel, CmfProperty, CmfPropertyTarget, QName};
use tracing::debug;

use crate::error::{MappingError, MappingResult};
use crate::flatten::{flatten_children, DEFAULT_MAX_DEPTH};
use crate::spec::{
    AssociationRule, Direction, EndpointRule, MappingSpec, ObjectRule, ReferenceRule,
    SPEC_FORMAT_VERSION,
};

/// Local name of the association base type. Any class whose ancestry reaches
/// a class with this name (any namespace) is compiled as an association.
const ASSOCIATION_BASE: &str = "AssociationType";

/// Options controlling compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Flattening recursion bound.
    pub max_depth: usize,
    /// Identity digest of the source CMF text, recorded in the spec.
    pub schema_digest: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            schema_digest: None,
        }
    }
}

/// Compile a CMF model with default options.
pub fn compile(model: &CmfModel) -> MappingResult<MappingSpec> {
    compile_with_options(model, &CompileOptions::default())
}

/// Compile a CMF model into an immutable [`MappingSpec`].
///
/// Fails with [`MappingError::InvalidCmf`] on dangling internal references
/// or `SubClassOf` cycles, and with the classifier's/flattener's errors.
pub fn compile_with_options(
    model: &CmfModel,
    options: &CompileOptions,
) -> MappingResult<MappingSpec> {
    let mut objects = BTreeMap::new();
    let mut associations = BTreeMap::new();
    let mut references = Vec::new();
    let mut element_index = BTreeSet::new();

    for property in model.properties.values() {
        element_index.insert(required_qname(model, property)?.to_string());
    }

    // Element-to-type declarations, in deterministic (BTreeMap) order.
    for property in model.properties.values() {
        let CmfPropertyTarget::Class(class_ref) = &property.target else {
            continue;
        };
        let qname = required_qname(model, property)?;
        let class = model.classes.get(class_ref).ok_or_else(|| {
            MappingError::UnknownDatatypeRef {
                reference: class_ref.clone(),
                property: qname.to_string(),
            }
        })?;

        if is_association(model, class)? {
            let rule = compile_association(model, qname.clone(), class, options)?;
            associations.insert(qname.to_string(), rule);
        } else {
            let (rule, refs) = compile_object(model, qname.clone(), class, options)?;
            objects.insert(qname.to_string(), rule);
            references.extend(refs);
        }
    }

    debug!(
        objects = objects.len(),
        associations = associations.len(),
        references = references.len(),
        elements = element_index.len(),
        "compiled mapping specification"
    );

    Ok(MappingSpec {
        format_version: SPEC_FORMAT_VERSION.to_string(),
        schema_digest: options.schema_digest.clone().unwrap_or_default(),
        namespaces: model.namespace_table(),
        objects,
        associations,
        references,
        element_index,
    })
}

fn compile_object(
    model: &CmfModel,
    qname: QName,
    class: &CmfClass,
    options: &CompileOptions,
) -> MappingResult<(ObjectRule, Vec<ReferenceRule>)> {
    let mut flattenable = Vec::new();
    let mut references = Vec::new();

    for child in &class.children {
        let child_property = resolve_child(model, &child.property_ref, &class.id)?;
        let child_qname = required_qname(model, child_property)?;

        if let Some(target_class) = object_target(model, child_property) {
            if is_association(model, target_class)? {
                // Association-typed children are handled entirely by the
                // association machinery.
                continue;
            }
            references.push(ReferenceRule {
                owner: qname.clone(),
                field: child_qname.clone(),
                target_label: child_qname.local.clone(),
                rel_type: child_qname.relationship_type(),
            });
        }
        flattenable.push(child.property_ref.as_str());
    }

    let scalar_paths = flatten_children(model, flattenable, options.max_depth)?;
    let rule = ObjectRule {
        label: qname.local.clone(),
        qname,
        scalar_paths,
    };
    Ok((rule, references))
}

fn compile_association(
    model: &CmfModel,
    qname: QName,
    class: &CmfClass,
    options: &CompileOptions,
) -> MappingResult<AssociationRule> {
    let mut endpoints = Vec::new();
    let mut data_children = Vec::new();

    for child in &class.children {
        let child_property = resolve_child(model, &child.property_ref, &class.id)?;
        let child_qname = required_qname(model, child_property)?;

        match object_target(model, child_property) {
            Some(target_class) if !is_association(model, target_class)? => {
                let direction = if endpoints.is_empty() {
                    Direction::Source
                } else {
                    Direction::Target
                };
                endpoints.push(EndpointRule {
                    role: child_qname.clone(),
                    target_label: child_qname.local.clone(),
                    direction,
                });
            }
            Some(_) => {}
            None => data_children.push(child.property_ref.as_str()),
        }
    }

    let scalar_paths = flatten_children(model, data_children, options.max_depth)?;
    Ok(AssociationRule {
        label: qname.local.clone(),
        rel_type: qname.relationship_type(),
        qname,
        endpoints,
        scalar_paths,
    })
}

/// Whether a class's ancestry (itself included) reaches the association base
/// type. A missing parent reference ends the chain; CMF exports routinely
/// omit the structural base classes themselves.
fn is_association(model: &CmfModel, class: &CmfClass) -> MappingResult<bool> {
    let mut visited = BTreeSet::new();
    let mut current = class;
    loop {
        if current.name == ASSOCIATION_BASE {
            return Ok(true);
        }
        if !visited.insert(current.id.clone()) {
            return Err(MappingError::invalid(
                "SubClassOf cycle",
                format!("{} -> {}", class.id, current.id),
            ));
        }
        match &current.parent_ref {
            Some(parent_ref) => match model.classes.get(parent_ref) {
                Some(parent) => current = parent,
                None => {
                    // Parent declared outside the model: association-ness can
                    // still be visible from the reference id itself.
                    return Ok(parent_ref.ends_with(ASSOCIATION_BASE));
                }
            },
            None => return Ok(false),
        }
    }
}

/// The target class of an object-valued property, if it is one.
fn object_target<'a>(model: &'a CmfModel, property: &CmfProperty) -> Option<&'a CmfClass> {
    match &property.target {
        CmfPropertyTarget::Class(class_ref) => model.classes.get(class_ref),
        _ => None,
    }
}

fn resolve_child<'a>(
    model: &'a CmfModel,
    property_ref: &str,
    class_id: &str,
) -> MappingResult<&'a CmfProperty> {
    model.properties.get(property_ref).ok_or_else(|| {
        MappingError::invalid(
            format!("unresolved child property reference '{property_ref}'"),
            class_id.to_string(),
        )
    })
}

fn required_qname(model: &CmfModel, property: &CmfProperty) -> MappingResult<QName> {
    model.property_qname(property).ok_or_else(|| {
        MappingError::invalid("unresolved namespace reference", property.id.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use niemgraph_cmf::parse_cmf;

    /// Person/Vehicle/Drives schema used throughout the engine's tests.
    pub(crate) const DRIVES_CMF: &str = r#"<Model xmlns:s="urn:s">
      <Namespace s:id="nc">
        <NamespaceURI>urn:example:niem-core</NamespaceURI>
        <NamespacePrefixText>nc</NamespacePrefixText>
      </Namespace>
      <Namespace s:id="j">
        <NamespaceURI>urn:example:justice</NamespaceURI>
        <NamespacePrefixText>j</NamespacePrefixText>
      </Namespace>
      <Class s:id="nc.PersonType">
        <Name>PersonType</Name>
        <Namespace s:ref="nc"/>
        <ChildPropertyAssociation>
          <ObjectProperty s:ref="nc.PersonName"/>
        </ChildPropertyAssociation>
      </Class>
      <Class s:id="nc.PersonNameType">
        <Name>PersonNameType</Name>
        <Namespace s:ref="nc"/>
        <ChildPropertyAssociation>
          <DataProperty s:ref="nc.PersonGivenName"/>
        </ChildPropertyAssociation>
        <ChildPropertyAssociation>
          <DataProperty s:ref="nc.PersonSurName"/>
        </ChildPropertyAssociation>
      </Class>
      <Class s:id="nc.VehicleType">
        <Name>VehicleType</Name>
        <Namespace s:ref="nc"/>
        <ChildPropertyAssociation>
          <DataProperty s:ref="nc.VehicleIdentification"/>
        </ChildPropertyAssociation>
      </Class>
      <Class s:id="nc.AssociationType">
        <Name>AssociationType</Name>
        <Namespace s:ref="nc"/>
      </Class>
      <Class s:id="j.DrivesType">
        <Name>DrivesType</Name>
        <Namespace s:ref="j"/>
        <SubClassOf s:ref="nc.AssociationType"/>
        <ChildPropertyAssociation>
          <ObjectProperty s:ref="nc.Person"/>
        </ChildPropertyAssociation>
        <ChildPropertyAssociation>
          <ObjectProperty s:ref="nc.Vehicle"/>
        </ChildPropertyAssociation>
      </Class>
      <ObjectProperty s:id="nc.Person">
        <Name>Person</Name>
        <Namespace s:ref="nc"/>
        <Class s:ref="nc.PersonType"/>
      </ObjectProperty>
      <ObjectProperty s:id="nc.PersonName">
        <Name>PersonName</Name>
        <Namespace s:ref="nc"/>
        <Class s:ref="nc.PersonNameType"/>
      </ObjectProperty>
      <ObjectProperty s:id="nc.Vehicle">
        <Name>Vehicle</Name>
        <Namespace s:ref="nc"/>
        <Class s:ref="nc.VehicleType"/>
      </ObjectProperty>
      <ObjectProperty s:id="j.Drives">
        <Name>Drives</Name>
        <Namespace s:ref="j"/>
        <Class s:ref="j.DrivesType"/>
      </ObjectProperty>
      <DataProperty s:id="nc.PersonGivenName">
        <Name>PersonGivenName</Name>
        <Namespace s:ref="nc"/>
        <Datatype s:ref="xs.string"/>
      </DataProperty>
      <DataProperty s:id="nc.PersonSurName">
        <Name>PersonSurName</Name>
        <Namespace s:ref="nc"/>
        <Datatype s:ref="xs.string"/>
      </DataProperty>
      <DataProperty s:id="nc.VehicleIdentification">
        <Name>VehicleIdentification</Name>
        <Namespace s:ref="nc"/>
        <Datatype s:ref="xs.string"/>
      </DataProperty>
      <Datatype s:id="xs.string">
        <Name>string</Name>
        <Namespace s:ref="nc"/>
      </Datatype>
    </Model>"#;

    #[test]
    fn test_objects_exclude_associations() {
        let spec = compile(&parse_cmf(DRIVES_CMF).unwrap()).unwrap();
        assert!(spec.objects.contains_key("nc:Person"));
        assert!(spec.objects.contains_key("nc:Vehicle"));
        assert!(spec.objects.contains_key("nc:PersonName"));
        assert!(!spec.objects.contains_key("j:Drives"));
    }

    #[test]
    fn test_person_flattens_to_two_scalar_paths() {
        let spec = compile(&parse_cmf(DRIVES_CMF).unwrap()).unwrap();
        let person = &spec.objects["nc:Person"];
        assert_eq!(person.label, "Person");
        let keys: Vec<&str> = person
            .scalar_paths
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec![
                "nc_PersonName_nc_PersonGivenName",
                "nc_PersonName_nc_PersonSurName"
            ]
        );
    }

    #[test]
    fn test_association_rule_endpoints_in_declaration_order() {
        let spec = compile(&parse_cmf(DRIVES_CMF).unwrap()).unwrap();
        let drives = &spec.associations["j:Drives"];
        assert_eq!(drives.rel_type, "DRIVES");
        assert_eq!(drives.endpoints.len(), 2);
        assert_eq!(drives.endpoints[0].role, QName::new("nc", "Person"));
        assert_eq!(drives.endpoints[0].direction, Direction::Source);
        assert_eq!(drives.endpoints[1].role, QName::new("nc", "Vehicle"));
        assert_eq!(drives.endpoints[1].direction, Direction::Target);
    }

    #[test]
    fn test_reference_rules_for_object_valued_children() {
        let spec = compile(&parse_cmf(DRIVES_CMF).unwrap()).unwrap();
        let person_qname = QName::new("nc", "Person");
        let person_refs: Vec<_> = spec
            .references_of(&person_qname)
            .collect();
        assert_eq!(person_refs.len(), 1);
        assert_eq!(person_refs[0].field, QName::new("nc", "PersonName"));
        assert_eq!(person_refs[0].rel_type, "PERSON_NAME");
        assert_eq!(person_refs[0].target_label, "PersonName");
    }

    #[test]
    fn test_element_index_contains_all_declared_qnames() {
        let spec = compile(&parse_cmf(DRIVES_CMF).unwrap()).unwrap();
        for declared in [
            "nc:Person",
            "nc:PersonName",
            "nc:PersonGivenName",
            "nc:PersonSurName",
            "nc:Vehicle",
            "j:Drives",
        ] {
            assert!(
                spec.element_index.contains(declared),
                "missing {declared} from element index"
            );
        }
    }

    #[test]
    fn test_association_detected_through_unresolved_external_base() {
        let cmf = r#"<Model xmlns:s="urn:s">
          <Namespace s:id="j">
            <NamespaceURI>urn:j</NamespaceURI>
            <NamespacePrefixText>j</NamespacePrefixText>
          </Namespace>
          <Class s:id="j.CustodyType">
            <Name>CustodyType</Name>
            <Namespace s:ref="j"/>
            <SubClassOf s:ref="nc.AssociationType"/>
          </Class>
          <ObjectProperty s:id="j.Custody">
            <Name>Custody</Name>
            <Namespace s:ref="j"/>
            <Class s:ref="j.CustodyType"/>
          </ObjectProperty>
        </Model>"#;
        let spec = compile(&parse_cmf(cmf).unwrap()).unwrap();
        assert!(spec.associations.contains_key("j:Custody"));
    }

    #[test]
    fn test_subclass_cycle_is_invalid_cmf() {
        let cmf = r#"<Model xmlns:s="urn:s">
          <Namespace s:id="t">
            <NamespaceURI>urn:t</NamespaceURI>
            <NamespacePrefixText>t</NamespacePrefixText>
          </Namespace>
          <Class s:id="t.AType">
            <Name>AType</Name>
            <Namespace s:ref="t"/>
            <SubClassOf s:ref="t.BType"/>
          </Class>
          <Class s:id="t.BType">
            <Name>BType</Name>
            <Namespace s:ref="t"/>
            <SubClassOf s:ref="t.AType"/>
          </Class>
          <ObjectProperty s:id="t.A">
            <Name>A</Name>
            <Namespace s:ref="t"/>
            <Class s:ref="t.AType"/>
          </ObjectProperty>
        </Model>"#;
        let err = compile(&parse_cmf(cmf).unwrap()).unwrap_err();
        assert!(matches!(err, MappingError::InvalidCmf { .. }));
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_unknown_class_ref_surfaces_as_unknown_datatype() {
        let cmf = r#"<Model xmlns:s="urn:s">
          <Namespace s:id="t">
            <NamespaceURI>urn:t</NamespaceURI>
            <NamespacePrefixText>t</NamespacePrefixText>
          </Namespace>
          <ObjectProperty s:id="t.A">
            <Name>A</Name>
            <Namespace s:ref="t"/>
            <Class s:ref="t.MissingType"/>
          </ObjectProperty>
        </Model>"#;
        let err = compile(&parse_cmf(cmf).unwrap()).unwrap_err();
        assert!(matches!(err, MappingError::UnknownDatatypeRef { .. }));
    }

    #[test]
    fn test_schema_digest_recorded() {
        let model = parse_cmf(DRIVES_CMF).unwrap();
        let options = CompileOptions {
            schema_digest: Some("fnv1a64:deadbeefdeadbeef".to_string()),
            ..CompileOptions::default()
        };
        let spec = compile_with_options(&model, &options).unwrap();
        assert_eq!(spec.schema_digest, "fnv1a64:deadbeefdeadbeef");
    }
}
