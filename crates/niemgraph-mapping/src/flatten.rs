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

//! Recursive property flattening.
//!
//! Nested property declarations are expanded into flat scalar paths:
//! Simple targets emit one leaf, Wrapper targets unwrap transparently into
//! their single child, Complex targets recurse into every child. The result
//! is the ordered list of scalar paths an object rule extracts from an
//! instance element.

use std::collections::BTreeMap;

use niemgraph_cmf::{CmfModel, CmfPropertyTarget, QName};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, TypeShape};
use crate::error::{MappingError, MappingResult};

/// Default recursion bound for self-referential schemas.
///
/// A defensive limit, not an expected case: NIEM content models nest a
/// handful of levels deep in practice.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// One flattened scalar path: the qname segments from the owning element
/// down to the leaf, plus the collapsed flat key used as the graph property
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarPath {
    /// Collapsed flat identifier (`nc_PersonName_nc_PersonGivenName`).
    pub key: String,
    /// Path segments, leaf included.
    pub segments: Vec<QName>,
}

impl ScalarPath {
    fn from_segments(segments: Vec<QName>) -> Self {
        let key = segments
            .iter()
            .map(QName::flat_key)
            .collect::<Vec<_>>()
            .join("_");
        Self { key, segments }
    }

    /// The leaf qname (last segment), absent only for a deserialized path
    /// with no segments.
    pub fn leaf(&self) -> Option<&QName> {
        self.segments.last()
    }

    /// Human-readable `a:B/c:D` form for error reporting.
    pub fn display_path(&self) -> String {
        self.segments
            .iter()
            .map(QName::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Flatten one property declaration into ordered scalar paths.
///
/// Fails with [`MappingError::MappingDepthExceeded`] when nesting passes
/// `max_depth`, [`MappingError::UnknownDatatypeRef`] on an unresolvable type
/// reference, and [`MappingError::InvalidCmf`] on a dangling property or
/// namespace reference.
pub fn flatten_property(
    model: &CmfModel,
    property_ref: &str,
    max_depth: usize,
) -> MappingResult<Vec<ScalarPath>> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    walk(model, property_ref, &mut prefix, &mut out, max_depth)?;
    Ok(out)
}

/// Flatten several child property declarations into one ordered, conflict-
/// checked path list. Distinct paths collapsing to the same flat key are a
/// compile-time [`MappingError::MappingConflict`], never silently merged.
pub(crate) fn flatten_children<'a>(
    model: &CmfModel,
    property_refs: impl IntoIterator<Item = &'a str>,
    max_depth: usize,
) -> MappingResult<Vec<ScalarPath>> {
    let mut out = Vec::new();
    for property_ref in property_refs {
        out.extend(flatten_property(model, property_ref, max_depth)?);
    }
    check_conflicts(&out)?;
    Ok(out)
}

fn walk(
    model: &CmfModel,
    property_ref: &str,
    prefix: &mut Vec<QName>,
    out: &mut Vec<ScalarPath>,
    max_depth: usize,
) -> MappingResult<()> {
    let property = model.properties.get(property_ref).ok_or_else(|| {
        MappingError::invalid("unresolved property reference", property_ref.to_string())
    })?;
    let qname = model.property_qname(property).ok_or_else(|| {
        MappingError::invalid("unresolved namespace reference", property.id.clone())
    })?;

    if prefix.len() >= max_depth {
        let mut segments = prefix.clone();
        segments.push(qname);
        return Err(MappingError::MappingDepthExceeded {
            path: ScalarPath::from_segments(segments).display_path(),
            max_depth,
        });
    }

    match &property.target {
        CmfPropertyTarget::Datatype(datatype_ref) => {
            if !model.datatypes.contains_key(datatype_ref) {
                return Err(MappingError::UnknownDatatypeRef {
                    reference: datatype_ref.clone(),
                    property: qname.to_string(),
                });
            }
            push_leaf(prefix, qname, out);
        }
        // Abstract properties carry text content in instances; they flatten
        // to a leaf like a simple type.
        CmfPropertyTarget::Abstract => push_leaf(prefix, qname, out),
        CmfPropertyTarget::Class(class_ref) => {
            match classify(model, class_ref, &qname.to_string())? {
                TypeShape::Simple => push_leaf(prefix, qname, out),
                TypeShape::Wrapper => {
                    let class = &model.classes[class_ref];
                    prefix.push(qname);
                    walk(model, &class.children[0].property_ref, prefix, out, max_depth)?;
                    prefix.pop();
                }
                TypeShape::Complex => {
                    let class = &model.classes[class_ref];
                    prefix.push(qname);
                    for child in &class.children {
                        walk(model, &child.property_ref, prefix, out, max_depth)?;
                    }
                    prefix.pop();
                }
            }
        }
    }
    Ok(())
}

fn push_leaf(prefix: &[QName], qname: QName, out: &mut Vec<ScalarPath>) {
    let mut segments = prefix.to_vec();
    segments.push(qname);
    out.push(ScalarPath::from_segments(segments));
}

fn check_conflicts(paths: &[ScalarPath]) -> MappingResult<()> {
    let mut seen: BTreeMap<&str, &ScalarPath> = BTreeMap::new();
    for path in paths {
        if let Some(previous) = seen.insert(&path.key, path) {
            if previous.segments != path.segments {
                return Err(MappingError::MappingConflict {
                    key: path.key.clone(),
                    first: previous.display_path(),
                    second: path.display_path(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use niemgraph_cmf::parse_cmf;

    const CMF: &str = r#"<Model xmlns:s="urn:s">
      <Namespace s:id="nc">
        <NamespaceURI>urn:nc</NamespaceURI>
        <NamespacePrefixText>nc</NamespacePrefixText>
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
      <Class s:id="nc.TextWrapperType">
        <Name>TextWrapperType</Name>
        <Namespace s:ref="nc"/>
        <ChildPropertyAssociation>
          <DataProperty s:ref="nc.Text"/>
        </ChildPropertyAssociation>
      </Class>
      <ObjectProperty s:id="nc.PersonName">
        <Name>PersonName</Name>
        <Namespace s:ref="nc"/>
        <Class s:ref="nc.PersonNameType"/>
      </ObjectProperty>
      <ObjectProperty s:id="nc.Remark">
        <Name>Remark</Name>
        <Namespace s:ref="nc"/>
        <Class s:ref="nc.TextWrapperType"/>
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
      <DataProperty s:id="nc.Text">
        <Name>Text</Name>
        <Namespace s:ref="nc"/>
        <Datatype s:ref="xs.string"/>
      </DataProperty>
      <Datatype s:id="xs.string">
        <Name>string</Name>
        <Namespace s:ref="nc"/>
      </Datatype>
    </Model>"#;

    #[test]
    fn test_simple_property_is_one_leaf() {
        let model = parse_cmf(CMF).unwrap();
        let paths = flatten_property(&model, "nc.PersonGivenName", DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].key, "nc_PersonGivenName");
        assert_eq!(paths[0].leaf(), Some(&QName::new("nc", "PersonGivenName")));
    }

    #[test]
    fn test_complex_property_yields_all_leaves() {
        let model = parse_cmf(CMF).unwrap();
        let paths = flatten_property(&model, "nc.PersonName", DEFAULT_MAX_DEPTH).unwrap();
        let keys: Vec<&str> = paths.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "nc_PersonName_nc_PersonGivenName",
                "nc_PersonName_nc_PersonSurName"
            ]
        );
    }

    #[test]
    fn test_wrapper_unwraps_transparently() {
        let model = parse_cmf(CMF).unwrap();
        let paths = flatten_property(&model, "nc.Remark", DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].key, "nc_Remark_nc_Text");
        assert_eq!(paths[0].display_path(), "nc:Remark/nc:Text");
    }

    #[test]
    fn test_self_referential_schema_hits_depth_bound() {
        let cmf = r#"<Model xmlns:s="urn:s">
          <Namespace s:id="t">
            <NamespaceURI>urn:t</NamespaceURI>
            <NamespacePrefixText>t</NamespacePrefixText>
          </Namespace>
          <Class s:id="t.LoopType">
            <Name>LoopType</Name>
            <Namespace s:ref="t"/>
            <ChildPropertyAssociation>
              <ObjectProperty s:ref="t.Loop"/>
            </ChildPropertyAssociation>
            <ChildPropertyAssociation>
              <DataProperty s:ref="t.Label"/>
            </ChildPropertyAssociation>
          </Class>
          <ObjectProperty s:id="t.Loop">
            <Name>Loop</Name>
            <Namespace s:ref="t"/>
            <Class s:ref="t.LoopType"/>
          </ObjectProperty>
          <DataProperty s:id="t.Label">
            <Name>Label</Name>
            <Namespace s:ref="t"/>
            <Datatype s:ref="xs.string"/>
          </DataProperty>
          <Datatype s:id="xs.string">
            <Name>string</Name>
            <Namespace s:ref="t"/>
          </Datatype>
        </Model>"#;
        let model = parse_cmf(cmf).unwrap();
        let err = flatten_property(&model, "t.Loop", 4).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MappingDepthExceeded { max_depth: 4, .. }
        ));
    }

    #[test]
    fn test_unknown_datatype_ref_surfaces() {
        let cmf = r#"<Model xmlns:s="urn:s">
          <Namespace s:id="t">
            <NamespaceURI>urn:t</NamespaceURI>
            <NamespacePrefixText>t</NamespacePrefixText>
          </Namespace>
          <DataProperty s:id="t.Broken">
            <Name>Broken</Name>
            <Namespace s:ref="t"/>
            <Datatype s:ref="xs.missing"/>
          </DataProperty>
        </Model>"#;
        let model = parse_cmf(cmf).unwrap();
        let err = flatten_property(&model, "t.Broken", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, MappingError::UnknownDatatypeRef { .. }));
    }

    #[test]
    fn test_conflicting_keys_are_detected() {
        // Two properties whose flat keys collide: `a:b_c` and `a:b/a:c`
        // both collapse to `a_b_a_c` only if the segments differ, so craft
        // a direct collision via same key from distinct paths.
        let first = ScalarPath::from_segments(vec![QName::new("a", "b_c")]);
        let second = ScalarPath {
            key: first.key.clone(),
            segments: vec![QName::new("a", "b"), QName::new("a", "c")],
        };
        let err = check_conflicts(&[first, second]).unwrap_err();
        assert!(matches!(err, MappingError::MappingConflict { .. }));
    }

    #[test]
    fn test_identical_duplicate_paths_are_not_conflicts() {
        let first = ScalarPath::from_segments(vec![QName::new("a", "b")]);
        let second = first.clone();
        assert!(check_conflicts(&[first, second]).is_ok());
    }
}
