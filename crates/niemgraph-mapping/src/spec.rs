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

//! The compiled mapping specification.
//!
//! A [`MappingSpec`] is the declarative ruleset one schema version compiles
//! to. It is immutable once produced, cheap to share (`Send + Sync`, no
//! interior mutability), serializable for persistence keyed by schema
//! digest, and consumed read-only by every conversion of documents written
//! against that schema.

use std::collections::{BTreeMap, BTreeSet};

use niemgraph_cmf::QName;
use serde::{Deserialize, Serialize};

use crate::error::MappingResult;
use crate::flatten::ScalarPath;

/// Version tag of the serialized specification format.
pub const SPEC_FORMAT_VERSION: &str = "1";

/// The compiled, declarative transformation specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSpec {
    /// Serialized format version ([`SPEC_FORMAT_VERSION`]).
    pub format_version: String,
    /// Identity digest of the CMF text this spec was compiled from.
    pub schema_digest: String,
    /// Canonical namespace prefix to URI table.
    pub namespaces: BTreeMap<String, String>,
    /// Object rules keyed by element qname (`nc:Person`).
    pub objects: BTreeMap<String, ObjectRule>,
    /// Association rules keyed by element qname.
    pub associations: BTreeMap<String, AssociationRule>,
    /// Declared reference-edge rules, in declaration order.
    pub references: Vec<ReferenceRule>,
    /// Every schema-declared qname; content outside this set is an
    /// augmentation.
    pub element_index: BTreeSet<String>,
}

impl MappingSpec {
    /// Look up the object rule for an element qname.
    pub fn object(&self, qname: &QName) -> Option<&ObjectRule> {
        self.objects.get(&qname.to_string())
    }

    /// Look up the association rule for an element qname.
    pub fn association(&self, qname: &QName) -> Option<&AssociationRule> {
        self.associations.get(&qname.to_string())
    }

    /// All reference rules owned by an element qname.
    pub fn references_of<'a>(
        &'a self,
        owner: &'a QName,
    ) -> impl Iterator<Item = &'a ReferenceRule> + 'a {
        let owner = owner.to_string();
        self.references
            .iter()
            .filter(move |r| r.owner.to_string() == owner)
    }

    /// Whether a qname is declared in the schema.
    pub fn is_declared(&self, qname: &QName) -> bool {
        self.element_index.contains(&qname.to_string())
    }

    /// The canonical prefix bound to a namespace URI, if any.
    pub fn canonical_prefix(&self, uri: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(_, u)| u.as_str() == uri)
            .map(|(p, _)| p.as_str())
    }

    /// Serialize for persistence (versioned, schema-digest-keyed).
    pub fn to_json(&self) -> MappingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a persisted specification.
    pub fn from_json(json: &str) -> MappingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Transformation rule for one object element declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRule {
    /// Element qname.
    pub qname: QName,
    /// Node label (element local name).
    pub label: String,
    /// Flattened scalar paths extracted relative to the element.
    pub scalar_paths: Vec<ScalarPath>,
}

/// Transformation rule for one association element declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    /// Element qname.
    pub qname: QName,
    /// Node label used when the association materializes as a node.
    pub label: String,
    /// Relationship type (`UPPER_SNAKE` of the local name).
    pub rel_type: String,
    /// Ordered endpoints; the first is the source, the rest are targets.
    pub endpoints: Vec<EndpointRule>,
    /// Scalar paths for association-carried data.
    pub scalar_paths: Vec<ScalarPath>,
}

/// One association endpoint role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRule {
    /// The role element qname matched among the association's children.
    pub role: QName,
    /// Label of the entity this role points at.
    pub target_label: String,
    /// Whether the endpoint is the edge source or a target.
    pub direction: Direction,
}

/// Endpoint direction within an association edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// First declared endpoint.
    Source,
    /// Any later endpoint.
    Target,
}

/// Declared reference-edge rule: an object-valued child property of a
/// non-association class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRule {
    /// Owning element qname.
    pub owner: QName,
    /// Child field qname.
    pub field: QName,
    /// Label of the referenced entity.
    pub target_label: String,
    /// Relationship type (`UPPER_SNAKE` of the field's local name).
    pub rel_type: String,
}
