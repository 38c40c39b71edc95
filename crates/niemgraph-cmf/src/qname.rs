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

//! Qualified names.

use std::fmt;

/// A namespace-qualified name (`prefix:local`).
///
/// Prefixes are canonical within one mapping specification: the XML converter
/// resolves namespace URIs back to the specification's prefix table and the
/// JSON converter canonicalizes `@context` prefixes the same way, so a
/// `QName` compares equal across formats when it denotes the same element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QName {
    /// Canonical namespace prefix (may be empty for unqualified names).
    pub prefix: String,
    /// Local name within the namespace.
    pub local: String,
}

impl QName {
    /// Create a qualified name from a prefix and local name.
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    /// Create an unqualified name.
    pub fn local_only(local: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            local: local.into(),
        }
    }

    /// Parse a `prefix:local` string. A missing colon yields an unqualified
    /// name; only the first colon separates.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((prefix, local)) => Self::new(prefix, local),
            None => Self::local_only(s),
        }
    }

    /// Whether this name carries a namespace prefix.
    pub fn is_qualified(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// The local name transliterated to `UPPER_SNAKE_CASE`, used for
    /// relationship types (`PersonVehicleAssociation` becomes
    /// `PERSON_VEHICLE_ASSOCIATION`).
    pub fn relationship_type(&self) -> String {
        upper_snake(&self.local)
    }

    /// A flat identifier usable as a property key: the display form with
    /// `:` replaced by `_`.
    pub fn flat_key(&self) -> String {
        if self.prefix.is_empty() {
            self.local.clone()
        } else {
            format!("{}_{}", self.prefix, self.local)
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{}:{}", self.prefix, self.local)
        }
    }
}

/// Transliterate a CamelCase or mixedCase name to `UPPER_SNAKE_CASE`.
///
/// Consecutive uppercase runs stay together (`XMLValue` becomes `XML_VALUE`),
/// and non-alphanumeric characters become underscores.
pub fn upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if (prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower))
                && !out.ends_with('_')
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let q = QName::parse("nc:Person");
        assert_eq!(q.prefix, "nc");
        assert_eq!(q.local, "Person");
        assert!(q.is_qualified());
        assert_eq!(q.to_string(), "nc:Person");
    }

    #[test]
    fn test_parse_unqualified() {
        let q = QName::parse("Person");
        assert_eq!(q.prefix, "");
        assert_eq!(q.local, "Person");
        assert!(!q.is_qualified());
        assert_eq!(q.to_string(), "Person");
    }

    #[test]
    fn test_flat_key() {
        assert_eq!(QName::parse("nc:Person").flat_key(), "nc_Person");
        assert_eq!(QName::parse("Person").flat_key(), "Person");
    }

    #[test]
    fn test_upper_snake_simple() {
        assert_eq!(upper_snake("Drives"), "DRIVES");
        assert_eq!(upper_snake("PersonName"), "PERSON_NAME");
    }

    #[test]
    fn test_upper_snake_association() {
        assert_eq!(
            upper_snake("PersonVehicleAssociation"),
            "PERSON_VEHICLE_ASSOCIATION"
        );
    }

    #[test]
    fn test_upper_snake_acronym_run() {
        assert_eq!(upper_snake("XMLValue"), "XML_VALUE");
        assert_eq!(upper_snake("PersonSSNIdentification"), "PERSON_SSN_IDENTIFICATION");
    }

    #[test]
    fn test_upper_snake_non_alphanumeric() {
        assert_eq!(upper_snake("some-name"), "SOME_NAME");
    }

    #[test]
    fn test_relationship_type() {
        assert_eq!(QName::parse("j:Drives").relationship_type(), "DRIVES");
    }

    #[test]
    fn test_ordering_is_by_prefix_then_local() {
        let a = QName::parse("a:Z");
        let b = QName::parse("b:A");
        assert!(a < b);
    }
}
