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

//! Format-neutral source tree.
//!
//! The converters translate format-specific structural markers into the
//! fields of this tree before any graph logic runs:
//!
//! | Marker | XML | JSON |
//! |--------|-----|------|
//! | explicit id | `structures:id` | `"@id"` |
//! | reference pointer | `structures:ref` + `xsi:nil` | `"@ref"`-only object |
//! | URI pointer | `structures:uri` | `"@uri"` |
//! | metadata refs | `structures:metadata` | `"@metadata"` |

use crate::model::PropertyValue;
use niemgraph_cmf::QName;

/// One element of a parsed instance document, format-neutral.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceElement {
    /// Canonicalized qualified name.
    pub qname: QName,
    /// Explicit document-local identifier.
    pub id: Option<String>,
    /// Document-local reference target.
    pub ref_target: Option<String>,
    /// Whether the element is explicitly marked "reference, not content".
    pub pointer: bool,
    /// URI-style pointer to an entity defined elsewhere.
    pub uri: Option<String>,
    /// Metadata reference ids.
    pub metadata_refs: Vec<String>,
    /// Direct text content.
    pub text: Option<PropertyValue>,
    /// Non-structural attributes (declared ones become properties,
    /// undeclared ones augmentations).
    pub attributes: Vec<(QName, PropertyValue)>,
    /// Ordered child elements.
    pub children: Vec<SourceElement>,
}

impl SourceElement {
    /// Create an empty element.
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            id: None,
            ref_target: None,
            pointer: false,
            uri: None,
            metadata_refs: Vec::new(),
            text: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a pure reference pointer (`structures:ref` + nil marker).
    pub fn pointer(qname: QName, target: impl Into<String>) -> Self {
        let mut element = Self::new(qname);
        element.ref_target = Some(target.into());
        element.pointer = true;
        element
    }

    /// Set the explicit identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the URI pointer.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(PropertyValue::String(text.into()));
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: SourceElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append a metadata reference.
    pub fn with_metadata_ref(mut self, id: impl Into<String>) -> Self {
        self.metadata_refs.push(id.into());
        self
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, qname: QName, value: PropertyValue) -> Self {
        self.attributes.push((qname, value));
        self
    }

    /// Whether this element is a pure reference pointer: it carries a
    /// reference id and the format's explicit "reference, not content"
    /// marker, and no content of its own.
    pub fn is_reference_pointer(&self) -> bool {
        self.ref_target.is_some() && self.pointer && self.id.is_none()
    }

    /// The document-local id this element resolves to when used as a
    /// relationship endpoint: an explicit ref, its own id, or a local
    /// (`#fragment`) URI pointer.
    pub fn endpoint_id(&self) -> Option<&str> {
        self.ref_target
            .as_deref()
            .or(self.id.as_deref())
            .or_else(|| self.uri.as_deref().and_then(|u| u.strip_prefix('#')))
    }

    /// Concatenated text of this element and its descendants, in document
    /// order. Used when undeclared (augmentation) content is captured as a
    /// single value.
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(PropertyValue::String(s)) = &self.text {
            out.push_str(s);
        } else if let Some(v) = &self.text {
            out.push_str(&v.to_display_string());
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
