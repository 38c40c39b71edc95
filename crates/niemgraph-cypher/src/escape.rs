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

//! Cypher string escaping and identifier hygiene.
//!
//! Instance documents are untrusted input, and their qnames and identifiers
//! end up inside query text. Everything passes through here first: strings
//! are escaped and quoted, identifiers are NFC-normalized, stripped of
//! control and invisible formatting characters, and backticked when they
//! are not plain identifiers or collide with a Cypher keyword.

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string value for use inside single-quoted Cypher literals.
///
/// Returns `Cow::Borrowed` when no escaping is needed.
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Whether a string is a plain Cypher identifier: starts with an ASCII
/// letter or underscore, continues with letters, digits, and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Control characters, zero-width characters, and directional formatting
/// marks have no business inside identifiers.
fn is_dangerous(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2066}'..='\u{2069}'
                | '\u{00AD}' | '\u{061C}' | '\u{180E}'
        )
}

fn sanitize(s: &str) -> String {
    s.nfc().filter(|c| !is_dangerous(*c)).collect()
}

/// Keywords that would change statement meaning if used bare.
fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_ascii_uppercase().as_str(),
        "MATCH" | "MERGE" | "CREATE" | "DELETE" | "DETACH" | "SET" | "REMOVE" | "RETURN"
            | "WITH" | "WHERE" | "ORDER" | "BY" | "LIMIT" | "SKIP" | "UNION" | "UNWIND"
            | "CALL" | "YIELD" | "NULL" | "TRUE" | "FALSE" | "AND" | "OR" | "NOT" | "XOR"
            | "IN" | "AS" | "ON" | "OPTIONAL" | "DISTINCT" | "EXISTS" | "CONSTRAINT" | "INDEX"
    )
}

/// Escape a property-name identifier, backticking when required.
pub fn escape_identifier(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape a node label, including the leading `:`.
pub fn escape_label(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        format!(":{sanitized}")
    } else {
        format!(":`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape a relationship type (no leading `:`; used inside `[r:TYPE]`).
pub fn escape_relationship_type(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}
