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

//! Emitter configuration.

/// Default statements-per-transaction batch size.
///
/// Around 1000 statements per transaction balances round-trip overhead
/// against lock duration on the database side.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for statement emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Property holding the batch-scoped node id.
    pub id_property: String,
    /// Provenance property holding the document label, or `None` to omit.
    pub provenance_property: Option<String>,
    /// Statements per execution batch.
    pub batch_size: usize,
    /// Whether rendered scripts include `//` comments.
    pub include_comments: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            id_property: "_niem_id".to_string(),
            provenance_property: Some("_doc".to_string()),
            batch_size: DEFAULT_BATCH_SIZE,
            include_comments: true,
        }
    }
}

impl EmitConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different id property name.
    pub fn with_id_property(mut self, name: impl Into<String>) -> Self {
        self.id_property = name.into();
        self
    }

    /// Use a different batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Omit the provenance property.
    pub fn without_provenance(mut self) -> Self {
        self.provenance_property = None;
        self
    }

    /// Omit comments from rendered scripts.
    pub fn without_comments(mut self) -> Self {
        self.include_comments = false;
        self
    }

    /// Start building a configuration.
    pub fn builder() -> EmitConfigBuilder {
        EmitConfigBuilder::default()
    }
}

/// Builder for [`EmitConfig`].
#[derive(Debug, Default)]
pub struct EmitConfigBuilder {
    config: Option<EmitConfig>,
}

impl EmitConfigBuilder {
    fn config(&mut self) -> &mut EmitConfig {
        self.config.get_or_insert_with(EmitConfig::default)
    }

    /// Set the id property name.
    pub fn id_property(mut self, name: impl Into<String>) -> Self {
        self.config().id_property = name.into();
        self
    }

    /// Set the provenance property name, or `None` to omit.
    pub fn provenance_property(mut self, name: Option<String>) -> Self {
        self.config().provenance_property = name;
        self
    }

    /// Set the batch size.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config().batch_size = size.max(1);
        self
    }

    /// Set comment inclusion.
    pub fn include_comments(mut self, include: bool) -> Self {
        self.config().include_comments = include;
        self
    }

    /// Finish building.
    pub fn build(mut self) -> EmitConfig {
        self.config.take().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmitConfig::default();
        assert_eq!(config.id_property, "_niem_id");
        assert_eq!(config.provenance_property.as_deref(), Some("_doc"));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(config.include_comments);
    }

    #[test]
    fn test_fluent_configuration() {
        let config = EmitConfig::new()
            .with_id_property("uid")
            .with_batch_size(50)
            .without_provenance()
            .without_comments();
        assert_eq!(config.id_property, "uid");
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.provenance_property, None);
        assert!(!config.include_comments);
    }

    #[test]
    fn test_builder() {
        let config = EmitConfig::builder()
            .id_property("uid")
            .batch_size(10)
            .include_comments(false)
            .build();
        assert_eq!(config.id_property, "uid");
        assert_eq!(config.batch_size, 10);
        assert!(!config.include_comments);
    }

    #[test]
    fn test_batch_size_floor_is_one() {
        assert_eq!(EmitConfig::new().with_batch_size(0).batch_size, 1);
    }
}
