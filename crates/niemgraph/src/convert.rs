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

//! One-call compile and convert APIs.

use niemgraph_cmf::parse_cmf;
use niemgraph_cypher::{emit, CypherScript, CypherStatement, EmitConfig};
use niemgraph_graph::{BatchId, ConvertResult, ConvertWarning, GraphModel};
use niemgraph_mapping::{compile_with_options, schema_digest, CompileOptions, MappingSpec};
use tracing::info;

use crate::error::CompileError;

/// Parse a CMF text and compile it into a mapping specification, recording
/// the text's identity digest for persistence keying.
pub fn compile(cmf_text: &str) -> Result<MappingSpec, CompileError> {
    let model = parse_cmf(cmf_text)?;
    let options = CompileOptions {
        schema_digest: Some(schema_digest(cmf_text)),
        ..CompileOptions::default()
    };
    let spec = compile_with_options(&model, &options)?;
    info!(
        digest = %spec.schema_digest,
        objects = spec.objects.len(),
        associations = spec.associations.len(),
        "compiled schema"
    );
    Ok(spec)
}

/// Options for one document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Batch identity: scopes node-id uniqueness (e.g. dataset id plus
    /// document URI). Hashed deterministically into the id prefix.
    pub batch_identity: String,
    /// Document label recorded as provenance on every node; defaults to
    /// the batch identity.
    pub document_label: String,
    /// Statement emitter configuration.
    pub emit: EmitConfig,
}

impl ConvertOptions {
    /// Create options for a batch identity.
    pub fn new(batch_identity: impl Into<String>) -> Self {
        let batch_identity = batch_identity.into();
        Self {
            document_label: batch_identity.clone(),
            batch_identity,
            emit: EmitConfig::default(),
        }
    }

    /// Use a different document label.
    pub fn with_document_label(mut self, label: impl Into<String>) -> Self {
        self.document_label = label.into();
        self
    }

    /// Use a different emitter configuration.
    pub fn with_emit_config(mut self, emit: EmitConfig) -> Self {
        self.emit = emit;
        self
    }
}

/// The result of converting one document.
#[derive(Debug)]
pub struct Conversion {
    /// Ordered write statements: every node upsert before any edge upsert.
    pub statements: Vec<CypherStatement>,
    /// Number of graph nodes.
    pub node_count: usize,
    /// Number of graph edges (after dangling-edge pruning).
    pub edge_count: usize,
    /// Element-recoverable warnings collected during conversion.
    pub warnings: Vec<ConvertWarning>,
}

impl Conversion {
    /// The statements chunked into execution batches of `size`, preserving
    /// order (so nodes still precede edges across batches).
    pub fn statement_batches(&self, size: usize) -> impl Iterator<Item = &[CypherStatement]> {
        self.statements.chunks(size.max(1))
    }

    /// Render all statements as one executable script.
    pub fn render_script(&self, include_comments: bool) -> String {
        let script = CypherScript {
            statements: self.statements.clone(),
        };
        script.render(include_comments)
    }
}

/// Convert an XML instance document into write statements.
pub fn convert_xml(
    xml: &str,
    spec: &MappingSpec,
    options: &ConvertOptions,
) -> ConvertResult<Conversion> {
    let batch = BatchId::derive(&options.batch_identity);
    let model = niemgraph_xml::convert_xml(xml, spec, batch, &options.document_label)?;
    Ok(finish(model, options))
}

/// Convert a JSON instance document into write statements.
pub fn convert_json(
    json: &str,
    spec: &MappingSpec,
    options: &ConvertOptions,
) -> ConvertResult<Conversion> {
    let batch = BatchId::derive(&options.batch_identity);
    let model = niemgraph_json::convert_json(json, spec, batch, &options.document_label)?;
    Ok(finish(model, options))
}

fn finish(model: GraphModel, options: &ConvertOptions) -> Conversion {
    let statements = emit(&model, &options.emit);
    info!(
        document = %options.document_label,
        nodes = model.node_count(),
        edges = model.edge_count(),
        warnings = model.warnings().len(),
        "converted document"
    );
    Conversion {
        node_count: model.node_count(),
        edge_count: model.edge_count(),
        warnings: model.warnings().to_vec(),
        statements,
    }
}
