//! Conversion pipeline
//!
//! read line → decode record → map → append to the output graph → repeat,
//! then hand the whole graph to the serializer.

use crate::config::Config;
use crate::error::{ConvertError, ConvertResult};
use crate::graph::InputRecord;
use crate::rdf::{
    GraphBuilder, MappingEngine, NamespaceContext, NamespaceManager, RdfFormat, RdfSerializer,
    RuleSet,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub nodes: usize,
    pub relationships: usize,
    pub triples: usize,
    /// Properties skipped because they could not be mapped
    pub skipped_properties: usize,
}

impl ConversionStats {
    /// Records mapped
    pub fn records(&self) -> usize {
        self.nodes + self.relationships
    }
}

/// Everything a run needs: namespace, prefix table and mapping engine
#[derive(Debug, Clone)]
pub struct Converter {
    namespace: NamespaceContext,
    namespaces: NamespaceManager,
    engine: MappingEngine,
}

impl Converter {
    /// Create a converter with the common prefix table
    pub fn new(namespace: NamespaceContext, rules: RuleSet) -> Self {
        Self {
            namespaces: NamespaceManager::with_context(&namespace),
            namespace,
            engine: MappingEngine::new(rules),
        }
    }

    /// Create a converter from a loaded configuration
    pub fn from_config(config: &Config) -> ConvertResult<Self> {
        let namespace = config.namespace()?;
        let namespaces = config.namespace_manager(&namespace);
        let rules = config.rule_set(&namespaces)?;
        Ok(Self {
            namespace,
            namespaces,
            engine: MappingEngine::new(rules),
        })
    }

    pub fn namespace(&self) -> &NamespaceContext {
        &self.namespace
    }

    /// Prefix table handed to the serializer
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Map every record of a line-delimited export.
    ///
    /// Stops at the first structural error; per-property failures are only
    /// counted.
    pub fn convert_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> ConvertResult<(GraphBuilder, ConversionStats)> {
        let mut graph = GraphBuilder::new();
        let mut stats = ConversionStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record = InputRecord::from_json_line(line_no, &line)?;
            let outcome = self
                .engine
                .map_record(&record, &self.namespace, &mut graph)
                .map_err(|source| ConvertError::InvalidIdentifier {
                    line: line_no,
                    source,
                })?;

            match record {
                InputRecord::Node(_) => stats.nodes += 1,
                InputRecord::Relationship(_) => stats.relationships += 1,
            }
            stats.skipped_properties += outcome.failures.len();
        }

        stats.triples = graph.len();
        Ok((graph, stats))
    }

    /// Map an export file
    pub fn convert_file(&self, path: &Path) -> ConvertResult<(GraphBuilder, ConversionStats)> {
        let file = File::open(path)?;
        self.convert_reader(BufReader::new(file))
    }

    /// Convert `input` and write the result to `output`
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        format: RdfFormat,
    ) -> ConvertResult<ConversionStats> {
        info!("input: {}, output: {}", input.display(), output.display());

        let (graph, stats) = self.convert_file(input)?;
        RdfSerializer::serialize_file(graph.as_slice(), &self.namespaces, output, format)?;

        info!(
            "Converted {} records ({} nodes, {} relationships) into {} triples as {:?}, {} properties skipped",
            stats.records(),
            stats.nodes,
            stats.relationships,
            stats.triples,
            format,
            stats.skipped_properties
        );
        Ok(stats)
    }
}
