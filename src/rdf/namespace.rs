//! Namespaces, prefixes and identifier resolution
//!
//! [`NamespaceContext`] is the base namespace bound once per run; every bare
//! graph id (node ids, relationship ids, endpoints and labels) is resolved
//! against it. [`NamespaceManager`] is the prefix table handed to the
//! serializer and used to expand compact names in mapping rules.

use super::types::{NamedNode, RdfError, RdfResult};
use indexmap::IndexMap;
use oxiri::Iri;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not of the form `prefix:local`
    #[error("Not a compact IRI: {0}")]
    NotCompact(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI binding)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Base namespace all bare graph ids are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceContext {
    base: Namespace,
}

impl NamespaceContext {
    /// Bind a base IRI and its short prefix. The base itself must be an
    /// absolute IRI.
    pub fn new(iri: impl Into<String>, prefix: impl Into<String>) -> RdfResult<Self> {
        let iri = iri.into();
        NamedNode::new(iri.as_str())?;
        Ok(Self {
            base: Namespace::new(prefix, iri),
        })
    }

    /// Base IRI
    pub fn base_iri(&self) -> &str {
        &self.base.iri
    }

    /// Prefix bound to the base IRI
    pub fn prefix(&self) -> &str {
        &self.base.prefix
    }

    /// The base binding as a namespace entry
    pub fn as_namespace(&self) -> &Namespace {
        &self.base
    }

    /// Resolve a raw graph id into a resource identifier.
    ///
    /// Absolute IRIs are returned unchanged; anything else is appended to the
    /// base IRI. The result must still be a valid IRI, so ids carrying
    /// whitespace or other illegal characters fail with
    /// [`RdfError::InvalidIri`].
    pub fn resolve(&self, raw_id: &str) -> RdfResult<NamedNode> {
        if Iri::parse(raw_id).is_ok() {
            return NamedNode::new(raw_id);
        }
        NamedNode::new(format!("{}{}", self.base.iri, raw_id)).map_err(|e| match e {
            RdfError::InvalidIri { reason, .. } => RdfError::InvalidIri {
                iri: raw_id.to_string(),
                reason,
            },
        })
    }
}

/// Namespace manager with common prefixes
///
/// Bindings keep insertion order so serialized prefix declarations are
/// stable from run to run.
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: IndexMap::new(),
        };

        mgr.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        mgr.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        mgr.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        mgr.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("dcterms", "http://purl.org/dc/terms/");
        mgr.add_prefix("schema", "https://schema.org/");

        mgr
    }

    /// Common prefixes plus the run's base binding
    pub fn with_context(context: &NamespaceContext) -> Self {
        let mut mgr = Self::new();
        mgr.add_prefix(context.prefix(), context.base_iri());
        mgr
    }

    /// Add a prefix, replacing an earlier binding of the same name
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::NotCompact(compact_iri.to_string()))?;
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Expand `name` when it starts with a bound prefix, otherwise return it
    /// verbatim. Absolute IRIs such as `http://...` pass through because
    /// `http` is never bound.
    pub fn expand_or_verbatim(&self, name: &str) -> String {
        self.expand(name).unwrap_or_else(|_| name.to_string())
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }

    /// Get all registered prefixes in binding order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
