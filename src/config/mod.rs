//! Conversion configuration
//!
//! A YAML document binds the base namespace and lists the property mapping
//! rules:
//!
//! ```yaml
//! base:
//!   iri: http://example.org/zoo/
//!   prefix: zoo
//! prefixes:
//!   schema: https://schema.org/
//! mappings:
//!   name:
//!     type: xsd:string
//!     iri: rdfs:label
//!   homepage:
//!     type: IRI
//!     iri: schema:url
//! ```
//!
//! `type` and `iri` take absolute IRIs or compact names over any bound prefix.
//! `base` and `mappings` are required; without a file the built-in rules
//! apply (see [`Config::builtin`]).

use crate::rdf::{
    MappingRule, NamedNode, NamespaceContext, NamespaceManager, RdfError, RuleSet, IRI_SENTINEL,
};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file cannot be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or has the wrong shape
    #[error("malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `base.iri` is not an absolute IRI
    #[error("invalid base IRI: {0}")]
    InvalidBase(RdfError),

    /// A mapping rule names something that is not an IRI
    #[error("mapping `{key}`: {source}")]
    InvalidRule {
        key: String,
        #[source]
        source: RdfError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Base namespace binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseConfig {
    /// Namespace every bare id is resolved against
    pub iri: String,
    /// Short name bound to `iri` in the output
    pub prefix: String,
}

/// One entry under `mappings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Datatype IRI, or `IRI` for resource-valued properties
    #[serde(rename = "type")]
    pub datatype: String,
    /// Predicate; defaults to the mapping key in the base namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub base: BaseConfig,

    /// Extra prefix bindings
    #[serde(default)]
    pub prefixes: IndexMap<String, String>,

    /// Property key → rule, in file order. Required in a file; `None` only
    /// comes from [`Config::builtin`] and selects the built-in rules.
    #[serde(
        deserialize_with = "required_mappings",
        skip_serializing_if = "Option::is_none"
    )]
    pub mappings: Option<IndexMap<String, RuleConfig>>,
}

fn required_mappings<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, RuleConfig>>, D::Error>
where
    D: Deserializer<'de>,
{
    IndexMap::deserialize(deserializer).map(Some)
}

impl Config {
    /// Load a YAML configuration file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse a YAML configuration document
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Configuration for the built-in rule set
    pub fn builtin(iri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            base: BaseConfig {
                iri: iri.into(),
                prefix: prefix.into(),
            },
            prefixes: IndexMap::new(),
            mappings: None,
        }
    }

    /// Bind the base namespace
    pub fn namespace(&self) -> ConfigResult<NamespaceContext> {
        NamespaceContext::new(self.base.iri.as_str(), self.base.prefix.as_str())
            .map_err(ConfigError::InvalidBase)
    }

    /// Prefix table: common prefixes, the base binding, then `prefixes`
    pub fn namespace_manager(&self, namespace: &NamespaceContext) -> NamespaceManager {
        let mut mgr = NamespaceManager::with_context(namespace);
        for (prefix, iri) in &self.prefixes {
            mgr.add_prefix(prefix.as_str(), iri.as_str());
        }
        mgr
    }

    /// Compile `mappings` into a rule set, expanding compact names
    pub fn rule_set(&self, namespaces: &NamespaceManager) -> ConfigResult<RuleSet> {
        let Some(mappings) = &self.mappings else {
            return Ok(RuleSet::builtin());
        };

        let mut rules = RuleSet::new();
        for (key, raw) in mappings {
            let invalid = |source: RdfError| ConfigError::InvalidRule {
                key: key.clone(),
                source,
            };

            let rule = if raw.datatype == IRI_SENTINEL {
                MappingRule::resource()
            } else {
                let datatype = NamedNode::new(namespaces.expand_or_verbatim(&raw.datatype))
                    .map_err(invalid)?;
                MappingRule::literal(datatype)
            };

            let rule = match &raw.iri {
                Some(iri) => {
                    let predicate =
                        NamedNode::new(namespaces.expand_or_verbatim(iri)).map_err(invalid)?;
                    rule.with_predicate(predicate)
                }
                None => rule,
            };

            rules.insert(key.as_str(), rule);
        }
        Ok(rules)
    }
}
