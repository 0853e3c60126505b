//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use hustings_types::{Candidate, CandidateId};

use crate::NodeError;

/// One line of the configured candidate roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub id: String,
    pub name: String,
}

/// Configuration for a hustings node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Port the session hub listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The fixed candidate roster for this election. Cannot be changed
    /// through the session protocol once the process has started.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<CandidateSpec>,

    /// Whether `get_audit` is answered. The audit view exposes raw voter
    /// identifiers, so deployments may switch it off.
    #[serde(default = "default_true")]
    pub expose_audit: bool,

    /// Whether to serve Prometheus metrics at `/metrics`.
    #[serde(default)]
    pub enable_metrics: bool,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_port() -> u16 {
    8000
}

fn default_candidates() -> Vec<CandidateSpec> {
    vec![
        CandidateSpec {
            id: "c1".to_string(),
            name: "Avery Collins".to_string(),
        },
        CandidateSpec {
            id: "c2".to_string(),
            name: "Rowan Ellis".to_string(),
        },
        CandidateSpec {
            id: "c3".to_string(),
            name: "Marlowe Reyes".to_string(),
        },
    ]
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// Check the candidate roster: at least one candidate, no duplicate ids.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.candidates.is_empty() {
            return Err(NodeError::Config(
                "candidate roster must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for spec in &self.candidates {
            if !seen.insert(spec.id.as_str()) {
                return Err(NodeError::Config(format!(
                    "duplicate candidate id: {}",
                    spec.id
                )));
            }
        }
        Ok(())
    }

    /// Build the ledger's candidate roster from the configured specs.
    pub fn roster(&self) -> Vec<Candidate> {
        self.candidates
            .iter()
            .map(|spec| Candidate::new(CandidateId::new(spec.id.clone()), spec.name.clone()))
            .collect()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            candidates: default_candidates(),
            expose_audit: default_true(),
            enable_metrics: false,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
