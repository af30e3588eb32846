//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `METASTATE__*` environment variables (e.g. `METASTATE__RULESET__SHACL=false`).

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::store::Namespace;

pub const DEFAULT_CONFIG_FILE: &str = "metastate.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// N-Triples file holding the RDFS/SHACL schema.
    pub schema: Option<PathBuf>,
    /// N-Triples file holding the data to classify.
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub ruleset: RulesetSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesetSettings {
    /// Subclass, domain and range rules.
    #[serde(default = "enabled")]
    pub rdfs: bool,
    /// Target and `sh:node` rules.
    #[serde(default = "enabled")]
    pub shacl: bool,
    #[serde(default)]
    pub axioms: Vec<AxiomSetting>,
}

/// A classification seeded unconditionally, given as two IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AxiomSetting {
    pub namespace: Namespace,
    pub resource: String,
    pub classifier: String,
}

fn enabled() -> bool {
    true
}

impl Default for RulesetSettings {
    fn default() -> Self {
        Self { rdfs: true, shacl: true, axioms: Vec::new() }
    }
}

impl Settings {
    /// Loads settings from `path` (or [`DEFAULT_CONFIG_FILE`]) if it exists,
    /// layered over defaults and under environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let settings = Config::builder()
            .set_default("log_filter", "info")?
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(path.is_some()))
            .add_source(
                Environment::with_prefix("METASTATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
