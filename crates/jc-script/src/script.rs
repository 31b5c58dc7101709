//! Script document
//!
//! A script is a YAML document with an optional `options` block and an
//! optional top-level `sequence`. Unknown top-level keys are ignored; a
//! document without a `sequence` is valid and performs no actions.

use crate::action::Node;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for script loading
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors that can occur while loading a script file
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Failed to read the script file
    #[error("failed to read script {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the script YAML
    #[error("failed to parse script {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Execution parameters, immutable once an executor is constructed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Delay in seconds inserted after every successful button press
    pub interval: f64,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self { interval: 0.5 }
    }
}

/// A complete loaded script
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptDocument {
    /// Execution parameters; missing keys keep their defaults
    pub options: ScriptOptions,

    /// Top-level node sequence; empty when the key is absent
    pub sequence: Vec<Node>,
}

impl ScriptDocument {
    /// Parse a script from YAML text
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Load and parse a script file
    pub fn load(path: impl AsRef<Path>) -> ScriptResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ScriptError::ParseYaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
