//! TOML configuration for the parser, the engine and the rule catalogue
//!
//! Every table and key is optional; anything left out keeps its default.
//!
//! ```toml
//! [parser]
//! placeholder_terms = ["tbd", "todo", "pending"]
//!
//! [engine]
//! time_budget_ms = 60000
//!
//! [rules]
//! min_word_count = 500
//!
//! [server]
//! max_content_bytes = 1048576
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use brd_parser::{DocumentParser, ParserConfig};
use serde::{Deserialize, Serialize};
use validation_engine::{EngineConfig, RuleConfig, RuleRegistry, ValidationEngine};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP API limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Largest accepted `content` field in bytes (default: 1 MiB)
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: default_max_content_bytes(),
        }
    }
}

fn default_max_content_bytes() -> usize {
    1024 * 1024
}

impl FrameworkConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Configuration from `path`, or the defaults when no file was given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parser(&self) -> DocumentParser {
        DocumentParser::new(self.parser.clone())
    }

    pub fn registry(&self) -> RuleRegistry {
        RuleRegistry::with_config(&self.rules)
    }

    pub fn engine(&self) -> ValidationEngine {
        ValidationEngine::new(Arc::new(self.registry()), self.engine.clone())
    }
}
