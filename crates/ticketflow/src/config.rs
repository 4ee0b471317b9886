//! Configuration management for ticketflow.
//!
//! Configuration lives in an optional `.ticketflow.yaml` file. It is taken
//! from `--config` when given, otherwise found by searching up the directory
//! tree from the directory being processed. Every key is optional:
//!
//! ```yaml
//! graph:
//!   output-file: dependencies.mermaid
//!   title-width: 30
//! validate:
//!   ac-min: 3
//!   ac-max: 5
//!   ideal-max-hours: 4
//!   max-hours: 6
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use ticketflow_core::render::{DEFAULT_TITLE_WIDTH, RenderOptions};
use ticketflow_core::validate::ValidationRules;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = ".ticketflow.yaml";

/// Default name of the rendered diagram, written inside the tickets directory
pub const DEFAULT_OUTPUT_FILE: &str = "dependencies.mermaid";

/// Maximum directory depth to traverse when searching for a config file
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for ticketflow
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TicketflowConfig {
    /// Settings for the `graph` command
    pub graph: GraphConfig,

    /// Settings for the `validate` command
    pub validate: ValidateConfig,
}

/// Graph configuration section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GraphConfig {
    /// File name of the diagram, relative to the tickets directory
    pub output_file: String,

    /// Title characters shown per node
    pub title_width: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            title_width: DEFAULT_TITLE_WIDTH,
        }
    }
}

impl GraphConfig {
    /// Renderer options for this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title_width: self.title_width,
        }
    }
}

/// Validation configuration section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValidateConfig {
    /// Recommended minimum number of acceptance criteria
    pub ac_min: usize,

    /// Recommended maximum number of acceptance criteria
    pub ac_max: usize,

    /// Largest upper time estimate (hours) that raises no warning
    pub ideal_max_hours: u32,

    /// Largest upper time estimate (hours) that is not an error
    pub max_hours: u32,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            ac_min: rules.ac_min,
            ac_max: rules.ac_max,
            ideal_max_hours: rules.ideal_max_hours,
            max_hours: rules.max_hours,
        }
    }
}

impl From<&ValidateConfig> for ValidationRules {
    fn from(config: &ValidateConfig) -> Self {
        Self {
            ac_min: config.ac_min,
            ac_max: config.ac_max,
            ideal_max_hours: config.ideal_max_hours,
            max_hours: config.max_hours,
        }
    }
}

impl TicketflowConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.check()?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise the nearest config file above
    /// `start_dir` is used, falling back to defaults when there is none.
    pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path);
        }

        match find_config_file(start_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Found configuration");
                Self::load(&path)
            }
            None => {
                tracing::debug!(start = %start_dir.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject settings that contradict each other.
    fn check(&self) -> Result<()> {
        if self.graph.output_file.trim().is_empty() {
            return Err(Error::Config("graph.output-file cannot be empty".to_string()));
        }

        if self.validate.ac_min > self.validate.ac_max {
            return Err(Error::Config(format!(
                "validate.ac-min ({}) cannot exceed validate.ac-max ({})",
                self.validate.ac_min, self.validate.ac_max
            )));
        }

        if self.validate.ideal_max_hours > self.validate.max_hours {
            return Err(Error::Config(format!(
                "validate.ideal-max-hours ({}) cannot exceed validate.max-hours ({})",
                self.validate.ideal_max_hours, self.validate.max_hours
            )));
        }

        Ok(())
    }
}

/// Find the nearest config file by searching up the directory tree.
///
/// Starts from the given directory and traverses parent directories until a
/// `.ticketflow.yaml` file is found, the root is reached, or the maximum
/// traversal depth is exceeded.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());
    let mut depth = 0;

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
