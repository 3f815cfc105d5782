//! Configuration types for addrmerge.
//!
//! [`Config::load`] layers an optional user file and `ADDRMERGE_*`
//! environment variables on top of the embedded defaults.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::normalizer::{Acceptance, FormatProfile, SentinelSet};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
path = "output.json"

[tabular]
sentinels        = ["N/A"]
middle_sentinels = ["N/M/N"]

[text]
organization_markers = ["Inc.", "LLC", "Ltd.", "Company", "Corp.", "Corporation"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub tabular: TabularConfig,
    #[serde(default)]
    pub text: TextConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Where the combined JSON array is written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf { PathBuf::from("output.json") }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

/// `[tabular]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TabularConfig {
    #[serde(default = "default_sentinels")]
    pub sentinels: Vec<String>,
    #[serde(default = "default_middle_sentinels")]
    pub middle_sentinels: Vec<String>,
}

fn default_sentinels() -> Vec<String> { vec!["N/A".to_string()] }
fn default_middle_sentinels() -> Vec<String> { vec!["N/M/N".to_string()] }

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            sentinels: default_sentinels(),
            middle_sentinels: default_middle_sentinels(),
        }
    }
}

/// `[text]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    /// Case-sensitive substrings that mark a first line as an organization.
    #[serde(default = "default_organization_markers")]
    pub organization_markers: Vec<String>,
}

fn default_organization_markers() -> Vec<String> {
    ["Inc.", "LLC", "Ltd.", "Company", "Corp.", "Corporation"]
        .map(String::from)
        .to_vec()
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { organization_markers: default_organization_markers() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the embedded defaults, then `user` (which must exist if given),
    /// then `ADDRMERGE_*` environment variables (`ADDRMERGE_OUTPUT__PATH`, …).
    pub fn load(user: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = user {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix("ADDRMERGE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Normalization profile for TSV input.
    pub fn tabular_profile(&self) -> FormatProfile {
        FormatProfile {
            sentinels: SentinelSet::new(self.tabular.sentinels.iter().cloned()),
            middle_sentinels: SentinelSet::new(self.tabular.middle_sentinels.iter().cloned()),
            acceptance: Acceptance::IdentityAndDetail,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
