//! Pipeline driver: parse every input, combine, sort by ZIP key, write JSON.
//!
//! A run is all-or-nothing: the first failing file aborts it and no output
//! file is written.

use std::path::{Path, PathBuf};

use addrmerge_core::config::Config;
use addrmerge_core::{AddressRecord, IngestError};
use addrmerge_formats::Dispatcher;

/// Settings that affect where results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// File the combined JSON array is written to.
    pub output_path: PathBuf,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self { output_path: config.output.path.clone() }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::defaults())
    }
}

/// Outcome of a successful [`Pipeline::run`].
#[derive(Debug)]
pub struct RunSummary {
    /// Combined records in output order.
    pub records: Vec<AddressRecord>,
    /// The JSON written to `output_path`.
    pub json: String,
    pub output_path: PathBuf,
}

pub struct Pipeline {
    dispatcher: Dispatcher,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(dispatcher: Dispatcher, config: PipelineConfig) -> Self {
        Self { dispatcher, config }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Dispatcher::new(config), PipelineConfig::from_config(config))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parse `paths` in order and return the combined records sorted by ZIP key.
    ///
    /// Every path is checked for existence before any file is parsed.
    pub fn collect_records<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<Vec<AddressRecord>, IngestError> {
        if let Some(missing) = paths.iter().map(|p| p.as_ref()).find(|p| !p.is_file()) {
            return Err(IngestError::NotFound { path: missing.to_path_buf() });
        }

        let mut records = Vec::new();
        for path in paths {
            records.extend(self.dispatcher.parse_file(path.as_ref())?);
        }
        sort_by_zip(&mut records);
        Ok(records)
    }

    /// [`collect_records`](Self::collect_records), then render the records as
    /// pretty JSON and write it to the configured output path.
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Result<RunSummary, IngestError> {
        let records = self.collect_records(paths)?;
        let json = render_json(&records)?;
        let output_path = self.config.output_path.clone();
        std::fs::write(&output_path, &json).map_err(|source| IngestError::Write {
            path: output_path.clone(),
            source,
        })?;
        tracing::info!(
            files = paths.len(),
            records = records.len(),
            output = %output_path.display(),
            "wrote combined addresses"
        );
        Ok(RunSummary { records, json, output_path })
    }
}

/// Stable sort on [`AddressRecord::zip_key`]; equal keys keep input order.
pub fn sort_by_zip(records: &mut [AddressRecord]) {
    records.sort_by_cached_key(|r| r.zip_key().to_owned());
}

/// Pretty-printed JSON array, two-space indent.
pub fn render_json(records: &[AddressRecord]) -> Result<String, IngestError> {
    Ok(serde_json::to_string_pretty(records)?)
}
