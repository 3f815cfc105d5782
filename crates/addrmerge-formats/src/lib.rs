//! addrmerge-formats — address file parsers for addrmerge.
//!
//! Each parser reads one file and returns its records in file order, or the
//! first error. The [`Dispatcher`] picks the parser from the file extension.

pub mod markup;
pub mod tabular;
pub mod text;

use std::path::Path;

use addrmerge_core::config::Config;
use addrmerge_core::{AddressRecord, IngestError};

pub use markup::MarkupParser;
pub use tabular::TabularParser;
pub use text::FreeTextParser;

/// Implemented by each input format.
pub trait SourceParser {
    /// Short format name, used in logs.
    fn name(&self) -> &'static str;

    /// Extensions handled, without the leading dot.
    fn extensions(&self) -> &[&'static str];

    /// Parse already-loaded file contents. `path` is only used for diagnostics.
    fn parse(&self, path: &Path, source: &str) -> Result<Vec<AddressRecord>, IngestError>;

    /// Read `path` and parse it. The file handle is released before parsing starts.
    fn parse_file(&self, path: &Path) -> Result<Vec<AddressRecord>, IngestError> {
        let source = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
        let records = self.parse(path, &source)?;
        tracing::debug!(
            path = %path.display(),
            format = self.name(),
            records = records.len(),
            "parsed file"
        );
        Ok(records)
    }

    /// Case-insensitive extension match.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes a file to the parser registered for its extension.
pub struct Dispatcher {
    parsers: Vec<Box<dyn SourceParser>>,
}

impl Dispatcher {
    /// The three built-in parsers, configured from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            parsers: vec![
                Box::new(MarkupParser::new()),
                Box::new(TabularParser::with_profile(config.tabular_profile())),
                Box::new(FreeTextParser::with_markers(
                    config.text.organization_markers.clone(),
                )),
            ],
        }
    }

    pub fn parser_for(&self, path: &Path) -> Result<&dyn SourceParser, IngestError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy())
            .unwrap_or_default();
        self.parsers
            .iter()
            .find(|p| !extension.is_empty() && p.can_parse(&extension))
            .map(|p| &**p)
            .ok_or_else(|| IngestError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{extension}")
                },
            })
    }

    pub fn parse_file(&self, path: &Path) -> Result<Vec<AddressRecord>, IngestError> {
        self.parser_for(path)?.parse_file(path)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&Config::defaults())
    }
}
