//! TSV address parser.
//!
//! The first line names the columns, even when it is blank; every later
//! non-blank line is one candidate record. Recognised columns:
//! `organization`, `first`, `middle`, `last`, `address` (or `street`),
//! `city`, `county`, `state`, `zip`, `zip4`. Unknown columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use addrmerge_core::{AddressRecord, Field, FormatProfile, IngestError, RecordBuilder};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::SourceParser;

pub struct TabularParser {
    profile: FormatProfile,
}

impl TabularParser {
    pub fn new() -> Self {
        Self::with_profile(FormatProfile::tabular())
    }

    pub fn with_profile(profile: FormatProfile) -> Self {
        Self { profile }
    }

    /// `zip-zip4` when both are present, else `zip` alone.
    fn compose_zip(&self, zip: Option<&str>, zip4: Option<&str>) -> Option<String> {
        let zip = self.profile.normalize(zip?)?;
        match zip4.and_then(|z| self.profile.normalize(z)) {
            Some(plus4) => Some(format!("{zip}-{plus4}")),
            None => Some(zip.to_owned()),
        }
    }

    fn build(&self, row: &Row<'_>) -> Option<AddressRecord> {
        let name = match (row.get("first"), row.get("last")) {
            (Some(first), Some(last)) => self.profile.compose_name(first, row.get("middle"), last),
            _ => None,
        };
        let street = row
            .get("address")
            .filter(|v| self.profile.normalize(v).is_some())
            .or_else(|| row.get("street"));
        let zip = self.compose_zip(row.get("zip"), row.get("zip4"));

        let mut builder = RecordBuilder::new(&self.profile);
        builder
            .organization(row.get("organization"))
            .name(name.as_deref())
            .field(Field::Street, street)
            .field(Field::City, row.get("city"))
            .field(Field::County, row.get("county"))
            .field(Field::State, row.get("state"))
            .field(Field::Zip, zip.as_deref());
        builder.finish()
    }
}

impl Default for TabularParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One data line keyed by header name. Duplicate headers: right-most wins.
struct Row<'a>(HashMap<&'a str, &'a str>);

impl<'a> Row<'a> {
    fn new(header: &'a StringRecord, values: &'a StringRecord) -> Self {
        Self(header.iter().zip(values.iter()).collect())
    }

    fn get(&self, column: &str) -> Option<&'a str> {
        self.0.get(column).copied()
    }
}

impl SourceParser for TabularParser {
    fn name(&self) -> &'static str {
        "tsv"
    }

    fn extensions(&self) -> &[&'static str] {
        &["tsv"]
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<AddressRecord>, IngestError> {
        if source.is_empty() {
            return Err(IngestError::EmptyFile { path: path.to_path_buf() });
        }

        // the csv reader skips empty lines, so the header is split by hand
        let (first_line, body) = source.split_once('\n').unwrap_or((source, ""));
        let header: StringRecord = first_line.split('\t').map(str::trim).collect();

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(body.as_bytes());
        let tabular = |source: csv::Error| IngestError::Tabular {
            path: path.to_path_buf(),
            source,
        };

        let mut records = Vec::new();
        for values in reader.records() {
            let values = values.map_err(tabular)?;
            if values.iter().all(str::is_empty) {
                continue;
            }
            // body starts on file line 2
            let line = values.position().map_or(0, |p| p.line() + 1);
            if values.len() > header.len() {
                tracing::warn!(
                    path = %path.display(),
                    line,
                    extra = values.len() - header.len(),
                    "ignoring values beyond the header"
                );
            }
            match self.build(&Row::new(&header, &values)) {
                Some(record) => records.push(record),
                None => tracing::debug!(
                    path = %path.display(),
                    line,
                    "skipping row without identity or address detail"
                ),
            }
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
