//! Free-text address parser.
//!
//! Addresses are paragraphs separated by blank lines:
//!
//! ```text
//! Acme Inc.
//! 123 Main St
//! Springfield, IL 62704
//!
//! Jane Doe
//! 9 Oak Ave
//! Columbus, Franklin, Ohio 43215-0001
//! ```
//!
//! Line 1 is the identity, line 2 the street, and the last line (when there
//! are at least three) is `City[, County], State ZIP`.

use std::path::Path;
use std::sync::LazyLock;

use addrmerge_core::{AddressRecord, Field, FormatProfile, IngestError, RecordBuilder};
use regex::Regex;

use crate::SourceParser;

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^,]+),\s*(?:([^,]+),\s*)?([A-Za-z]{2}|[A-Za-z]+)\s+([0-9]{5}(?:-[0-9]{4})?)")
        .expect("location pattern is valid")
});

pub struct FreeTextParser {
    profile: FormatProfile,
    organization_markers: Vec<String>,
}

impl FreeTextParser {
    pub fn new() -> Self {
        Self::with_markers(
            ["Inc.", "LLC", "Ltd.", "Company", "Corp.", "Corporation"].map(String::from),
        )
    }

    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profile: FormatProfile::free_text(),
            organization_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    fn is_organization(&self, line: &str) -> bool {
        self.organization_markers
            .iter()
            .any(|m| line.contains(m.as_str()))
    }

    fn build(&self, lines: &[&str]) -> Option<AddressRecord> {
        let first = *lines.first()?;
        let mut builder = RecordBuilder::new(&self.profile);
        if self.is_organization(first) {
            builder.organization(Some(first));
        } else {
            builder.name(Some(first));
        }
        builder.field(Field::Street, lines.get(1).copied());

        if lines.len() >= 3 {
            let last = lines[lines.len() - 1];
            match LOCATION.captures(last) {
                Some(caps) => {
                    let group = |i| caps.get(i).map(|m| m.as_str());
                    builder
                        .field(Field::City, group(1))
                        .field(Field::County, group(2))
                        .field(Field::State, group(3))
                        .field(Field::Zip, group(4));
                }
                None => tracing::debug!(line = last, "no city/state/zip found in last line"),
            }
        }
        builder.finish()
    }
}

impl Default for FreeTextParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split into maximal runs of non-blank lines, each line trimmed.
fn paragraphs(source: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for line in source.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

impl SourceParser for FreeTextParser {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt"]
    }

    fn parse(&self, _path: &Path, source: &str) -> Result<Vec<AddressRecord>, IngestError> {
        Ok(paragraphs(source)
            .iter()
            .filter_map(|lines| self.build(lines))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use addrmerge_core::Identity;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(source: &str) -> Vec<AddressRecord> {
        FreeTextParser::new()
            .parse(Path::new("test.txt"), source)
            .unwrap()
    }

    #[test]
    fn organization_with_city_state_zip() {
        let records = parse("Acme Inc.\n123 Main St\nSpringfield, IL 62704");
        assert_eq!(
            records,
            vec![AddressRecord {
                identity: Identity::Organization("Acme Inc.".into()),
                street: Some("123 Main St".into()),
                city: Some("Springfield".into()),
                county: None,
                state: Some("IL".into()),
                zip: Some("62704".into()),
            }]
        );
    }

    #[test]
    fn person_with_county_and_full_state_name() {
        let records = parse("  Jane Doe  \n9 Oak Ave\nColumbus, Franklin, Ohio 43215-0001\n");
        assert_eq!(
            records,
            vec![AddressRecord {
                identity: Identity::Name("Jane Doe".into()),
                street: Some("9 Oak Ave".into()),
                city: Some("Columbus".into()),
                county: Some("Franklin".into()),
                state: Some("Ohio".into()),
                zip: Some("43215-0001".into()),
            }]
        );
    }

    #[rstest]
    #[case::inc("Acme Inc.", true)]
    #[case::llc("Smith Holdings LLC", true)]
    #[case::ltd("Harbor Ltd.", true)]
    #[case::company("The Widget Company", true)]
    #[case::corp("Globex Corp.", true)]
    #[case::corporation("Initech Corporation", true)]
    #[case::person("John Smith", false)]
    #[case::case_sensitive("acme inc.", false)]
    #[case::missing_dot("Acme Inc", false)]
    fn organization_markers(#[case] line: &str, #[case] is_org: bool) {
        let records = parse(&format!("{line}\n1 Elm St\nBoston, MA 02108"));
        assert_eq!(matches!(records[0].identity, Identity::Organization(_)), is_org);
    }

    #[test]
    fn two_line_paragraph_has_no_location() {
        let records = parse("Jane Doe\nBoston, MA 02108");
        let mut expected = AddressRecord::new(Identity::Name("Jane Doe".into()));
        expected.street = Some("Boston, MA 02108".into());
        assert_eq!(records, vec![expected]);
    }

    #[test]
    fn identity_only_paragraph_is_kept() {
        assert_eq!(
            parse("Jane Doe"),
            vec![AddressRecord::new(Identity::Name("Jane Doe".into()))]
        );
    }

    #[test]
    fn unmatched_last_line_sets_no_location() {
        let records = parse("Jane Doe\n9 Oak Ave\nPO Box 12\nsomewhere far away");
        assert_eq!(records[0].street.as_deref(), Some("9 Oak Ave"));
        assert_eq!(records[0].city, None);
        assert_eq!(records[0].zip, None);
    }

    #[test]
    fn zip_digits_are_ascii_only() {
        // same digit class as the ZIP sort key
        let records = parse("Jane Doe\n9 Oak Ave\nCairo, EG \u{661}\u{662}\u{663}\u{664}\u{665}");
        assert_eq!(records[0].zip, None);
        assert_eq!(records[0].city, None);
        assert_eq!(records[0].zip_key(), addrmerge_core::FALLBACK_ZIP_KEY);
    }

    #[test]
    fn middle_lines_are_ignored() {
        let records = parse("Jane Doe\n9 Oak Ave\nApt 4\nBoston, MA 02108");
        assert_eq!(records[0].street.as_deref(), Some("9 Oak Ave"));
        assert_eq!(records[0].city.as_deref(), Some("Boston"));
    }

    #[test]
    fn paragraphs_split_on_blank_line_runs() {
        let source = "\n\nA Corp.\n1 A St\n\n  \t\n\r\nB\n2 B St\nX, YZ 11111\n\n\n";
        let records = parse(source);
        let names: Vec<_> = records.iter().map(|r| r.identity.value()).collect();
        assert_eq!(names, ["A Corp.", "B"]);
        assert_eq!(records[1].zip.as_deref(), Some("11111"));
    }

    #[test]
    fn empty_file_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\n \n\t\n").is_empty());
    }

    #[test]
    fn custom_markers() {
        let parser = FreeTextParser::with_markers(["GmbH"]);
        let records = parser
            .parse(Path::new("t.txt"), "Muller GmbH\n1 Ring\nBerlin, BE 10115")
            .unwrap();
        assert!(matches!(records[0].identity, Identity::Organization(_)));
    }
}
