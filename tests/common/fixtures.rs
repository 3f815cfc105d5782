//! Sample input files used across harnesses.
//!
//! One file per format. Together they produce seven records with distinct
//! ZIP keys, plus a handful of rows each parser is expected to drop.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<records>
  <record>
    <name>Jane Doe</name>
    <zip>12345</zip>
  </record>
  <record>
    <organization>Harbor Freight Ltd.</organization>
    <street>400 Dock Rd</street>
    <city>Portland</city>
    <state>ME</state>
    <zip>04101</zip>
  </record>
  <record>
    <street>no identity here</street>
    <zip>99999</zip>
  </record>
</records>
"#;

pub const SAMPLE_TSV: &str = "first\tmiddle\tlast\torganization\taddress\tcity\tstate\tcounty\tzip\tzip4
John\tN/M/N\tSmith\tN/A\tN/A\tN/A\tN/A\tN/A\t90210\t1234
\t\t\tCentral Bank LLC\t55 Water St\tNew York\tNY\tNew York\t10041\tN/A
Mary\tN/M/N\tMajor\tN/A\tN/A\tN/A\tN/A\tN/A\tN/A\tN/A
";

pub const SAMPLE_TXT: &str = "Acme Inc.
123 Main St
Springfield, IL 62704

Pat Lee
9 Oak Ave
Columbus, Franklin, Ohio 43215-0001


Drifter
General Delivery
";

/// Names (or organizations) of the sample records in sorted output order.
pub const SAMPLE_SORTED_IDENTITIES: &[&str] = &[
    "Drifter",
    "Harbor Freight Ltd.",
    "Central Bank LLC",
    "Jane Doe",
    "Pat Lee",
    "Acme Inc.",
    "John Smith",
];

/// A temporary directory that input and output files are written into.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("create temp dir") }
    }

    /// Workspace pre-populated with `sample.xml`, `sample.tsv` and `sample.txt`.
    pub fn with_samples() -> Self {
        let ws = Self::new();
        ws.write("sample.xml", SAMPLE_XML);
        ws.write("sample.tsv", SAMPLE_TSV);
        ws.write("sample.txt", SAMPLE_TXT);
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn samples(&self) -> Vec<PathBuf> {
        ["sample.xml", "sample.tsv", "sample.txt"]
            .iter()
            .map(|n| self.path(n))
            .collect()
    }
}
