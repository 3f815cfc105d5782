//! addrmerge — merge address files into one ZIP-sorted JSON array.
//!
//! Reads XML, TSV and free-text address files, normalises every record into
//! the same shape, and writes them as a single JSON array ordered by ZIP.
//! The parsing layers live in the workspace crates and are re-exported here
//! so integration tests and benches can reach them through one import.
//!
//! # Architecture
//!
//! ```text
//! CLI ──► Pipeline ──► Dispatcher ──► {xml, tsv, txt} parser
//!            │                              │
//!            │◄──────── Vec<AddressRecord> ─┘
//!            └──► stable sort by ZIP key ──► stdout + output.json
//! ```
//!
//! Everything runs on the calling thread, one file at a time.

pub mod pipeline;

pub use addrmerge_core::config::Config;
pub use addrmerge_core::{zip_key, AddressRecord, Field, Identity, IngestError};
pub use addrmerge_formats::{Dispatcher, FreeTextParser, MarkupParser, SourceParser, TabularParser};
pub use pipeline::{render_json, sort_by_zip, Pipeline, PipelineConfig, RunSummary};
