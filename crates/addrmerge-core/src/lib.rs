//! addrmerge-core — shared building blocks for addrmerge.
//!
//! This crate holds everything the format parsers and the pipeline driver
//! have in common: the normalised [`AddressRecord`], the field and ZIP
//! normalizers, the error taxonomy, and configuration loading.
//!
//! # Architecture
//!
//! ```text
//! Dispatcher ──► {markup, tabular, free-text} parser ──► RecordBuilder
//!                                                          │
//!                          Pipeline ◄── Vec<AddressRecord> ┘
//!                             │
//!                             └──► sort by zip_key ──► JSON
//! ```

pub mod config;
pub mod error;
pub mod normalizer;
pub mod types;
pub mod zip;

pub use error::IngestError;
pub use normalizer::{Acceptance, FormatProfile, RecordBuilder, SentinelSet};
pub use types::{AddressRecord, Field, Identity};
pub use zip::{zip_key, FALLBACK_ZIP_KEY};
