//! XML address parser.
//!
//! Expected shape:
//!
//! ```xml
//! <records>
//!   <record>
//!     <name>Jane Doe</name>          <!-- or <organization> -->
//!     <street>1 Elm St</street>
//!     <city>Boston</city>
//!     <county>Suffolk</county>
//!     <state>MA</state>
//!     <zip>02108</zip>
//!   </record>
//! </records>
//! ```
//!
//! Only `record` elements directly under the root are read, and only field
//! elements directly under a `record`. The first occurrence of a field wins,
//! and its text is what precedes its first child element.
//! A record with neither a non-blank `name` nor a non-blank `organization`
//! is skipped. Any well-formedness problem fails the whole file.

use std::path::Path;

use addrmerge_core::{AddressRecord, Field, FormatProfile, IngestError, RecordBuilder};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::SourceParser;

const RECORD_TAG: &[u8] = b"record";

/// Depth (number of open elements) at which each kind of node lives.
const RECORD_DEPTH: usize = 1;
const FIELD_DEPTH: usize = 2;

pub struct MarkupParser {
    profile: FormatProfile,
}

impl MarkupParser {
    pub fn new() -> Self {
        Self { profile: FormatProfile::markup() }
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Field element currently open inside a `record`.
#[derive(Debug)]
struct OpenField {
    field: Field,
    text: String,
    /// Set once a child element starts; later text is tail text and ignored.
    sealed: bool,
}

impl OpenField {
    fn new(field: Field) -> Self {
        Self { field, text: String::new(), sealed: false }
    }

    fn push(&mut self, text: &str) {
        if !self.sealed {
            self.text.push_str(text);
        }
    }
}

/// Raw field text collected for one `record` element.
#[derive(Debug, Default)]
struct RawRecord {
    fields: Vec<(Field, String)>,
}

impl RawRecord {
    fn insert(&mut self, field: Field, text: String) {
        if !self.fields.iter().any(|(f, _)| *f == field) {
            self.fields.push((field, text));
        }
    }

    fn get(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    fn build(&self, profile: &FormatProfile) -> Option<AddressRecord> {
        let mut builder = RecordBuilder::new(profile);
        builder
            .name(self.get(Field::Name))
            .organization(self.get(Field::Organization));
        for field in Field::DETAIL {
            builder.field(field, self.get(field));
        }
        builder.finish()
    }
}

impl SourceParser for MarkupParser {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn extensions(&self) -> &[&'static str] {
        &["xml"]
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<AddressRecord>, IngestError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut reader = Reader::from_str(source);
        let malformed = |reader: &Reader<&[u8]>, message: String| {
            IngestError::markup(
                path,
                format!("{message} (at byte {})", reader.buffer_position()),
            )
        };

        let mut records = Vec::new();
        let mut depth = 0usize;
        let mut root_closed = false;
        let mut record: Option<RawRecord> = None;
        let mut field: Option<OpenField> = None;
        let mut first_event = true;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(&reader, e.to_string()))?;
            let at_start = std::mem::replace(&mut first_event, false);

            match event {
                Event::Start(start) => {
                    if root_closed {
                        return Err(malformed(&reader, "junk after document element".into()));
                    }
                    check_tag(&start).map_err(|m| malformed(&reader, m))?;
                    let name = start.name();
                    if depth == RECORD_DEPTH && name.as_ref() == RECORD_TAG {
                        record = Some(RawRecord::default());
                    } else if depth == FIELD_DEPTH && record.is_some() {
                        field = std::str::from_utf8(name.as_ref())
                            .ok()
                            .and_then(Field::from_name)
                            .map(OpenField::new);
                    } else if depth == FIELD_DEPTH + 1 {
                        if let Some(open) = field.as_mut() {
                            open.sealed = true;
                        }
                    }
                    depth += 1;
                }
                Event::Empty(start) => {
                    if root_closed {
                        return Err(malformed(&reader, "junk after document element".into()));
                    }
                    check_tag(&start).map_err(|m| malformed(&reader, m))?;
                    if depth == FIELD_DEPTH + 1 {
                        if let Some(open) = field.as_mut() {
                            open.sealed = true;
                        }
                    }
                    if depth == 0 {
                        // <root/>: a document with no records
                        root_closed = true;
                    } else if depth == RECORD_DEPTH && start.name().as_ref() == RECORD_TAG {
                        tracing::debug!(path = %path.display(), "skipping empty record element");
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    match depth {
                        0 => root_closed = true,
                        RECORD_DEPTH => {
                            if let Some(raw) = record.take() {
                                match raw.build(&self.profile) {
                                    Some(r) => records.push(r),
                                    None => tracing::debug!(
                                        path = %path.display(),
                                        "skipping record without name or organization"
                                    ),
                                }
                            }
                        }
                        FIELD_DEPTH => {
                            if let (Some(open), Some(raw)) = (field.take(), record.as_mut()) {
                                raw.insert(open.field, open.text);
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| malformed(&reader, e.to_string()))?;
                    if depth == 0 && !text.trim().is_empty() {
                        let what = if root_closed {
                            "junk after document element"
                        } else {
                            "text before root element"
                        };
                        return Err(malformed(&reader, what.into()));
                    }
                    if depth == FIELD_DEPTH + 1 {
                        if let Some(open) = field.as_mut() {
                            open.push(&text);
                        }
                    }
                }
                Event::CData(cdata) => {
                    if depth == FIELD_DEPTH + 1 {
                        if let Some(open) = field.as_mut() {
                            open.push(&String::from_utf8_lossy(&cdata));
                        }
                    }
                }
                Event::Decl(_) if !at_start => {
                    return Err(malformed(
                        &reader,
                        "XML or text declaration not at start of entity".into(),
                    ));
                }
                Event::PI(pi) if pi.target().eq_ignore_ascii_case(b"xml") => {
                    return Err(malformed(&reader, "reserved processing instruction target".into()));
                }
                Event::Eof => break,
                // declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if depth > 0 {
            return Err(malformed(&reader, "unexpected end of input: unclosed element".into()));
        }
        if !root_closed {
            return Err(malformed(&reader, "no element found".into()));
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Well-formedness checks the tokenizer leaves to the caller
// ---------------------------------------------------------------------------

/// Element name, attribute syntax, duplicate attributes and attribute values.
fn check_tag(start: &BytesStart<'_>) -> Result<(), String> {
    let name = start.name();
    if !is_xml_name(name.as_ref()) {
        return Err(format!(
            "invalid element name {:?}",
            String::from_utf8_lossy(name.as_ref())
        ));
    }
    for attr in start.attributes().with_checks(true) {
        let attr = attr.map_err(|e| e.to_string())?;
        if !is_xml_name(attr.key.as_ref()) {
            return Err(format!(
                "invalid attribute name {:?}",
                String::from_utf8_lossy(attr.key.as_ref())
            ));
        }
        if attr.value.contains(&b'<') {
            return Err("'<' in attribute value".into());
        }
        attr.unescape_value().map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn is_xml_name(name: &[u8]) -> bool {
    let Ok(name) = std::str::from_utf8(name) else {
        return false;
    };
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

// XML 1.0 NameStartChar / NameChar productions
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
