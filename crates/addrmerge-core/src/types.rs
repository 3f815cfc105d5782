//! Core types for addrmerge-core.
//!
//! This module defines the normalised [`AddressRecord`] every parser emits,
//! its [`Identity`], and the [`Field`] names shared by all input formats.

use serde::Serialize;

/// Who an address belongs to. A record carries exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    /// A person, composed from first/middle/last parts where the source splits them.
    Name(String),
    Organization(String),
}

impl Identity {
    pub fn value(&self) -> &str {
        match self {
            Identity::Name(v) | Identity::Organization(v) => v,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Identity::Name(_) => Field::Name,
            Identity::Organization(_) => Field::Organization,
        }
    }
}

/// A normalised address record produced by one of the format parsers.
///
/// Only present fields are serialised, in the order `name|organization`,
/// `street`, `city`, `county`, `state`, `zip`. Values are always trimmed and
/// never empty; the parsers go through [`RecordBuilder`](crate::RecordBuilder)
/// which enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ZIP as it appeared in the source, possibly in `12345-6789` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl AddressRecord {
    /// A record with only an identity set.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            street: None,
            city: None,
            county: None,
            state: None,
            zip: None,
        }
    }

    /// Value of a field, if present.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name | Field::Organization => {
                (self.identity.field() == field).then(|| self.identity.value())
            }
            Field::Street => self.street.as_deref(),
            Field::City => self.city.as_deref(),
            Field::County => self.county.as_deref(),
            Field::State => self.state.as_deref(),
            Field::Zip => self.zip.as_deref(),
        }
    }

    /// Number of present fields, identity included.
    pub fn field_count(&self) -> usize {
        1 + Field::DETAIL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }

    /// The five-digit key used to order records. See [`crate::zip_key`].
    pub fn zip_key(&self) -> &str {
        crate::zip::zip_key(self.zip.as_deref().unwrap_or_default())
    }
}

/// Output field names, in serialisation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Organization,
    Street,
    City,
    County,
    State,
    Zip,
}

impl Field {
    /// Every non-identity field.
    pub const DETAIL: [Field; 5] = [
        Field::Street,
        Field::City,
        Field::County,
        Field::State,
        Field::Zip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Organization => "organization",
            Field::Street => "street",
            Field::City => "city",
            Field::County => "county",
            Field::State => "state",
            Field::Zip => "zip",
        }
    }

    /// Look up a field by its output name (as used for XML element names).
    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "name" => Some(Field::Name),
            "organization" => Some(Field::Organization),
            "street" => Some(Field::Street),
            "city" => Some(Field::City),
            "county" => Some(Field::County),
            "state" => Some(Field::State),
            "zip" => Some(Field::Zip),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serialises_present_fields_in_order() {
        let record = AddressRecord {
            identity: Identity::Organization("Acme Inc.".into()),
            street: Some("123 Main St".into()),
            city: Some("Springfield".into()),
            county: None,
            state: Some("IL".into()),
            zip: Some("62704".into()),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"organization":"Acme Inc.","street":"123 Main St","city":"Springfield","state":"IL","zip":"62704"}"#
        );
    }

    #[test]
    fn identity_only_record_serialises_one_key() {
        let record = AddressRecord::new(Identity::Name("Jane Doe".into()));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"name":"Jane Doe"}"#);
        assert_eq!(record.field_count(), 1);
    }

    #[test]
    fn get_reports_only_the_identity_that_is_set() {
        let record = AddressRecord::new(Identity::Name("Jane Doe".into()));
        assert_eq!(record.get(Field::Name), Some("Jane Doe"));
        assert_eq!(record.get(Field::Organization), None);
    }

    #[test]
    fn zip_key_falls_back_when_zip_missing() {
        let mut record = AddressRecord::new(Identity::Name("Jane Doe".into()));
        assert_eq!(record.zip_key(), "00000");
        record.zip = Some("90210-1234".into());
        assert_eq!(record.zip_key(), "90210");
    }

    #[test]
    fn field_names_round_trip() {
        for field in [Field::Name, Field::Organization]
            .into_iter()
            .chain(Field::DETAIL)
        {
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_name("zip4"), None);
    }
}
