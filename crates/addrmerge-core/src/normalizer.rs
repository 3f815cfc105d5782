//! Field normalization shared by every input format.
//!
//! Each format gets a [`FormatProfile`]: the sentinel tokens that mean "not
//! provided" in that format, and the rule deciding whether a finished record
//! is kept. Parsers feed raw values into a [`RecordBuilder`], which trims
//! them, drops blanks and sentinels, and applies the acceptance rule.

use crate::types::{AddressRecord, Field, Identity};

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

/// Literal placeholder values that count as absent (e.g. `N/A`).
///
/// Matching is exact and case-sensitive, after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentinelSet(Vec<String>);

impl SentinelSet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// No sentinels: only blank values are absent.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|s| s == value)
    }

    /// Trimmed value, or `None` if it is blank or a sentinel.
    pub fn normalize<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let value = raw.trim();
        (!value.is_empty() && !self.contains(value)).then_some(value)
    }
}

// ---------------------------------------------------------------------------
// Acceptance
// ---------------------------------------------------------------------------

/// Rule applied to a finished record before it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Keep every record that has an identity.
    IdentityOnly,
    /// Also require at least one non-identity field.
    IdentityAndDetail,
}

impl Acceptance {
    pub fn accepts(self, record: &AddressRecord) -> bool {
        match self {
            Acceptance::IdentityOnly => true,
            Acceptance::IdentityAndDetail => record.field_count() > 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Per-format normalization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProfile {
    /// Applied to every field value.
    pub sentinels: SentinelSet,
    /// Applied to the middle part of a composed name instead of `sentinels`.
    pub middle_sentinels: SentinelSet,
    pub acceptance: Acceptance,
}

impl FormatProfile {
    /// XML: no sentinels, identity required.
    pub fn markup() -> Self {
        Self {
            sentinels: SentinelSet::none(),
            middle_sentinels: SentinelSet::none(),
            acceptance: Acceptance::IdentityOnly,
        }
    }

    /// TSV: `N/A` everywhere, `N/M/N` for the middle name, identity plus detail required.
    pub fn tabular() -> Self {
        Self {
            sentinels: SentinelSet::new(["N/A"]),
            middle_sentinels: SentinelSet::new(["N/M/N"]),
            acceptance: Acceptance::IdentityAndDetail,
        }
    }

    /// Free text: no sentinels, identity required (a non-blank paragraph always has one).
    pub fn free_text() -> Self {
        Self {
            sentinels: SentinelSet::none(),
            middle_sentinels: SentinelSet::none(),
            acceptance: Acceptance::IdentityOnly,
        }
    }

    pub fn normalize<'a>(&self, raw: &'a str) -> Option<&'a str> {
        self.sentinels.normalize(raw)
    }

    /// Join name parts with single spaces.
    ///
    /// Blank parts are skipped; the middle part is also skipped when it is
    /// one of `middle_sentinels`. Returns `None` when nothing is left.
    pub fn compose_name(&self, first: &str, middle: Option<&str>, last: &str) -> Option<String> {
        let middle = middle.and_then(|m| self.middle_sentinels.normalize(m));
        let parts: Vec<&str> = [Some(first.trim()), middle, Some(last.trim())]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Accumulates normalised values for one record.
///
/// The first identity that survives normalization wins, so callers express
/// preference by call order. Later values for the same detail field replace
/// earlier ones only if they are present.
#[derive(Debug)]
pub struct RecordBuilder<'p> {
    profile: &'p FormatProfile,
    identity: Option<Identity>,
    street: Option<String>,
    city: Option<String>,
    county: Option<String>,
    state: Option<String>,
    zip: Option<String>,
}

impl<'p> RecordBuilder<'p> {
    pub fn new(profile: &'p FormatProfile) -> Self {
        Self {
            profile,
            identity: None,
            street: None,
            city: None,
            county: None,
            state: None,
            zip: None,
        }
    }

    pub fn name(&mut self, raw: Option<&str>) -> &mut Self {
        self.identity(raw, Identity::Name)
    }

    pub fn organization(&mut self, raw: Option<&str>) -> &mut Self {
        self.identity(raw, Identity::Organization)
    }

    fn identity(&mut self, raw: Option<&str>, make: fn(String) -> Identity) -> &mut Self {
        if self.identity.is_none() {
            self.identity = raw
                .and_then(|v| self.profile.normalize(v))
                .map(|v| make(v.to_owned()));
        }
        self
    }

    /// Set a non-identity field. Identity fields are routed to
    /// [`name`](Self::name) / [`organization`](Self::organization).
    pub fn field(&mut self, field: Field, raw: Option<&str>) -> &mut Self {
        let Some(value) = raw.and_then(|v| self.profile.normalize(v)) else {
            return self;
        };
        let value = value.to_owned();
        match field {
            Field::Name => return self.name(Some(value.as_str())),
            Field::Organization => return self.organization(Some(value.as_str())),
            Field::Street => self.street = Some(value),
            Field::City => self.city = Some(value),
            Field::County => self.county = Some(value),
            Field::State => self.state = Some(value),
            Field::Zip => self.zip = Some(value),
        }
        self
    }

    /// Produce the record, or `None` if it has no identity or the profile's
    /// acceptance rule rejects it.
    pub fn finish(self) -> Option<AddressRecord> {
        let record = AddressRecord {
            identity: self.identity?,
            street: self.street,
            city: self.city,
            county: self.county,
            state: self.state,
            zip: self.zip,
        };
        self.profile
            .acceptance
            .accepts(&record)
            .then_some(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
