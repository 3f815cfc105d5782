//! Test builders: ergonomic constructors for `AddressRecord` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They bypass normalization entirely.

use addrmerge::{AddressRecord, Identity};

/// Fluent builder for [`AddressRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordFixture::name("Jane Doe").zip("12345").build();
/// ```
pub struct RecordFixture(AddressRecord);

impl RecordFixture {
    pub fn name(name: &str) -> Self {
        Self(AddressRecord::new(Identity::Name(name.to_string())))
    }

    pub fn organization(org: &str) -> Self {
        Self(AddressRecord::new(Identity::Organization(org.to_string())))
    }

    pub fn street(mut self, v: &str) -> Self {
        self.0.street = Some(v.to_string());
        self
    }

    pub fn city(mut self, v: &str) -> Self {
        self.0.city = Some(v.to_string());
        self
    }

    pub fn county(mut self, v: &str) -> Self {
        self.0.county = Some(v.to_string());
        self
    }

    pub fn state(mut self, v: &str) -> Self {
        self.0.state = Some(v.to_string());
        self
    }

    pub fn zip(mut self, v: &str) -> Self {
        self.0.zip = Some(v.to_string());
        self
    }

    pub fn build(self) -> AddressRecord {
        self.0
    }
}
