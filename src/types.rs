use std::fmt;

/// VAT registration number, without the country prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// One lookup: a VAT number and the country that issued it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRequest {
    identifier: Identifier,
    country_code: String,
}

impl ValidationRequest {
    /// Builds a request; the country code is uppercased here.
    pub fn new(identifier: impl Into<Identifier>, country_code: &str) -> Self {
        Self {
            identifier: identifier.into(),
            country_code: country_code.trim().to_uppercase(),
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

/// Reply of the remote check, kept exactly as received.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult(pub serde_json::Value);

impl ValidationResult {
    /// Whether the service reported the number as valid. Missing flag reads as `false`.
    pub fn is_valid(&self) -> bool {
        self.0
            .get("valid")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Registered trader name, if the member state discloses it.
    pub fn name(&self) -> Option<&str> {
        self.disclosed("name")
    }

    /// Registered trader address, if the member state discloses it.
    pub fn address(&self) -> Option<&str> {
        self.disclosed("address")
    }

    pub fn request_date(&self) -> Option<&str> {
        self.text("requestDate")
    }

    pub fn country_code(&self) -> Option<&str> {
        self.text("countryCode")
    }

    pub fn vat_number(&self) -> Option<&str> {
        self.text("vatNumber")
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }

    // VIES answers "---" for fields a member state does not publish.
    fn disclosed(&self, key: &str) -> Option<&str> {
        self.text(key)
            .map(str::trim)
            .filter(|value| !value.is_empty() && *value != "---")
    }
}

/// Availability of one member state's backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryStatus {
    pub country_code: String,
    pub availability: String,
}

/// Service description loaded when a session is opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Whether the VIES-on-the-web front end itself is up.
    pub available: bool,
    pub countries: Vec<CountryStatus>,
}

impl ServiceStatus {
    /// Returns `Some(true)` when the member state reports `Available`,
    /// `None` when it is not listed at all.
    pub fn is_available(&self, country_code: &str) -> Option<bool> {
        self.countries
            .iter()
            .find(|country| country.country_code.eq_ignore_ascii_case(country_code))
            .map(|country| country.availability.eq_ignore_ascii_case("available"))
    }
}
