use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One address record returned by the geocoding provider.
///
/// Only `formatted` is interpreted; every other field is kept verbatim and
/// handed to selection handlers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCandidate {
    #[serde(default)]
    pub formatted: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A WGS84 point as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl AddressCandidate {
    pub fn new(formatted: impl Into<String>) -> Self {
        Self {
            formatted: formatted.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper for attaching a provider field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn country(&self) -> Option<&str> {
        self.field("country").and_then(Value::as_str)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.field("lat").and_then(Value::as_f64)?;
        let lon = self.field("lon").and_then(Value::as_f64)?;
        Some(Coordinates { lat, lon })
    }
}

impl std::fmt::Display for AddressCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted)
    }
}
