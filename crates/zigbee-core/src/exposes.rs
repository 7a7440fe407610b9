//! Capability metadata published to the host's UI and automation layer

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Access flags of an exposed property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Access(u8);

impl Access {
    /// Published in the device state
    pub const STATE: Access = Access(0b001);
    /// Can be set by the user
    pub const SET: Access = Access(0b010);
    /// Can be read on demand
    pub const GET: Access = Access(0b100);

    #[must_use]
    pub fn bits(&self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn contains(&self, other: Access) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Shape of an exposed property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExposeKind {
    Binary { value_on: Value, value_off: Value },
    Enum { values: Vec<String> },
}

/// An exposed property of a device
#[derive(Debug, Clone, PartialEq)]
pub struct Expose {
    pub name: String,
    pub access: Access,
    pub kind: ExposeKind,
    pub description: String,
    /// Endpoint name the property lives on, for multi-endpoint devices
    pub endpoint: Option<String>,
}

/// Wire form of [`Expose`], with the derived state key
#[derive(Serialize)]
struct ExposeJson<'a> {
    name: &'a str,
    property: String,
    access: Access,
    #[serde(flatten)]
    kind: &'a ExposeKind,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<&'a str>,
}

impl Serialize for Expose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExposeJson {
            name: &self.name,
            property: self.property(),
            access: self.access,
            kind: &self.kind,
            description: &self.description,
            endpoint: self.endpoint.as_deref(),
        }
        .serialize(serializer)
    }
}

impl Expose {
    /// Key of the property in published state, suffixed with the endpoint
    /// name when there is one
    #[must_use]
    pub fn property(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}_{}", self.name, endpoint),
            None => self.name.clone(),
        }
    }
}
