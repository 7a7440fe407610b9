//! Incoming ZCL messages as handed to device adapters

use crate::cluster::Cluster;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    AttributeReport,
    ReadResponse,
}

/// Normalized state published by the host, e.g. `{"status": true}`
pub type StateUpdate = Map<String, Value>;

/// A decoded attribute message from a device endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeReport {
    pub cluster: Cluster,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Source endpoint ID
    pub endpoint: u8,
    /// Attribute values keyed by attribute name (e.g. `presentValue`)
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Link quality indicator (0-255)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkquality: Option<u8>,
}

impl AttributeReport {
    /// Create an attribute report with no attributes
    #[must_use]
    pub fn new(cluster: Cluster, message_type: MessageType, endpoint: u8) -> Self {
        Self {
            cluster,
            message_type,
            endpoint,
            data: Map::new(),
            linkquality: None,
        }
    }

    /// Add an attribute value
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.data.insert(name.to_string(), value.into());
        self
    }

    /// Get an attribute value by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}
