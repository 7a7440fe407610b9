//! Error types for the PCIe switch adapter

use thiserror::Error;
use zigbee_core::DeviceError;

/// Errors that can occur while converting or configuring
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Device call rejected or failed in the host
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// The device has no endpoint with the mapped ID
    #[error("Endpoint not found: {name} ({id})")]
    EndpointNotFound { name: String, id: u8 },

    /// No outbound converter handles this key
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    /// Definition references an endpoint name it does not map
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
}
