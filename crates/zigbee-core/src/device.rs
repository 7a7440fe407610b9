//! Host-side device handles
//!
//! The host runtime owns the radio, the network and the request queue. Device
//! adapters only see these traits: a device resolves endpoints, and an endpoint
//! accepts cluster commands, bindings and reporting configuration. Every call
//! resolves once the radio layer has acknowledged or rejected it.

use crate::cluster::{Cluster, ClusterCommand};
use crate::reporting::ReportingConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors reported by the host when a device call fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Device did not respond in time")]
    Timeout,

    #[error("Device rejected the request with ZCL status {status:#04x}")]
    Rejected { status: u8 },

    #[error("Device is unreachable")]
    Unreachable,

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Options attached to an outgoing cluster command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOptions {
    /// Ask the device not to send a ZCL default response
    #[serde(default)]
    pub disable_default_response: bool,
    /// Manufacturer code for manufacturer-specific frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_code: Option<u16>,
    /// Override of the host's request timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

/// The coordinator endpoint that bindings point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorEndpoint {
    /// IEEE address (EUI-64)
    pub ieee_address: [u8; 8],
    /// Endpoint ID (1-240)
    pub endpoint: u8,
}

/// One endpoint of a paired device
#[async_trait]
pub trait EndpointHandle: Send + Sync {
    /// Endpoint ID (1-240)
    fn id(&self) -> u8;

    /// Send a cluster-specific command
    async fn command(
        &self,
        command: ClusterCommand,
        options: &CommandOptions,
    ) -> Result<(), DeviceError>;

    /// Bind a cluster on this endpoint to the coordinator
    async fn bind(&self, cluster: Cluster, target: &CoordinatorEndpoint)
        -> Result<(), DeviceError>;

    /// Configure attribute reporting for a cluster on this endpoint
    async fn configure_reporting(
        &self,
        cluster: Cluster,
        items: &[ReportingConfig],
    ) -> Result<(), DeviceError>;
}

/// A paired device
pub trait DeviceHandle: Send + Sync {
    type Endpoint: EndpointHandle;

    /// IEEE address (EUI-64)
    fn ieee_address(&self) -> [u8; 8];

    /// Look up an endpoint by ID
    fn endpoint(&self, id: u8) -> Option<&Self::Endpoint>;

    /// Get IEEE address as hex string
    fn ieee_address_string(&self) -> String {
        self.ieee_address()
            .iter()
            .rev() // IEEE addresses are typically displayed in reverse byte order
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":")
    }
}
