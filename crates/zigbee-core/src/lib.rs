//! Zigbee abstraction layer for device adapters
//!
//! This crate provides the ZCL vocabulary, capability metadata and host-side
//! device traits that device adapters are written against.

pub mod cluster;
pub mod device;
pub mod exposes;
pub mod message;
pub mod reporting;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cluster::{Cluster, ClusterCommand, OnOffCommand, OnWithTimedOff};
pub use device::{CommandOptions, CoordinatorEndpoint, DeviceError, DeviceHandle, EndpointHandle};
pub use exposes::{Access, Expose, ExposeKind};
pub use message::{AttributeReport, MessageType, StateUpdate};
pub use reporting::{ReportingConfig, ReportingInterval};
