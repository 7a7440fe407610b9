//! Zigbee adapter for the ESP32C6 PCIe switch
//!
//! The device sits between a PC's front-panel header and the motherboard. It
//! reports whether the PC is powered through a Binary Input cluster and
//! presses the power and reset buttons through timed On/Off commands on two
//! endpoints.

pub mod configure;
pub mod definition;
pub mod error;
pub mod from_zigbee;
pub mod options;
pub mod registry;
pub mod to_zigbee;

pub use definition::{
    definition, Definition, DefinitionMeta, POWER_ENDPOINT, POWER_ENDPOINT_ID, RESET_ENDPOINT,
    RESET_ENDPOINT_ID,
};
pub use error::AdapterError;
pub use from_zigbee::FromZigbee;
pub use options::AdapterOptions;
pub use registry::ConverterRegistry;
pub use to_zigbee::ToZigbee;
