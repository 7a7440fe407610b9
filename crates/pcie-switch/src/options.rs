//! Per-device options supplied by the host

use serde::{Deserialize, Serialize};
use std::time::Duration;
use zigbee_core::CommandOptions;

/// User-tunable options applied to outgoing commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Ask the device not to send a ZCL default response
    pub disable_default_response: bool,
    /// Manufacturer code for manufacturer-specific frames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_code: Option<u16>,
    /// Command timeout override in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl From<&AdapterOptions> for CommandOptions {
    fn from(options: &AdapterOptions) -> Self {
        Self {
            disable_default_response: options.disable_default_response,
            manufacturer_code: options.manufacturer_code,
            timeout: options.timeout_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_are_defaults() {
        let options: AdapterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AdapterOptions::default());
        assert_eq!(CommandOptions::from(&options), CommandOptions::default());
    }

    #[test]
    fn test_partial_options_keep_defaults() {
        let options: AdapterOptions = serde_json::from_str(r#"{"timeout_ms": 250}"#).unwrap();
        let command = CommandOptions::from(&options);
        assert!(!command.disable_default_response);
        assert_eq!(command.manufacturer_code, None);
        assert_eq!(command.timeout, Some(Duration::from_millis(250)));
    }
}
