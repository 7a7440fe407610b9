//! Outbound converters: user commands to cluster commands

use crate::error::AdapterError;
use crate::options::AdapterOptions;
use crate::{POWER_ENDPOINT, POWER_ENDPOINT_ID, RESET_ENDPOINT, RESET_ENDPOINT_ID};
use serde_json::{json, Value};
use zigbee_core::{
    ClusterCommand, CommandOptions, EndpointHandle, OnOffCommand, OnWithTimedOff, StateUpdate,
};

/// The only value the button actions advertise
pub const PRESS: &str = "press";

/// Button press: relay on for 0.2s, then off
pub const BUTTON_PULSE: OnWithTimedOff = OnWithTimedOff {
    control_bits: 0,
    on_time: 2,
    off_wait_time: 2,
};

/// Converters for commands going to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToZigbee {
    /// Press the PC power button
    PowerButton,
    /// Press the PC reset button
    ResetButton,
}

impl ToZigbee {
    /// Logical key the host routes to this converter
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::PowerButton => "Power",
            Self::ResetButton => "Reset",
        }
    }

    /// Name of the endpoint the command is sent to
    #[must_use]
    pub fn endpoint_name(&self) -> &'static str {
        match self {
            Self::PowerButton => POWER_ENDPOINT,
            Self::ResetButton => RESET_ENDPOINT,
        }
    }

    /// ID of the endpoint the command is sent to, also the suffix of the
    /// published state key
    #[must_use]
    pub fn endpoint_id(&self) -> u8 {
        match self {
            Self::PowerButton => POWER_ENDPOINT_ID,
            Self::ResetButton => RESET_ENDPOINT_ID,
        }
    }

    /// Press the button behind `endpoint` and return the optimistic state
    ///
    /// The requested value is not interpreted: every call sends the same
    /// timed pulse.
    pub async fn convert_set<E: EndpointHandle + ?Sized>(
        &self,
        endpoint: &E,
        value: &Value,
        options: &AdapterOptions,
    ) -> Result<StateUpdate, AdapterError> {
        if value.as_str() != Some(PRESS) {
            tracing::debug!(
                "{} received value {}, sending a press anyway",
                self.key(),
                value
            );
        }

        let command = ClusterCommand::OnOff(OnOffCommand::OnWithTimedOff(BUTTON_PULSE));
        let command_options = CommandOptions::from(options);

        tracing::info!(
            "Sending {} ({}) to endpoint {}",
            command.name(),
            self.key(),
            endpoint.id()
        );

        if let Err(e) = endpoint.command(command, &command_options).await {
            tracing::warn!("{} command to endpoint {} failed: {}", self.key(), endpoint.id(), e);
            return Err(e.into());
        }

        let mut state = StateUpdate::new();
        state.insert(format!("state_{}", self.endpoint_id()), json!({"state": "ON"}));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zigbee_core::testing::{FakeEndpoint, RecordedCall};
    use zigbee_core::DeviceError;

    fn pulse() -> ClusterCommand {
        ClusterCommand::OnOff(OnOffCommand::OnWithTimedOff(OnWithTimedOff {
            control_bits: 0,
            on_time: 2,
            off_wait_time: 2,
        }))
    }

    #[tokio::test]
    async fn test_power_ignores_requested_value() {
        let values = [
            json!("toggle"),
            json!("off"),
            json!("on"),
            json!("press"),
            json!("bogus"),
            json!(42),
        ];
        for value in values {
            let endpoint = FakeEndpoint::new(10);
            let state = ToZigbee::PowerButton
                .convert_set(&endpoint, &value, &AdapterOptions::default())
                .await
                .unwrap();

            assert_eq!(Value::Object(state), json!({"state_10": {"state": "ON"}}));
            assert_eq!(
                endpoint.calls(),
                vec![RecordedCall::Command {
                    endpoint: 10,
                    command: pulse(),
                    options: CommandOptions::default(),
                }]
            );
        }
    }

    #[tokio::test]
    async fn test_reset_targets_its_endpoint() {
        let endpoint = FakeEndpoint::new(11);
        let state = ToZigbee::ResetButton
            .convert_set(&endpoint, &json!("press"), &AdapterOptions::default())
            .await
            .unwrap();

        assert_eq!(Value::Object(state), json!({"state_11": {"state": "ON"}}));
        assert_eq!(endpoint.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_state_key_follows_the_button() {
        let endpoint = FakeEndpoint::new(11);
        let state = ToZigbee::PowerButton
            .convert_set(&endpoint, &json!("press"), &AdapterOptions::default())
            .await
            .unwrap();

        assert_eq!(Value::Object(state), json!({"state_10": {"state": "ON"}}));
    }

    #[tokio::test]
    async fn test_options_reach_the_command() {
        let endpoint = FakeEndpoint::new(10);
        let options = AdapterOptions {
            disable_default_response: true,
            manufacturer_code: Some(0x1234),
            timeout_ms: None,
        };
        ToZigbee::PowerButton
            .convert_set(&endpoint, &json!("press"), &options)
            .await
            .unwrap();

        let RecordedCall::Command { options: sent, .. } = &endpoint.calls()[0] else {
            panic!("expected a command");
        };
        assert!(sent.disable_default_response);
        assert_eq!(sent.manufacturer_code, Some(0x1234));
    }

    #[tokio::test]
    async fn test_command_failure_propagates() {
        let endpoint = FakeEndpoint::new(10).failing_with(DeviceError::Rejected { status: 0x81 });
        let result = ToZigbee::PowerButton
            .convert_set(&endpoint, &json!("press"), &AdapterOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(AdapterError::Device(DeviceError::Rejected { status: 0x81 }))
        ));
    }

    #[test]
    fn test_keys_and_endpoints() {
        assert_eq!(ToZigbee::PowerButton.key(), "Power");
        assert_eq!(ToZigbee::PowerButton.endpoint_name(), "power");
        assert_eq!(ToZigbee::PowerButton.endpoint_id(), 10);
        assert_eq!(ToZigbee::ResetButton.endpoint_id(), 11);
        assert_eq!(ToZigbee::ResetButton.key(), "Reset");
        assert_eq!(ToZigbee::ResetButton.endpoint_name(), "reset");
    }
}
