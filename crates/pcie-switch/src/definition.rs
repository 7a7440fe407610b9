//! Device definition: identity, endpoints, converters and exposes

use crate::configure;
use crate::error::AdapterError;
use crate::from_zigbee::FromZigbee;
use crate::options::AdapterOptions;
use crate::to_zigbee::{ToZigbee, PRESS};
use serde_json::Value;
use zigbee_core::{
    Access, AttributeReport, CoordinatorEndpoint, DeviceHandle, Expose, ExposeKind, StateUpdate,
};

pub const POWER_ENDPOINT: &str = "power";
pub const POWER_ENDPOINT_ID: u8 = 10;
pub const RESET_ENDPOINT: &str = "reset";
pub const RESET_ENDPOINT_ID: u8 = 11;

/// Definition-level flags read by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionMeta {
    /// State keys are suffixed with the endpoint
    pub multi_endpoint: bool,
}

/// Everything the host needs to drive one device model
#[derive(Debug, Clone)]
pub struct Definition {
    /// Model identifiers reported by the Basic cluster
    pub zigbee_model: Vec<&'static str>,
    pub model: &'static str,
    pub vendor: &'static str,
    pub description: &'static str,
    pub meta: DefinitionMeta,
    /// Endpoint name to endpoint ID
    pub endpoints: Vec<(&'static str, u8)>,
    pub from_zigbee: Vec<FromZigbee>,
    pub to_zigbee: Vec<ToZigbee>,
    pub exposes: Vec<Expose>,
}

/// Build the ESP32C6 PCIe switch definition
#[must_use]
pub fn definition() -> Definition {
    Definition {
        zigbee_model: vec!["ESP32C6.PCIE-switch"],
        model: "ESP32C6.PCIE-switch",
        vendor: "Custom devices (DiY)",
        description: "PCIE switch",
        meta: DefinitionMeta {
            multi_endpoint: true,
        },
        endpoints: vec![
            (POWER_ENDPOINT, POWER_ENDPOINT_ID),
            (RESET_ENDPOINT, RESET_ENDPOINT_ID),
        ],
        from_zigbee: vec![FromZigbee::PowerStatus],
        to_zigbee: vec![ToZigbee::PowerButton, ToZigbee::ResetButton],
        exposes: vec![
            Expose {
                name: "status".to_string(),
                access: Access::STATE,
                kind: ExposeKind::Binary {
                    value_on: Value::Bool(true),
                    value_off: Value::Bool(false),
                },
                description: "Indicates if the PC is powered on (= true) or off (= false)"
                    .to_string(),
                endpoint: None,
            },
            button("Power", "Power button", POWER_ENDPOINT),
            button("Reset", "Reset button", RESET_ENDPOINT),
        ],
    }
}

fn button(name: &str, description: &str, endpoint: &str) -> Expose {
    Expose {
        name: name.to_string(),
        access: Access::SET,
        kind: ExposeKind::Enum {
            values: vec![PRESS.to_string()],
        },
        description: description.to_string(),
        endpoint: Some(endpoint.to_string()),
    }
}

impl Definition {
    /// Look up an endpoint ID by name
    #[must_use]
    pub fn endpoint_id(&self, name: &str) -> Option<u8> {
        self.endpoints
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, id)| *id)
    }

    /// Look up an endpoint name by ID
    #[must_use]
    pub fn endpoint_name(&self, id: u8) -> Option<&'static str> {
        self.endpoints
            .iter()
            .find(|(_, i)| *i == id)
            .map(|(n, _)| *n)
    }

    /// Check that every endpoint name used by the definition is mapped
    #[allow(clippy::missing_errors_doc)]
    pub fn validate(&self) -> Result<(), AdapterError> {
        for expose in &self.exposes {
            if let Some(name) = expose.endpoint.as_deref() {
                self.require_endpoint(name)?;
            }
        }

        for converter in &self.to_zigbee {
            let name = converter.endpoint_name();
            if self.require_endpoint(name)? != converter.endpoint_id() {
                return Err(AdapterError::InvalidDefinition(format!(
                    "{}: {} expects '{}' on endpoint {}",
                    self.model,
                    converter.key(),
                    name,
                    converter.endpoint_id()
                )));
            }
        }

        if self.endpoint_id(POWER_ENDPOINT) != Some(POWER_ENDPOINT_ID) {
            return Err(AdapterError::InvalidDefinition(format!(
                "{}: configure needs '{}' on endpoint {}",
                self.model, POWER_ENDPOINT, POWER_ENDPOINT_ID
            )));
        }

        Ok(())
    }

    fn require_endpoint(&self, name: &str) -> Result<u8, AdapterError> {
        self.endpoint_id(name).ok_or_else(|| {
            AdapterError::InvalidDefinition(format!(
                "{}: endpoint '{}' is not mapped",
                self.model, name
            ))
        })
    }

    /// Run every inbound converter matching `report` and merge their state
    ///
    /// Returns `None` when no converter handles the report.
    #[must_use]
    pub fn convert_report(&self, report: &AttributeReport) -> Option<StateUpdate> {
        let mut matched = self
            .from_zigbee
            .iter()
            .filter(|converter| converter.matches(report))
            .peekable();
        matched.peek()?;

        let mut state = StateUpdate::new();
        for converter in matched {
            state.extend(converter.convert(report));
        }
        tracing::debug!(
            "Converted {} report from endpoint {}: {:?}",
            report.cluster,
            report.endpoint,
            state
        );
        Some(state)
    }

    /// Route a user command to its outbound converter
    pub async fn convert_set<D: DeviceHandle + ?Sized>(
        &self,
        device: &D,
        key: &str,
        value: &Value,
        options: &AdapterOptions,
    ) -> Result<StateUpdate, AdapterError> {
        let converter = self
            .to_zigbee
            .iter()
            .find(|converter| converter.key() == key)
            .ok_or_else(|| AdapterError::UnsupportedKey(key.to_string()))?;

        let name = converter.endpoint_name();
        let id = self.require_endpoint(name)?;
        let endpoint = device
            .endpoint(id)
            .ok_or_else(|| AdapterError::EndpointNotFound {
                name: name.to_string(),
                id,
            })?;

        converter.convert_set(endpoint, value, options).await
    }

    /// Pairing-time configuration
    pub async fn configure<D: DeviceHandle + ?Sized>(
        &self,
        device: &D,
        coordinator: &CoordinatorEndpoint,
    ) -> Result<(), AdapterError> {
        configure::configure(device, coordinator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zigbee_core::testing::{FakeDevice, RecordedCall};
    use zigbee_core::{Cluster, ClusterCommand, MessageType, OnOffCommand};

    const IEEE: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn test_identity() {
        let def = definition();
        assert_eq!(def.zigbee_model, vec!["ESP32C6.PCIE-switch"]);
        assert_eq!(def.model, "ESP32C6.PCIE-switch");
        assert_eq!(def.vendor, "Custom devices (DiY)");
        assert!(def.meta.multi_endpoint);
        assert_eq!(def.endpoint_id("power"), Some(10));
        assert_eq!(def.endpoint_id("reset"), Some(11));
        assert_eq!(def.endpoint_name(11), Some("reset"));
        assert_eq!(def.endpoint_id("status"), None);
    }

    #[test]
    fn test_exposes() {
        let def = definition();
        let summary: Vec<_> = def
            .exposes
            .iter()
            .map(|e| (e.name.as_str(), e.access, e.endpoint.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("status", Access::STATE, None),
                ("Power", Access::SET, Some("power")),
                ("Reset", Access::SET, Some("reset")),
            ]
        );

        for expose in &def.exposes[1..] {
            assert_eq!(
                expose.kind,
                ExposeKind::Enum {
                    values: vec!["press".to_string()]
                }
            );
        }
        assert!(def.validate().is_ok());

        let properties: Vec<Value> = def
            .exposes
            .iter()
            .map(|e| serde_json::to_value(e).unwrap()["property"].clone())
            .collect();
        assert_eq!(
            properties,
            vec![json!("status"), json!("Power_power"), json!("Reset_reset")]
        );
    }

    #[test]
    fn test_unmapped_endpoint_is_invalid() {
        let mut def = definition();
        def.endpoints.retain(|(name, _)| *name != "reset");
        assert!(matches!(
            def.validate(),
            Err(AdapterError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_remapped_button_endpoint_is_invalid() {
        let mut def = definition();
        def.endpoints = vec![(POWER_ENDPOINT, POWER_ENDPOINT_ID), (RESET_ENDPOINT, 12)];
        assert!(matches!(
            def.validate(),
            Err(AdapterError::InvalidDefinition(msg)) if msg.contains("Reset")
        ));
    }

    #[test]
    fn test_exposed_endpoint_must_be_mapped() {
        let mut def = definition();
        def.exposes[1].endpoint = Some("front_panel".to_string());
        assert!(matches!(
            def.validate(),
            Err(AdapterError::InvalidDefinition(msg)) if msg.contains("front_panel")
        ));
    }

    #[test]
    fn test_convert_report() {
        let def = definition();
        let report = AttributeReport::new(Cluster::GenBinaryInput, MessageType::AttributeReport, 10)
            .with_attribute("presentValue", 1);
        assert_eq!(
            def.convert_report(&report).map(Value::Object),
            Some(json!({"status": true}))
        );

        let unhandled = AttributeReport::new(Cluster::GenOnOff, MessageType::AttributeReport, 10)
            .with_attribute("onOff", 1);
        assert_eq!(def.convert_report(&unhandled), None);
    }

    #[tokio::test]
    async fn test_convert_set_routes_by_key() {
        let def = definition();
        let device = FakeDevice::new(IEEE, &[10, 11]);

        let power = def
            .convert_set(&device, "Power", &json!("press"), &AdapterOptions::default())
            .await
            .unwrap();
        let reset = def
            .convert_set(&device, "Reset", &json!("press"), &AdapterOptions::default())
            .await
            .unwrap();

        assert_eq!(Value::Object(power), json!({"state_10": {"state": "ON"}}));
        assert_eq!(Value::Object(reset), json!({"state_11": {"state": "ON"}}));

        let endpoints: Vec<u8> = device
            .calls()
            .iter()
            .map(|call| match call {
                RecordedCall::Command {
                    endpoint,
                    command: ClusterCommand::OnOff(OnOffCommand::OnWithTimedOff(_)),
                    ..
                } => *endpoint,
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(endpoints, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_convert_set_unknown_key() {
        let def = definition();
        let device = FakeDevice::new(IEEE, &[10, 11]);
        let result = def
            .convert_set(&device, "state", &json!("ON"), &AdapterOptions::default())
            .await;

        assert!(matches!(result, Err(AdapterError::UnsupportedKey(key)) if key == "state"));
        assert!(device.calls().is_empty());
    }

    #[tokio::test]
    async fn test_convert_set_missing_endpoint() {
        let def = definition();
        let device = FakeDevice::new(IEEE, &[10]);
        let result = def
            .convert_set(&device, "Reset", &json!("press"), &AdapterOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(AdapterError::EndpointNotFound { id: 11, .. })
        ));
    }

    #[tokio::test]
    async fn test_configure_through_definition() {
        let def = definition();
        let device = FakeDevice::new(IEEE, &[10, 11]);
        let coordinator = CoordinatorEndpoint {
            ieee_address: [0u8; 8],
            endpoint: 1,
        };
        def.configure(&device, &coordinator).await.unwrap();

        let calls = device.calls();
        assert!(matches!(calls[0], RecordedCall::Bind { endpoint: 10, .. }));
        assert!(matches!(
            calls[1],
            RecordedCall::ConfigureReporting { endpoint: 10, .. }
        ));
    }
}
