//! Binding and attribute reporting helpers used at pairing time

use crate::cluster::{binary_input_attrs, Cluster, DataType};
use crate::device::{CoordinatorEndpoint, DeviceError, EndpointHandle};
use serde::{Deserialize, Serialize};

/// One attribute record of a ZCL Configure Reporting request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingConfig {
    pub attribute_id: u16,
    pub data_type: DataType,
    /// Minimum reporting interval in seconds
    pub min_interval: u16,
    /// Maximum reporting interval in seconds
    pub max_interval: u16,
    /// Reportable change, only sent for analog data types
    pub reportable_change: u32,
}

impl ReportingConfig {
    /// Serialize to a ZCL attribute reporting configuration record
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::new();

        // Direction: attribute reports are sent by the server
        data.push(0x00);
        data.extend_from_slice(&self.attribute_id.to_le_bytes());
        data.push(self.data_type as u8);
        data.extend_from_slice(&self.min_interval.to_le_bytes());
        data.extend_from_slice(&self.max_interval.to_le_bytes());

        if self.data_type.is_analog() {
            let change = self.reportable_change.to_le_bytes();
            data.extend_from_slice(&change[..self.data_type.size()]);
        }

        data
    }
}

/// Reporting bounds in the host's shorthand form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingInterval {
    pub min: u16,
    pub max: u16,
    pub change: u32,
}

/// Bind each cluster on `endpoint` to the coordinator
pub async fn bind<E: EndpointHandle + ?Sized>(
    endpoint: &E,
    target: &CoordinatorEndpoint,
    clusters: &[Cluster],
) -> Result<(), DeviceError> {
    for cluster in clusters {
        tracing::info!(
            "Binding {} on endpoint {} to coordinator endpoint {}",
            cluster,
            endpoint.id(),
            target.endpoint
        );
        endpoint.bind(*cluster, target).await?;
    }
    Ok(())
}

/// Configure reporting of the Binary Input `presentValue` attribute
pub async fn present_value<E: EndpointHandle + ?Sized>(
    endpoint: &E,
    interval: ReportingInterval,
) -> Result<(), DeviceError> {
    let config = ReportingConfig {
        attribute_id: binary_input_attrs::PRESENT_VALUE,
        data_type: DataType::Boolean,
        min_interval: interval.min,
        max_interval: interval.max,
        reportable_change: interval.change,
    };

    tracing::info!(
        "Configuring presentValue reporting on endpoint {}: min={}s max={}s change={}",
        endpoint.id(),
        interval.min,
        interval.max,
        interval.change
    );

    endpoint
        .configure_reporting(Cluster::GenBinaryInput, &[config])
        .await
}
