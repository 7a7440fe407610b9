//! Pairing-time configuration
//!
//! The PC power state is reported on the Binary Input cluster of the power
//! endpoint. Binding it and configuring reporting makes the device report
//! changes caused by the physical buttons too, not just by our commands.

use crate::error::AdapterError;
use crate::POWER_ENDPOINT_ID;
use zigbee_core::reporting::{self, ReportingInterval};
use zigbee_core::{Cluster, CoordinatorEndpoint, DeviceHandle};

/// Reporting bounds for the power status
pub const STATUS_REPORTING: ReportingInterval = ReportingInterval {
    min: 60,
    max: 3600,
    change: 0,
};

/// Bind the power status to the coordinator and configure its reporting
pub async fn configure<D: DeviceHandle + ?Sized>(
    device: &D,
    coordinator: &CoordinatorEndpoint,
) -> Result<(), AdapterError> {
    let endpoint = device
        .endpoint(POWER_ENDPOINT_ID)
        .ok_or_else(|| AdapterError::EndpointNotFound {
            name: crate::POWER_ENDPOINT.to_string(),
            id: POWER_ENDPOINT_ID,
        })?;

    tracing::info!("Configuring PCIe switch {}", device.ieee_address_string());

    reporting::bind(endpoint, coordinator, &[Cluster::GenBinaryInput]).await?;
    reporting::present_value(endpoint, STATUS_REPORTING).await?;

    Ok(())
}
