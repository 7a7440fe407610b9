//! In-memory device handles that record every call, for adapter tests

use crate::cluster::{Cluster, ClusterCommand};
use crate::device::{
    CommandOptions, CoordinatorEndpoint, DeviceError, DeviceHandle, EndpointHandle,
};
use crate::reporting::ReportingConfig;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A call made against a fake endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Command {
        endpoint: u8,
        command: ClusterCommand,
        options: CommandOptions,
    },
    Bind {
        endpoint: u8,
        cluster: Cluster,
        target: CoordinatorEndpoint,
    },
    ConfigureReporting {
        endpoint: u8,
        cluster: Cluster,
        items: Vec<ReportingConfig>,
    },
}

type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Endpoint that records calls and optionally fails them
#[derive(Debug)]
pub struct FakeEndpoint {
    id: u8,
    log: CallLog,
    failure: Option<DeviceError>,
    reporting_failure: Option<DeviceError>,
}

impl FakeEndpoint {
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self {
            id,
            log: CallLog::default(),
            failure: None,
            reporting_failure: None,
        }
    }

    /// Make every call fail with `error` (the call is still recorded)
    #[must_use]
    pub fn failing_with(mut self, error: DeviceError) -> Self {
        self.failure = Some(error);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Make only reporting configuration fail with `error`
    #[must_use]
    pub fn failing_reporting_with(mut self, error: DeviceError) -> Self {
        self.reporting_failure = Some(error);
        self
    }

    fn record(&self, call: RecordedCall) -> Result<(), DeviceError> {
        let failure = match call {
            RecordedCall::ConfigureReporting { .. } => {
                self.reporting_failure.as_ref().or(self.failure.as_ref())
            }
            _ => self.failure.as_ref(),
        };
        let result = failure.map_or(Ok(()), |error| Err(error.clone()));

        if let Ok(mut log) = self.log.lock() {
            log.push(call);
        }
        result
    }
}

#[async_trait]
impl EndpointHandle for FakeEndpoint {
    fn id(&self) -> u8 {
        self.id
    }

    async fn command(
        &self,
        command: ClusterCommand,
        options: &CommandOptions,
    ) -> Result<(), DeviceError> {
        self.record(RecordedCall::Command {
            endpoint: self.id,
            command,
            options: options.clone(),
        })
    }

    async fn bind(
        &self,
        cluster: Cluster,
        target: &CoordinatorEndpoint,
    ) -> Result<(), DeviceError> {
        self.record(RecordedCall::Bind {
            endpoint: self.id,
            cluster,
            target: *target,
        })
    }

    async fn configure_reporting(
        &self,
        cluster: Cluster,
        items: &[ReportingConfig],
    ) -> Result<(), DeviceError> {
        self.record(RecordedCall::ConfigureReporting {
            endpoint: self.id,
            cluster,
            items: items.to_vec(),
        })
    }
}

/// Device whose endpoints share one call log, so ordering across endpoints
/// is observable
#[derive(Debug)]
pub struct FakeDevice {
    ieee_address: [u8; 8],
    endpoints: Vec<FakeEndpoint>,
    log: CallLog,
}

impl FakeDevice {
    #[must_use]
    pub fn new(ieee_address: [u8; 8], endpoint_ids: &[u8]) -> Self {
        let log = CallLog::default();
        let endpoints = endpoint_ids
            .iter()
            .map(|&id| FakeEndpoint {
                id,
                log: Arc::clone(&log),
                failure: None,
                reporting_failure: None,
            })
            .collect();
        Self {
            ieee_address,
            endpoints,
            log,
        }
    }

    /// Make every call on every endpoint fail with `error`
    #[must_use]
    pub fn failing_with(mut self, error: DeviceError) -> Self {
        for endpoint in &mut self.endpoints {
            endpoint.failure = Some(error.clone());
        }
        self
    }

    /// Make only reporting configuration fail, on every endpoint
    #[must_use]
    pub fn failing_reporting_with(mut self, error: DeviceError) -> Self {
        for endpoint in &mut self.endpoints {
            endpoint.reporting_failure = Some(error.clone());
        }
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl DeviceHandle for FakeDevice {
    type Endpoint = FakeEndpoint;

    fn ieee_address(&self) -> [u8; 8] {
        self.ieee_address
    }

    fn endpoint(&self, id: u8) -> Option<&FakeEndpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}
