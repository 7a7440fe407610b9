//! Inbound converters: device reports to published state

use serde_json::Value;
use zigbee_core::{AttributeReport, Cluster, MessageType, StateUpdate};

/// Converters for messages coming from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromZigbee {
    /// Binary Input `presentValue` reports, published as `status`
    PowerStatus,
}

impl FromZigbee {
    /// Cluster and message type this converter handles
    #[must_use]
    pub fn selector(&self) -> (Cluster, MessageType) {
        match self {
            Self::PowerStatus => (Cluster::GenBinaryInput, MessageType::AttributeReport),
        }
    }

    #[must_use]
    pub fn matches(&self, report: &AttributeReport) -> bool {
        self.selector() == (report.cluster, report.message_type)
    }

    /// Convert a matching report into a state update
    #[must_use]
    pub fn convert(&self, report: &AttributeReport) -> StateUpdate {
        let mut state = StateUpdate::new();
        match self {
            Self::PowerStatus => {
                let present_value = report.attribute("presentValue");
                if present_value.is_none() {
                    tracing::debug!(
                        "Binary input report from endpoint {} has no presentValue",
                        report.endpoint
                    );
                }
                state.insert("status".to_string(), Value::Bool(equals_one(present_value)));
            }
        }
        state
    }
}

/// Loose `== 1` comparison: numeric one or boolean true
fn equals_one(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}
