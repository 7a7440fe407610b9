//! ZCL (Zigbee Cluster Library) definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common ZCL cluster IDs
pub mod id {
    // General Clusters
    pub const BASIC: u16 = 0x0000;
    pub const POWER_CONFIG: u16 = 0x0001;
    pub const IDENTIFY: u16 = 0x0003;
    pub const ON_OFF: u16 = 0x0006;
    pub const ANALOG_INPUT: u16 = 0x000C;
    pub const BINARY_INPUT: u16 = 0x000F;
    pub const BINARY_OUTPUT: u16 = 0x0010;
}

/// Binary Input (Basic) cluster attributes
pub mod binary_input_attrs {
    pub const PRESENT_VALUE: u16 = 0x0055;
}

/// A ZCL cluster, named the way the host's converters address it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Cluster {
    GenBasic,
    GenPowerCfg,
    GenIdentify,
    GenOnOff,
    GenAnalogInput,
    GenBinaryInput,
    GenBinaryOutput,
    /// Any cluster this crate has no name for
    Unknown(u16),
}

impl Cluster {
    /// Look up a cluster by its numeric ID
    #[must_use]
    pub fn from_id(cluster_id: u16) -> Self {
        match cluster_id {
            id::BASIC => Self::GenBasic,
            id::POWER_CONFIG => Self::GenPowerCfg,
            id::IDENTIFY => Self::GenIdentify,
            id::ON_OFF => Self::GenOnOff,
            id::ANALOG_INPUT => Self::GenAnalogInput,
            id::BINARY_INPUT => Self::GenBinaryInput,
            id::BINARY_OUTPUT => Self::GenBinaryOutput,
            other => Self::Unknown(other),
        }
    }

    /// Look up a cluster by its host-facing name (e.g. `genBinaryInput`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let cluster = match name {
            "genBasic" => Self::GenBasic,
            "genPowerCfg" => Self::GenPowerCfg,
            "genIdentify" => Self::GenIdentify,
            "genOnOff" => Self::GenOnOff,
            "genAnalogInput" => Self::GenAnalogInput,
            "genBinaryInput" => Self::GenBinaryInput,
            "genBinaryOutput" => Self::GenBinaryOutput,
            _ => return None,
        };
        Some(cluster)
    }

    #[must_use]
    pub fn id(&self) -> u16 {
        match self {
            Self::GenBasic => id::BASIC,
            Self::GenPowerCfg => id::POWER_CONFIG,
            Self::GenIdentify => id::IDENTIFY,
            Self::GenOnOff => id::ON_OFF,
            Self::GenAnalogInput => id::ANALOG_INPUT,
            Self::GenBinaryInput => id::BINARY_INPUT,
            Self::GenBinaryOutput => id::BINARY_OUTPUT,
            Self::Unknown(cluster_id) => *cluster_id,
        }
    }

    /// Host-facing name, `None` for unknown clusters
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::GenBasic => Some("genBasic"),
            Self::GenPowerCfg => Some("genPowerCfg"),
            Self::GenIdentify => Some("genIdentify"),
            Self::GenOnOff => Some("genOnOff"),
            Self::GenAnalogInput => Some("genAnalogInput"),
            Self::GenBinaryInput => Some("genBinaryInput"),
            Self::GenBinaryOutput => Some("genBinaryOutput"),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#06x}", self.id()),
        }
    }
}

impl From<Cluster> for String {
    fn from(cluster: Cluster) -> Self {
        cluster.to_string()
    }
}

impl TryFrom<String> for Cluster {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        if let Some(cluster) = Self::from_name(&value) {
            return Ok(cluster);
        }
        // Unknown clusters round-trip through their hex form
        let hex = value.trim_start_matches("0x");
        u16::from_str_radix(hex, 16)
            .map(Self::from_id)
            .map_err(|_| format!("Unknown cluster: {value}"))
    }
}

/// Payload of the On/Off cluster `onWithTimedOff` command
///
/// Times are in ZCL ticks of 1/10 second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnWithTimedOff {
    #[serde(rename = "ctrlbits")]
    pub control_bits: u8,
    #[serde(rename = "ontime")]
    pub on_time: u16,
    #[serde(rename = "offwaittime")]
    pub off_wait_time: u16,
}

impl OnWithTimedOff {
    /// Serialize to the ZCL command payload
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(5);
        data.push(self.control_bits);
        data.extend_from_slice(&self.on_time.to_le_bytes());
        data.extend_from_slice(&self.off_wait_time.to_le_bytes());
        data
    }
}

/// On/Off cluster commands sent by adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOffCommand {
    OnWithTimedOff(OnWithTimedOff),
}

impl OnOffCommand {
    #[must_use]
    pub fn command_id(&self) -> u8 {
        match self {
            Self::OnWithTimedOff(_) => 0x42,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnWithTimedOff(_) => "onWithTimedOff",
        }
    }

    #[must_use]
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::OnWithTimedOff(payload) => payload.serialize(),
        }
    }
}

/// A cluster-specific command addressed to an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterCommand {
    OnOff(OnOffCommand),
}

impl ClusterCommand {
    #[must_use]
    pub fn cluster(&self) -> Cluster {
        match self {
            Self::OnOff(_) => Cluster::GenOnOff,
        }
    }

    #[must_use]
    pub fn command_id(&self) -> u8 {
        match self {
            Self::OnOff(cmd) => cmd.command_id(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnOff(cmd) => cmd.name(),
        }
    }

    /// ZCL payload bytes (without the frame header)
    #[must_use]
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::OnOff(cmd) => cmd.payload(),
        }
    }
}

/// ZCL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    NoData = 0x00,
    Boolean = 0x10,
    Bitmap8 = 0x18,
    Uint8 = 0x20,
    Uint16 = 0x21,
    Uint32 = 0x23,
    Int8 = 0x28,
    Int16 = 0x29,
    Int32 = 0x2B,
    Enum8 = 0x30,
    Float32 = 0x39,
    String = 0x42,
}

impl DataType {
    /// Analog types carry a reportable change in reporting configuration,
    /// discrete types do not.
    #[must_use]
    pub fn is_analog(&self) -> bool {
        matches!(
            self,
            Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Float32
        )
    }

    /// Width in bytes of a fixed-size value of this type
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::NoData | Self::String => 0,
            Self::Boolean | Self::Bitmap8 | Self::Uint8 | Self::Int8 | Self::Enum8 => 1,
            Self::Uint16 | Self::Int16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 => 4,
        }
    }
}
