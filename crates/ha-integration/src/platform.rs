//! Entity platforms
//!
//! The platform (domain) an entity belongs to. Integrations sort discovered
//! devices into platform buckets; the host loads one entity provider per
//! platform from each bucket.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An entity platform served by the integrations in this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// On/off state reporting (motion, moisture, opening, ...)
    BinarySensor,
    /// Value/state reporting with a unit of measure
    Sensor,
    /// Lock/unlock devices
    Lock,
    /// Speed-controlled fans
    Fan,
    /// Position-controlled covers (blinds, garage doors)
    Cover,
    /// Dimmable and on/off lights
    Light,
    /// Plain on/off devices
    Switch,
}

impl Platform {
    /// The snake_case domain name, as used in entity ids and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::BinarySensor => "binary_sensor",
            Platform::Sensor => "sensor",
            Platform::Lock => "lock",
            Platform::Fan => "fan",
            Platform::Cover => "cover",
            Platform::Light => "light",
            Platform::Switch => "switch",
        }
    }

    /// Read-only platforms report state and take no commands.
    pub fn is_readonly(&self) -> bool {
        matches!(self, Platform::BinarySensor | Platform::Sensor)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown platform name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary_sensor" => Ok(Platform::BinarySensor),
            "sensor" => Ok(Platform::Sensor),
            "lock" => Ok(Platform::Lock),
            "fan" => Ok(Platform::Fan),
            "cover" => Ok(Platform::Cover),
            "light" => Ok(Platform::Light),
            "switch" => Ok(Platform::Switch),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}
