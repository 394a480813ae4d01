//! Gateway configuration
//!
//! YAML-sourced configuration. Radio connection settings moved into the
//! config entry a while back; the YAML keys that used to hold them still
//! parse but warn.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

/// Baud rates the radios support.
pub const BAUD_RATES: [u32; 10] = [
    2400, 4800, 9600, 14400, 19200, 38400, 57600, 115200, 128000, 256000,
];

/// Supported radio module families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioType {
    Ezsp,
    Deconz,
    TiCc,
    Zigate,
    Xbee,
}

impl RadioType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RadioType::Ezsp => "ezsp",
            RadioType::Deconz => "deconz",
            RadioType::TiCc => "ti_cc",
            RadioType::Zigate => "zigate",
            RadioType::Xbee => "xbee",
        }
    }
}

/// Per-device overrides, keyed by IEEE address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZhaDeviceConfig {
    /// Force how the device is handled (e.g. "switch")
    #[serde(rename = "type")]
    pub device_type: Option<String>,
}

/// The gateway's YAML configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZhaConfig {
    /// Deprecated; lives in the config entry now
    pub usb_path: Option<String>,
    /// Deprecated; lives in the config entry now
    pub baudrate: Option<u32>,
    /// Deprecated; lives in the config entry now
    pub radio_type: Option<RadioType>,
    pub database_path: Option<String>,
    pub device_config: HashMap<String, ZhaDeviceConfig>,
    pub enable_quirks: bool,
    /// Passed through to the radio library untouched
    pub zigpy_config: Option<serde_json::Value>,
}

impl Default for ZhaConfig {
    fn default() -> Self {
        Self {
            usb_path: None,
            baudrate: None,
            radio_type: None,
            database_path: None,
            device_config: HashMap::new(),
            enable_quirks: true,
            zigpy_config: None,
        }
    }
}

impl ZhaConfig {
    /// Parse the integration's section of the host YAML config.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Deprecated keys present in this config.
    pub fn deprecated_options(&self) -> Vec<&'static str> {
        let mut deprecated = Vec::new();
        if self.usb_path.is_some() {
            deprecated.push("usb_path");
        }
        if self.baudrate.is_some() {
            deprecated.push("baudrate");
        }
        if self.radio_type.is_some() {
            deprecated.push("radio_type");
        }
        deprecated
    }

    /// Warn for every deprecated key still in use.
    pub fn warn_deprecated(&self) {
        for option in self.deprecated_options() {
            warn!(
                "The '{}' option is deprecated, configure the radio through the integration setup",
                option
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ZhaConfig::from_yaml("{}").unwrap();
        assert!(config.enable_quirks);
        assert!(config.device_config.is_empty());
        assert!(config.deprecated_options().is_empty());
    }

    #[test]
    fn test_device_config_type_override() {
        let config = ZhaConfig::from_yaml(
            "device_config:\n  \"00:0d:6f:00:0a:90:69:e7\":\n    type: switch\n",
        )
        .unwrap();
        let device = &config.device_config["00:0d:6f:00:0a:90:69:e7"];
        assert_eq!(device.device_type.as_deref(), Some("switch"));
    }

    #[test]
    fn test_deprecated_options_still_parse() {
        let config = ZhaConfig::from_yaml(
            "usb_path: /dev/ttyUSB0\nbaudrate: 115200\nradio_type: ezsp\nenable_quirks: false\n",
        )
        .unwrap();
        assert_eq!(config.usb_path.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.radio_type, Some(RadioType::Ezsp));
        assert!(!config.enable_quirks);
        assert_eq!(
            config.deprecated_options(),
            vec!["usb_path", "baudrate", "radio_type"]
        );
    }

    #[test]
    fn test_zigpy_passthrough() {
        let config =
            ZhaConfig::from_yaml("zigpy_config:\n  ota:\n    ikea_provider: true\n").unwrap();
        let zigpy = config.zigpy_config.unwrap();
        assert_eq!(zigpy["ota"]["ikea_provider"], serde_json::json!(true));
    }
}
