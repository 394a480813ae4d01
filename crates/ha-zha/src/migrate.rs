//! Config entry migration
//!
//! Version 1 entries stored the radio connection as flat `radio_type` +
//! `usb_path` keys. Version 2 nests the serial settings under `device`,
//! carrying the YAML baudrate along where the radio honors it.

use serde_json::{json, Value};
use tracing::{debug, info};

use ha_integration::ConfigEntry;

use crate::config::{RadioType, ZhaConfig, BAUD_RATES};

/// Errors raised while migrating an entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("config entry is missing '{0}'")]
    MissingField(&'static str),
}

/// Bring an old config entry up to the current version. Entries already
/// at the current version pass through untouched.
pub fn migrate_entry(entry: &mut ConfigEntry, config: &ZhaConfig) -> Result<(), MigrationError> {
    debug!("Migrating from version {}", entry.version);

    if entry.version == 1 {
        let radio_type = entry
            .data
            .get("radio_type")
            .cloned()
            .ok_or(MigrationError::MissingField("radio_type"))?;
        let usb_path = entry
            .data
            .get("usb_path")
            .cloned()
            .ok_or(MigrationError::MissingField("usb_path"))?;

        let mut device = serde_json::Map::new();
        device.insert("path".to_string(), usb_path);

        // deconz radios ignore the configured baudrate
        if radio_type != json!(RadioType::Deconz.as_str()) {
            if let Some(baudrate) = config.baudrate.filter(|b| BAUD_RATES.contains(b)) {
                device.insert("baudrate".to_string(), json!(baudrate));
            }
        }

        entry.data = [
            ("radio_type".to_string(), radio_type),
            ("device".to_string(), Value::Object(device)),
        ]
        .into_iter()
        .collect();
        entry.version = 2;
    }

    info!("Migration to version {} successful", entry.version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_entry(radio_type: &str) -> ConfigEntry {
        ConfigEntry::new(crate::DOMAIN, "Zigbee Gateway")
            .with_data_value("radio_type", json!(radio_type))
            .with_data_value("usb_path", json!("/dev/ttyUSB1"))
    }

    #[test]
    fn test_migrate_v1_nests_device() {
        let mut entry = v1_entry("ezsp");
        let config = ZhaConfig {
            baudrate: Some(115200),
            ..ZhaConfig::default()
        };

        migrate_entry(&mut entry, &config).unwrap();

        assert_eq!(entry.version, 2);
        assert_eq!(entry.data["radio_type"], json!("ezsp"));
        assert_eq!(entry.data["device"]["path"], json!("/dev/ttyUSB1"));
        assert_eq!(entry.data["device"]["baudrate"], json!(115200));
        assert!(!entry.data.contains_key("usb_path"));
    }

    #[test]
    fn test_migrate_skips_baudrate_for_deconz() {
        let mut entry = v1_entry("deconz");
        let config = ZhaConfig {
            baudrate: Some(115200),
            ..ZhaConfig::default()
        };

        migrate_entry(&mut entry, &config).unwrap();

        assert!(entry.data["device"].get("baudrate").is_none());
    }

    #[test]
    fn test_migrate_skips_unknown_baudrate() {
        let mut entry = v1_entry("ezsp");
        let config = ZhaConfig {
            baudrate: Some(12345),
            ..ZhaConfig::default()
        };

        migrate_entry(&mut entry, &config).unwrap();

        assert!(entry.data["device"].get("baudrate").is_none());
    }

    #[test]
    fn test_migrate_is_idempotent_for_current_version() {
        let mut entry = v1_entry("ezsp");
        migrate_entry(&mut entry, &ZhaConfig::default()).unwrap();
        let data = entry.data.clone();

        migrate_entry(&mut entry, &ZhaConfig::default()).unwrap();
        assert_eq!(entry.version, 2);
        assert_eq!(entry.data, data);
    }

    #[test]
    fn test_migrate_missing_field() {
        let mut entry = ConfigEntry::new(crate::DOMAIN, "Zigbee Gateway")
            .with_data_value("radio_type", json!("ezsp"));
        let err = migrate_entry(&mut entry, &ZhaConfig::default()).unwrap_err();
        assert_eq!(err, MigrationError::MissingField("usb_path"));
    }
}
