//! Zigbee Home Automation gateway integration
//!
//! Glue between the Zigbee radio stack and the entity platforms: config
//! model (with deprecated-option warnings), config entry migration, and
//! the gateway that stages discovered entities per platform and fans
//! platform setup out concurrently. The radio itself lives behind
//! [`gateway::RadioController`].

pub mod config;
pub mod gateway;
pub mod migrate;

use ha_integration::Platform;

pub use config::{RadioType, ZhaConfig, ZhaDeviceConfig, BAUD_RATES};
pub use gateway::{CoordinatorInfo, DiscoveredEntity, RadioController, ZhaError, ZhaGateway};
pub use migrate::{migrate_entry, MigrationError};

pub const DOMAIN: &str = "zha";

/// Platforms the gateway loads entities for.
pub const PLATFORMS: [Platform; 6] = [
    Platform::BinarySensor,
    Platform::Fan,
    Platform::Light,
    Platform::Lock,
    Platform::Sensor,
    Platform::Switch,
];
