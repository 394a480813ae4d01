//! Gateway setup glue
//!
//! Owns the per-platform buckets of entities discovered on the Zigbee
//! network and the coordinator's device info. The radio stack is external;
//! the gateway only drives it through [`RadioController`] and fans the
//! platform setups out concurrently.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::join_all;
use tracing::{info, warn};

use ha_integration::{ConfigEntry, Platform};

use crate::config::ZhaConfig;
use crate::PLATFORMS;

/// Device registry connection type for Zigbee radios.
pub const CONNECTION_ZIGBEE: &str = "zigbee";

/// Errors raised during gateway setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZhaError {
    /// The radio library failed to bring the network up
    #[error("Radio initialization failed: {0}")]
    RadioInit(String),
}

/// The radio application controller, provided by the radio library.
#[async_trait]
pub trait RadioController: Send + Sync {
    /// Bring the Zigbee network up.
    async fn initialize(&self) -> Result<(), ZhaError>;

    /// Coordinator IEEE address.
    fn ieee(&self) -> String;

    /// Human-readable radio description (e.g. "EZSP = Silicon Labs ...").
    fn radio_description(&self) -> String;

    /// Take the network down.
    async fn shutdown(&self);
}

/// An entity discovered on the network, staged until its platform loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEntity {
    pub unique_id: String,
    pub name: String,
    /// Device class hint (e.g. "motion", "opening")
    pub device_class: Option<String>,
}

/// Device info registered for the coordinator itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorInfo {
    pub config_entry_id: String,
    pub connections: Vec<(String, String)>,
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
}

/// Glue between the radio and the entity platforms.
pub struct ZhaGateway {
    controller: Arc<dyn RadioController>,
    config: ZhaConfig,
    coordinator: CoordinatorInfo,
    buckets: DashMap<Platform, Vec<DiscoveredEntity>>,
}

impl ZhaGateway {
    /// Initialize the radio and prepare empty platform buckets.
    pub async fn setup(
        entry: &ConfigEntry,
        config: ZhaConfig,
        controller: Arc<dyn RadioController>,
    ) -> Result<Self, ZhaError> {
        config.warn_deprecated();

        controller.initialize().await?;

        let buckets = DashMap::new();
        for platform in PLATFORMS {
            buckets.insert(platform, Vec::new());
        }

        let ieee = controller.ieee();
        let coordinator = CoordinatorInfo {
            config_entry_id: entry.entry_id.clone(),
            connections: vec![(CONNECTION_ZIGBEE.to_string(), ieee.clone())],
            identifiers: vec![(crate::DOMAIN.to_string(), ieee)],
            name: "Zigbee Coordinator".to_string(),
            manufacturer: "ZHA".to_string(),
            model: controller.radio_description(),
        };
        info!("Gateway initialized, radio: {}", coordinator.model);

        Ok(Self {
            controller,
            config,
            coordinator,
            buckets,
        })
    }

    pub fn coordinator(&self) -> &CoordinatorInfo {
        &self.coordinator
    }

    pub fn config(&self) -> &ZhaConfig {
        &self.config
    }

    /// Stage a discovered entity for its platform. Entities on platforms
    /// the gateway does not serve are dropped with a warning.
    pub fn stage_entity(&self, platform: Platform, entity: DiscoveredEntity) {
        match self.buckets.get_mut(&platform) {
            Some(mut bucket) => bucket.push(entity),
            None => warn!(
                "Dropping entity {} for unsupported platform {}",
                entity.unique_id, platform
            ),
        }
    }

    /// Hand a platform its staged entities. Entities are staged once per
    /// setup pass; taking them empties the bucket.
    pub fn take_entities(&self, platform: Platform) -> Vec<DiscoveredEntity> {
        self.buckets
            .get_mut(&platform)
            .map(|mut bucket| std::mem::take(&mut *bucket))
            .unwrap_or_default()
    }

    /// Run every platform's setup concurrently and return the platforms
    /// that loaded. A failing platform is logged and skipped, never fatal.
    pub async fn load_platforms<F, Fut, E>(&self, mut setup: F) -> Vec<Platform>
    where
        F: FnMut(Platform) -> Fut,
        Fut: std::future::Future<Output = Result<(), E>>,
        E: std::fmt::Display,
    {
        let tasks = PLATFORMS.map(|platform| {
            let task = setup(platform);
            async move { (platform, task.await) }
        });

        let mut loaded = Vec::new();
        for (platform, result) in join_all(tasks).await {
            match result {
                Ok(()) => loaded.push(platform),
                Err(err) => warn!("Couldn't setup zha platform: {err}"),
            }
        }
        loaded
    }

    /// Shut the radio down and discard staged entities.
    pub async fn shutdown(&self) {
        self.controller.shutdown().await;
        for platform in PLATFORMS {
            if let Some(mut bucket) = self.buckets.get_mut(&platform) {
                bucket.clear();
            }
        }
    }
}
