//! Light entity views
//!
//! Dimmable lights. The hub reports brightness as the node's raw status
//! (0-255); the last nonzero brightness is remembered so turning back on
//! restores the previous level instead of full brightness.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use ha_integration::Platform;

use crate::classifier::NodeClassification;
use crate::entity::{node_state_attributes, IsyEntity};
use crate::node::{CommandSink, Node};

/// A dimmable light backed by a device node.
pub struct IsyLight {
    node: Arc<Node>,
    commands: Arc<dyn CommandSink>,
    last_brightness: Option<i32>,
}

impl IsyLight {
    pub fn new(node: Arc<Node>, commands: Arc<dyn CommandSink>) -> Self {
        let last_brightness = node.status.value().filter(|value| *value != 0);
        Self {
            node,
            commands,
            last_brightness,
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self.node.status.value(), Some(value) if value != 0)
    }

    /// Current brightness; `None` while the hub has not reported.
    pub fn brightness(&self) -> Option<i32> {
        self.node.status.value()
    }

    /// Brightness to restore when turned on without an explicit level.
    pub fn last_brightness(&self) -> Option<i32> {
        self.last_brightness
    }

    /// Record a brightness update from the hub's event stream.
    pub fn handle_update(&mut self, value: i32) {
        if value != 0 {
            self.last_brightness = Some(value);
        }
    }

    pub fn turn_off(&mut self) {
        self.last_brightness = self.brightness().filter(|value| *value != 0);
        if !self.commands.turn_off(&self.node.address) {
            debug!("Unable to turn off light");
        }
    }

    pub fn turn_on(&self, brightness: Option<i32>) {
        let brightness = brightness.or(self.last_brightness);
        if !self.commands.turn_on(&self.node.address, brightness) {
            debug!("Unable to turn on light");
        }
    }

    pub fn state_attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = node_state_attributes(&self.node);
        if let Some(last_brightness) = self.last_brightness {
            attrs.insert("last_brightness".to_string(), last_brightness.to_string());
        }
        attrs
    }
}

impl IsyEntity for IsyLight {
    fn node(&self) -> &Node {
        &self.node
    }
}

/// The light entities for a classification pass.
pub fn setup_platform(
    nodes: &NodeClassification,
    commands: &Arc<dyn CommandSink>,
) -> Vec<IsyLight> {
    nodes
        .nodes(Platform::Light)
        .iter()
        .map(|node| IsyLight::new(Arc::clone(node), Arc::clone(commands)))
        .collect()
}
