//! Sensor entity views
//!
//! Measurement sensors. The display state prefers the hub's enumerated
//! state vocabularies, then applies the node's precision to the raw value.

use std::sync::Arc;

use ha_integration::Platform;

use crate::classifier::NodeClassification;
use crate::entity::IsyEntity;
use crate::node::Node;
use crate::uom::{uom_friendly_name, uom_to_state};

/// A sensor backed by a device node.
pub struct IsySensor {
    node: Arc<Node>,
}

impl IsySensor {
    pub fn new(node: Arc<Node>) -> Self {
        Self { node }
    }

    // v4 firmware reports uoms as a list; the first token is the id.
    fn uom_id(&self) -> Option<&str> {
        self.node
            .uom
            .as_ref()
            .and_then(|uom| uom.first())
            .map(String::as_str)
    }

    /// Display unit for this sensor. Unknown ids pass through raw.
    pub fn unit_of_measurement(&self) -> Option<String> {
        let uom = self.uom_id()?;
        match uom_friendly_name(uom) {
            Some(unit) => Some(unit.to_string()),
            None => Some(uom.to_string()),
        }
    }

    /// Display state: enumerated uom states first, then the raw value with
    /// the node's precision applied.
    pub fn state(&self) -> String {
        let Some(value) = self.node.status.value() else {
            return "unknown".to_string();
        };
        let Some(uom) = self.uom_id() else {
            return "unknown".to_string();
        };

        if let Some(state) = uom_to_state(uom, value) {
            return state;
        }

        if self.node.precision != 0 {
            let shifted = f64::from(value) / 10f64.powi(i32::from(self.node.precision));
            return shifted.to_string();
        }

        value.to_string()
    }
}

impl IsyEntity for IsySensor {
    fn node(&self) -> &Node {
        &self.node
    }
}

/// The sensor entities for a classification pass.
pub fn setup_platform(nodes: &NodeClassification) -> Vec<IsySensor> {
    nodes
        .nodes(Platform::Sensor)
        .iter()
        .map(|node| IsySensor::new(Arc::clone(node)))
        .collect()
}
