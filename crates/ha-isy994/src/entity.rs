//! Shared entity behavior
//!
//! Attribute assembly used by the per-platform view-objects. Entities in
//! this crate are thin views over hub nodes; state changes and lifecycle
//! belong to the host framework.

use std::collections::BTreeMap;

use crate::node::{Node, NodeStatus, ProgramNode};

/// Friendly names for the hub's control codes. Unknown codes pass through
/// unchanged.
pub fn control_friendly_name(control: &str) -> &str {
    match control {
        "ST" => "status",
        "OL" => "on_level",
        "RR" => "ramp_rate",
        "BATLVL" => "battery_level",
        "CLIHUM" => "humidity",
        "CLITEMP" => "temperature",
        "CLISPH" => "heat_setpoint",
        "CLISPC" => "cool_setpoint",
        "CV" => "current_voltage",
        "ERR" => "device_communication_errors",
        other => other,
    }
}

/// Common accessors for entities wrapping a device node.
pub trait IsyEntity {
    fn node(&self) -> &Node;

    /// Stable identifier, the hub address.
    fn unique_id(&self) -> &str {
        &self.node().address
    }

    fn name(&self) -> &str {
        &self.node().name
    }

    /// Current raw value of the wrapped node.
    fn value(&self) -> NodeStatus {
        self.node().status
    }
}

/// State attributes for a node entity: auxiliary properties under their
/// friendly control names, plus the whole-scene flag for groups.
pub fn node_state_attributes(node: &Node) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for (control, property) in &node.aux_properties {
        let name = control_friendly_name(control).to_string();
        attrs.insert(name, property.formatted.to_lowercase());
    }
    if let Some(all_on) = node.group_all_on {
        let state = if all_on { "on" } else { "off" };
        attrs.insert("group_all_on".to_string(), state.to_string());
    }
    attrs
}

/// State attributes for a program entity: the actions program's run info
/// (when present) plus the status program's. Timestamps the hub never set
/// are omitted.
pub fn program_state_attributes(
    status: &ProgramNode,
    actions: Option<&ProgramNode>,
) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    if let Some(actions) = actions {
        attrs.insert("actions_enabled".to_string(), actions.enabled.to_string());
        if let Some(last_finished) = actions.last_finished {
            attrs.insert(
                "actions_last_finished".to_string(),
                last_finished.to_rfc3339(),
            );
        }
        if let Some(last_run) = actions.last_run {
            attrs.insert("actions_last_run".to_string(), last_run.to_rfc3339());
        }
        if let Some(last_update) = actions.last_update {
            attrs.insert("actions_last_update".to_string(), last_update.to_rfc3339());
        }
        attrs.insert("ran_else".to_string(), actions.ran_else.to_string());
        attrs.insert("ran_then".to_string(), actions.ran_then.to_string());
        attrs.insert(
            "run_at_startup".to_string(),
            actions.run_at_startup.to_string(),
        );
        attrs.insert("running".to_string(), actions.running.to_string());
    }
    attrs.insert("status_enabled".to_string(), status.enabled.to_string());
    if let Some(last_finished) = status.last_finished {
        attrs.insert(
            "status_last_finished".to_string(),
            last_finished.to_rfc3339(),
        );
    }
    if let Some(last_run) = status.last_run {
        attrs.insert("status_last_run".to_string(), last_run.to_rfc3339());
    }
    if let Some(last_update) = status.last_update {
        attrs.insert("status_last_update".to_string(), last_update.to_rfc3339());
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeProperty;

    #[test]
    fn test_node_attributes_use_friendly_names() {
        let node = Node::new("1 2 3 1", "Lamp")
            .with_aux_property(NodeProperty {
                control: "OL".to_string(),
                value: Some(255),
                formatted: "On".to_string(),
                uom: None,
                precision: 0,
            })
            .with_group_all_on(true);
        let attrs = node_state_attributes(&node);
        assert_eq!(attrs.get("on_level"), Some(&"on".to_string()));
        assert_eq!(attrs.get("group_all_on"), Some(&"on".to_string()));
    }

    #[test]
    fn test_program_attributes_skip_unset_timestamps() {
        let status = ProgramNode::new("0001", "status");
        let attrs = program_state_attributes(&status, None);
        assert_eq!(attrs.get("status_enabled"), Some(&"true".to_string()));
        assert!(!attrs.contains_key("status_last_run"));
        assert!(!attrs.contains_key("actions_enabled"));
    }

    #[test]
    fn test_program_attributes_include_actions_run_info() {
        use chrono::{TimeZone, Utc};

        let status = ProgramNode::new("0001", "status");
        let mut actions = ProgramNode::new("0002", "actions");
        actions.last_run = Some(Utc.with_ymd_and_hms(2020, 5, 4, 7, 30, 0).unwrap());
        actions.ran_then = 3;

        let attrs = program_state_attributes(&status, Some(&actions));
        assert_eq!(attrs.get("ran_then"), Some(&"3".to_string()));
        assert_eq!(
            attrs.get("actions_last_run"),
            Some(&"2020-05-04T07:30:00+00:00".to_string())
        );
    }
}
