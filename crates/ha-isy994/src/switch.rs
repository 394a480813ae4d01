//! Switch entity views
//!
//! Plain on/off devices, hub scenes (which behave like switches: they can
//! turn off and report state) and status/actions switch programs.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error};

use ha_integration::Platform;

use crate::classifier::{NodeClassification, ProgramClassification};
use crate::entity::{node_state_attributes, program_state_attributes, IsyEntity};
use crate::node::{CommandSink, Node, ProgramNode, Protocol};

/// A switch backed by a device node or group.
pub struct IsySwitch {
    node: Arc<Node>,
    commands: Arc<dyn CommandSink>,
}

impl IsySwitch {
    pub fn new(node: Arc<Node>, commands: Arc<dyn CommandSink>) -> Self {
        Self { node, commands }
    }

    /// Whether the device is on; `None` while the hub has not reported.
    pub fn is_on(&self) -> Option<bool> {
        self.node.status.value().map(|value| value != 0)
    }

    pub fn turn_on(&self) {
        if !self.commands.turn_on(&self.node.address, None) {
            debug!("Unable to turn on switch");
        }
    }

    pub fn turn_off(&self) {
        if !self.commands.turn_off(&self.node.address) {
            debug!("Unable to turn off switch");
        }
    }

    /// Scene members get the hub's scene icon.
    pub fn icon(&self) -> Option<&'static str> {
        if self.node.protocol == Some(Protocol::Group) {
            return Some("mdi:google-circles-communities");
        }
        None
    }

    pub fn state_attributes(&self) -> BTreeMap<String, String> {
        node_state_attributes(&self.node)
    }
}

impl IsyEntity for IsySwitch {
    fn node(&self) -> &Node {
        &self.node
    }
}

/// A switch driven by a status/actions program pair.
pub struct IsySwitchProgram {
    name: String,
    status: Arc<ProgramNode>,
    actions: Arc<ProgramNode>,
    commands: Arc<dyn CommandSink>,
}

impl IsySwitchProgram {
    pub fn new(
        name: impl Into<String>,
        status: Arc<ProgramNode>,
        actions: Arc<ProgramNode>,
        commands: Arc<dyn CommandSink>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            actions,
            commands,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_id(&self) -> &str {
        &self.status.id
    }

    pub fn is_on(&self) -> bool {
        matches!(self.status.status.value(), Some(value) if value != 0)
    }

    /// Run the actions program's "then" branch.
    pub fn turn_on(&self) {
        if !self.commands.run_then(&self.actions.id) {
            error!("Unable to turn on switch");
        }
    }

    /// Run the actions program's "else" branch.
    pub fn turn_off(&self) {
        if !self.commands.run_else(&self.actions.id) {
            error!("Unable to turn off switch");
        }
    }

    pub fn icon(&self) -> &'static str {
        "mdi:script-text-outline"
    }

    pub fn state_attributes(&self) -> BTreeMap<String, String> {
        program_state_attributes(&self.status, Some(&self.actions))
    }
}

/// The switch entities for a classification pass: one per switch-bucket
/// node, one per switch program pair.
pub fn setup_platform(
    nodes: &NodeClassification,
    programs: &ProgramClassification,
    commands: &Arc<dyn CommandSink>,
) -> (Vec<IsySwitch>, Vec<IsySwitchProgram>) {
    let switches = nodes
        .nodes(Platform::Switch)
        .iter()
        .map(|node| IsySwitch::new(Arc::clone(node), Arc::clone(commands)))
        .collect();

    let program_switches = programs
        .entities(Platform::Switch)
        .iter()
        .filter_map(|def| {
            let actions = def.actions.as_ref()?;
            Some(IsySwitchProgram::new(
                def.name.clone(),
                Arc::clone(&def.status),
                Arc::clone(actions),
                Arc::clone(commands),
            ))
        })
        .collect();

    (switches, program_switches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl CommandSink for RecordingSink {
        fn turn_on(&self, address: &str, _level: Option<i32>) -> bool {
            self.calls.lock().unwrap().push(format!("on {address}"));
            !self.fail
        }

        fn turn_off(&self, address: &str) -> bool {
            self.calls.lock().unwrap().push(format!("off {address}"));
            !self.fail
        }

        fn run_then(&self, program_id: &str) -> bool {
            self.calls.lock().unwrap().push(format!("then {program_id}"));
            !self.fail
        }

        fn run_else(&self, program_id: &str) -> bool {
            self.calls.lock().unwrap().push(format!("else {program_id}"));
            !self.fail
        }
    }

    #[test]
    fn test_switch_state_and_commands() {
        let sink = Arc::new(RecordingSink::default());
        let node = Arc::new(Node::new("28 C1 F3 1", "Outlet").with_status(0));
        let switch = IsySwitch::new(node, sink.clone());

        assert_eq!(switch.is_on(), Some(false));
        assert_eq!(switch.icon(), None);
        switch.turn_on();
        assert_eq!(*sink.calls.lock().unwrap(), ["on 28 C1 F3 1"]);
    }

    #[test]
    fn test_unknown_status_is_neither_on_nor_off() {
        let sink: Arc<dyn CommandSink> = Arc::new(RecordingSink::default());
        let switch = IsySwitch::new(Arc::new(Node::new("1 2 3 1", "Outlet")), sink);
        assert_eq!(switch.is_on(), None);
    }

    #[test]
    fn test_group_gets_scene_icon() {
        let sink: Arc<dyn CommandSink> = Arc::new(RecordingSink::default());
        let node = Arc::new(Node::new("40867", "Evening Scene").with_protocol(Protocol::Group));
        let switch = IsySwitch::new(node, sink);
        assert_eq!(switch.icon(), Some("mdi:google-circles-communities"));
    }

    #[test]
    fn test_program_switch_runs_branches() {
        let sink = Arc::new(RecordingSink::default());
        let program = IsySwitchProgram::new(
            "Porch",
            Arc::new(ProgramNode::new("0001", "status").with_status(1)),
            Arc::new(ProgramNode::new("0002", "actions")),
            sink.clone(),
        );

        assert!(program.is_on());
        program.turn_on();
        program.turn_off();
        assert_eq!(*sink.calls.lock().unwrap(), ["then 0002", "else 0002"]);
    }
}
