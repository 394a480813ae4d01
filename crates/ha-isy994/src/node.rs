//! Hub node and program data model
//!
//! In-memory shape of what the controller reports. Presence of most
//! attributes varies by hub firmware version and device family, so every
//! hub-sourced attribute is optional; classification treats a missing
//! attribute as "does not match", never as an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Hub-internal family tag for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Insteon line protocol device
    Insteon,
    /// Logical group/scene
    Group,
    /// Hub program
    Program,
    /// Anything else the hub reports (Z-Wave, node servers, ...)
    Other,
}

/// Current status value of a node or program.
///
/// The hub reports an explicit "unknown" for nodes it has not heard from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Unknown,
    Value(i32),
}

impl NodeStatus {
    pub fn is_unknown(&self) -> bool {
        matches!(self, NodeStatus::Unknown)
    }

    /// The raw value, if known.
    pub fn value(&self) -> Option<i32> {
        match self {
            NodeStatus::Unknown => None,
            NodeStatus::Value(v) => Some(*v),
        }
    }
}

/// An auxiliary property reported alongside a node's main status.
#[derive(Debug, Clone)]
pub struct NodeProperty {
    /// Control code (e.g. "ST", "OL", "BATLVL")
    pub control: String,
    pub value: Option<i32>,
    /// Hub-formatted display value
    pub formatted: String,
    pub uom: Option<String>,
    pub precision: u8,
}

/// A device or sub-device reported by the hub.
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable identifier
    pub address: String,
    pub name: String,
    pub protocol: Option<Protocol>,
    /// Firmware v5+ type tag; the most reliable type signal when present
    pub node_def_id: Option<String>,
    /// Legacy dotted Insteon type string (e.g. "1.46.65.0")
    pub device_type: Option<String>,
    /// Unit-of-measure tokens; absent for scenes/groups
    pub uom: Option<Vec<String>>,
    pub status: NodeStatus,
    /// Decimal places implied by the raw status value
    pub precision: u8,
    /// Extra properties picked up from the hub, keyed by control code
    pub aux_properties: BTreeMap<String, NodeProperty>,
    /// Groups only: whether every member of the scene is on
    pub group_all_on: Option<bool>,
}

impl Node {
    /// Create a node with the attributes every firmware version reports.
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            protocol: None,
            node_def_id: None,
            device_type: None,
            uom: None,
            status: NodeStatus::Unknown,
            precision: 0,
            aux_properties: BTreeMap::new(),
            group_all_on: None,
        }
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn with_node_def_id(mut self, node_def_id: impl Into<String>) -> Self {
        self.node_def_id = Some(node_def_id.into());
        self
    }

    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    pub fn with_uom<I, S>(mut self, uom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uom = Some(uom.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_status(mut self, value: i32) -> Self {
        self.status = NodeStatus::Value(value);
        self
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_aux_property(mut self, property: NodeProperty) -> Self {
        self.aux_properties
            .insert(property.control.clone(), property);
        self
    }

    pub fn with_group_all_on(mut self, all_on: bool) -> Self {
        self.group_all_on = Some(all_on);
        self
    }
}

/// A program leaf in the hub's program tree.
#[derive(Debug, Clone)]
pub struct ProgramNode {
    /// Hub-assigned program id
    pub id: String,
    pub name: String,
    pub protocol: Option<Protocol>,
    pub enabled: bool,
    pub status: NodeStatus,
    pub last_run: Option<DateTime<Utc>>,
    pub last_finished: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
    pub ran_then: u32,
    pub ran_else: u32,
    pub run_at_startup: bool,
    pub running: bool,
}

impl ProgramNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            protocol: Some(Protocol::Program),
            enabled: true,
            status: NodeStatus::Unknown,
            last_run: None,
            last_finished: None,
            last_update: None,
            ran_then: 0,
            ran_else: 0,
            run_at_startup: false,
            running: false,
        }
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn with_status(mut self, value: i32) -> Self {
        self.status = NodeStatus::Value(value);
        self
    }

    /// True when the hub marks this entry as an actual program.
    pub fn is_program(&self) -> bool {
        self.protocol == Some(Protocol::Program)
    }
}

/// A child of a program folder: either a nested folder or a program leaf.
#[derive(Debug, Clone)]
pub enum ProgramChild {
    Folder(ProgramFolder),
    Program(Arc<ProgramNode>),
}

impl ProgramChild {
    pub fn name(&self) -> &str {
        match self {
            ProgramChild::Folder(folder) => &folder.name,
            ProgramChild::Program(program) => &program.name,
        }
    }

    pub fn as_folder(&self) -> Option<&ProgramFolder> {
        match self {
            ProgramChild::Folder(folder) => Some(folder),
            ProgramChild::Program(_) => None,
        }
    }

    pub fn as_program(&self) -> Option<&Arc<ProgramNode>> {
        match self {
            ProgramChild::Folder(_) => None,
            ProgramChild::Program(program) => Some(program),
        }
    }
}

/// A folder in the hub's program tree.
#[derive(Debug, Clone, Default)]
pub struct ProgramFolder {
    pub name: String,
    pub children: Vec<ProgramChild>,
}

impl ProgramFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_folder(mut self, folder: ProgramFolder) -> Self {
        self.children.push(ProgramChild::Folder(folder));
        self
    }

    pub fn with_program(mut self, program: ProgramNode) -> Self {
        self.children.push(ProgramChild::Program(Arc::new(program)));
        self
    }

    /// Look up a direct child by name.
    pub fn get_by_name(&self, name: &str) -> Option<&ProgramChild> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Direct child folders, in tree order.
    pub fn folders(&self) -> impl Iterator<Item = &ProgramFolder> {
        self.children.iter().filter_map(ProgramChild::as_folder)
    }
}

/// Command seam to the hub.
///
/// The wire protocol lives in the hub communication library; entities only
/// need a way to hand a command off. Returns false when the hub rejected
/// or failed to deliver the command.
pub trait CommandSink: Send + Sync {
    /// Turn a node on, optionally to a specific level.
    fn turn_on(&self, address: &str, level: Option<i32>) -> bool;

    /// Turn a node off.
    fn turn_off(&self, address: &str) -> bool;

    /// Run the "then" branch of a program.
    fn run_then(&self, program_id: &str) -> bool;

    /// Run the "else" branch of a program.
    fn run_else(&self, program_id: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults_are_absent() {
        let node = Node::new("12 34 56 1", "Office Light");
        assert_eq!(node.protocol, None);
        assert_eq!(node.node_def_id, None);
        assert_eq!(node.device_type, None);
        assert_eq!(node.uom, None);
        assert!(node.status.is_unknown());
    }

    #[test]
    fn test_node_builder() {
        let node = Node::new("12 34 56 1", "Office Light")
            .with_protocol(Protocol::Insteon)
            .with_device_type("1.46.65.0")
            .with_status(255);
        assert_eq!(node.protocol, Some(Protocol::Insteon));
        assert_eq!(node.status.value(), Some(255));
    }

    #[test]
    fn test_program_folder_lookup() {
        let folder = ProgramFolder::new("HA.switch")
            .with_folder(
                ProgramFolder::new("Porch").with_program(ProgramNode::new("0001", "status")),
            )
            .with_program(ProgramNode::new("0002", "stray"));

        let porch = folder.get_by_name("Porch").unwrap();
        assert!(porch.as_folder().is_some());
        assert!(porch.as_program().is_none());

        let status = porch
            .as_folder()
            .unwrap()
            .get_by_name("status")
            .and_then(ProgramChild::as_program)
            .unwrap();
        assert!(status.is_program());

        assert_eq!(folder.folders().count(), 1);
    }
}
