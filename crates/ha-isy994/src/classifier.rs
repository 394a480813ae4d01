//! Sorting helpers for device and program classification
//!
//! Sorts the flat node list the hub reports into per-platform buckets, and
//! pairs status/actions programs under the `HA.<platform>` folder convention
//! into program entity definitions. Pure computation over already-fetched
//! data; the caller owns the returned mappings.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use ha_integration::Platform;

use crate::filters::{
    node_filter, ISY_GROUP_PLATFORM, SUPPORTED_PLATFORMS, SUPPORTED_PROGRAM_PLATFORMS,
};
use crate::node::{Node, ProgramChild, ProgramFolder, ProgramNode, Protocol};

/// Folder child name holding an entity's state program.
pub const KEY_STATUS: &str = "status";
/// Folder child name holding an entity's command program.
pub const KEY_ACTIONS: &str = "actions";

// On/off uoms a sensor-flagged node may report and still be a binary
// sensor. Only trustworthy once the node is already known to be a sensor.
const BINARY_SENSOR_UOMS: &[&str] = &["2", "78"];
const BINARY_SENSOR_STATES: &[&str] = &["on", "off"];

/// Nodes sorted into platform buckets, in discovery order.
#[derive(Debug, Default)]
pub struct NodeClassification {
    buckets: IndexMap<Platform, Vec<Arc<Node>>>,
}

impl NodeClassification {
    fn new() -> Self {
        let mut buckets = IndexMap::new();
        for platform in SUPPORTED_PLATFORMS {
            buckets.insert(platform, Vec::new());
        }
        Self { buckets }
    }

    fn push(&mut self, platform: Platform, node: Arc<Node>) {
        self.buckets.entry(platform).or_default().push(node);
    }

    /// Nodes assigned to a platform, in discovery order.
    pub fn nodes(&self, platform: Platform) -> &[Arc<Node>] {
        self.buckets
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All buckets in platform priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, &[Arc<Node>])> {
        self.buckets
            .iter()
            .map(|(platform, nodes)| (*platform, nodes.as_slice()))
    }

    /// Total number of classified nodes.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A status/actions program pair driving one entity.
#[derive(Debug, Clone)]
pub struct ProgramEntityDef {
    /// Entity name, taken from the enclosing folder
    pub name: String,
    pub status: Arc<ProgramNode>,
    /// Absent for binary sensors, which have no command side
    pub actions: Option<Arc<ProgramNode>>,
}

/// Program entity definitions per platform.
#[derive(Debug, Default)]
pub struct ProgramClassification {
    buckets: IndexMap<Platform, Vec<ProgramEntityDef>>,
}

impl ProgramClassification {
    fn new() -> Self {
        let mut buckets = IndexMap::new();
        for platform in SUPPORTED_PROGRAM_PLATFORMS {
            buckets.insert(platform, Vec::new());
        }
        Self { buckets }
    }

    /// Program entities for a platform, in tree order.
    pub fn entities(&self, platform: Platform) -> &[ProgramEntityDef] {
        self.buckets
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Check the node's firmware v5 node definition id against platform
/// filters. Only present on v5+ firmware; the most reliable type signal.
fn check_for_node_def(
    classification: &mut NodeClassification,
    node: &Arc<Node>,
    single_platform: Option<Platform>,
) -> bool {
    let Some(node_def_id) = node.node_def_id.as_deref() else {
        // Pre-5.0 firmware most likely
        return false;
    };

    let platforms = single_platform
        .map(|p| vec![p])
        .unwrap_or_else(|| SUPPORTED_PLATFORMS.to_vec());
    for platform in platforms {
        if node_filter(platform).node_def_id.contains(&node_def_id) {
            classification.push(platform, Arc::clone(node));
            return true;
        }
    }

    false
}

/// Check the node's legacy Insteon type against platform prefix filters.
/// Works on every firmware version but only for Insteon devices; node
/// servers, Z-Wave and others have no type.
fn check_for_insteon_type(
    classification: &mut NodeClassification,
    node: &Arc<Node>,
    single_platform: Option<Platform>,
) -> bool {
    if node.protocol != Some(Protocol::Insteon) {
        return false;
    }
    let Some(device_type) = node.device_type.as_deref() else {
        return false;
    };

    let platforms = single_platform
        .map(|p| vec![p])
        .unwrap_or_else(|| SUPPORTED_PLATFORMS.to_vec());
    for platform in platforms {
        if node_filter(platform)
            .insteon_type
            .iter()
            .any(|prefix| device_type.starts_with(prefix))
        {
            // Special-case FanLinc, which carries a light module as its
            // first sub-node. v5 firmware does not need this; its NodeDefs
            // distinguish the two.
            if platform == Platform::Fan && node.address.ends_with('1') {
                classification.push(Platform::Light, Arc::clone(node));
                return true;
            }

            classification.push(platform, Arc::clone(node));
            return true;
        }
    }

    false
}

fn lowercase_uom(node: &Node) -> Option<HashSet<String>> {
    node.uom
        .as_ref()
        .map(|uom| uom.iter().map(|token| token.to_lowercase()).collect())
}

/// Check the node's uom ids against platform uom filters. Firmware that
/// reports uoms as single ids often implies the device type by id alone.
fn check_for_uom_id(
    classification: &mut NodeClassification,
    node: &Arc<Node>,
    single_platform: Option<Platform>,
    uom_list: Option<&[&str]>,
) -> bool {
    let Some(node_uom) = lowercase_uom(node) else {
        // Scenes have no uom
        return false;
    };

    if let (Some(platform), Some(uom_list)) = (single_platform, uom_list) {
        if uom_list.iter().any(|id| node_uom.contains(*id)) {
            classification.push(platform, Arc::clone(node));
            return true;
        }
        return false;
    }

    let platforms = single_platform
        .map(|p| vec![p])
        .unwrap_or_else(|| SUPPORTED_PLATFORMS.to_vec());
    for platform in platforms {
        if node_filter(platform)
            .uom
            .iter()
            .any(|id| node_uom.contains(*id))
        {
            classification.push(platform, Arc::clone(node));
            return true;
        }
    }

    false
}

/// Check whether the node's uom list is exactly a platform's state
/// vocabulary. Firmware that reports uoms as all possible human-readable
/// states passes when every state fits the filter.
fn check_for_states_in_uom(
    classification: &mut NodeClassification,
    node: &Arc<Node>,
    single_platform: Option<Platform>,
    states_list: Option<&[&str]>,
) -> bool {
    let Some(node_uom) = lowercase_uom(node) else {
        return false;
    };

    if let (Some(platform), Some(states)) = (single_platform, states_list) {
        let states: HashSet<String> = states.iter().map(|s| s.to_string()).collect();
        if node_uom == states {
            classification.push(platform, Arc::clone(node));
            return true;
        }
        return false;
    }

    let platforms = single_platform
        .map(|p| vec![p])
        .unwrap_or_else(|| SUPPORTED_PLATFORMS.to_vec());
    for platform in platforms {
        let states: HashSet<String> = node_filter(platform)
            .states
            .iter()
            .map(|s| s.to_string())
            .collect();
        if !states.is_empty() && node_uom == states {
            classification.push(platform, Arc::clone(node));
            return true;
        }
    }

    false
}

/// Decide whether a sensor-flagged node is actually a binary sensor.
///
/// The uom checks here run against a restricted on/off set rather than the
/// platform tables; they are only trustworthy once the node is already
/// known to be a sensor device.
fn is_sensor_a_binary_sensor(classification: &mut NodeClassification, node: &Arc<Node>) -> bool {
    if check_for_node_def(classification, node, Some(Platform::BinarySensor)) {
        return true;
    }
    if check_for_insteon_type(classification, node, Some(Platform::BinarySensor)) {
        return true;
    }
    if check_for_uom_id(
        classification,
        node,
        Some(Platform::BinarySensor),
        Some(BINARY_SENSOR_UOMS),
    ) {
        return true;
    }
    if check_for_states_in_uom(
        classification,
        node,
        Some(Platform::BinarySensor),
        Some(BINARY_SENSOR_STATES),
    ) {
        return true;
    }

    false
}

/// Sort hub nodes into their proper platforms.
///
/// Each `(path, node)` pair is handled independently: ignore-flagged nodes
/// are dropped, groups land on the switch platform, sensor-flagged nodes
/// go through the binary-sensor decision, and everything else walks the
/// matcher chain from most to least reliable. Unmatched nodes are logged
/// and left out; nothing here fails.
pub fn classify_nodes<I>(
    nodes: I,
    ignore_identifier: &str,
    sensor_identifier: &str,
) -> NodeClassification
where
    I: IntoIterator<Item = (String, Arc<Node>)>,
{
    let mut classification = NodeClassification::new();

    for (path, node) in nodes {
        if path.contains(ignore_identifier) || node.name.contains(ignore_identifier) {
            // Don't import this node as a device at all
            continue;
        }

        if node.protocol == Some(Protocol::Group) {
            classification.push(ISY_GROUP_PLATFORM, node);
            continue;
        }

        if path.contains(sensor_identifier) || node.name.contains(sensor_identifier) {
            // User has flagged this as a sensor; first decide whether it
            // should be a binary sensor.
            if !is_sensor_a_binary_sensor(&mut classification, &node) {
                classification.push(Platform::Sensor, node);
            }
            continue;
        }

        // Matcher order runs from most to least reliable across firmware
        // versions and device families.
        if check_for_node_def(&mut classification, &node, None) {
            continue;
        }
        if check_for_insteon_type(&mut classification, &node, None) {
            continue;
        }
        if check_for_uom_id(&mut classification, &node, None, None) {
            continue;
        }
        if check_for_states_in_uom(&mut classification, &node, None, None) {
            continue;
        }

        warn!(
            "Unsupported node: {}, type: {:?}",
            node.name, node.device_type
        );
    }

    classification
}

/// Pair status/actions programs into per-platform entity definitions.
///
/// For each program platform, the folder `HA.<platform>` is scanned for
/// entity folders. A folder must hold a `status` program; every platform
/// except binary sensor also needs an `actions` program. Misconfigured
/// folders are skipped with a warning.
pub fn classify_programs(programs: &ProgramFolder) -> ProgramClassification {
    let mut classification = ProgramClassification::new();

    for platform in SUPPORTED_PROGRAM_PLATFORMS {
        let folder_name = format!("HA.{platform}");
        let Some(folder) = programs
            .get_by_name(&folder_name)
            .and_then(ProgramChild::as_folder)
        else {
            continue;
        };

        for entity_folder in folder.folders() {
            let status = entity_folder
                .get_by_name(KEY_STATUS)
                .and_then(ProgramChild::as_program)
                .filter(|program| program.is_program());
            let Some(status) = status else {
                warn!(
                    "Program {} entity '{}' not loaded, invalid/missing status program",
                    platform, entity_folder.name
                );
                continue;
            };

            let mut actions = None;
            if platform != Platform::BinarySensor {
                actions = entity_folder
                    .get_by_name(KEY_ACTIONS)
                    .and_then(ProgramChild::as_program)
                    .filter(|program| program.is_program())
                    .cloned();
                if actions.is_none() {
                    warn!(
                        "Program {} entity '{}' not loaded, invalid/missing actions program",
                        platform, entity_folder.name
                    );
                    continue;
                }
            }

            let entry = ProgramEntityDef {
                name: entity_folder.name.clone(),
                status: Arc::clone(status),
                actions,
            };
            classification
                .buckets
                .entry(platform)
                .or_default()
                .push(entry);
        }
    }

    classification
}
