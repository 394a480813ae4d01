//! Per-platform node filter tables
//!
//! Four independent matchers per platform, checked in reliability order by
//! the classifier: firmware v5 node definition ids, legacy Insteon type
//! prefixes, unit-of-measure ids, and full state vocabularies. The values
//! here match exact hub API responses, not host-framework state names.

use ha_integration::Platform;

/// Platforms this integration can sort device nodes into, in match
/// priority order.
pub const SUPPORTED_PLATFORMS: [Platform; 7] = [
    Platform::BinarySensor,
    Platform::Sensor,
    Platform::Lock,
    Platform::Fan,
    Platform::Cover,
    Platform::Light,
    Platform::Switch,
];

/// Platforms that can be driven by status/actions program pairs.
pub const SUPPORTED_PROGRAM_PLATFORMS: [Platform; 5] = [
    Platform::BinarySensor,
    Platform::Lock,
    Platform::Fan,
    Platform::Cover,
    Platform::Switch,
];

/// Hub scenes act like switches (they can turn off and report state), so
/// group nodes land on the switch platform.
pub const ISY_GROUP_PLATFORM: Platform = Platform::Switch;

/// Matcher sets for one platform.
#[derive(Debug, Clone, Copy)]
pub struct NodeFilter {
    /// Accepted unit-of-measure ids
    pub uom: &'static [&'static str],
    /// Accepted full state vocabularies (exact set match)
    pub states: &'static [&'static str],
    /// Accepted firmware v5 node definition ids
    pub node_def_id: &'static [&'static str],
    /// Accepted Insteon type prefixes (startswith match; include the dot)
    pub insteon_type: &'static [&'static str],
}

const BINARY_SENSOR_FILTER: NodeFilter = NodeFilter {
    uom: &[],
    states: &[],
    node_def_id: &[
        "BinaryAlarm",
        "BinaryAlarm_ADV",
        "BinaryControl",
        "BinaryControl_ADV",
        "EZIO2x4_Input",
        "EZRAIN_Input",
        "OnOffControl",
        "OnOffControl_ADV",
    ],
    insteon_type: &["7.0.", "7.13.", "16."],
};

// Most uom ids between 1 and 100 are measurement units; the gaps are ids
// claimed by other platforms (11 lock, 2/78 switch, 51 light, ...).
const SENSOR_FILTER: NodeFilter = NodeFilter {
    uom: &[
        "1", "3", "4", "5", "6", "7", "8", "9", "10", "12", "13", "14", "15", "16", "17", "18",
        "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31", "32", "33",
        "34", "35", "36", "37", "38", "39", "40", "41", "42", "43", "44", "45", "46", "47", "48",
        "49", "50", "52", "53", "54", "55", "56", "57", "58", "59", "60", "61", "62", "63", "64",
        "65", "69", "70", "71", "72", "73", "74", "75", "76", "77", "79", "82", "83", "84", "85",
        "86", "87", "88", "89", "90", "91", "92", "93", "94", "95", "96",
    ],
    states: &[],
    node_def_id: &["IMETER_SOLO", "EZIO2x4_Input_ADV"],
    insteon_type: &["9.0.", "9.7."],
};

const LOCK_FILTER: NodeFilter = NodeFilter {
    uom: &["11"],
    states: &["locked", "unlocked"],
    node_def_id: &["DoorLock"],
    insteon_type: &["15.", "4.64."],
};

const FAN_FILTER: NodeFilter = NodeFilter {
    uom: &[],
    states: &["off", "low", "med", "high"],
    node_def_id: &["FanLincMotor"],
    insteon_type: &["1.46."],
};

const COVER_FILTER: NodeFilter = NodeFilter {
    uom: &["97"],
    states: &["open", "closed", "closing", "opening", "stopped"],
    node_def_id: &[],
    insteon_type: &[],
};

const LIGHT_FILTER: NodeFilter = NodeFilter {
    uom: &["51"],
    states: &["on", "off", "%"],
    node_def_id: &[
        "BallastRelayLampSwitch",
        "BallastRelayLampSwitch_ADV",
        "DimmerLampOnly",
        "DimmerLampSwitch",
        "DimmerLampSwitch_ADV",
        "DimmerSwitchOnly",
        "DimmerSwitchOnly_ADV",
        "KeypadDimmer",
        "KeypadDimmer_ADV",
    ],
    insteon_type: &["1."],
};

const SWITCH_FILTER: NodeFilter = NodeFilter {
    uom: &["2", "78"],
    states: &["on", "off"],
    node_def_id: &[
        "AlertModuleArmed",
        "AlertModuleSiren",
        "AlertModuleSiren_ADV",
        "EZIO2x4_Output",
        "EZRAIN_Output",
        "KeypadButton",
        "KeypadButton_ADV",
        "KeypadRelay",
        "KeypadRelay_ADV",
        "RelayLampOnly",
        "RelayLampOnly_ADV",
        "RelayLampSwitch",
        "RelayLampSwitch_ADV",
        "RelaySwitchOnlyPlusQuery",
        "RelaySwitchOnlyPlusQuery_ADV",
        "RemoteLinc2",
        "RemoteLinc2_ADV",
        "Siren",
        "Siren_ADV",
        "X10",
    ],
    insteon_type: &["0.16.", "2.", "7.3.255.", "9.10.", "9.11.", "113."],
};

/// The filter table for a platform.
pub fn node_filter(platform: Platform) -> &'static NodeFilter {
    match platform {
        Platform::BinarySensor => &BINARY_SENSOR_FILTER,
        Platform::Sensor => &SENSOR_FILTER,
        Platform::Lock => &LOCK_FILTER,
        Platform::Fan => &FAN_FILTER,
        Platform::Cover => &COVER_FILTER,
        Platform::Light => &LIGHT_FILTER,
        Platform::Switch => &SWITCH_FILTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_a_filter() {
        for platform in SUPPORTED_PLATFORMS {
            // Just exercising the lookup; empty matcher sets are valid.
            let _ = node_filter(platform);
        }
    }

    #[test]
    fn test_sensor_uom_gaps() {
        let sensor = node_filter(Platform::Sensor);
        // Ids claimed by lock (11), switch (2, 78), light (51) and the
        // on/off pair stay out of the generic sensor range.
        for claimed in ["2", "11", "51", "78", "97"] {
            assert!(!sensor.uom.contains(&claimed), "{claimed} should be absent");
        }
        assert!(sensor.uom.contains(&"1"));
        assert!(sensor.uom.contains(&"96"));
    }

    #[test]
    fn test_insteon_prefixes_keep_trailing_dot() {
        for platform in SUPPORTED_PLATFORMS {
            for prefix in node_filter(platform).insteon_type {
                assert!(
                    prefix.ends_with('.'),
                    "prefix {prefix} for {platform} lacks a dot"
                );
            }
        }
    }
}
