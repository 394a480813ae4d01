//! Unit-of-measure tables
//!
//! The hub reports units as numeric ids. Two lookups: id → display unit for
//! measurement uoms, and id + raw value → state label for enumerated uoms
//! (locks, thermostats, barriers, alarm channels).

/// Display unit for a measurement uom id. Returns an empty string for raw
/// byte-value uoms (no unit) and `None` for unknown or enumerated ids.
pub fn uom_friendly_name(uom: &str) -> Option<&'static str> {
    let unit = match uom {
        "1" => "A",
        "3" => "btu/hours",
        "4" => "°C",
        "5" => "cm",
        "6" => "ft³",
        "7" => "ft³/minutes",
        "8" => "m³",
        "9" => "days",
        "10" => "days",
        "12" => "dB",
        "13" => "dB A",
        "14" => "°",
        "16" => "macroseismic",
        "17" => "°F",
        "18" => "ft",
        "19" => "hours",
        "20" => "hours",
        "21" => "%AH",
        "22" => "%RH",
        "23" => "inHg",
        "24" => "in/hours",
        "25" => "index",
        "26" => "K",
        "27" => "keyword",
        "28" => "kg",
        "29" => "kV",
        "30" => "kW",
        "31" => "kPa",
        "32" => "km/h",
        "33" => "kWh",
        "34" => "liedu",
        "35" => "L",
        "36" => "lx",
        "37" => "mercalli",
        "38" => "m",
        "39" => "m³/hours",
        "40" => "m/s",
        "41" => "mA",
        "42" => "ms",
        "43" => "mV",
        "44" => "minutes",
        "45" => "minutes",
        "46" => "mm/hours",
        "47" => "months",
        "48" => "mph",
        "49" => "m/s",
        "50" => "Ω",
        "51" => "%",
        "52" => "lb",
        "53" => "pf",
        "54" => "ppm",
        "55" => "pulse count",
        "57" => "seconds",
        "58" => "seconds",
        "59" => "S/m",
        "60" => "m_b",
        "61" => "M_L",
        "62" => "M_w",
        "63" => "M_S",
        "64" => "shindo",
        "65" => "SML",
        "69" => "gal",
        "71" => "UV index",
        "72" => "V",
        "73" => "W",
        "74" => "W/m²",
        "75" => "weekday",
        "76" => "°",
        "77" => "years",
        "82" => "mm",
        "83" => "km",
        "85" => "Ω",
        "86" => "kΩ",
        "87" => "m³/m³",
        "88" => "Water activity",
        "89" => "RPM",
        "90" => "Hz",
        "91" => "°",
        "92" => "° South",
        // Range 0-255 and raw byte values carry no unit
        "100" | "107" | "108" | "109" | "110" | "111" | "112" | "113" | "114" => "",
        "101" => "° (x2)",
        "102" => "kWs",
        "103" => "$",
        "104" => "¢",
        "105" => "in",
        "106" => "mm/days",
        "116" => "mi",
        "117" => "mb",
        "118" => "hPa",
        "119" => "Whours",
        "120" => "in/days",
        _ => return None,
    };
    Some(unit)
}

/// State label for an enumerated uom id and raw value. `None` when the uom
/// is not enumerated or the value is outside the enumeration.
pub fn uom_to_state(uom: &str, value: i32) -> Option<String> {
    let state: &str = match (uom, value) {
        // Deadbolt status
        ("11", 0) => "unlocked",
        ("11", 100) => "locked",
        ("11", 101) => "unknown",
        ("11", 102) => "problem",

        // Door lock alarm
        ("15", 1) => "master code changed",
        ("15", 2) => "tamper code entry limit",
        ("15", 3) => "escutcheon removed",
        ("15", 4) => "key/manually locked",
        ("15", 5) => "locked by touch",
        ("15", 6) => "key/manually unlocked",
        ("15", 7) => "remote locking jammed bolt",
        ("15", 8) => "remotely locked",
        ("15", 9) => "remotely unlocked",
        ("15", 10) => "deadbolt jammed",
        ("15", 11) => "battery too low to operate",
        ("15", 12) => "critical low battery",
        ("15", 13) => "low battery",
        ("15", 14) => "automatically locked",
        ("15", 15) => "automatic locking jammed bolt",
        ("15", 16) => "remotely power cycled",
        ("15", 17) => "lock handling complete",
        ("15", 19) => "user deleted",
        ("15", 20) => "user added",
        ("15", 21) => "duplicate pin",
        ("15", 22) => "jammed bolt by locking with keypad",
        ("15", 23) => "locked by keypad",
        ("15", 24) => "unlocked by keypad",
        ("15", 25) => "keypad attempt outside schedule",
        ("15", 26) => "hardware failure",
        ("15", 27) => "factory reset",

        // Thermostat heat/cool state
        ("66", 0) => "idle",
        ("66", 1) => "heating",
        ("66", 2) => "cooling",
        ("66", 3) => "fan",
        ("66", 4) => "heating", // pending heat
        ("66", 5) => "cooling", // pending cool
        ("66", 6) => "idle",
        ("66", 7..=8) => "heating",
        ("66", 9) => "cooling",
        ("66", 10..=11) => "heating",

        // Thermostat mode
        ("67", 0) => "off",
        ("67", 1) => "heat",
        ("67", 2) => "cool",
        ("67", 3) => "auto",
        ("67", 4) => "boost",
        ("67", 5) => "resume",
        ("67", 6) => "fan_only",
        ("67", 7) => "furnace",
        ("67", 8) => "dry",
        ("67", 9) => "moist air",
        ("67", 10) => "auto changeover",
        ("67", 11) => "energy save heat",
        ("67", 12) => "energy save cool",
        ("67", 13) => "away",
        ("67", 14..=16) => "auto",

        // Thermostat fan mode
        ("68", 0) => "auto",
        ("68", 1) => "on",
        ("68", 2..=3) => "high",
        ("68", 4..=5) => "medium",
        ("68", 6) => "circulation",
        ("68", 7) => "humidity circulation",

        // 0-Off 100-On
        ("78", 0) => "off",
        ("78", 100) => "on",

        // 0-Open 100-Close
        ("79", 0) => "open",
        ("79", 100) => "closed",

        // Thermostat fan run state
        ("80", 0) => "off",
        ("80", 1) => "on",
        ("80", 2) => "on high",
        ("80", 3) => "on medium",
        ("80", 4) => "circulation",
        ("80", 5) => "humidity circulation",
        ("80", 6) => "right/left circulation",
        ("80", 7) => "up/down circulation",
        ("80", 8) => "quiet circulation",

        // Secure mode
        ("84", 0) => "lock",
        ("84", 1) => "unlock",

        // Power management alarm
        ("93", 1) => "power applied",
        ("93", 2) => "ac mains disconnected",
        ("93", 3) => "ac mains reconnected",
        ("93", 4) => "surge detection",
        ("93", 5) => "volt drop or drift",
        ("93", 6) => "over current detected",
        ("93", 7) => "over voltage detected",
        ("93", 8) => "over load detected",
        ("93", 9) => "load error",
        ("93", 10) => "replace battery soon",
        ("93", 11) => "replace battery now",
        ("93", 12) => "battery is charging",
        ("93", 13) => "battery is fully charged",
        ("93", 14) => "charge battery soon",
        ("93", 15) => "charge battery now",

        // Appliance alarm
        ("94", 1) => "program started",
        ("94", 2) => "program in progress",
        ("94", 3) => "program completed",
        ("94", 4) => "replace main filter",
        ("94", 5) => "failure to set target temperature",
        ("94", 6) => "supplying water",
        ("94", 7) => "water supply failure",
        ("94", 8) => "boiling",
        ("94", 9) => "boiling failure",
        ("94", 10) => "washing",
        ("94", 11) => "washing failure",
        ("94", 12) => "rinsing",
        ("94", 13) => "rinsing failure",
        ("94", 14) => "draining",
        ("94", 15) => "draining failure",
        ("94", 16) => "spinning",
        ("94", 17) => "spinning failure",
        ("94", 18) => "drying",
        ("94", 19) => "drying failure",
        ("94", 20) => "fan failure",
        ("94", 21) => "compressor failure",

        // Home health alarm
        ("95", 1) => "leaving bed",
        ("95", 2) => "sitting on bed",
        ("95", 3) => "lying on bed",
        ("95", 4) => "posture changed",
        ("95", 5) => "sitting on edge of bed",

        // VOC level
        ("96", 1) => "clean",
        ("96", 2) => "slightly polluted",
        ("96", 3) => "moderately polluted",
        ("96", 4) => "highly polluted",

        // Barrier status; 1-99 are percentage open
        ("97", 0) => "closed",
        ("97", 100) => "open",
        ("97", 101) => "unknown",
        ("97", 102) => "stopped",
        ("97", 103) => "closing",
        ("97", 104) => "opening",
        ("97", v @ 1..=99) => return Some(format!("{v} %")),

        // Insteon thermostat mode
        ("98", 0) => "off",
        ("98", 1) => "heat",
        ("98", 2) => "cool",
        ("98", 3) => "heat_cool",
        ("98", 4) => "fan_only",
        ("98", 5..=7) => "auto",

        // Insteon thermostat fan mode
        ("99", 7) => "on",
        ("99", 8) => "auto",

        // Most recent on-style action taken for lamp control
        ("115", 0) => "on",
        ("115", 1) => "off",
        ("115", 2) => "fade up",
        ("115", 3) => "fade down",
        ("115", 4) => "fade stop",
        ("115", 5) => "fast on",
        ("115", 6) => "fast off",
        ("115", 7) => "triple press on",
        ("115", 8) => "triple press off",
        ("115", 9) => "4x press on",
        ("115", 10) => "4x press off",
        ("115", 11) => "5x press on",
        ("115", 12) => "5x press off",

        _ => return None,
    };
    Some(state.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_name_lookup() {
        assert_eq!(uom_friendly_name("4"), Some("°C"));
        assert_eq!(uom_friendly_name("17"), Some("°F"));
        assert_eq!(uom_friendly_name("51"), Some("%"));
        // Raw byte values have no unit but are known ids
        assert_eq!(uom_friendly_name("100"), Some(""));
        assert_eq!(uom_friendly_name("2"), None);
    }

    #[test]
    fn test_enumerated_states() {
        assert_eq!(uom_to_state("11", 100), Some("locked".to_string()));
        assert_eq!(uom_to_state("78", 0), Some("off".to_string()));
        assert_eq!(uom_to_state("78", 50), None);
        assert_eq!(uom_to_state("51", 50), None);
    }

    #[test]
    fn test_barrier_percentages() {
        assert_eq!(uom_to_state("97", 0), Some("closed".to_string()));
        assert_eq!(uom_to_state("97", 42), Some("42 %".to_string()));
        assert_eq!(uom_to_state("97", 104), Some("opening".to_string()));
        assert_eq!(uom_to_state("97", 105), None);
    }
}
