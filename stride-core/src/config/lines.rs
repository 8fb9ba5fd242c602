//! Line-based configuration parser
//!
//! Reads the same files as `parse_config` without the `toml` crate, which
//! needs pointer-width atomics that thumbv6m does not have. Handles only the
//! subset the tracker configuration uses:
//!
//! - `[section]` headers
//! - `key = value` pairs with string, integer and boolean values
//! - Comments (`# ...`), full-line or trailing
//!
//! Unknown sections and keys are skipped, as with the serde path.

use super::types::{ConfigError, StartAction, TrackerConfig};

/// Section the parser is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Tracker,
    Sensor,
    Display,
    Unknown,
}

/// Parse and validate a configuration file line by line
pub fn parse_config_lines(input: &str) -> Result<TrackerConfig, ConfigError> {
    let mut config = TrackerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or(ConfigError::Parse)?;
            section = parse_section_header(name.trim());
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Parse)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(name: &str) -> Section {
    match name {
        "tracker" => Section::Tracker,
        "sensor" => Section::Sensor,
        "display" => Section::Display,
        _ => Section::Unknown,
    }
}

fn apply_value(
    config: &mut TrackerConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Tracker, "start_action") => {
            config.tracker.start_action = parse_start_action(parse_string(value)?)?;
        }
        (Section::Sensor, "fitted") => config.sensor.fitted = parse_bool(value)?,
        (Section::Sensor, "debounce_ms") => config.sensor.debounce_ms = parse_int(value)?,
        (Section::Display, "show_status") => config.display.show_status = parse_bool(value)?,
        _ => {}
    }
    Ok(())
}

/// Cut a trailing comment, leaving `#` inside quotes alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::Parse)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Parse)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::Parse),
    }
}

fn parse_start_action(value: &str) -> Result<StartAction, ConfigError> {
    match value {
        "sensor" => Ok(StartAction::Sensor),
        "mock" => Ok(StartAction::Mock),
        _ => Err(ConfigError::Parse),
    }
}
