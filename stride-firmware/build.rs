//! Build script for stride-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates stride.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Accepted values for `tracker.start_action`
const START_ACTIONS: [&str; 2] = ["sensor", "mock"];

/// Upper bound for `sensor.debounce_ms`
const MAX_DEBOUNCE_MS: i64 = 1000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate stride.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=stride.toml");

    let config_path = Path::new("stride.toml");
    if !config_path.exists() {
        panic!("stride.toml not found: the firmware embeds it as its default configuration");
    }

    let content = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read stride.toml: {e}"));

    let config: toml::Value = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid TOML syntax in stride.toml:\n{e}"));

    let mut errors = Vec::new();

    if let Some(action) = config
        .get("tracker")
        .and_then(|t| t.get("start_action"))
    {
        match action.as_str() {
            Some(value) if START_ACTIONS.contains(&value) => {}
            _ => errors.push(format!(
                "tracker.start_action must be one of {START_ACTIONS:?}, got {action}"
            )),
        }
    }

    if let Some(sensor) = config.get("sensor") {
        if let Some(debounce) = sensor.get("debounce_ms") {
            match debounce.as_integer() {
                Some(ms) if (0..=MAX_DEBOUNCE_MS).contains(&ms) => {}
                _ => errors.push(format!(
                    "sensor.debounce_ms must be an integer in 0..={MAX_DEBOUNCE_MS}, got {debounce}"
                )),
            }
        }
        if let Some(fitted) = sensor.get("fitted") {
            if !fitted.is_bool() {
                errors.push(format!("sensor.fitted must be a boolean, got {fitted}"));
            }
        }
    }

    if let Some(show) = config.get("display").and_then(|d| d.get("show_status")) {
        if !show.is_bool() {
            errors.push(format!("display.show_status must be a boolean, got {show}"));
        }
    }

    if !errors.is_empty() {
        panic!("stride.toml validation failed:\n  - {}", errors.join("\n  - "));
    }
}
