/// Config file loading and creation for the heatsheet CLI.
///
/// Config lives at ~/.config/heatsheet/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct HeatsheetConfig {
    pub rounds: Option<usize>,
    pub final_slots: Option<usize>,
    pub gate_choice_final: Option<bool>,
    /// Points per finish place, best place first (index 0 is place 1).
    pub points: Option<Vec<u32>>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# heatsheet configuration
# All values here can be overridden by CLI flags.

# Number of rounds per race, including the final (3-6)
# rounds = 4

# How many standings positions qualify for the final
# final_slots = 8

# Assign final lanes by ranked gate choice instead of a random draw
# gate_choice_final = false

# Points per finish place, best place first. Values must all differ.
# Anything not covered here (and every DQ/DNS/DNF) scores 9.
# points = [1, 2, 3, 4, 5, 6, 7, 8]
";

/// Returns the default config path: ~/.config/heatsheet/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("heatsheet").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> HeatsheetConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            toml::from_str(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HeatsheetConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
