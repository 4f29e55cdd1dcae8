// Author: Dustin Pilgrim
// License: MIT

pub mod parser;

use std::path::{Path, PathBuf};

use eyre::Result;

use crate::core::config::Config;
use crate::{sdebug, swarn};

const SYSTEM_CONFIG: &str = "/etc/orrery/orrery.rune";

/// A loaded configuration and where it came from (`None` = built-in defaults).
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub cfg: Config,
    pub path: Option<PathBuf>,
}

/// `~/.config/orrery/orrery.rune`
pub fn resolve_default_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    path.push("orrery");
    path.push("orrery.rune");
    path
}

/// Load configuration.
///
/// An explicit path must load cleanly. Otherwise the user file is tried, then
/// the system file, then built-in defaults; a broken file is logged and
/// skipped so the daemon still comes up.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let cfg = parser::parse_file(path)?;
        sdebug!("Config", "loaded config from {}", path.display());
        return Ok(LoadedConfig { cfg, path: Some(path.to_path_buf()) });
    }

    load_first_of(&[resolve_default_config_path(), PathBuf::from(SYSTEM_CONFIG)])
}

fn load_first_of(candidates: &[PathBuf]) -> Result<LoadedConfig> {
    for path in candidates {
        if !path.exists() {
            continue;
        }

        match parser::parse_file(path) {
            Ok(cfg) => {
                sdebug!("Config", "loaded config from {}", path.display());
                return Ok(LoadedConfig { cfg, path: Some(path.clone()) });
            }
            Err(e) => swarn!("Config", "ignoring {}: {:#}", path.display(), e),
        }
    }

    sdebug!("Config", "using built-in configuration");
    Ok(LoadedConfig { cfg: Config::default(), path: None })
}
