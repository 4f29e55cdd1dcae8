// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use eyre::{Result, WrapErr, eyre};
use rune_cfg::RuneConfig;

use crate::core::config::{BodyKind, BodySpec, Config, MAX_FRAME_RATE, default_bodies};
use crate::core::duration::parse_duration;
use crate::{sdebug, swarn};

/// Scalar keys that may appear next to the body blocks.
fn is_special_key(key: &str) -> bool {
    matches!(
        key,
        "delay_per_unit" | "delay-per-unit" | "ramp_seconds" | "ramp-seconds"
    )
}

/// Looks up `path`, accepting both `snake_case` and `kebab-case` spellings.
macro_rules! get_either {
    ($config:expr, $ty:ty, $path:expr) => {{
        let path: &str = $path;
        $config
            .get::<$ty>(path)
            .or_else(|_| $config.get::<$ty>(&path.replace('_', "-")))
            .ok()
    }};
}

/// Numbers may be written as `4` or `4.0`.
fn get_number(config: &RuneConfig, path: &str) -> Option<f64> {
    get_either!(config, f64, path).or_else(|| get_either!(config, u64, path).map(|n| n as f64))
}

pub fn parse_file(path: &Path) -> Result<Config> {
    let rc = RuneConfig::from_file(path)
        .map_err(|e| eyre!("failed to load config from {}: {}", path.display(), e))?;
    parse_config(&rc).wrap_err_with(|| format!("invalid config in {}", path.display()))
}

pub fn parse_str(text: &str) -> Result<Config> {
    let rc = RuneConfig::from_str(text).map_err(|e| eyre!("failed to parse config: {}", e))?;
    parse_config(&rc)
}

/// Builds the effective config; anything not set keeps its built-in default.
pub fn parse_config(config: &RuneConfig) -> Result<Config> {
    let defaults = Config::default();

    // Duration accepts a number of seconds or a string such as "25m" / "00:25:00".
    let duration = match get_either!(config, String, "orrery.duration") {
        Some(text) => parse_duration(&text).map_err(|e| eyre!("orrery.duration: {e}"))?,
        None => get_either!(config, u64, "orrery.duration").unwrap_or(defaults.duration),
    };

    let tick_ms = get_either!(config, u64, "orrery.tick_ms").unwrap_or(defaults.tick_ms);
    if tick_ms == 0 {
        return Err(eyre!("orrery.tick_ms must be greater than 0"));
    }

    let frame_rate = match get_either!(config, u64, "orrery.frame_rate") {
        Some(fps) if fps > u64::from(MAX_FRAME_RATE) => {
            return Err(eyre!(
                "orrery.frame_rate must be between 0 and {MAX_FRAME_RATE}, got {fps}"
            ));
        }
        Some(fps) => fps as u32,
        None => defaults.frame_rate,
    };

    let ramp_seconds =
        get_number(config, "orrery.ramp_seconds").unwrap_or(defaults.ramp_seconds);
    let delay_per_unit =
        get_number(config, "orrery.delay_per_unit").unwrap_or(defaults.delay_per_unit);

    if ramp_seconds < 0.0 || delay_per_unit < 0.0 {
        return Err(eyre!("orrery.ramp_seconds and orrery.delay_per_unit must not be negative"));
    }

    let notify_on_complete = get_either!(config, bool, "orrery.notify_on_complete")
        .unwrap_or(defaults.notify_on_complete);

    let on_complete = get_either!(config, String, "orrery.on_complete")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let bodies = collect_bodies(config)?;

    Ok(Config {
        duration,
        tick_ms,
        frame_rate,
        ramp_seconds,
        delay_per_unit,
        notify_on_complete,
        on_complete,
        bodies,
    })
}

/// Reads the `bodies:` block. Without one, the built-in system is used.
pub fn collect_bodies(config: &RuneConfig) -> Result<Vec<BodySpec>> {
    let keys = match config.get_keys("bodies") {
        Ok(keys) if !keys.is_empty() => keys,
        _ => {
            sdebug!("Config", "no bodies block; using built-in system");
            return Ok(default_bodies());
        }
    };

    let mut bodies: Vec<BodySpec> = Vec::new();

    for key in keys {
        if is_special_key(&key) {
            continue;
        }

        let base = format!("bodies.{key}");
        let id = key.replace('-', "_");

        let kind = match get_either!(config, String, &format!("{base}.kind")) {
            Some(k) => match k.trim().to_lowercase().as_str() {
                "sun" | "star" => BodyKind::Sun,
                "planet" => BodyKind::Planet,
                other => return Err(eyre!("{base}.kind: unknown kind '{other}'")),
            },
            None if id == "sun" => BodyKind::Sun,
            None => BodyKind::Planet,
        };

        let radius = match (kind, get_number(config, &format!("{base}.radius"))) {
            (_, Some(r)) if r < 0.0 => return Err(eyre!("{base}.radius must not be negative")),
            (_, Some(r)) => r,
            (BodyKind::Sun, None) => 0.0,
            (BodyKind::Planet, None) => {
                swarn!("Config", "skipping body '{}': no radius", key);
                continue;
            }
        };

        if bodies.iter().any(|b| b.id == id) {
            return Err(eyre!("duplicate body '{id}'"));
        }

        bodies.push(BodySpec {
            id,
            kind,
            radius,
            speed: get_number(config, &format!("{base}.speed")).unwrap_or(0.0),
            size: get_number(config, &format!("{base}.size")).unwrap_or(1.0),
            initial_angle: get_number(config, &format!("{base}.initial_angle"))
                .unwrap_or(0.0),
            inclination: get_number(config, &format!("{base}.inclination")).unwrap_or(0.0),
            description: get_either!(config, String, &format!("{base}.description"))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        });
    }

    if bodies.is_empty() {
        return Err(eyre!("bodies block defines no usable bodies"));
    }

    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_use_defaults() {
        let cfg = parse_str("orrery:\n  tick_ms 1000\nend\n").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn reads_timer_settings() {
        let cfg = parse_str(
            r#"
orrery:
  duration "25m"
  tick_ms 500
  frame_rate 0
  notify_on_complete false
  on_complete "paplay /usr/share/sounds/bell.oga"
end
"#,
        )
        .unwrap();

        assert_eq!(cfg.duration, 1500);
        assert_eq!(cfg.tick_ms, 500);
        assert_eq!(cfg.frame_rate, 0);
        assert!(!cfg.notify_on_complete);
        assert_eq!(cfg.on_complete.as_deref(), Some("paplay /usr/share/sounds/bell.oga"));
    }

    #[test]
    fn accepts_kebab_case_keys() {
        let cfg = parse_str(
            r#"
orrery:
  tick-ms 250
  notify-on-complete false
end
"#,
        )
        .unwrap();

        assert_eq!(cfg.tick_ms, 250);
        assert!(!cfg.notify_on_complete);
    }

    #[test]
    fn rejects_zero_tick() {
        assert!(parse_str("orrery:\n  tick_ms 0\nend\n").is_err());
    }

    #[test]
    fn frame_rate_is_capped() {
        let err = parse_str("orrery:\n  frame_rate 100000\nend\n").unwrap_err();
        assert!(err.to_string().contains("frame_rate"));

        let cfg = parse_str("orrery:\n  frame_rate 240\nend\n").unwrap();
        assert_eq!(cfg.frame_rate, MAX_FRAME_RATE);
    }

    #[test]
    fn rejects_bad_duration_text() {
        assert!(parse_str("orrery:\n  duration \"soon\"\nend\n").is_err());
    }

    #[test]
    fn reads_custom_bodies() {
        let cfg = parse_str(
            r#"
bodies:
  sun:
    kind "sun"
  end
  vulcan:
    radius 4.0
    speed 0.3
    size 0.2
    inclination 0.25
    description "Hidden behind the sun."
  end
  moonless:
    speed 1
  end
end
"#,
        )
        .unwrap();

        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.body("sun").unwrap().kind, BodyKind::Sun);
        assert!(cfg.body("moonless").is_none());
        let vulcan = cfg.body("vulcan").unwrap();
        assert_eq!(vulcan.kind, BodyKind::Planet);
        assert_eq!(vulcan.radius, 4.0);
        assert_eq!(vulcan.size, 0.2);
        assert_eq!(vulcan.inclination, 0.25);
        assert_eq!(vulcan.description.as_deref(), Some("Hidden behind the sun."));
        assert_eq!(cfg.body("sun").unwrap().inclination, 0.0);
    }
}
