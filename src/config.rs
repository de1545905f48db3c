//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/snaptile/config.json`.
//! The file is optional and every key inside it is optional too.
//!
//! # Example
//!
//! ```json
//! {
//!   "monitor_threshold": 0.6,
//!   "window_manager": "auto",
//!   "activate_after_snap": false
//! }
//! ```

use crate::monitor::DEFAULT_THRESHOLD;
use crate::traits::WmVariant;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

/// Top-level configuration.
///
/// A minimal `{}` file is valid; missing keys fall back to their
/// compiled-in defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Share of a window's area that a monitor must hold to claim the
    /// window, in `(0, 1]`.
    pub monitor_threshold: f64,

    /// Window manager to frame geometry requests for.  `None` (written as
    /// `"auto"`) probes the running window manager.
    #[serde(
        serialize_with = "serialize_wm",
        deserialize_with = "deserialize_wm"
    )]
    pub window_manager: Option<WmVariant>,

    /// Focus and raise the window after a directional snap.
    pub activate_after_snap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor_threshold: DEFAULT_THRESHOLD,
            window_manager: None,
            activate_after_snap: false,
        }
    }
}

fn serialize_wm<S: Serializer>(wm: &Option<WmVariant>, s: S) -> Result<S::Ok, S::Error> {
    match wm {
        Some(wm) => wm.serialize(s),
        None => s.serialize_str("auto"),
    }
}

fn deserialize_wm<'de, D: Deserializer<'de>>(d: D) -> Result<Option<WmVariant>, D::Error> {
    let s = String::deserialize(d)?;
    if s.trim().eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match s.trim().to_lowercase().as_str() {
        "unknown" => Ok(Some(WmVariant::Unknown)),
        "openbox" => Ok(Some(WmVariant::Openbox)),
        "kwin" => Ok(Some(WmVariant::KWin)),
        other => Err(serde::de::Error::custom(format!(
            "invalid window_manager {:?} (expected auto, unknown, openbox or kwin)",
            other
        ))),
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&contents)
            .map_err(|e| ConfigError(format!("{}: {}", path.display(), e.0)))
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError(format!("failed to parse: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let t = self.monitor_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError(format!(
                "monitor_threshold must be in (0, 1], got {}",
                t
            )));
        }
        Ok(())
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "monitor_threshold": 0.75,
            "window_manager": "KWin",
            "activate_after_snap": true
        }"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.monitor_threshold, 0.75);
        assert_eq!(cfg.window_manager, Some(WmVariant::KWin));
        assert!(cfg.activate_after_snap);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.monitor_threshold, 0.6);
        assert_eq!(cfg.window_manager, None);
        assert!(!cfg.activate_after_snap);
    }

    #[test]
    fn auto_means_probe() {
        let cfg = Config::from_json(r#"{ "window_manager": "auto" }"#).unwrap();
        assert_eq!(cfg.window_manager, None);
    }

    #[test]
    fn unknown_window_manager_name_rejected() {
        assert!(Config::from_json(r#"{ "window_manager": "xfwm4" }"#).is_err());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        assert!(Config::from_json(r#"{ "monitor_threshold": 0.0 }"#).is_err());
        assert!(Config::from_json(r#"{ "monitor_threshold": 1.5 }"#).is_err());
        assert!(Config::from_json(r#"{ "monitor_threshold": 1.0 }"#).is_ok());
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "activate_after_snap": true, "future_section": { "key": 42 } }"#;
        let cfg = Config::from_json(json).unwrap();
        assert!(cfg.activate_after_snap);
    }

    #[test]
    fn serializes_auto_for_probe() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains(r#""window_manager":"auto""#));
        let back = Config::from_json(&json).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/snaptile/config.json")).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"));
    }
}
