//! Card text and tuning
//!
//! Read-only: the browser build reads an inline JSON block from the host page,
//! the native build an optional JSON file. Nothing is written back.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Card settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Greeting ===
    /// Typed headline
    pub headline: String,
    /// Subtext under the headline
    pub subtext: String,
    /// Yes button label
    pub accept_label: String,
    /// Delay before typing starts (ms)
    pub headline_delay_ms: u64,
    /// Time per typed character (ms)
    pub type_interval_ms: u64,

    // === No button ===
    /// Offset range on each axis (+/- units)
    pub evade_range: f32,
    /// Attempts before the button fades
    pub doubt_threshold: u32,

    // === Confirmation ===
    pub confirmation_title: String,
    pub confirmation_note: String,
    pub reservation_code: String,

    // === Footer ===
    pub footer: String,

    /// Skip ambient loops, floating, and springs
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            headline: "Will you be my Valentine?".to_string(),
            subtext: "I promise to buy you tacos and tell you you're pretty.".to_string(),
            accept_label: "Yes, absolutely!".to_string(),
            headline_delay_ms: HEADLINE_DELAY_MS,
            type_interval_ms: TYPE_INTERVAL_MS,

            evade_range: EVADE_RANGE,
            doubt_threshold: DOUBT_THRESHOLD,

            confirmation_title: "It's a Date!".to_string(),
            confirmation_note: "Screenshot this and send it to me for confirmation.".to_string(),
            reservation_code: "#VALENTINE2025".to_string(),

            footer: "Designed with Love & code".to_string(),

            reduced_motion: false,
        }
    }
}

/// Upper bound on the evade range; keeps the button near its slot
const MAX_EVADE_RANGE: f32 = 1000.0;

impl Settings {
    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp values the card cannot use as given
    pub fn sanitized(mut self) -> Self {
        if !self.evade_range.is_finite() {
            log::warn!("Non-finite evade_range, using default");
            self.evade_range = EVADE_RANGE;
        }
        self.evade_range = self.evade_range.clamp(0.0, MAX_EVADE_RANGE);
        self.type_interval_ms = self.type_interval_ms.max(1);
        self
    }

    pub fn headline_delay(&self) -> Duration {
        Duration::from_millis(self.headline_delay_ms)
    }

    pub fn type_interval(&self) -> Duration {
        Duration::from_millis(self.type_interval_ms)
    }

    /// Parse `json`, falling back to defaults with a warning
    fn parse_or_default(json: &str, source: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", source);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings from {}: {}", source, e);
                Self::default()
            }
        }
    }

    /// Element id of the inline settings block
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "card-settings";

    /// Environment variable naming a settings file (native)
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "VALENTINE_SETTINGS";

    /// Load settings from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => {
                Self::parse_or_default(&json, "#card-settings")
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `VALENTINE_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };
        Self::load_file(&path)
    }

    /// Read settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    fn load_file(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::parse_or_default(&json, path),
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_card_copy() {
        let s = Settings::default();
        assert_eq!(s.headline, "Will you be my Valentine?");
        assert_eq!(s.headline_delay(), Duration::from_millis(500));
        assert_eq!(s.type_interval(), Duration::from_millis(50));
        assert_eq!(s.evade_range, 100.0);
        assert_eq!(s.doubt_threshold, 3);
        assert!(!s.reduced_motion);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "headline": "Dinner Friday?" }"#).unwrap();
        assert_eq!(s.headline, "Dinner Friday?");
        assert_eq!(s.subtext, Settings::default().subtext);
    }

    #[test]
    fn test_sanitize_clamps() {
        let s = Settings::from_json(r#"{ "evade_range": -5.0, "type_interval_ms": 0 }"#).unwrap();
        assert_eq!(s.evade_range, 0.0);
        assert_eq!(s.type_interval_ms, 1);

        let s = Settings {
            evade_range: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.evade_range, EVADE_RANGE);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert!(Settings::from_json("{ not json").is_err());
        assert_eq!(
            Settings::parse_or_default("{ not json", "test"),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_file() {
        let path = std::env::temp_dir()
            .join(format!("valentine-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "footer": "With love" }"#).unwrap();
        let s = Settings::load_file(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(s.footer, "With love");
        assert_eq!(s.headline, Settings::default().headline);
    }

    #[test]
    fn test_missing_settings_file_falls_back() {
        assert_eq!(
            Settings::load_file("/nonexistent/valentine-settings.json"),
            Settings::default()
        );
    }
}
