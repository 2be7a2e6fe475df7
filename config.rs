/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Engine configuration.
//!
//! Hosts embed the engine with either the historical full-reload behavior
//! (fade to the overlay, then a normal browser navigation) or the in-place
//! content swap. Both run through the same state machine; the mode is a
//! configuration knob, not a separate code path.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    /// Fade the transition overlay in, then hand the URL to the browser for
    /// a standard full page load.
    FullReload,
    /// Fetch the destination markup out-of-band and swap the content region
    /// in place.
    ContentSwap,
}

impl NavigationMode {
    pub fn as_persisted_str(self) -> &'static str {
        match self {
            Self::FullReload => "full-reload",
            Self::ContentSwap => "content-swap",
        }
    }

    pub fn from_persisted_str(raw: &str) -> Option<Self> {
        match raw.trim() {
            "full-reload" => Some(Self::FullReload),
            "content-swap" => Some(Self::ContentSwap),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
}

/// Timing and behavior knobs for the navigation engine.
///
/// Defaults match the tuned values of the production site: the fade-out is
/// long enough to fully mask the swap, and the initial reveal delay gives the
/// media element time to seek behind the opaque overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub mode: NavigationMode,
    /// Content/overlay fade-out duration before the swap begins.
    pub fade_out_ms: u64,
    /// Content fade-in duration after the swap completes.
    pub fade_in_ms: u64,
    /// Delay before the first-load overlay reveal.
    pub reveal_delay_ms: u64,
    /// Speculatively fetch eligible link targets on hover-intent.
    pub hover_prefetch: bool,
    /// Outbound fetch timeout.
    pub fetch_timeout_secs: u64,
    /// Deferred videos begin loading when their top edge comes within this
    /// many pixels below the viewport.
    pub lazy_video_threshold_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::ContentSwap,
            fade_out_ms: 300,
            fade_in_ms: 300,
            reveal_delay_ms: 80,
            hover_prefetch: true,
            fetch_timeout_secs: 4,
            lazy_video_threshold_px: 300.0,
        }
    }
}

impl NavConfig {
    /// Parse a host-provided JSON settings blob. Unknown fields are ignored
    /// and missing fields keep their defaults, so hosts can ship partial
    /// overrides.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(format!("{e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_mode_persisted_str_round_trip() {
        for mode in [NavigationMode::FullReload, NavigationMode::ContentSwap] {
            assert_eq!(
                NavigationMode::from_persisted_str(mode.as_persisted_str()),
                Some(mode)
            );
        }
        assert_eq!(NavigationMode::from_persisted_str("  content-swap "), Some(NavigationMode::ContentSwap));
        assert_eq!(NavigationMode::from_persisted_str("reload"), None);
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        let config = NavConfig::from_json_str(r#"{"mode":"full-reload","fade_out_ms":150}"#)
            .expect("partial config should parse");
        assert_eq!(config.mode, NavigationMode::FullReload);
        assert_eq!(config.fade_out_ms, 150);
        assert_eq!(config.fade_in_ms, NavConfig::default().fade_in_ms);
        assert!(config.hover_prefetch);
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(matches!(
            NavConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
