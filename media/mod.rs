/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Playback continuity for the persistent looping video.
//!
//! The looping globe video must appear to spin continuously across page
//! loads. On navigate-away the current offset and a wall-clock stamp are
//! persisted; on the next metadata load the offset is restored with the
//! elapsed time added, wrapped by the duration. Persisted values are
//! untrusted text and are ignored unless they parse as finite numbers.

use log::debug;

use crate::store::SessionStore;

pub const STORE_KEY_OFFSET: &str = "orrery.media.offset-secs";
pub const STORE_KEY_SAVED_AT: &str = "orrery.media.saved-at-ms";

/// Host-mirrored state of the tracked media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaPlayback {
    pub current_time_secs: f64,
    /// Unknown until the element's metadata has loaded.
    pub duration_secs: Option<f64>,
    pub paused: bool,
    last_advance_ms: Option<u64>,
}

impl MediaPlayback {
    pub fn new() -> Self {
        Self {
            current_time_secs: 0.0,
            duration_secs: None,
            paused: true,
            last_advance_ms: None,
        }
    }

    /// Advance the modeled playhead to `now_ms`. Looping media wraps by its
    /// duration.
    pub fn advance_to(&mut self, now_ms: u64) {
        let last = self.last_advance_ms.replace(now_ms);
        if self.paused {
            return;
        }
        let Some(duration) = self.duration_secs else {
            return;
        };
        if let Some(last) = last {
            let dt = now_ms.saturating_sub(last) as f64 / 1000.0;
            self.current_time_secs = (self.current_time_secs + dt) % duration;
        }
    }

    fn has_known_duration(&self) -> bool {
        matches!(self.duration_secs, Some(d) if d.is_finite() && d > 0.0)
    }
}

impl Default for MediaPlayback {
    fn default() -> Self {
        Self::new()
    }
}

/// Persist the playhead, but only while it is meaningful: a paused,
/// not-yet-loaded, or errored element has no position worth restoring.
pub fn save_position(playback: &MediaPlayback, store: &mut dyn SessionStore, now_ms: u64) {
    if playback.paused || !playback.has_known_duration() {
        return;
    }
    store.set(STORE_KEY_OFFSET, &playback.current_time_secs.to_string());
    store.set(STORE_KEY_SAVED_AT, &now_ms.to_string());
}

/// Offset to resume at: the saved offset advanced by the wall-clock time
/// spent away, wrapped into `[0, duration)`.
pub fn restored_offset(saved_offset_secs: f64, saved_at_ms: u64, now_ms: u64, duration_secs: f64) -> f64 {
    let elapsed_secs = now_ms.saturating_sub(saved_at_ms) as f64 / 1000.0;
    (saved_offset_secs + elapsed_secs) % duration_secs
}

/// Restore the persisted position (when one validates) and start playback.
/// Returns whether playback was requested; the host reports autoplay
/// rejection back separately and it is treated as a soft failure.
pub fn restore_and_play(
    playback: &mut MediaPlayback,
    store: &dyn SessionStore,
    now_ms: u64,
) -> bool {
    if !playback.has_known_duration() {
        return false;
    }
    let duration = playback.duration_secs.unwrap_or(0.0);

    let saved_offset = store
        .get(STORE_KEY_OFFSET)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite());
    let saved_at = store
        .get(STORE_KEY_SAVED_AT)
        .and_then(|raw| raw.trim().parse::<u64>().ok());

    match (saved_offset, saved_at) {
        (Some(offset), Some(saved_at_ms)) => {
            playback.current_time_secs = restored_offset(offset, saved_at_ms, now_ms, duration);
        },
        _ => {
            debug!("no valid persisted media position; starting playback in place");
        },
    }

    playback.paused = false;
    true
}
