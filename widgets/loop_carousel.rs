/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Auto-playing infinite-loop carousel (logo ticker).
//!
//! Translates its track continuously and wraps by the track width, so the
//! strip appears endless. Purely time-driven; no user interaction.

use markup5ever_rcdom::Handle;

use crate::dom::geometry::SceneGeometry;
use crate::dom::{PageDocument, clear_inline_style, find_first_by_class_in, set_inline_style};
use crate::widgets::{BindContext, Widget};

pub const MARKER_CLASS: &str = "loop-ticker";
pub const TRACK_CLASS: &str = "ticker-track";

/// Drift speed in px per second.
const SPEED_PX_PER_SEC: f64 = 40.0;
/// Wrap width used when the host cannot resolve the track's geometry.
const FALLBACK_TRACK_WIDTH_PX: f64 = 1_000.0;

pub struct LoopCarousel {
    track: Handle,
    offset_px: f64,
    last_tick_ms: Option<u64>,
}

pub fn bind(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let root = find_first_by_class_in(ctx.region, MARKER_CLASS)?;
    let track = find_first_by_class_in(&root, TRACK_CLASS).unwrap_or(root);
    Some(Box::new(LoopCarousel {
        track,
        offset_px: 0.0,
        last_tick_ms: None,
    }))
}

impl LoopCarousel {
    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }
}

impl Widget for LoopCarousel {
    fn name(&self) -> &'static str {
        "loop-carousel"
    }

    fn on_tick(&mut self, doc: &PageDocument, geometry: &dyn SceneGeometry, now_ms: u64) {
        let last = self.last_tick_ms.replace(now_ms);
        let Some(last) = last else {
            return;
        };
        let dt_secs = now_ms.saturating_sub(last) as f64 / 1000.0;
        let width = geometry
            .node_width(doc, &self.track)
            .filter(|w| *w > 0.0)
            .unwrap_or(FALLBACK_TRACK_WIDTH_PX);
        self.offset_px = (self.offset_px + dt_secs * SPEED_PX_PER_SEC) % width;
        set_inline_style(
            &self.track,
            "transform",
            &format!("translateX(-{:.1}px)", self.offset_px),
        );
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        clear_inline_style(&self.track, "transform");
    }
}
