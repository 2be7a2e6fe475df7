/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Fraction-paginated fading carousel.
//!
//! One slide visible at a time, cross-faded via opacity, with a "current /
//! total" fraction readout. Auto-advances on a fixed cadence.

use markup5ever_rcdom::Handle;

use crate::dom::geometry::SceneGeometry;
use crate::dom::{
    PageDocument, add_class, clear_inline_style, find_all_by_class_in, find_first_by_class_in,
    remove_class, set_inline_style, set_text_content,
};
use crate::widgets::{BindContext, Widget};

pub const MARKER_CLASS: &str = "fade-slider";
pub const SLIDE_CLASS: &str = "slide";
pub const ACTIVE_CLASS: &str = "is-active";
pub const FRACTION_CLASS: &str = "slide-count";

const AUTO_ADVANCE_MS: u64 = 5_000;

pub struct FadeCarousel {
    slides: Vec<Handle>,
    fraction: Option<Handle>,
    active: usize,
    next_advance_ms: u64,
}

pub fn bind(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let root = find_first_by_class_in(ctx.region, MARKER_CLASS)?;
    let slides = find_all_by_class_in(&root, SLIDE_CLASS);
    if slides.is_empty() {
        return None;
    }
    let carousel = FadeCarousel {
        fraction: find_first_by_class_in(&root, FRACTION_CLASS),
        slides,
        active: 0,
        next_advance_ms: ctx.now_ms + AUTO_ADVANCE_MS,
    };
    carousel.apply();
    Some(Box::new(carousel))
}

impl FadeCarousel {
    fn apply(&self) {
        for (idx, slide) in self.slides.iter().enumerate() {
            if idx == self.active {
                add_class(slide, ACTIVE_CLASS);
                set_inline_style(slide, "opacity", "1");
            } else {
                remove_class(slide, ACTIVE_CLASS);
                set_inline_style(slide, "opacity", "0");
            }
        }
        if let Some(fraction) = &self.fraction {
            set_text_content(fraction, &format!("{} / {}", self.active + 1, self.slides.len()));
        }
    }

    pub fn advance(&mut self) {
        self.active = (self.active + 1) % self.slides.len();
        self.apply();
    }

    pub fn active_index(&self) -> usize {
        self.active
    }
}

impl Widget for FadeCarousel {
    fn name(&self) -> &'static str {
        "fade-carousel"
    }

    fn on_tick(&mut self, _doc: &PageDocument, _geometry: &dyn SceneGeometry, now_ms: u64) {
        while now_ms >= self.next_advance_ms {
            self.advance();
            self.next_advance_ms += AUTO_ADVANCE_MS;
        }
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        for slide in &self.slides {
            remove_class(slide, ACTIVE_CLASS);
            clear_inline_style(slide, "opacity");
        }
    }
}
