/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Ephemeral widget lifecycle.
//!
//! Widgets are behaviors bound to elements of the current content region:
//! carousels, scroll effects, text animation, decorative fillers. Every swap
//! drains the live set and rebinds against the fresh region — never
//! partially, so no two instances of the same widget kind can coexist. A
//! misbehaving widget (panicking constructor or teardown) is isolated and
//! logged; it must never block the other widgets or the navigation itself.

pub mod cascade;
pub mod decor;
pub mod fade_carousel;
pub mod lazy_video;
pub mod loop_carousel;
pub mod parallax;
pub mod typed_text;

use std::panic::{AssertUnwindSafe, catch_unwind};

use log::{debug, warn};
use markup5ever_rcdom::Handle;

use crate::config::NavConfig;
use crate::dom::PageDocument;
use crate::dom::geometry::{SceneGeometry, Viewport};

pub trait Widget {
    fn name(&self) -> &'static str;

    /// Time-driven behavior (autoplay, typing). Default: inert.
    fn on_tick(&mut self, _doc: &PageDocument, _geometry: &dyn SceneGeometry, _now_ms: u64) {}

    /// Scroll-driven behavior (parallax, cascade, lazy loading). Default:
    /// inert.
    fn on_scroll(
        &mut self,
        _doc: &PageDocument,
        _geometry: &dyn SceneGeometry,
        _viewport: &Viewport,
    ) {
    }

    /// Undo this instance's DOM footprint. Runs exactly once, right before
    /// the region it was bound to is replaced.
    fn teardown(&mut self, doc: &PageDocument);
}

/// Everything a widget initializer gets to look at.
pub struct BindContext<'a> {
    pub doc: &'a PageDocument,
    pub region: &'a Handle,
    pub config: &'a NavConfig,
    pub now_ms: u64,
}

type WidgetInit = fn(&BindContext<'_>) -> Option<Box<dyn Widget>>;

const INITIALIZERS: &[(&str, WidgetInit)] = &[
    ("fade-carousel", fade_carousel::bind),
    ("loop-carousel", loop_carousel::bind),
    ("parallax", parallax::bind),
    ("typed-text", typed_text::bind),
    ("cascade", cascade::bind),
    ("corner-ornaments", decor::bind_corner_ornaments),
    ("numbered-list", decor::bind_numbered_list),
    ("lazy-video", lazy_video::bind),
];

#[derive(Default)]
pub struct WidgetLifecycle {
    live: Vec<Box<dyn Widget>>,
}

impl WidgetLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_names(&self) -> Vec<&'static str> {
        self.live.iter().map(|w| w.name()).collect()
    }

    /// Append a live instance. Called by initializers as they construct a
    /// widget against the current region.
    pub fn register(&mut self, widget: Box<dyn Widget>) {
        self.live.push(widget);
    }

    /// Tear every live instance down and empty the registry. A panicking
    /// teardown is swallowed so the remaining instances still run.
    pub fn cleanup(&mut self, doc: &PageDocument) {
        for mut widget in self.live.drain(..) {
            let name = widget.name();
            if catch_unwind(AssertUnwindSafe(|| widget.teardown(doc))).is_err() {
                warn!("widget '{name}' panicked during teardown; continuing");
            }
        }
    }

    pub fn tick_all(&mut self, doc: &PageDocument, geometry: &dyn SceneGeometry, now_ms: u64) {
        for widget in &mut self.live {
            widget.on_tick(doc, geometry, now_ms);
        }
    }

    pub fn scroll_all(
        &mut self,
        doc: &PageDocument,
        geometry: &dyn SceneGeometry,
        viewport: &Viewport,
    ) {
        for widget in &mut self.live {
            widget.on_scroll(doc, geometry, viewport);
        }
    }
}

/// Scan the fresh region and construct one instance of every widget whose
/// marker is present. Constructor panics are isolated per widget.
pub fn rebind_widgets(lifecycle: &mut WidgetLifecycle, ctx: &BindContext<'_>) {
    for (name, init) in INITIALIZERS {
        match catch_unwind(AssertUnwindSafe(|| init(ctx))) {
            Ok(Some(widget)) => {
                debug!("bound widget '{name}'");
                lifecycle.register(widget);
            },
            Ok(None) => {},
            Err(_) => warn!("widget '{name}' panicked during initialization; continuing"),
        }
    }
}
