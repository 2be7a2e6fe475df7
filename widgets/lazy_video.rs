/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Deferred video loading.
//!
//! Videos marked for lazy loading ship a `data-src` instead of a `src` and
//! only begin loading once they scroll within a proximity threshold of the
//! viewport. Each video triggers at most once; after every tracked video has
//! fired the widget goes permanently inert.

use markup5ever_rcdom::Handle;

use crate::dom::geometry::{SceneGeometry, Viewport};
use crate::dom::{PageDocument, attr, find_all_by_class_in, remove_attr, set_attr};
use crate::widgets::{BindContext, Widget};

pub const MARKER_CLASS: &str = "lazy-video";
pub const DEFERRED_SRC_ATTR: &str = "data-src";

pub struct LazyVideo {
    pending: Vec<Handle>,
    threshold_px: f64,
}

pub fn bind(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let pending: Vec<Handle> = find_all_by_class_in(ctx.region, MARKER_CLASS)
        .into_iter()
        .filter(|el| attr(el, DEFERRED_SRC_ATTR).is_some())
        .collect();
    if pending.is_empty() {
        return None;
    }
    Some(Box::new(LazyVideo {
        pending,
        threshold_px: ctx.config.lazy_video_threshold_px,
    }))
}

impl LazyVideo {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Widget for LazyVideo {
    fn name(&self) -> &'static str {
        "lazy-video"
    }

    fn on_scroll(
        &mut self,
        doc: &PageDocument,
        geometry: &dyn SceneGeometry,
        viewport: &Viewport,
    ) {
        if self.pending.is_empty() {
            // Every video has fired; the widget stays disconnected.
            return;
        }
        let load_line = viewport.bottom() + self.threshold_px;
        self.pending.retain(|video| {
            let within_reach = geometry
                .node_top(doc, video)
                .map(|top| top <= load_line)
                .unwrap_or(false);
            if !within_reach {
                return true;
            }
            if let Some(src) = attr(video, DEFERRED_SRC_ATTR) {
                set_attr(video, "src", &src);
                remove_attr(video, DEFERRED_SRC_ATTR);
            }
            false
        });
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        self.pending.clear();
    }
}
