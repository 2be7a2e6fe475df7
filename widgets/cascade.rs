/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Scroll-driven cascade.
//!
//! Items scale, fade, and rise as they travel up through the viewport. Each
//! item's progress is derived purely from the scroll position, so the effect
//! is reversible and jitter-free.

use markup5ever_rcdom::Handle;

use crate::dom::geometry::{SceneGeometry, Viewport};
use crate::dom::{
    PageDocument, clear_inline_style, find_all_by_class_in, find_first_by_class_in,
    set_inline_style,
};
use crate::widgets::{BindContext, Widget};

pub const MARKER_CLASS: &str = "cascade";
pub const ITEM_CLASS: &str = "cascade-item";

const MIN_SCALE: f64 = 0.8;
const RISE_PX: f64 = 40.0;

pub struct Cascade {
    items: Vec<Handle>,
}

pub fn bind(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let root = find_first_by_class_in(ctx.region, MARKER_CLASS)?;
    let items = find_all_by_class_in(&root, ITEM_CLASS);
    if items.is_empty() {
        return None;
    }
    Some(Box::new(Cascade { items }))
}

/// 0 while the item is below the viewport, 1 once it has fully entered.
fn progress(item_top: f64, viewport: &Viewport) -> f64 {
    if viewport.height <= 0.0 {
        return 1.0;
    }
    ((viewport.bottom() - item_top) / viewport.height).clamp(0.0, 1.0)
}

impl Widget for Cascade {
    fn name(&self) -> &'static str {
        "cascade"
    }

    fn on_scroll(
        &mut self,
        doc: &PageDocument,
        geometry: &dyn SceneGeometry,
        viewport: &Viewport,
    ) {
        for item in &self.items {
            let Some(top) = geometry.node_top(doc, item) else {
                continue;
            };
            let p = progress(top, viewport);
            let scale = MIN_SCALE + (1.0 - MIN_SCALE) * p;
            let rise = (1.0 - p) * RISE_PX;
            set_inline_style(item, "opacity", &format!("{p:.2}"));
            set_inline_style(
                item,
                "transform",
                &format!("translateY({rise:.1}px) scale({scale:.3})"),
            );
        }
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        for item in &self.items {
            clear_inline_style(item, "opacity");
            clear_inline_style(item, "transform");
        }
    }
}
