/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Scroll-linked parallax.
//!
//! Every marked element drifts against the scroll direction by its own
//! speed factor. One instance covers all marked elements in the region.

use markup5ever_rcdom::Handle;

use crate::dom::geometry::{SceneGeometry, Viewport};
use crate::dom::{PageDocument, attr, clear_inline_style, find_all_by_class_in, set_inline_style};
use crate::widgets::{BindContext, Widget};

pub const MARKER_CLASS: &str = "parallax";
pub const SPEED_ATTR: &str = "data-parallax-speed";

const DEFAULT_SPEED: f64 = 0.3;

struct ParallaxLayer {
    node: Handle,
    speed: f64,
}

pub struct Parallax {
    layers: Vec<ParallaxLayer>,
}

pub fn bind(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let layers: Vec<ParallaxLayer> = find_all_by_class_in(ctx.region, MARKER_CLASS)
        .into_iter()
        .map(|node| {
            let speed = attr(&node, SPEED_ATTR)
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|s| s.is_finite())
                .unwrap_or(DEFAULT_SPEED);
            ParallaxLayer { node, speed }
        })
        .collect();
    if layers.is_empty() {
        return None;
    }
    Some(Box::new(Parallax { layers }))
}

impl Widget for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn on_scroll(
        &mut self,
        doc: &PageDocument,
        geometry: &dyn SceneGeometry,
        viewport: &Viewport,
    ) {
        for layer in &self.layers {
            let Some(top) = geometry.node_top(doc, &layer.node) else {
                continue;
            };
            let shift = (viewport.scroll_y - top) * layer.speed;
            set_inline_style(
                &layer.node,
                "transform",
                &format!("translateY({shift:.1}px)"),
            );
        }
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        for layer in &self.layers {
            clear_inline_style(&layer.node, "transform");
        }
    }
}
