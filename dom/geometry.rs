/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Element geometry seam.
//!
//! Scroll-driven widgets need element positions, and the engine performs no
//! layout of its own: the embedding host resolves geometry from its real
//! layout engine. Tests use the fixed-row stub.

use markup5ever_rcdom::Handle;

use crate::dom::{PageDocument, elements_in};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll offset in px.
    pub scroll_y: f64,
    /// Visible height in px.
    pub height: f64,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            height,
        }
    }

    /// Document-space y coordinate of the bottom edge of the viewport.
    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}

pub trait SceneGeometry {
    /// Document-space y coordinate of the element's top edge, if the host
    /// can resolve it.
    fn node_top(&self, doc: &PageDocument, node: &Handle) -> Option<f64>;

    /// Rendered height of the element.
    fn node_height(&self, doc: &PageDocument, node: &Handle) -> Option<f64>;

    /// Rendered width of the element.
    fn node_width(&self, doc: &PageDocument, node: &Handle) -> Option<f64>;
}

/// Deterministic stand-in geometry: every element occupies one fixed-height
/// row in document order. Good enough to drive scroll-linked behavior in
/// tests and host-less embeddings.
#[derive(Debug, Clone, Copy)]
pub struct FixedRowGeometry {
    pub row_height: f64,
    pub row_width: f64,
}

impl Default for FixedRowGeometry {
    fn default() -> Self {
        Self {
            row_height: 100.0,
            row_width: 800.0,
        }
    }
}

impl FixedRowGeometry {
    fn row_index(&self, doc: &PageDocument, node: &Handle) -> Option<usize> {
        elements_in(&doc.document_node())
            .iter()
            .position(|el| std::rc::Rc::ptr_eq(el, node))
    }
}

impl SceneGeometry for FixedRowGeometry {
    fn node_top(&self, doc: &PageDocument, node: &Handle) -> Option<f64> {
        self.row_index(doc, node).map(|i| i as f64 * self.row_height)
    }

    fn node_height(&self, _doc: &PageDocument, _node: &Handle) -> Option<f64> {
        Some(self.row_height)
    }

    fn node_width(&self, _doc: &PageDocument, _node: &Handle) -> Option<f64> {
        Some(self.row_width)
    }
}
