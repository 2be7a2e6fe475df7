/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Content-region swap.
//!
//! Replaces the live document's content region with the one parsed out of
//! fetched markup, synchronizes head metadata, and neutralizes entrance
//! animations on the fresh region (the page has already been shown once this
//! session, so reveal effects must not replay). Fade sequencing is expressed
//! as inline style overrides that the controller applies and later clears.

use markup5ever_rcdom::Handle;

use crate::dom::{
    PageDocument, add_class, clear_inline_style, find_all_by_class_in, replace_node,
    set_inline_style,
};

/// Marker class of the swappable content region.
pub const CONTENT_REGION_CLASS: &str = "page-content";
/// Marker class of the full-screen transition overlay.
pub const OVERLAY_CLASS: &str = "page-transition";
/// Marker class of the container holding the persistent looping video.
pub const GLOBE_CLASS: &str = "spinning-globe";

/// Elements that animate in on first view carry this class...
pub const REVEAL_CLASS: &str = "reveal";
/// ...and this one once their entrance has played.
pub const REVEALED_CLASS: &str = "is-revealed";
/// Placeholder elements that only exist to mask content until its entrance
/// animation runs.
pub const VEIL_CLASS: &str = "reveal-veil";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    /// The live document has no content region to swap out.
    MissingLiveRegion,
    /// The fetched markup has no content region to swap in.
    MissingIncomingRegion,
}

/// Swap the live content region for the incoming document's one and bring
/// the live head metadata in line with the incoming head. Returns the handle
/// of the freshly inserted region, ready for widget rebinding.
///
/// Head fields absent from the incoming document are left untouched.
pub fn swap_content(
    live: &PageDocument,
    incoming: &PageDocument,
) -> Result<Handle, StructuralError> {
    let old_region = live
        .find_first_by_class(CONTENT_REGION_CLASS)
        .ok_or(StructuralError::MissingLiveRegion)?;
    let new_region = incoming
        .find_first_by_class(CONTENT_REGION_CLASS)
        .ok_or(StructuralError::MissingIncomingRegion)?;

    replace_node(&old_region, &new_region);

    if let Some(title) = incoming.title() {
        live.set_title(&title);
    }
    if let Some(href) = incoming.link_href("canonical") {
        live.set_link_href("canonical", &href);
    }
    if let Some(description) = incoming.meta_content("description") {
        live.set_meta_content("description", &description);
    }

    neutralize_entrance_animations(&new_region);

    Ok(new_region)
}

/// Force entrance animations on the region into their settled end state and
/// hide their placeholder veils.
pub fn neutralize_entrance_animations(region: &Handle) {
    for el in find_all_by_class_in(region, REVEAL_CLASS) {
        add_class(&el, REVEALED_CLASS);
        set_inline_style(&el, "opacity", "1");
    }
    for veil in find_all_by_class_in(region, VEIL_CLASS) {
        set_inline_style(&veil, "display", "none");
    }
}

/// Start fading the overlay to opaque ahead of a swap or a full reload.
pub fn begin_overlay_fade_to_opaque(doc: &PageDocument, fade_ms: u64) {
    let Some(overlay) = doc.find_first_by_class(OVERLAY_CLASS) else {
        return;
    };
    set_inline_style(&overlay, "transition", &format!("opacity {fade_ms}ms ease-in"));
    set_inline_style(&overlay, "opacity", "1");
    set_inline_style(&overlay, "pointer-events", "all");
}

/// Start fading the overlay back out, revealing the (new) content beneath.
pub fn begin_overlay_fade_to_clear(doc: &PageDocument, fade_ms: u64) {
    let Some(overlay) = doc.find_first_by_class(OVERLAY_CLASS) else {
        return;
    };
    set_inline_style(&overlay, "transition", &format!("opacity {fade_ms}ms ease-out"));
    set_inline_style(&overlay, "opacity", "0");
    set_inline_style(&overlay, "pointer-events", "none");
}

/// Start fading the current region out ahead of its replacement.
pub fn begin_region_fade_out(region: &Handle, fade_ms: u64) {
    set_inline_style(region, "transition", &format!("opacity {fade_ms}ms ease-in"));
    set_inline_style(region, "opacity", "0");
}

/// Drive the freshly swapped region's fade-in.
pub fn begin_region_fade_in(region: &Handle, fade_ms: u64) {
    set_inline_style(region, "transition", &format!("opacity {fade_ms}ms ease-out"));
    set_inline_style(region, "opacity", "1");
}

/// Drop the inline fade overrides once the transition has run, so later CSS
/// rules apply unimpeded.
pub fn clear_fade_overrides(doc: &PageDocument, region: &Handle) {
    clear_inline_style(region, "transition");
    clear_inline_style(region, "opacity");
    if let Some(overlay) = doc.find_first_by_class(OVERLAY_CLASS) {
        clear_inline_style(&overlay, "transition");
    }
}
