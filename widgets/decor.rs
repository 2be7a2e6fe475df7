/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Decorative fillers: corner ornaments and numbered-list indices.
//!
//! Both are idempotent — markup that already ships its ornaments or indices
//! (or a region bound twice) is left alone. Teardown removes only what this
//! instance injected.

use markup5ever_rcdom::Handle;

use crate::dom::{
    PageDocument, create_element, create_text, append_child, child_elements, detach,
    find_all_by_class_in, find_first_by_class_in, is_element_named, prepend_child,
};
use crate::widgets::{BindContext, Widget};

pub const CORNERED_CLASS: &str = "cornered";
pub const CORNER_CLASS: &str = "corner";
pub const NUMBERED_LIST_CLASS: &str = "numbered-list";
pub const LIST_INDEX_CLASS: &str = "list-index";

const CORNER_POSITIONS: [&str; 4] = ["tl", "tr", "bl", "br"];

pub struct CornerOrnaments {
    injected: Vec<Handle>,
}

pub fn bind_corner_ornaments(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let frames = find_all_by_class_in(ctx.region, CORNERED_CLASS);
    if frames.is_empty() {
        return None;
    }
    let mut injected = Vec::new();
    for frame in frames {
        // Skip frames that already carry their ornaments.
        if find_first_by_class_in(&frame, CORNER_CLASS).is_some() {
            continue;
        }
        for position in CORNER_POSITIONS {
            let class = format!("{CORNER_CLASS} {CORNER_CLASS}--{position}");
            let corner = create_element("span", &[("class", class.as_str())]);
            append_child(&frame, &corner);
            injected.push(corner);
        }
    }
    Some(Box::new(CornerOrnaments { injected }))
}

impl Widget for CornerOrnaments {
    fn name(&self) -> &'static str {
        "corner-ornaments"
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        for corner in &self.injected {
            detach(corner);
        }
    }
}

pub struct NumberedList {
    injected: Vec<Handle>,
}

pub fn bind_numbered_list(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let lists = find_all_by_class_in(ctx.region, NUMBERED_LIST_CLASS);
    if lists.is_empty() {
        return None;
    }
    let mut injected = Vec::new();
    for list in lists {
        for (idx, item) in child_elements(&list)
            .into_iter()
            .filter(|el| is_element_named(el, "li"))
            .enumerate()
        {
            // Already populated entries keep their index.
            if find_first_by_class_in(&item, LIST_INDEX_CLASS).is_some() {
                continue;
            }
            let index = create_element("span", &[("class", LIST_INDEX_CLASS)]);
            append_child(&index, &create_text(&format!("{:02}", idx + 1)));
            prepend_child(&item, &index);
            injected.push(index);
        }
    }
    Some(Box::new(NumberedList { injected }))
}

impl Widget for NumberedList {
    fn name(&self) -> &'static str {
        "numbered-list"
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        for index in &self.injected {
            detach(index);
        }
    }
}
