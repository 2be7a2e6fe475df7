/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Looping typed-text effect.
//!
//! Types each phrase character by character, holds it, deletes it, and moves
//! on to the next phrase, cycling forever. Phrases come from the element's
//! `data-phrases` attribute (pipe-separated) with the initial text as the
//! fallback.

use markup5ever_rcdom::Handle;

use crate::dom::geometry::SceneGeometry;
use crate::dom::{PageDocument, attr, find_first_by_class_in, set_text_content, text_content};
use crate::widgets::{BindContext, Widget};

pub const MARKER_CLASS: &str = "typed-text";
pub const PHRASES_ATTR: &str = "data-phrases";

const TYPE_STEP_MS: u64 = 70;
const DELETE_STEP_MS: u64 = 40;
const HOLD_MS: u64 = 1_600;

enum Phase {
    Typing { chars: usize },
    Holding,
    Deleting { chars: usize },
}

pub struct TypedText {
    node: Handle,
    phrases: Vec<String>,
    phrase_idx: usize,
    phase: Phase,
    next_step_ms: u64,
}

pub fn bind(ctx: &BindContext<'_>) -> Option<Box<dyn Widget>> {
    let node = find_first_by_class_in(ctx.region, MARKER_CLASS)?;
    let phrases: Vec<String> = match attr(&node, PHRASES_ATTR) {
        Some(raw) => raw
            .split('|')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        None => {
            let initial = text_content(&node).trim().to_string();
            if initial.is_empty() {
                Vec::new()
            } else {
                vec![initial]
            }
        },
    };
    if phrases.is_empty() {
        return None;
    }

    set_text_content(&node, "");
    Some(Box::new(TypedText {
        node,
        phrases,
        phrase_idx: 0,
        phase: Phase::Typing { chars: 0 },
        next_step_ms: ctx.now_ms + TYPE_STEP_MS,
    }))
}

impl TypedText {
    fn phrase(&self) -> &str {
        &self.phrases[self.phrase_idx]
    }

    fn render(&self, chars: usize) {
        let prefix: String = self.phrase().chars().take(chars).collect();
        set_text_content(&self.node, &prefix);
    }

    fn step(&mut self) {
        let phrase_len = self.phrase().chars().count();
        match self.phase {
            Phase::Typing { chars } => {
                let chars = (chars + 1).min(phrase_len);
                self.render(chars);
                if chars == phrase_len {
                    self.phase = Phase::Holding;
                    self.next_step_ms += HOLD_MS;
                } else {
                    self.phase = Phase::Typing { chars };
                    self.next_step_ms += TYPE_STEP_MS;
                }
            },
            Phase::Holding => {
                let chars = phrase_len.saturating_sub(1);
                self.render(chars);
                self.phase = Phase::Deleting { chars };
                self.next_step_ms += DELETE_STEP_MS;
            },
            Phase::Deleting { chars: 0 } => {
                self.phrase_idx = (self.phrase_idx + 1) % self.phrases.len();
                self.phase = Phase::Typing { chars: 0 };
                self.next_step_ms += TYPE_STEP_MS;
            },
            Phase::Deleting { chars } => {
                let chars = chars - 1;
                self.render(chars);
                self.phase = Phase::Deleting { chars };
                self.next_step_ms += DELETE_STEP_MS;
            },
        }
    }
}

impl Widget for TypedText {
    fn name(&self) -> &'static str {
        "typed-text"
    }

    fn on_tick(&mut self, _doc: &PageDocument, _geometry: &dyn SceneGeometry, now_ms: u64) {
        while now_ms >= self.next_step_ms {
            self.step();
        }
    }

    fn teardown(&mut self, _doc: &PageDocument) {
        // Leave the element readable: the full first phrase is its resting
        // content.
        set_text_content(&self.node, &self.phrases[0]);
    }
}
