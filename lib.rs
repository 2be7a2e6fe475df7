/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Orrery is a host-embeddable page-navigation engine for sites that swap a
//! single content region in place instead of reloading. It owns the
//! navigation state machine, a hover-driven prefetch cache, the content swap
//! against an in-memory HTML document, the ephemeral-widget lifecycle, and
//! the playback-continuity tracker for the persistent looping media element.
//!
//! The embedding host keeps the real browser surface: it delivers click,
//! hover, history, scroll, and media events; supplies wall-clock time on
//! every call; resolves element geometry; and applies location/history side
//! effects. Everything else runs headless, which is also how the engine is
//! tested.

pub mod cache;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod media;
pub mod nav;
pub mod store;
pub mod widgets;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
