/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Out-of-band markup retrieval.
//!
//! The controller only ever reacts to a fetch in two ways: swap on success,
//! fall back to a full navigation (or swallow, for prefetches) on failure.
//! Transport errors and non-success statuses are therefore collapsed into
//! one `FetchError`; the variants exist for logs, not for control flow.

pub mod worker;

use url::Url;

#[derive(Debug, Clone)]
pub enum FetchError {
    Network(String),
    HttpStatus(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    /// The markup is needed to complete an accepted navigation.
    Navigation,
    /// Speculative hover prefetch; failures are swallowed.
    Prefetch,
}

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub id: u64,
    pub url: Url,
    pub purpose: FetchPurpose,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub id: u64,
    pub result: Result<String, FetchError>,
}

/// Seam between the controller and whatever performs the GET. Production
/// hosts use [`worker::FetchWorker`]; tests record requests and feed results
/// straight back into the controller.
pub trait PageFetcher {
    fn begin(&mut self, request: FetchRequest);
}
