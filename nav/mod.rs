/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Navigation state machine.
//!
//! One controller instance owns all mutable navigation state: the current
//! phase, the live document, the prefetch cache, the widget registry, and
//! the playback model. At most one navigation is in flight; the guard is a
//! plain state check on the host's event thread, advisory by design, and a
//! second request while busy is dropped rather than queued or cancelled.
//!
//! Fades are deadline-driven: the deadline lives inside the active state
//! variant and elapses in `tick(now_ms)`, so a timer belonging to a
//! navigation that has since been replaced cannot exist, let alone mutate
//! replaced nodes.
//!
//! Every failure path (network, structural) degrades to a hard navigation
//! fallback: reset to idle and hand the URL to the browser for a normal full
//! page load. The user never sees a half-transitioned page.

pub mod link_policy;

use std::collections::HashMap;
use std::mem;

use log::{debug, trace, warn};
use url::Url;

use crate::cache::{PrefetchCache, normalized_path};
use crate::config::{NavConfig, NavigationMode};
use crate::dom::PageDocument;
use crate::dom::geometry::{SceneGeometry, Viewport};
use crate::dom::swap::{self, CONTENT_REGION_CLASS};
use crate::fetch::{FetchError, FetchPurpose, FetchRequest, PageFetcher};
use crate::media::{self, MediaPlayback};
use crate::store::SessionStore;
use crate::widgets::{BindContext, WidgetLifecycle, rebind_widgets};

/// Browser-level side effects the engine cannot perform itself.
pub trait HostShell {
    /// Standard full browser navigation; the hard fallback and the
    /// full-reload mode both end here.
    fn assign_location(&mut self, url: &Url);
    /// Push one session-history record for a completed in-place navigation.
    fn push_history(&mut self, url: &Url);
}

#[derive(Debug, Clone)]
pub struct LinkClick {
    pub href: String,
    /// The link's `target` attribute, verbatim.
    pub target: Option<String>,
}

/// Tells the host whether to suppress the browser's default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Intercepted,
    PassThrough,
}

/// Observable phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    FadingOut,
    Fetching,
    FadingIn,
}

struct NavDestination {
    url: Url,
    push_history: bool,
}

enum NavigationState {
    Idle,
    FadingOut {
        dest: NavDestination,
        until_ms: u64,
    },
    Fetching {
        dest: NavDestination,
        request_id: u64,
    },
    FadingIn {
        region: markup5ever_rcdom::Handle,
        until_ms: u64,
    },
}

pub struct NavigationController {
    config: NavConfig,
    state: NavigationState,
    document: PageDocument,
    viewport: Viewport,
    cache: PrefetchCache,
    widgets: WidgetLifecycle,
    fetcher: Box<dyn PageFetcher>,
    host: Box<dyn HostShell>,
    store: Box<dyn SessionStore>,
    geometry: Box<dyn SceneGeometry>,
    playback: MediaPlayback,
    current_url: Url,
    next_request_id: u64,
    /// Outstanding speculative fetches by request id, mapped to their cache
    /// key.
    pending_prefetches: HashMap<u64, String>,
    /// First-load reveal deadline, armed by `on_page_ready`.
    reveal_at_ms: Option<u64>,
    /// One extra playback attempt is allowed after a rejected autoplay.
    play_retry_armed: bool,
}

impl NavigationController {
    pub fn new(
        initial_markup: &str,
        current_url: Url,
        config: NavConfig,
        fetcher: Box<dyn PageFetcher>,
        host: Box<dyn HostShell>,
        store: Box<dyn SessionStore>,
        geometry: Box<dyn SceneGeometry>,
    ) -> Self {
        Self {
            config,
            state: NavigationState::Idle,
            document: PageDocument::parse(initial_markup),
            viewport: Viewport::new(0.0),
            cache: PrefetchCache::new(),
            widgets: WidgetLifecycle::new(),
            fetcher,
            host,
            store,
            geometry,
            playback: MediaPlayback::new(),
            current_url,
            next_request_id: 1,
            pending_prefetches: HashMap::new(),
            reveal_at_ms: None,
            play_retry_armed: false,
        }
    }

    pub fn phase(&self) -> NavigationPhase {
        match self.state {
            NavigationState::Idle => NavigationPhase::Idle,
            NavigationState::FadingOut { .. } => NavigationPhase::FadingOut,
            NavigationState::Fetching { .. } => NavigationPhase::Fetching,
            NavigationState::FadingIn { .. } => NavigationPhase::FadingIn,
        }
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn current_url(&self) -> &Url {
        &self.current_url
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn playback(&self) -> &MediaPlayback {
        &self.playback
    }

    pub fn widgets(&self) -> &WidgetLifecycle {
        &self.widgets
    }

    pub fn cache(&self) -> &PrefetchCache {
        &self.cache
    }

    /// The initial document is live: mask it with the overlay and arm the
    /// reveal, which also performs the first widget bind.
    pub fn on_page_ready(&mut self, now_ms: u64) {
        if let Some(overlay) = self.document.find_first_by_class(swap::OVERLAY_CLASS) {
            crate::dom::set_inline_style(&overlay, "opacity", "1");
            crate::dom::set_inline_style(&overlay, "pointer-events", "all");
        }
        self.reveal_at_ms = Some(now_ms + self.config.reveal_delay_ms);
    }

    pub fn handle_resize(&mut self, viewport_height: f64) {
        self.viewport.height = viewport_height;
    }

    pub fn handle_scroll(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
        self.widgets
            .scroll_all(&self.document, &*self.geometry, &self.viewport);
    }

    /// Route a document click. Eligible links are intercepted even while a
    /// navigation is in flight — the in-flight guard lives in
    /// [`Self::navigate_to`], which simply drops the surplus request.
    pub fn handle_click(&mut self, click: &LinkClick, now_ms: u64) -> ClickOutcome {
        let Some(dest) =
            link_policy::eligible_destination(&click.href, click.target.as_deref(), &self.current_url)
        else {
            return ClickOutcome::PassThrough;
        };
        self.navigate_to(dest, true, now_ms);
        ClickOutcome::Intercepted
    }

    /// Hover-intent over a link: speculatively fetch eligible destinations.
    /// Fire-and-forget; completion lands in the cache, failure is swallowed.
    pub fn handle_hover(&mut self, href: &str, target: Option<&str>, _now_ms: u64) {
        if !self.config.hover_prefetch || self.config.mode != NavigationMode::ContentSwap {
            return;
        }
        let Some(dest) = link_policy::eligible_destination(href, target, &self.current_url) else {
            return;
        };
        let path = normalized_path(&dest);
        if path == self.current_url.path() {
            return;
        }
        if !self.cache.mark_in_flight(&path) {
            // Cached or already being fetched: never refetch.
            return;
        }
        let id = self.next_request();
        trace!("prefetching {path} (request {id})");
        self.pending_prefetches.insert(id, path);
        self.fetcher.begin(FetchRequest {
            id,
            url: dest,
            purpose: FetchPurpose::Prefetch,
        });
    }

    /// Back/forward landed on `url`. The browser has already updated the
    /// session history, so the re-navigation must not push. Dropped while a
    /// navigation is in flight — a documented race: the address bar can
    /// desynchronize from the rendered content until the next navigation.
    pub fn handle_pop_state(&mut self, url: &Url, now_ms: u64) {
        if !matches!(self.state, NavigationState::Idle) {
            debug!("history navigation while in flight; dropping");
            return;
        }
        self.navigate_to(url.clone(), false, now_ms);
    }

    /// Accept a navigation if idle: start the fade-out and record its
    /// deadline. Everything else happens in `tick`.
    pub fn navigate_to(&mut self, url: Url, push_history: bool, now_ms: u64) {
        if !matches!(self.state, NavigationState::Idle) {
            debug!("navigation already in flight; dropping request for {url}");
            return;
        }
        trace!("navigation accepted: {url}");
        swap::begin_overlay_fade_to_opaque(&self.document, self.config.fade_out_ms);
        if let Some(region) = self.document.find_first_by_class(CONTENT_REGION_CLASS) {
            swap::begin_region_fade_out(&region, self.config.fade_out_ms);
        }
        self.state = NavigationState::FadingOut {
            dest: NavDestination { url, push_history },
            until_ms: now_ms + self.config.fade_out_ms,
        };
    }

    /// Advance deadline-driven work: the first-load reveal, fade phases, the
    /// playback model, and time-driven widgets.
    pub fn tick(&mut self, now_ms: u64) {
        self.playback.advance_to(now_ms);

        if self.reveal_at_ms.is_some_and(|at| now_ms >= at) {
            self.reveal_at_ms = None;
            swap::begin_overlay_fade_to_clear(&self.document, self.config.fade_in_ms);
            self.bind_current_region(now_ms);
        }

        let fade_out_due = matches!(
            &self.state,
            NavigationState::FadingOut { until_ms, .. } if now_ms >= *until_ms
        );
        if fade_out_due {
            let state = mem::replace(&mut self.state, NavigationState::Idle);
            if let NavigationState::FadingOut { dest, .. } = state {
                self.finish_fade_out(dest, now_ms);
            }
        }

        let fade_in_due = matches!(
            &self.state,
            NavigationState::FadingIn { until_ms, .. } if now_ms >= *until_ms
        );
        if fade_in_due {
            let state = mem::replace(&mut self.state, NavigationState::Idle);
            if let NavigationState::FadingIn { region, .. } = state {
                swap::clear_fade_overrides(&self.document, &region);
            }
        }

        self.widgets.tick_all(&self.document, &*self.geometry, now_ms);
    }

    /// Deliver a fetch completion. Anything that matches neither the pending
    /// navigation nor an outstanding prefetch is stale and ignored.
    pub fn handle_fetch_result(
        &mut self,
        id: u64,
        result: Result<String, FetchError>,
        now_ms: u64,
    ) {
        let is_nav_fetch = matches!(
            &self.state,
            NavigationState::Fetching { request_id, .. } if *request_id == id
        );
        if is_nav_fetch {
            let state = mem::replace(&mut self.state, NavigationState::Idle);
            let NavigationState::Fetching { dest, .. } = state else {
                return;
            };
            match result {
                Ok(markup) => {
                    self.cache
                        .insert(&normalized_path(&dest.url), markup.clone(), now_ms);
                    self.complete_swap(&markup, dest, now_ms);
                },
                Err(err) => {
                    warn!("fetch for {} failed ({err:?}); falling back to full navigation", dest.url);
                    self.hard_fallback(&dest.url);
                },
            }
            return;
        }

        if let Some(path) = self.pending_prefetches.remove(&id) {
            match result {
                Ok(markup) => self.cache.insert(&path, markup, now_ms),
                Err(err) => {
                    debug!("prefetch of {path} failed ({err:?}); ignoring");
                    self.cache.abandon_in_flight(&path);
                },
            }
            return;
        }

        trace!("ignoring completion for unknown fetch request {id}");
    }

    /// Navigate-away: persist the playback position (no-op unless playing
    /// with known duration).
    pub fn on_page_hide(&mut self, now_ms: u64) {
        media::save_position(&self.playback, &mut *self.store, now_ms);
    }

    /// The tracked media element's duration is now known: restore the
    /// persisted position with elapsed-time compensation and start playback.
    pub fn on_media_metadata_loaded(&mut self, duration_secs: f64, now_ms: u64) {
        self.playback.duration_secs = Some(duration_secs);
        if media::restore_and_play(&mut self.playback, &*self.store, now_ms) {
            self.play_retry_armed = true;
        }
    }

    /// The host's play attempt was rejected (blocked autoplay). Soft
    /// failure: stay paused, keep the single `canplay` retry armed.
    pub fn on_media_play_rejected(&mut self) {
        debug!("media autoplay rejected; keeping playback paused");
        self.playback.paused = true;
    }

    /// `canplay` fired. If the element is still paused and the retry is
    /// armed, try exactly once more.
    pub fn on_media_can_play(&mut self, now_ms: u64) {
        if !mem::take(&mut self.play_retry_armed) || !self.playback.paused {
            return;
        }
        media::restore_and_play(&mut self.playback, &*self.store, now_ms);
    }

    fn next_request(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    fn finish_fade_out(&mut self, dest: NavDestination, now_ms: u64) {
        match self.config.mode {
            NavigationMode::FullReload => {
                // The globe keeps spinning across the full load.
                media::save_position(&self.playback, &mut *self.store, now_ms);
                debug!("full reload to {}", dest.url);
                self.state = NavigationState::Idle;
                self.host.assign_location(&dest.url);
            },
            NavigationMode::ContentSwap => {
                let path = normalized_path(&dest.url);
                if let Some(page) = self.cache.get(&path) {
                    trace!("cache hit for {path}; swapping without network");
                    let markup = page.markup.clone();
                    self.complete_swap(&markup, dest, now_ms);
                } else {
                    let id = self.next_request();
                    self.fetcher.begin(FetchRequest {
                        id,
                        url: dest.url.clone(),
                        purpose: FetchPurpose::Navigation,
                    });
                    self.state = NavigationState::Fetching {
                        dest,
                        request_id: id,
                    };
                }
            },
        }
    }

    fn complete_swap(&mut self, markup: &str, dest: NavDestination, now_ms: u64) {
        let incoming = PageDocument::parse(markup);
        match swap::swap_content(&self.document, &incoming) {
            Err(err) => {
                warn!("content swap failed ({err:?}); falling back to full navigation");
                self.hard_fallback(&dest.url);
            },
            Ok(region) => {
                if dest.push_history {
                    self.host.push_history(&dest.url);
                }
                self.current_url = dest.url;
                self.viewport.scroll_y = 0.0;

                self.widgets.cleanup(&self.document);
                rebind_widgets(
                    &mut self.widgets,
                    &BindContext {
                        doc: &self.document,
                        region: &region,
                        config: &self.config,
                        now_ms,
                    },
                );

                swap::begin_region_fade_in(&region, self.config.fade_in_ms);
                swap::begin_overlay_fade_to_clear(&self.document, self.config.fade_in_ms);
                self.state = NavigationState::FadingIn {
                    region,
                    until_ms: now_ms + self.config.fade_in_ms,
                };
            },
        }
    }

    fn hard_fallback(&mut self, url: &Url) {
        self.state = NavigationState::Idle;
        self.host.assign_location(url);
    }

    fn bind_current_region(&mut self, now_ms: u64) {
        let Some(region) = self.document.find_first_by_class(CONTENT_REGION_CLASS) else {
            warn!("document has no content region; widgets stay unbound");
            return;
        };
        self.widgets.cleanup(&self.document);
        rebind_widgets(
            &mut self.widgets,
            &BindContext {
                doc: &self.document,
                region: &region,
                config: &self.config,
                now_ms,
            },
        );
    }
}
