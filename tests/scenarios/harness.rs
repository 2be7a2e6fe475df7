/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Shared harness for cross-module scenarios: a controller wired to
//! recording collaborators, plus the site's page fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use orrery::config::NavConfig;
use orrery::dom::geometry::FixedRowGeometry;
use orrery::fetch::{FetchError, FetchRequest, PageFetcher};
use orrery::nav::{ClickOutcome, HostShell, LinkClick, NavigationController};
use orrery::store::{MemorySessionStore, SessionStore};

pub const HOME: &str = r#"<html><head>
    <title>Home</title>
    <meta name="description" content="a studio site">
    <link rel="canonical" href="https://site.example/">
    </head><body>
    <div class="page-transition"></div>
    <div class="spinning-globe"><video></video></div>
    <main class="page-content">
      <h1 class="reveal">Home</h1>
    </main>
    </body></html>"#;

pub const PROJECTS: &str = r#"<html><head>
    <title>Projects</title>
    <meta name="description" content="selected work">
    <link rel="canonical" href="https://site.example/projects">
    </head><body>
    <main class="page-content">
      <div class="fade-slider">
        <div class="slide">one</div>
        <div class="slide">two</div>
        <span class="slide-count"></span>
      </div>
      <div class="cascade">
        <div class="cascade-item">a</div>
        <div class="cascade-item">b</div>
      </div>
      <video class="lazy-video" data-src="/media/reel.mp4"></video>
    </main></body></html>"#;

pub const ABOUT: &str = r#"<html><head><title>About</title></head><body>
    <main class="page-content">
      <span class="typed-text" data-phrases="design|code">design</span>
      <ol class="numbered-list"><li>craft</li><li>ship</li></ol>
      <div class="card cornered"></div>
    </main></body></html>"#;

#[derive(Default)]
pub struct HostEffects {
    pub assigned: Vec<String>,
    pub pushed: Vec<String>,
}

struct RecordingHost(Rc<RefCell<HostEffects>>);

impl HostShell for RecordingHost {
    fn assign_location(&mut self, url: &Url) {
        self.0.borrow_mut().assigned.push(url.to_string());
    }

    fn push_history(&mut self, url: &Url) {
        self.0.borrow_mut().pushed.push(url.to_string());
    }
}

struct RecordingFetcher(Rc<RefCell<Vec<FetchRequest>>>);

impl PageFetcher for RecordingFetcher {
    fn begin(&mut self, request: FetchRequest) {
        self.0.borrow_mut().push(request);
    }
}

struct SharedStore(Rc<RefCell<MemorySessionStore>>);

impl SessionStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

pub struct SiteHarness {
    pub controller: NavigationController,
    pub fetches: Rc<RefCell<Vec<FetchRequest>>>,
    pub host: Rc<RefCell<HostEffects>>,
    pub store: Rc<RefCell<MemorySessionStore>>,
}

impl SiteHarness {
    pub fn new() -> Self {
        Self::with_markup_and_store(
            HOME,
            "https://site.example/",
            Rc::new(RefCell::new(MemorySessionStore::new())),
        )
    }

    /// A fresh controller (a "new page load") over an existing session
    /// store, as happens after a full navigation.
    pub fn with_markup_and_store(
        markup: &str,
        url: &str,
        store: Rc<RefCell<MemorySessionStore>>,
    ) -> Self {
        let fetches = Rc::new(RefCell::new(Vec::new()));
        let host = Rc::new(RefCell::new(HostEffects::default()));
        let controller = NavigationController::new(
            markup,
            Url::parse(url).expect("harness url"),
            NavConfig::default(),
            Box::new(RecordingFetcher(fetches.clone())),
            Box::new(RecordingHost(host.clone())),
            Box::new(SharedStore(store.clone())),
            Box::new(FixedRowGeometry::default()),
        );
        Self {
            controller,
            fetches,
            host,
            store,
        }
    }

    pub fn click(&mut self, href: &str, now_ms: u64) -> ClickOutcome {
        self.controller.handle_click(
            &LinkClick {
                href: href.to_string(),
                target: None,
            },
            now_ms,
        )
    }

    pub fn request_count(&self) -> usize {
        self.fetches.borrow().len()
    }

    fn last_request_id(&self) -> u64 {
        self.fetches
            .borrow()
            .last()
            .expect("a fetch request should be outstanding")
            .id
    }

    pub fn complete_fetch_ok(&mut self, markup: &str, now_ms: u64) {
        let id = self.last_request_id();
        self.controller
            .handle_fetch_result(id, Ok(markup.to_string()), now_ms);
    }

    pub fn complete_fetch_err(&mut self, status: u16, now_ms: u64) {
        let id = self.last_request_id();
        self.controller
            .handle_fetch_result(id, Err(FetchError::HttpStatus(status)), now_ms);
    }
}
