/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use orrery::nav::{ClickOutcome, NavigationPhase};

use crate::harness::{ABOUT, PROJECTS, SiteHarness};

#[test]
fn hover_then_click_swaps_with_zero_additional_network() {
    let mut site = SiteHarness::new();

    // Hover populates the cache.
    site.controller.handle_hover("/projects", None, 0);
    assert_eq!(site.request_count(), 1);
    site.complete_fetch_ok(PROJECTS, 100);

    // Click: swap proceeds straight from the cache.
    site.click("/projects", 1_000);
    site.controller.tick(1_300);

    assert_eq!(site.request_count(), 1, "no additional network calls");
    assert_eq!(site.controller.document().title().as_deref(), Some("Projects"));
    assert_eq!(
        site.controller.document().meta_content("description").as_deref(),
        Some("selected work")
    );
    assert_eq!(site.controller.viewport().scroll_y, 0.0);
    assert!(site.controller.document().to_markup().contains("fade-slider"));
}

#[test]
fn failed_fetch_assigns_location_directly() {
    let mut site = SiteHarness::new();

    site.click("/contacts", 0);
    site.controller.tick(300);
    assert_eq!(site.controller.phase(), NavigationPhase::Fetching);

    site.complete_fetch_err(500, 350);

    assert_eq!(site.controller.phase(), NavigationPhase::Idle);
    assert_eq!(
        site.host.borrow().assigned,
        vec!["https://site.example/contacts"]
    );
    assert!(site.host.borrow().pushed.is_empty());

    // The state machine is not wedged: a later navigation proceeds normally.
    site.click("/projects", 1_000);
    site.controller.tick(1_300);
    assert_eq!(site.controller.phase(), NavigationPhase::Fetching);
}

#[test]
fn rapid_double_click_runs_exactly_one_navigation() {
    let mut site = SiteHarness::new();

    assert_eq!(site.click("/projects", 0), ClickOutcome::Intercepted);
    assert_eq!(site.click("/about", 50), ClickOutcome::Intercepted);

    site.controller.tick(300);
    site.complete_fetch_ok(PROJECTS, 320);
    site.controller.tick(620);

    assert_eq!(site.controller.phase(), NavigationPhase::Idle);
    assert_eq!(site.request_count(), 1);
    assert_eq!(site.controller.current_url().path(), "/projects");
    assert_eq!(
        site.host.borrow().pushed,
        vec!["https://site.example/projects"]
    );
}

#[test]
fn popstate_during_pending_fetch_is_dropped_desynchronizing_address_bar() {
    // Documented (not corrected) behavior: going back while a fetch is in
    // flight drops the history navigation; the rendered content ends up at
    // the fetched destination even though the address bar moved.
    let mut site = SiteHarness::new();

    site.click("/projects", 0);
    site.controller.tick(300);

    let back = url::Url::parse("https://site.example/").expect("url");
    site.controller.handle_pop_state(&back, 400);

    site.complete_fetch_ok(PROJECTS, 500);
    site.controller.tick(800);

    assert_eq!(site.controller.current_url().path(), "/projects");
    assert_eq!(site.request_count(), 1);
}

#[test]
fn back_navigation_reuses_cache_and_never_pushes() {
    let mut site = SiteHarness::new();

    // Navigate to /projects (fetch + push).
    site.click("/projects", 0);
    site.controller.tick(300);
    site.complete_fetch_ok(PROJECTS, 350);
    site.controller.tick(650);

    // Navigate to /about (fetch + push).
    site.click("/about", 1_000);
    site.controller.tick(1_300);
    site.complete_fetch_ok(ABOUT, 1_350);
    site.controller.tick(1_650);
    assert_eq!(site.host.borrow().pushed.len(), 2);

    // Back to /projects: served from cache, no push, no fetch.
    let back = url::Url::parse("https://site.example/projects").expect("url");
    site.controller.handle_pop_state(&back, 2_000);
    site.controller.tick(2_300);
    site.controller.tick(2_600);

    assert_eq!(site.controller.phase(), NavigationPhase::Idle);
    assert_eq!(site.request_count(), 2);
    assert_eq!(site.host.borrow().pushed.len(), 2);
    assert_eq!(site.controller.document().title().as_deref(), Some("Projects"));
}

#[test]
fn head_sync_leaves_fields_missing_from_destination_untouched() {
    let mut site = SiteHarness::new();

    // ABOUT carries only a title; description and canonical stay as HOME's.
    site.click("/about", 0);
    site.controller.tick(300);
    site.complete_fetch_ok(ABOUT, 350);

    assert_eq!(site.controller.document().title().as_deref(), Some("About"));
    assert_eq!(
        site.controller.document().meta_content("description").as_deref(),
        Some("a studio site")
    );
    assert_eq!(
        site.controller.document().link_href("canonical").as_deref(),
        Some("https://site.example/")
    );
}

#[test]
fn globe_and_overlay_survive_every_swap() {
    let mut site = SiteHarness::new();

    for (href, markup, base) in [("/projects", PROJECTS, 0u64), ("/about", ABOUT, 1_000)] {
        site.click(href, base);
        site.controller.tick(base + 300);
        site.complete_fetch_ok(markup, base + 350);
        site.controller.tick(base + 650);

        let doc = site.controller.document();
        assert!(doc.find_first_by_class("spinning-globe").is_some());
        assert!(doc.find_first_by_class("page-transition").is_some());
        assert!(doc.find_first_by_class("page-content").is_some());
    }
}
