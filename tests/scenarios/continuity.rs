/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use orrery::media::{STORE_KEY_OFFSET, STORE_KEY_SAVED_AT};
use orrery::store::SessionStore;

use crate::harness::{HOME, SiteHarness};

#[test]
fn globe_position_carries_across_a_full_page_load() {
    let mut site = SiteHarness::new();

    // Metadata arrives, playback starts at zero and runs for 8 seconds.
    site.controller.on_media_metadata_loaded(10.0, 0);
    site.controller.tick(0);
    site.controller.tick(8_000);
    site.controller.on_page_hide(8_000);

    // Five wall-clock seconds later the next page load restores:
    // (8 + 5) mod 10 = 3.
    let mut next = SiteHarness::with_markup_and_store(
        HOME,
        "https://site.example/projects",
        site.store.clone(),
    );
    next.controller.on_media_metadata_loaded(10.0, 13_000);

    assert!((next.controller.playback().current_time_secs - 3.0).abs() < 1e-9);
    assert!(!next.controller.playback().paused);
}

#[test]
fn multiple_full_loops_away_still_land_inside_the_loop() {
    let mut site = SiteHarness::new();
    site.controller.on_media_metadata_loaded(10.0, 0);
    site.controller.tick(0);
    site.controller.tick(7_000);
    site.controller.on_page_hide(7_000);

    // 95 seconds elapse: (7 + 95) mod 10 = 2.
    let mut next =
        SiteHarness::with_markup_and_store(HOME, "https://site.example/about", site.store.clone());
    next.controller.on_media_metadata_loaded(10.0, 102_000);

    let restored = next.controller.playback().current_time_secs;
    assert!((0.0..10.0).contains(&restored));
    assert!((restored - 2.0).abs() < 1e-9);
}

#[test]
fn paused_media_saves_nothing() {
    let mut site = SiteHarness::new();
    // Duration is known but the element never started playing (autoplay
    // rejected and no canplay retry succeeded).
    site.controller.on_media_metadata_loaded(10.0, 0);
    site.controller.on_media_play_rejected();
    site.controller.on_page_hide(4_000);

    assert!(site.store.borrow().get(STORE_KEY_OFFSET).is_none());
    assert!(site.store.borrow().get(STORE_KEY_SAVED_AT).is_none());
}

#[test]
fn garbage_in_the_session_store_is_ignored() {
    let site = SiteHarness::new();
    site.store.borrow_mut().set(STORE_KEY_OFFSET, "NaN-ish rubbish");
    site.store.borrow_mut().set(STORE_KEY_SAVED_AT, "yesterday");

    let mut next =
        SiteHarness::with_markup_and_store(HOME, "https://site.example/", site.store.clone());
    next.controller.on_media_metadata_loaded(10.0, 5_000);

    // Playback starts, position untouched.
    assert!(!next.controller.playback().paused);
    assert_eq!(next.controller.playback().current_time_secs, 0.0);
}

#[test]
fn in_place_navigation_does_not_touch_the_media_element() {
    let mut site = SiteHarness::new();
    site.controller.on_media_metadata_loaded(10.0, 0);
    site.controller.tick(0);

    site.click("/projects", 1_000);
    site.controller.tick(1_300);
    site.complete_fetch_ok(crate::harness::PROJECTS, 1_350);
    site.controller.tick(1_650);

    // The swap replaced the content region only; playback ran continuously
    // through the whole navigation.
    assert!(!site.controller.playback().paused);
    assert!((site.controller.playback().current_time_secs - 1.65).abs() < 1e-9);
}
