/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use orrery::dom::{attr, find_all_by_class_in, has_class, inline_style, text_content};

use crate::harness::{ABOUT, PROJECTS, SiteHarness};

fn navigate(site: &mut SiteHarness, href: &str, markup: &str, base_ms: u64) {
    site.click(href, base_ms);
    site.controller.tick(base_ms + 300);
    site.complete_fetch_ok(markup, base_ms + 350);
    site.controller.tick(base_ms + 650);
}

#[test]
fn widget_set_is_drained_and_repopulated_wholesale_on_each_swap() {
    let mut site = SiteHarness::new();
    site.controller.on_page_ready(0);
    site.controller.tick(80);
    assert_eq!(site.controller.widgets().live_count(), 0);

    navigate(&mut site, "/projects", PROJECTS, 1_000);
    let mut names = site.controller.widgets().live_names();
    names.sort_unstable();
    assert_eq!(names, vec!["cascade", "fade-carousel", "lazy-video"]);

    navigate(&mut site, "/about", ABOUT, 3_000);
    let mut names = site.controller.widgets().live_names();
    names.sort_unstable();
    assert_eq!(names, vec!["corner-ornaments", "numbered-list", "typed-text"]);
}

#[test]
fn carousel_runs_against_the_swapped_region() {
    let mut site = SiteHarness::new();
    navigate(&mut site, "/projects", PROJECTS, 0);

    let fraction = site
        .controller
        .document()
        .find_first_by_class("slide-count")
        .expect("fraction");
    assert_eq!(text_content(&fraction).trim(), "1 / 2");

    // Auto-advance five seconds after the widget bound (at swap time).
    site.controller.tick(350 + 5_000);
    assert_eq!(text_content(&fraction).trim(), "2 / 2");
}

#[test]
fn decor_fillers_populate_the_about_page() {
    let mut site = SiteHarness::new();
    navigate(&mut site, "/about", ABOUT, 0);

    let doc = site.controller.document();
    let indices = doc.find_all_by_class("list-index");
    assert_eq!(indices.len(), 2);
    assert_eq!(text_content(&indices[0]), "01");
    assert_eq!(text_content(&indices[1]), "02");

    let frame = doc.find_first_by_class("cornered").expect("frame");
    assert_eq!(find_all_by_class_in(&frame, "corner").len(), 4);
}

#[test]
fn lazy_video_loads_when_scrolled_into_reach() {
    let mut site = SiteHarness::new();
    site.controller.handle_resize(700.0);
    navigate(&mut site, "/projects", PROJECTS, 0);

    let video = site
        .controller
        .document()
        .find_first_by_class("lazy-video")
        .expect("video");
    assert!(attr(&video, "src").is_none());

    site.controller.handle_scroll(5_000.0);
    assert_eq!(attr(&video, "src").as_deref(), Some("/media/reel.mp4"));
    assert!(attr(&video, "data-src").is_none());
}

#[test]
fn entrance_animations_do_not_replay_on_swapped_content() {
    let mut site = SiteHarness::new();
    let markup = r#"<html><head><title>Story</title></head><body>
        <main class="page-content">
          <section class="reveal">chapter</section>
          <div class="reveal-veil"></div>
        </main></body></html>"#;
    navigate(&mut site, "/story", markup, 0);

    let doc = site.controller.document();
    let revealed = doc
        .find_all_by_class("reveal")
        .into_iter()
        .find(|el| !has_class(el, "reveal-veil"))
        .expect("revealed section");
    assert!(has_class(&revealed, "is-revealed"));

    let veil = doc.find_first_by_class("reveal-veil").expect("veil");
    assert_eq!(inline_style(&veil, "display").as_deref(), Some("none"));
}

#[test]
fn a_widget_marker_without_content_does_not_block_the_rest() {
    // The fade-slider marker is present but empty (no slides): its
    // initializer declines, the remaining widgets still bind, and the
    // navigation completes.
    let mut site = SiteHarness::new();
    let markup = r#"<html><head><title>Mixed</title></head><body>
        <main class="page-content">
          <div class="fade-slider"></div>
          <ol class="numbered-list"><li>only</li></ol>
        </main></body></html>"#;
    navigate(&mut site, "/mixed", markup, 0);

    assert_eq!(site.controller.widgets().live_names(), vec!["numbered-list"]);
    assert_eq!(site.controller.document().title().as_deref(), Some("Mixed"));
}
