/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod continuity;
mod harness;
mod navigation;
mod widget_lifecycle;

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!orrery::VERSION.is_empty());
}
