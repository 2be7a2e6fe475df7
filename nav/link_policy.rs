/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Which links the engine intercepts.
//!
//! Everything that falls outside these rules keeps default browser handling:
//! explicit targets, cross-origin destinations, same-page fragment jumps,
//! non-document file types, and hrefs that do not parse at all.

use url::Url;

/// Resolve a link to an interceptable destination. `None` means the click
/// must fall through to the browser.
pub fn eligible_destination(href: &str, target: Option<&str>, current: &Url) -> Option<Url> {
    if target.is_some_and(|t| !t.is_empty()) {
        return None;
    }
    // Unparseable hrefs are the browser's problem, not ours.
    let url = current.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    if url.origin() != current.origin() {
        return None;
    }
    if url.path() == current.path() && url.fragment().is_some() {
        return None;
    }
    if !is_document_path(url.path()) {
        return None;
    }
    Some(url)
}

/// Paths whose extension maps to a non-document media type (archives,
/// images, videos, PDFs and friends) are direct downloads or viewers, never
/// swappable pages. Extensionless and unknown-extension paths are documents.
pub fn is_document_path(path: &str) -> bool {
    let Some(ext) = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
    else {
        return true;
    };
    match mime_guess::from_ext(ext).first() {
        None => true,
        Some(mime) => matches!(mime.essence_str(), "text/html" | "application/xhtml+xml"),
    }
}
