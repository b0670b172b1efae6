// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current-page matching for navigation links.
//!
//! The site is flat: every page is a file at the root, so a link is active
//! when the last segment of its `href` equals the last segment of the
//! location's path. The site root maps to `index.html`.

/// Page served for an empty path segment.
pub const INDEX_PAGE: &str = "index.html";

/// Returns the page name for a `location.pathname`.
#[must_use]
pub fn page_name(pathname: &str) -> &str {
    match last_segment(pathname) {
        "" => INDEX_PAGE,
        page => page,
    }
}

/// Returns the last `/`-separated segment of an `href` attribute.
#[must_use]
pub fn href_page(href: &str) -> &str {
    last_segment(href)
}

/// Returns `true` if a link with `href` points at `page`.
#[must_use]
pub fn is_active(href: &str, page: &str) -> bool {
    href_page(href) == page
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        assert_eq!(page_name("/"), "index.html");
        assert_eq!(page_name(""), "index.html");
        assert_eq!(page_name("/site/"), "index.html");
    }

    #[test]
    fn page_is_last_segment() {
        assert_eq!(page_name("/gallery.html"), "gallery.html");
        assert_eq!(page_name("/site/puzzles/cube.html"), "cube.html");
    }

    #[test]
    fn links_match_by_file_name() {
        assert!(is_active("gallery.html", "gallery.html"));
        assert!(is_active("./puzzles/cube.html", "cube.html"));
        assert!(!is_active("gear.html", "gallery.html"));
        assert!(!is_active("", "index.html"), "empty hrefs are never active");
    }
}
