// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduced-motion preference.

use web_sys::Window;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Returns `true` if the user prefers reduced motion.
///
/// Sampled once at boot; later changes to the OS setting are not observed.
/// A browser without `matchMedia` reads as "no preference".
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}
