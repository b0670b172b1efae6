// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing contract for the particle field.
//!
//! [`ParticleField`](crate::field::ParticleField) never touches a canvas
//! directly. Backends implement [`Surface`] over whatever they draw into (a
//! 2D canvas context on the web, a recording double in tests), which keeps
//! the field's state machine testable without a browser.
//!
//! # Frame pseudocode
//!
//! ```rust,ignore
//! fn on_frame(timestamp_ms: f64) {
//!     // Clears the surface, then one fill_circle per particle.
//!     field.render(timestamp_ms, &mut surface, &mut tracer);
//! }
//! ```

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Size};

/// A drawable area owned by a particle field.
pub trait Surface {
    /// Sets the pixel buffer dimensions. Called only on the resize path.
    fn resize(&mut self, size: Size);

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Fills a white circle at `center` with the given alpha.
    fn fill_circle(&mut self, center: Point, radius: f64, alpha: f64);
}

/// Formats a white fill with `alpha` rounded to three decimals, as a CSS
/// color.
#[must_use]
pub fn white_with_alpha(alpha: f64) -> String {
    format!("rgba(255,255,255,{alpha:.3})")
}
