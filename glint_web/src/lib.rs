// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser bindings for glint.
//!
//! This crate drives the `glint_core` state machines from DOM APIs:
//!
//! - [`RevealEngine`]: `IntersectionObserver` + `MutationObserver` scroll reveal
//! - [`DomParticleField`]: hero canvas painted from a [`RafLoop`]
//! - [`partials`], [`nav`] and [`guard`]: shared header/footer injection,
//!   navigation wiring and media deterrents
//!
//! [`start`] is the wasm entry point; it runs [`boot`] with
//! [`GlintConfig::site`]. Load the module with `type="module"` so the DOM is
//! parsed before it runs.

#![no_std]

extern crate alloc;

mod console;
mod field;
pub mod guard;
mod motion;
pub mod nav;
pub mod partials;
mod raf;
mod reveal;
mod timeout;

pub use console::ConsoleSink;
pub use field::{CanvasSurface, DomParticleField};
pub use glint_core::config::GlintConfig;
pub use motion::prefers_reduced_motion;
pub use raf::RafLoop;
pub use reveal::RevealEngine;
pub use timeout::TimeoutSlot;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

/// Returns `performance.now()` in milliseconds.
#[must_use]
pub fn now() -> f64 {
    raf::performance_now()
}

/// Draws a seed for the particle generator from `Math.random()`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "Math.random() * 2^53 is a non-negative integer below u64::MAX"
)]
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

/// wasm entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_bindgen_futures::spawn_local(boot(GlintConfig::site()));
}

/// Runs every site feature with `config`.
///
/// Features are independent: a failure is reported on `console.error` and
/// the remaining features still start. The reveal engine and particle field
/// live for the rest of the page.
pub async fn boot(config: GlintConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if let Err(err) = guard::install(&document, config.site.guard) {
        console::error("media guard", &err);
    }

    let reduced_motion = prefers_reduced_motion(&window);
    let root = document.body().map(Element::from);
    match RevealEngine::initialize(root.as_ref(), config.reveal, reduced_motion) {
        Ok(Some(engine)) => core::mem::forget(engine),
        Ok(None) => {}
        Err(err) => console::error("reveal", &err),
    }

    let hero = document
        .query_selector(config.hero.selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    match DomParticleField::initialize(
        &window,
        &document,
        hero,
        config.hero,
        config.particles,
        reduced_motion,
        random_seed(),
    ) {
        Ok(Some(field)) => core::mem::forget(field),
        Ok(None) => {}
        Err(err) => console::error("particle field", &err),
    }

    // Navigation binds to markup inside the header partial.
    if let Err(err) = partials::load_all(&window, &document, &config.site).await {
        console::error("partials", &err);
    }
    partials::stamp_year(&document, config.site.year_id);
    if let Err(err) = nav::bind_menu(&document, &config.site.nav) {
        console::error("menu", &err);
    }
    let pathname = window.location().pathname().unwrap_or_default();
    if let Err(err) = nav::highlight_active(&document, &config.site.nav, &pathname) {
        console::error("active link", &err);
    }
}
