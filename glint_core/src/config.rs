// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for the reveal engine, the particle field and the site glue.
//!
//! Every config type is a `Copy` struct with a `const fn` preset matching the
//! site's stylesheet and markup. [`Default`] returns the same preset.

use alloc::format;
use alloc::string::String;
use core::f64::consts::TAU;

use rand::Rng;

/// A half-open numeric range `[min, max)` that particles draw from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl Span {
    /// Creates a span from `min` to `max`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draws a uniform sample from the span.
    ///
    /// A degenerate span (`min == max`) always yields `min`, so a zero-sized
    /// canvas produces particles at the origin instead of panicking.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.min + rng.r#gen::<f64>() * (self.max - self.min)
    }

    /// Returns `true` if `value` lies in `[min, max]`.
    ///
    /// The upper bound is inclusive here to absorb rounding in callers that
    /// scale samples.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Scroll-reveal configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Selectors whose matches are revealed on scroll.
    pub selectors: &'static [&'static str],
    /// Class added when a node starts being watched.
    pub watched_class: &'static str,
    /// Class added when a node is revealed.
    pub revealed_class: &'static str,
    /// Fraction of the node that must be visible (0.0–1.0).
    pub threshold: f64,
    /// Percentage of the viewport height cut off the bottom edge, so reveals
    /// fire slightly before a node is fully on screen.
    pub margin_bottom_percent: f64,
}

impl RevealConfig {
    /// The site's reveal settings: sections, panels and cards, 10% visible,
    /// bottom edge pulled in by 6%.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            selectors: &[".section", ".panel", ".card"],
            watched_class: "reveal",
            revealed_class: "in",
            threshold: 0.10,
            margin_bottom_percent: 6.0,
        }
    }

    /// Returns the selectors joined into one selector list.
    #[must_use]
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }

    /// Returns the `rootMargin` string for an `IntersectionObserver`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}% 0px", self.margin_bottom_percent)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::site()
    }
}

/// Ambient particle field configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Number of particles; constant across regenerations.
    pub count: usize,
    /// Radius range in CSS pixels.
    pub radius: Span,
    /// Peak brightness (alpha) range.
    pub peak: Span,
    /// Angular speed range, in radians per millisecond before the ×1000
    /// oscillator scale.
    pub angular_speed: Span,
    /// Phase offset range.
    pub phase: Span,
    /// Brightness floor; particles never fade below it.
    pub floor_alpha: f64,
    /// Quiet period after the last resize event before particles are rebuilt.
    pub resize_debounce_ms: f64,
}

impl ParticleConfig {
    /// The hero star field: 160 faint, slowly breathing points.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            count: 160,
            radius: Span::new(0.3, 1.6),
            peak: Span::new(0.25, 0.65),
            angular_speed: Span::new(0.000_003, 0.000_009),
            phase: Span::new(0.0, TAU),
            floor_alpha: 0.04,
            resize_debounce_ms: 120.0,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Where the particle canvas lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroConfig {
    /// Selector of the hero region.
    pub selector: &'static str,
    /// `id` given to the generated canvas.
    pub canvas_id: &'static str,
}

impl HeroConfig {
    /// The landing page hero.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            selector: ".hero",
            canvas_id: "heroStars",
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self::site()
    }
}

/// An element that receives a shared HTML partial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartialSlot {
    /// `id` of the placeholder element.
    pub target_id: &'static str,
    /// Same-origin URL of the fragment.
    pub url: &'static str,
}

/// Navigation selectors and state classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavConfig {
    /// Burger button.
    pub burger: &'static str,
    /// Menu container toggled by the burger.
    pub menu: &'static str,
    /// Button that toggles a submenu.
    pub group_button: &'static str,
    /// Submenu container.
    pub submenu: &'static str,
    /// Class marking an open menu or submenu.
    pub open_class: &'static str,
    /// Class marking the link to the current page.
    pub active_class: &'static str,
}

impl NavConfig {
    /// The site's header markup.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            burger: ".burger",
            menu: ".nav-menu",
            group_button: ".nav-group-btn",
            submenu: ".nav-submenu",
            open_class: "open",
            active_class: "active",
        }
    }
}

/// Selectors consulted by the media-saving deterrents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    /// The image lightbox overlay.
    pub lightbox: &'static str,
    /// Class the lightbox carries while open.
    pub lightbox_open_class: &'static str,
    /// Any region whose context menu is suppressed.
    pub protect_zone: &'static str,
    /// Elements whose context menu is suppressed.
    pub context_media: &'static str,
    /// Elements that cannot be dragged out.
    pub drag_media: &'static str,
}

impl GuardConfig {
    /// The site's gallery markup.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            lightbox: ".lightbox",
            lightbox_open_class: "open",
            protect_zone: ".protect-zone",
            context_media: "img",
            drag_media: "img, video",
        }
    }
}

/// Collaborator wiring: partials, navigation and media guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Partials, loaded in order.
    pub partials: [PartialSlot; 2],
    /// `id` of the element showing the current year.
    pub year_id: &'static str,
    /// Navigation wiring.
    pub nav: NavConfig,
    /// Media guard wiring.
    pub guard: GuardConfig,
}

impl SiteConfig {
    /// Header and footer partials with the site's navigation markup.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            partials: [
                PartialSlot {
                    target_id: "siteHeader",
                    url: "partials/header.html",
                },
                PartialSlot {
                    target_id: "siteFooter",
                    url: "partials/footer.html",
                },
            ],
            year_id: "y",
            nav: NavConfig::site(),
            guard: GuardConfig::site(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::site()
    }
}

/// Top-level configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlintConfig {
    /// Collaborator wiring.
    pub site: SiteConfig,
    /// Scroll reveal.
    pub reveal: RevealConfig,
    /// Hero canvas placement.
    pub hero: HeroConfig,
    /// Particle field.
    pub particles: ParticleConfig,
}

impl GlintConfig {
    /// The complete site preset.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            site: SiteConfig::site(),
            reveal: RevealConfig::site(),
            hero: HeroConfig::site(),
            particles: ParticleConfig::hero(),
        }
    }
}

impl Default for GlintConfig {
    fn default() -> Self {
        Self::site()
    }
}
