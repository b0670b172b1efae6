// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hero particle field on a 2D canvas.
//!
//! [`DomParticleField`] drives a [`ParticleField`] from three browser
//! sources: a [`RafLoop`] for frames, the window `resize` event, and a
//! [`TimeoutSlot`] that fires once resizing has settled. The frame loop is
//! stopped on the first resize event of a burst and restarted only after
//! the new particle set is committed.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::f64::consts::TAU;

use glint_core::config::{HeroConfig, ParticleConfig};
use glint_core::field::{FieldState, ParticleField, ResizeOutcome};
use glint_core::surface::{Surface, white_with_alpha};
use glint_core::trace::Tracer;
use kurbo::{Point, Size};
use rand::SeedableRng as _;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

use crate::console::ConsoleSink;
use crate::raf::{RafLoop, performance_now};
use crate::timeout::TimeoutSlot;

/// A `<canvas>` with its 2D context.
#[derive(Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    /// Creates a canvas with `id` and inserts it as the first child of
    /// `hero`.
    ///
    /// The canvas is decorative and marked `aria-hidden`.
    pub fn attach(document: &Document, hero: &HtmlElement, id: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id(id);
        canvas.set_attribute("aria-hidden", "true")?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into()?;
        hero.prepend_with_node_1(&canvas)?;
        Ok(Self {
            canvas,
            context,
            size: Size::ZERO,
        })
    }

    /// Returns the canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the current pixel buffer size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, size: Size) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "sizes come from integral offsetWidth/offsetHeight"
        )]
        let (width, height) = (size.width.max(0.0) as u32, size.height.max(0.0) as u32);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.size = size;
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, alpha: f64) {
        self.context.begin_path();
        // Only fails for a negative radius, which `Span` never produces.
        let _ = self.context.arc(center.x, center.y, radius, 0.0, TAU);
        self.context.set_fill_style_str(&white_with_alpha(alpha));
        self.context.fill();
    }
}

/// Reads the rendered size of `hero`.
fn measure(hero: &HtmlElement) -> Size {
    Size::new(
        f64::from(hero.offset_width()),
        f64::from(hero.offset_height()),
    )
}

/// A running hero particle field.
///
/// Dropping the handle stops the loop and detaches the resize listener.
pub struct DomParticleField {
    inner: Rc<FieldInner>,
}

struct FieldInner {
    window: Window,
    hero: HtmlElement,
    field: RefCell<ParticleField<SmallRng>>,
    surface: RefCell<CanvasSurface>,
    raf: RafLoop,
    settle: TimeoutSlot,
    on_resize: Closure<dyn FnMut()>,
    listening: Cell<bool>,
}

impl DomParticleField {
    /// Creates the canvas inside `hero` and starts the frame loop.
    ///
    /// Returns `Ok(None)` when `hero` is absent or reduced motion is
    /// preferred; no canvas is created in either case.
    pub fn initialize(
        window: &Window,
        document: &Document,
        hero: Option<HtmlElement>,
        hero_config: HeroConfig,
        config: ParticleConfig,
        reduced_motion: bool,
        seed: u64,
    ) -> Result<Option<Self>, JsValue> {
        let mut field = ParticleField::new(config, SmallRng::seed_from_u64(seed));
        let mut sink = ConsoleSink;
        let surface = field.activate(
            hero.as_ref(),
            reduced_motion,
            |hero| CanvasSurface::attach(document, hero, hero_config.canvas_id),
            |hero| measure(hero),
            &mut Tracer::new(&mut sink),
        )?;
        let (Some(surface), Some(hero)) = (surface, hero) else {
            return Ok(None);
        };

        let inner = Rc::new_cyclic(|weak: &Weak<FieldInner>| {
            let frame = weak.clone();
            let raf = RafLoop::new(move |timestamp_ms| {
                if let Some(inner) = frame.upgrade() {
                    inner.frame(timestamp_ms);
                }
            });
            let settled = weak.clone();
            let settle = TimeoutSlot::new(move || {
                if let Some(inner) = settled.upgrade() {
                    inner.settle();
                }
            });
            let resized = weak.clone();
            let on_resize = Closure::wrap(Box::new(move || {
                if let Some(inner) = resized.upgrade() {
                    inner.resize_requested();
                }
            }) as Box<dyn FnMut()>);
            FieldInner {
                window: window.clone(),
                hero,
                field: RefCell::new(field),
                surface: RefCell::new(surface),
                raf,
                settle,
                on_resize,
                listening: Cell::new(false),
            }
        });

        window
            .add_event_listener_with_callback("resize", inner.on_resize.as_ref().unchecked_ref())?;
        inner.listening.set(true);
        inner.raf.start();
        Ok(Some(Self { inner }))
    }

    /// Stops the frame loop, drops any pending resize and detaches the
    /// resize listener. The canvas stays in place with its last frame.
    pub fn stop(&self) {
        let inner = &self.inner;
        inner.raf.stop();
        inner.settle.cancel();
        if inner.listening.replace(false) {
            let _ = inner.window.remove_event_listener_with_callback(
                "resize",
                inner.on_resize.as_ref().unchecked_ref(),
            );
        }
        let mut sink = ConsoleSink;
        inner.field.borrow_mut().stop(&mut Tracer::new(&mut sink));
    }

    /// Returns the field's lifecycle state.
    #[must_use]
    pub fn state(&self) -> FieldState {
        self.inner.field.borrow().state()
    }

    /// Number of particle sets generated so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.field.borrow().generation()
    }

    /// Number of particles in the current set.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.inner.field.borrow().particles().len()
    }

    /// Returns the committed canvas size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.inner.field.borrow().size()
    }

    /// Returns the canvas element.
    #[must_use]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.inner.surface.borrow().canvas().clone()
    }

    /// Returns `true` while a frame request is outstanding.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inner.raf.is_running()
    }
}

impl FieldInner {
    fn frame(&self, timestamp_ms: f64) {
        let mut sink = ConsoleSink;
        self.field.borrow_mut().render(
            timestamp_ms,
            &mut *self.surface.borrow_mut(),
            &mut Tracer::new(&mut sink),
        );
    }

    fn resize_requested(&self) {
        let mut sink = ConsoleSink;
        let state = self
            .field
            .borrow_mut()
            .resize_requested(performance_now(), &mut Tracer::new(&mut sink));
        if state == FieldState::Paused {
            self.raf.stop();
            let interval = self.field.borrow().config().resize_debounce_ms;
            self.settle.arm(interval);
        }
    }

    fn settle(&self) {
        let mut sink = ConsoleSink;
        let outcome = self.field.borrow_mut().poll_resize(
            performance_now(),
            || measure(&self.hero),
            &mut *self.surface.borrow_mut(),
            &mut Tracer::new(&mut sink),
        );
        match outcome {
            ResizeOutcome::Committed(_) => self.raf.start(),
            ResizeOutcome::Pending { remaining_ms } => self.settle.arm(remaining_ms),
            ResizeOutcome::Idle => {}
        }
    }
}

impl Drop for DomParticleField {
    fn drop(&mut self) {
        self.stop();
    }
}

impl core::fmt::Debug for DomParticleField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let field = self.inner.field.borrow();
        f.debug_struct("DomParticleField")
            .field("state", &field.state())
            .field("size", &field.size())
            .field("generation", &field.generation())
            .field("raf", &self.inner.raf)
            .finish_non_exhaustive()
    }
}
