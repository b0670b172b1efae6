// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ambient particle field state machine.
//!
//! [`ParticleField`] owns the particle set, the debounce slot and the
//! lifecycle state. It is driven by three host events:
//!
//! - **activation**: once, with the hero region's size (or its absence) and
//!   the reduced-motion preference;
//! - **resize**: every window resize event pauses the field and re-arms the
//!   debounce; the host polls when its timer fires;
//! - **frame**: each animation callback renders into a [`Surface`].
//!
//! ```text
//!   Uninitialized ──activate──► Running ◄──settle── Paused
//!         │                       │  └──resize──────►  │
//!         │                       └──stop──► Stopped ◄─┘
//!         └──no hero / reduced motion──► Inactive
//! ```
//!
//! The host must stop its frame loop whenever [`resize_requested`] reports
//! [`FieldState::Paused`] and restart it only after [`poll_resize`] commits.
//! Rendering while not running paints nothing, so a stale callback that
//! slips through cannot draw against the old particle positions.
//!
//! [`resize_requested`]: ParticleField::resize_requested
//! [`poll_resize`]: ParticleField::poll_resize

use alloc::vec::Vec;

use kurbo::Size;
use rand::Rng;

use crate::config::ParticleConfig;
use crate::debounce::{Debounce, DebouncePoll};
use crate::particle::{self, Particle};
use crate::surface::Surface;
#[cfg(feature = "trace-rich")]
use crate::trace::FrameEvent;
use crate::trace::{FieldTransitionEvent, RegenerateEvent, Tracer};

/// Lifecycle of a [`ParticleField`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FieldState {
    /// Created, not yet activated.
    #[default]
    Uninitialized,
    /// Rendering every frame.
    Running,
    /// A resize burst is in progress; the frame loop is cancelled.
    Paused,
    /// Torn down by [`ParticleField::stop`].
    Stopped,
    /// No hero region or reduced motion. Terminal.
    Inactive,
}

/// Result of [`ParticleField::poll_resize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// No resize was pending.
    Idle,
    /// The quiet period has not elapsed; wake again after `remaining_ms`.
    Pending {
        /// Milliseconds until the debounce deadline.
        remaining_ms: f64,
    },
    /// New dimensions were committed and the particles regenerated. The host
    /// restarts its frame loop.
    Committed(Size),
}

/// A fixed-cardinality set of breathing point lights over a resizable area.
#[derive(Clone, Debug)]
pub struct ParticleField<R> {
    config: ParticleConfig,
    rng: R,
    size: Size,
    particles: Vec<Particle>,
    state: FieldState,
    debounce: Debounce,
    generation: u64,
    frames: u64,
}

impl<R: Rng> ParticleField<R> {
    /// Creates an uninitialized field drawing randomness from `rng`.
    #[must_use]
    pub fn new(config: ParticleConfig, rng: R) -> Self {
        Self {
            debounce: Debounce::new(config.resize_debounce_ms),
            config,
            rng,
            size: Size::ZERO,
            particles: Vec::new(),
            state: FieldState::Uninitialized,
            generation: 0,
            frames: 0,
        }
    }

    /// Activates the field.
    ///
    /// With no hero region, or when reduced motion is preferred, the field
    /// becomes [`FieldState::Inactive`] and neither `attach` nor `measure` is
    /// called, so no surface is created. Otherwise `attach` creates the
    /// surface inside `hero`, then `measure` reads the hero's size with the
    /// surface in place; the surface is sized to it, filled with particles
    /// and returned. The field is then [`FieldState::Running`] and the host
    /// starts its frame loop.
    ///
    /// Calling this on a field that is not [`FieldState::Uninitialized`]
    /// returns `Ok(None)` without side effects.
    pub fn activate<H, S, E>(
        &mut self,
        hero: Option<H>,
        reduced_motion: bool,
        attach: impl FnOnce(&H) -> Result<S, E>,
        measure: impl FnOnce(&H) -> Size,
        tracer: &mut Tracer<'_>,
    ) -> Result<Option<S>, E>
    where
        S: Surface,
    {
        if self.state != FieldState::Uninitialized {
            return Ok(None);
        }
        let hero = match hero {
            Some(hero) if !reduced_motion => hero,
            _ => {
                self.transition(FieldState::Inactive, tracer);
                return Ok(None);
            }
        };
        let mut surface = attach(&hero)?;
        let size = measure(&hero);
        self.commit_size(size, &mut surface, tracer);
        self.transition(FieldState::Running, tracer);
        Ok(Some(surface))
    }

    /// Records a resize event at `now_ms`.
    ///
    /// A running field pauses; a paused field stays paused with its deadline
    /// pushed back. Returns the resulting state; any other state ignores the
    /// event.
    pub fn resize_requested(&mut self, now_ms: f64, tracer: &mut Tracer<'_>) -> FieldState {
        match self.state {
            FieldState::Running => {
                self.debounce.trigger(now_ms);
                self.transition(FieldState::Paused, tracer);
            }
            FieldState::Paused => {
                self.debounce.trigger(now_ms);
            }
            FieldState::Uninitialized | FieldState::Stopped | FieldState::Inactive => {}
        }
        self.state
    }

    /// Checks the debounce slot at `now_ms`.
    ///
    /// Once the quiet period has elapsed, `measure` is called for the hero
    /// region's current size, the surface is resized, the particle set is
    /// rebuilt and the field resumes.
    pub fn poll_resize<S: Surface>(
        &mut self,
        now_ms: f64,
        measure: impl FnOnce() -> Size,
        surface: &mut S,
        tracer: &mut Tracer<'_>,
    ) -> ResizeOutcome {
        if self.state != FieldState::Paused {
            return ResizeOutcome::Idle;
        }
        match self.debounce.poll(now_ms) {
            DebouncePoll::Idle => ResizeOutcome::Idle,
            DebouncePoll::Pending { remaining_ms } => ResizeOutcome::Pending { remaining_ms },
            DebouncePoll::Ready => {
                let size = measure();
                self.commit_size(size, surface, tracer);
                self.transition(FieldState::Running, tracer);
                ResizeOutcome::Committed(size)
            }
        }
    }

    /// Paints one frame at `timestamp_ms`.
    ///
    /// Returns `false` without touching the surface unless the field is
    /// running.
    pub fn render<S: Surface>(
        &mut self,
        timestamp_ms: f64,
        surface: &mut S,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.state != FieldState::Running {
            return false;
        }
        surface.clear();
        let floor = self.config.floor_alpha;
        for p in &self.particles {
            surface.fill_circle(p.position, p.radius, p.alpha(timestamp_ms, floor));
        }
        #[cfg(feature = "trace-rich")]
        tracer.frame(&FrameEvent {
            frame_index: self.frames,
            timestamp_ms,
            particles: self.particles.len(),
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = tracer;
        }
        self.frames += 1;
        true
    }

    /// Tears the field down. Pending resizes are dropped.
    pub fn stop(&mut self, tracer: &mut Tracer<'_>) {
        if matches!(self.state, FieldState::Running | FieldState::Paused) {
            self.debounce.cancel();
            self.transition(FieldState::Stopped, tracer);
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> FieldState {
        self.state
    }

    /// Returns the committed surface size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the current particle set.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of times the particle set has been generated.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of frames painted so far.
    #[must_use]
    pub const fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ParticleConfig {
        &self.config
    }

    fn commit_size<S: Surface>(&mut self, size: Size, surface: &mut S, tracer: &mut Tracer<'_>) {
        surface.resize(size);
        self.size = size;
        self.particles = particle::generate(&mut self.rng, size, &self.config);
        self.generation += 1;
        tracer.regenerate(&RegenerateEvent {
            size,
            count: self.particles.len(),
            generation: self.generation,
        });
    }

    fn transition(&mut self, to: FieldState, tracer: &mut Tracer<'_>) {
        let from = self.state;
        self.state = to;
        tracer.field_transition(&FieldTransitionEvent { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;
    use core::convert::Infallible;
    use kurbo::{Point, Rect};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[derive(Debug, Default)]
    struct Recording {
        size: Size,
        resizes: Vec<Size>,
        clears: usize,
        circles: Vec<(Point, f64, f64)>,
    }

    impl Surface for Recording {
        fn resize(&mut self, size: Size) {
            self.size = size;
            self.resizes.push(size);
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, center: Point, radius: f64, alpha: f64) {
            self.circles.push((center, radius, alpha));
        }
    }

    fn field() -> ParticleField<SmallRng> {
        ParticleField::new(ParticleConfig::hero(), SmallRng::seed_from_u64(11))
    }

    fn running(size: Size) -> (ParticleField<SmallRng>, Recording) {
        let mut f = field();
        let surface = f
            .activate(
                Some(size),
                false,
                |_| Ok::<_, Infallible>(Recording::default()),
                |&size| size,
                &mut Tracer::none(),
            )
            .unwrap()
            .expect("field should activate");
        (f, surface)
    }

    #[test]
    fn activation_builds_particles_and_sizes_surface() {
        let (f, surface) = running(Size::new(640.0, 360.0));
        assert_eq!(f.state(), FieldState::Running);
        assert_eq!(surface.resizes, vec![Size::new(640.0, 360.0)]);
        assert_eq!(f.particles().len(), 160);
        assert_eq!(f.generation(), 1);
    }

    #[test]
    fn missing_hero_is_inactive_without_surface() {
        let mut f = field();
        let mut attached = 0;
        let out = f
            .activate(
                None::<Size>,
                false,
                |_| {
                    attached += 1;
                    Ok::<_, Infallible>(Recording::default())
                },
                |&size| size,
                &mut Tracer::none(),
            )
            .unwrap();
        assert!(out.is_none());
        assert_eq!(attached, 0);
        assert_eq!(f.state(), FieldState::Inactive);
    }

    #[test]
    fn reduced_motion_never_attaches_or_renders() {
        let mut f = field();
        let mut attached = 0;
        let out = f
            .activate(
                Some(Size::new(800.0, 600.0)),
                true,
                |_| {
                    attached += 1;
                    Ok::<_, Infallible>(Recording::default())
                },
                |&size| size,
                &mut Tracer::none(),
            )
            .unwrap();
        assert!(out.is_none(), "no canvas under reduced motion");
        assert_eq!(attached, 0);

        let mut stray = Recording::default();
        assert!(!f.render(16.0, &mut stray, &mut Tracer::none()));
        assert_eq!(f.frames_rendered(), 0, "zero frames rendered");
        assert_eq!(stray.clears, 0);
        assert_eq!(
            f.resize_requested(20.0, &mut Tracer::none()),
            FieldState::Inactive,
            "inactive is terminal"
        );
    }

    #[test]
    fn attach_errors_propagate() {
        let mut f = field();
        let out = f.activate(
            Some(Size::new(10.0, 10.0)),
            false,
            |_| Err::<Recording, _>("no canvas"),
            |&size| size,
            &mut Tracer::none(),
        );
        assert_eq!(out.unwrap_err(), "no canvas");
    }

    #[test]
    fn hero_is_measured_with_the_surface_attached() {
        let mut f = field();
        let attached = Cell::new(false);
        let surface = f
            .activate(
                Some(Size::new(320.0, 180.0)),
                false,
                |_| {
                    attached.set(true);
                    Ok::<_, Infallible>(Recording::default())
                },
                |&size| if attached.get() { size } else { Size::ZERO },
                &mut Tracer::none(),
            )
            .unwrap()
            .expect("field should activate");
        assert_eq!(surface.resizes, vec![Size::new(320.0, 180.0)]);
        assert_eq!(f.size(), Size::new(320.0, 180.0));
    }

    #[test]
    fn render_paints_every_particle_within_bounds() {
        let (mut f, mut surface) = running(Size::new(300.0, 200.0));
        assert!(f.render(12_345.0, &mut surface, &mut Tracer::none()));
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 160);
        for (&(_, _, alpha), p) in surface.circles.iter().zip(f.particles()) {
            assert!(alpha >= 0.04 - 1e-12 && alpha <= p.peak + 1e-12, "alpha {alpha}");
        }
        assert_eq!(f.frames_rendered(), 1);
    }

    #[test]
    fn resize_burst_regenerates_once_with_last_size() {
        let (mut f, mut surface) = running(Size::new(1000.0, 500.0));
        let before: Vec<Particle> = f.particles().to_vec();

        // Ten resize events 5ms apart; the host measures whatever the hero is
        // when the debounce finally settles.
        let sizes: Vec<Size> = (0..10)
            .map(|i| Size::new(1000.0 - f64::from(i) * 30.0, 500.0 + f64::from(i) * 10.0))
            .collect();
        for i in 0..10 {
            assert_eq!(
                f.resize_requested(f64::from(i) * 5.0, &mut Tracer::none()),
                FieldState::Paused
            );
        }
        let hero = sizes[9];
        assert!(!f.render(50.0, &mut surface, &mut Tracer::none()), "paused fields do not paint");

        // The timer armed by the first event wakes early and is re-armed.
        let early = f.poll_resize(120.0, || hero, &mut surface, &mut Tracer::none());
        assert_eq!(early, ResizeOutcome::Pending { remaining_ms: 45.0 });
        assert_eq!(f.generation(), 1);

        let settled = f.poll_resize(165.0, || hero, &mut surface, &mut Tracer::none());
        assert_eq!(settled, ResizeOutcome::Committed(Size::new(730.0, 590.0)));
        assert_eq!(f.generation(), 2, "exactly one regeneration");
        assert_eq!(f.state(), FieldState::Running);
        assert_eq!(surface.size, Size::new(730.0, 590.0));
        assert_eq!(
            f.poll_resize(400.0, || hero, &mut surface, &mut Tracer::none()),
            ResizeOutcome::Idle
        );

        assert_eq!(f.particles().len(), 160);
        let bounds = Rect::from_origin_size(Point::ORIGIN, Size::new(730.0, 590.0));
        assert!(f.particles().iter().all(|p| bounds.contains(p.position)));
        assert_ne!(f.particles(), &before[..], "no particle identity survives a resize");
    }

    #[test]
    fn stop_drops_pending_resize() {
        let (mut f, mut surface) = running(Size::new(100.0, 100.0));
        f.resize_requested(0.0, &mut Tracer::none());
        f.stop(&mut Tracer::none());
        assert_eq!(f.state(), FieldState::Stopped);
        assert_eq!(
            f.poll_resize(500.0, || Size::new(1.0, 1.0), &mut surface, &mut Tracer::none()),
            ResizeOutcome::Idle
        );
        assert!(!f.render(600.0, &mut surface, &mut Tracer::none()));
        assert_eq!(f.generation(), 1);
    }

    #[test]
    fn activate_twice_is_a_no_op() {
        let (mut f, _surface) = running(Size::new(100.0, 100.0));
        let again = f
            .activate(
                Some(Size::new(5.0, 5.0)),
                false,
                |_| Ok::<_, Infallible>(Recording::default()),
                |&size| size,
                &mut Tracer::none(),
            )
            .unwrap();
        assert!(again.is_none());
        assert_eq!(f.size(), Size::new(100.0, 100.0));
    }
}
