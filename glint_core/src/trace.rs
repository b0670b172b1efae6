// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for reveals and the particle field.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! reveal tracker and particle field call as they change state. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`FrameEvent`] and the
//!   corresponding `TraceSink` method, which fire once per rendered frame.

use kurbo::Size;

use crate::field::FieldState;
use crate::reveal::{NodeId, Watch};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a node is first seen by the reveal tracker.
#[derive(Clone, Copy, Debug)]
pub struct WatchEvent {
    /// The node.
    pub node: NodeId,
    /// What the tracker decided.
    pub outcome: Watch,
}

/// Emitted when a node is revealed.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// The node.
    pub node: NodeId,
    /// `true` when revealed at sight (reduced motion) rather than on scroll.
    pub immediate: bool,
}

/// Emitted when the particle field changes state.
#[derive(Clone, Copy, Debug)]
pub struct FieldTransitionEvent {
    /// State before the transition.
    pub from: FieldState,
    /// State after the transition.
    pub to: FieldState,
}

/// Emitted after the particle set is rebuilt.
#[derive(Clone, Copy, Debug)]
pub struct RegenerateEvent {
    /// New surface dimensions.
    pub size: Size,
    /// Number of particles generated.
    pub count: usize,
    /// How many times the set has been generated, including this one.
    pub generation: u64,
}

/// Emitted once per rendered frame.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Monotonic count of rendered frames.
    pub frame_index: u64,
    /// Timestamp passed to the frame callback, in milliseconds.
    pub timestamp_ms: f64,
    /// Particles painted.
    pub particles: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the reveal tracker and particle field.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a node is first seen.
    fn on_watch(&mut self, e: &WatchEvent) {
        _ = e;
    }

    /// Called when a node is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when the particle field changes state.
    fn on_field_transition(&mut self, e: &FieldTransitionEvent) {
        _ = e;
    }

    /// Called after the particle set is rebuilt.
    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        _ = e;
    }

    /// Called once per rendered frame (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Forwards one event to the sink, or compiles to nothing without `trace`.
macro_rules! emit {
    ($tracer:ident . $method:ident ( $e:ident )) => {{
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut $tracer.sink {
            sink.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (&$tracer, $e);
        }
    }};
}

impl<'a> Tracer<'a> {
    #[inline]
    fn with(sink: Option<&'a mut dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self::with(Some(sink))
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::with(None)
    }

    /// Emits a [`WatchEvent`].
    #[inline]
    pub fn watch(&mut self, e: &WatchEvent) {
        emit!(self.on_watch(e));
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        emit!(self.on_reveal(e));
    }

    /// Emits a [`FieldTransitionEvent`].
    #[inline]
    pub fn field_transition(&mut self, e: &FieldTransitionEvent) {
        emit!(self.on_field_transition(e));
    }

    /// Emits a [`RegenerateEvent`].
    #[inline]
    pub fn regenerate(&mut self, e: &RegenerateEvent) {
        emit!(self.on_regenerate(e));
    }

    /// Emits a [`FrameEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        emit!(self.on_frame(e));
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::reveal::{RevealMode, RevealTracker, VisibilitySample};

    #[derive(Default)]
    struct Counting {
        watches: usize,
        reveals: usize,
        immediate: usize,
    }

    impl TraceSink for Counting {
        fn on_watch(&mut self, _e: &WatchEvent) {
            self.watches += 1;
        }

        fn on_reveal(&mut self, e: &RevealEvent) {
            self.reveals += 1;
            if e.immediate {
                self.immediate += 1;
            }
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = Counting::default();
        let mut tracker = RevealTracker::new(RevealMode::OnIntersect, &RevealConfig::site());
        let n = tracker.register();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracker.begin_observing(n, &mut tracer);
            tracker.begin_observing(n, &mut tracer);
            let seen = VisibilitySample::new(true, 1.0);
            tracker.observe(n, seen, &mut tracer);
            tracker.observe(n, seen, &mut tracer);
        }
        assert_eq!(sink.watches, 1, "repeat watches are not traced");
        assert_eq!(sink.reveals, 1);
        assert_eq!(sink.immediate, 0);
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.reveal(&RevealEvent {
            node: NodeId(0),
            immediate: true,
        });
    }
}
