// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as a
//! [`RecordedEvent`], in arrival order. Frames are collapsed to a counter
//! so long runs stay small.

use glint_core::field::FieldState;
use glint_core::reveal::{NodeId, Watch};
use glint_core::trace::{
    FieldTransitionEvent, FrameEvent, RegenerateEvent, RevealEvent, TraceSink, WatchEvent,
};
use kurbo::Size;

/// A recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A node was first seen.
    Watch {
        /// The node.
        node: NodeId,
        /// What the tracker decided.
        outcome: Watch,
    },
    /// A node was revealed.
    Reveal {
        /// The node.
        node: NodeId,
        /// Revealed at sight rather than on scroll.
        immediate: bool,
    },
    /// The particle field changed state.
    Transition {
        /// State before.
        from: FieldState,
        /// State after.
        to: FieldState,
    },
    /// The particle set was rebuilt.
    Regenerate {
        /// New surface size.
        size: Size,
        /// Particles generated.
        count: usize,
        /// Generation number.
        generation: u64,
    },
}

/// A [`TraceSink`] that keeps events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
    frames: u64,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, frames excluded.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Number of frame events received.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns the field transitions, in order.
    pub fn transitions(&self) -> impl Iterator<Item = (FieldState, FieldState)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            RecordedEvent::Transition { from, to } => Some((from, to)),
            _ => None,
        })
    }

    /// Returns the revealed nodes, in reveal order.
    pub fn revealed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.events.iter().filter_map(|e| match *e {
            RecordedEvent::Reveal { node, .. } => Some(node),
            _ => None,
        })
    }

    /// Number of particle regenerations recorded.
    #[must_use]
    pub fn regenerations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Regenerate { .. }))
            .count()
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.frames = 0;
    }
}

impl TraceSink for RecorderSink {
    fn on_watch(&mut self, e: &WatchEvent) {
        self.events.push(RecordedEvent::Watch {
            node: e.node,
            outcome: e.outcome,
        });
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.events.push(RecordedEvent::Reveal {
            node: e.node,
            immediate: e.immediate,
        });
    }

    fn on_field_transition(&mut self, e: &FieldTransitionEvent) {
        self.events.push(RecordedEvent::Transition {
            from: e.from,
            to: e.to,
        });
    }

    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        self.events.push(RecordedEvent::Regenerate {
            size: e.size,
            count: e.count,
            generation: e.generation,
        });
    }

    fn on_frame(&mut self, _e: &FrameEvent) {
        self.frames += 1;
    }
}
