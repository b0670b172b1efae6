// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use glint_core::field::FieldState;
use glint_core::reveal::Watch;
use glint_core::trace::{
    FieldTransitionEvent, FrameEvent, RegenerateEvent, RevealEvent, TraceSink, WatchEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Per-frame events are skipped until [`with_frames`](Self::with_frames)
    /// turns them on.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            frames: false,
        }
    }

    /// Also prints one line per rendered frame.
    #[must_use]
    pub fn with_frames(mut self, frames: bool) -> Self {
        self.frames = frames;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn watch_name(outcome: Watch) -> &'static str {
    match outcome {
        Watch::Observe => "observe",
        Watch::RevealNow => "reveal-now",
        Watch::AlreadyWatched => "already",
    }
}

fn state_name(state: FieldState) -> &'static str {
    match state {
        FieldState::Uninitialized => "uninitialized",
        FieldState::Running => "running",
        FieldState::Paused => "paused",
        FieldState::Stopped => "stopped",
        FieldState::Inactive => "inactive",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_watch(&mut self, e: &WatchEvent) {
        let _ = writeln!(
            self.writer,
            "[watch] node={} {}",
            e.node.0,
            watch_name(e.outcome),
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let how = if e.immediate { "immediate" } else { "scrolled" };
        let _ = writeln!(self.writer, "[reveal] node={} {how}", e.node.0);
    }

    fn on_field_transition(&mut self, e: &FieldTransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[field] {} -> {}",
            state_name(e.from),
            state_name(e.to),
        );
    }

    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        let _ = writeln!(
            self.writer,
            "[regen] generation={} count={} size={}x{}",
            e.generation, e.count, e.size.width, e.size.height,
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] index={} t={:.1}ms particles={}",
            e.frame_index, e.timestamp_ms, e.particles,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::reveal::NodeId;
    use kurbo::Size;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).expect("sink writes UTF-8")
    }

    #[test]
    fn pretty_print_reveal_lifecycle() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_watch(&WatchEvent {
            node: NodeId(3),
            outcome: Watch::Observe,
        });
        sink.on_reveal(&RevealEvent {
            node: NodeId(3),
            immediate: false,
        });
        let out = output(sink);
        assert!(out.contains("[watch] node=3 observe"), "got: {out}");
        assert!(out.contains("[reveal] node=3 scrolled"), "got: {out}");
    }

    #[test]
    fn pretty_print_field_events() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_field_transition(&FieldTransitionEvent {
            from: FieldState::Running,
            to: FieldState::Paused,
        });
        sink.on_regenerate(&RegenerateEvent {
            size: Size::new(800.0, 600.0),
            count: 160,
            generation: 2,
        });
        let out = output(sink);
        assert!(out.contains("[field] running -> paused"), "got: {out}");
        assert!(
            out.contains("[regen] generation=2 count=160 size=800x600"),
            "got: {out}"
        );
    }

    #[test]
    fn frames_are_opt_in() {
        let frame = FrameEvent {
            frame_index: 7,
            timestamp_ms: 116.5,
            particles: 160,
        };

        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new());
        quiet.on_frame(&frame);
        assert!(output(quiet).is_empty(), "frames are off by default");

        let mut loud = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_frames(true);
        loud.on_frame(&frame);
        let out = output(loud);
        assert!(out.contains("[frame] index=7 t=116.5ms"), "got: {out}");
    }
}
