// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console output.
//!
//! [`ConsoleSink`] implements [`TraceSink`] and writes one `console.debug`
//! line per event. It only receives events when the `trace` feature is
//! enabled; errors are always reported through [`error`].

use alloc::format;

#[cfg(feature = "trace-rich")]
use glint_core::trace::FrameEvent;
use glint_core::trace::{
    FieldTransitionEvent, RegenerateEvent, RevealEvent, TraceSink, WatchEvent,
};
use wasm_bindgen::JsValue;

const PREFIX: &str = "[glint]";

/// Writes trace events to the browser console.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    fn line(&self, text: &str) {
        web_sys::console::debug_1(&JsValue::from_str(&format!("{PREFIX} {text}")));
    }
}

impl TraceSink for ConsoleSink {
    fn on_watch(&mut self, e: &WatchEvent) {
        self.line(&format!("[watch] node={} outcome={:?}", e.node.0, e.outcome));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.line(&format!(
            "[reveal] node={} immediate={}",
            e.node.0, e.immediate
        ));
    }

    fn on_field_transition(&mut self, e: &FieldTransitionEvent) {
        self.line(&format!("[field] {:?} -> {:?}", e.from, e.to));
    }

    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        self.line(&format!(
            "[regen] generation={} count={} size={}x{}",
            e.generation, e.count, e.size.width, e.size.height
        ));
    }

    #[cfg(feature = "trace-rich")]
    fn on_frame(&mut self, e: &FrameEvent) {
        self.line(&format!(
            "[frame] index={} t={:.1}ms particles={}",
            e.frame_index, e.timestamp_ms, e.particles
        ));
    }
}

/// Reports a failed feature on `console.error`.
pub(crate) fn error(context: &str, err: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str(&format!("{PREFIX} {context} failed:")), err);
}
