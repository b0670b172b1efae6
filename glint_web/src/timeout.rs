// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot `setTimeout` wrapper.
//!
//! [`TimeoutSlot`] holds at most one pending timer. Arming clears the
//! previous timer first, so bursts collapse to the last call.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A last-write-wins timer.
pub struct TimeoutSlot {
    inner: Rc<SlotInner>,
}

struct SlotInner {
    closure: RefCell<Option<Closure<dyn FnMut()>>>,
    callback: RefCell<Box<dyn FnMut()>>,
    pending: Cell<Option<i32>>,
}

impl TimeoutSlot {
    /// Creates an idle slot that runs `callback` whenever an armed timer
    /// fires.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(SlotInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            inner.callback.borrow_mut()();
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);
        Self { inner }
    }

    /// Arms the timer for `delay_ms`, cancelling any pending one.
    ///
    /// The delay is rounded up to whole milliseconds.
    pub fn arm(&self, delay_ms: f64) {
        self.cancel();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "debounce delays are small positive millisecond counts"
        )]
        let delay = libm::ceil(delay_ms.max(0.0)) as i32;
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = set_timeout(closure.as_ref().unchecked_ref(), delay);
            self.inner.pending.set(Some(id));
        }
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            clear_timeout(id);
        }
    }

    /// Returns `true` while a timer is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl Drop for TimeoutSlot {
    fn drop(&mut self) {
        self.cancel();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for TimeoutSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimeoutSlot")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}
