// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll reveal over live DOM nodes.
//!
//! [`RevealEngine`] binds a [`RevealTracker`] to an `IntersectionObserver`
//! (one-shot reveals) and a `MutationObserver` (nodes inserted after load).
//! Elements are mapped to [`NodeId`]s through a `WeakMap`, so the engine
//! never keeps a removed node alive.
//!
//! [`NodeId`]: glint_core::reveal::NodeId

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::RefCell;

use glint_core::config::RevealConfig;
use glint_core::reveal::{
    NodeId, RevealMode, RevealTracker, Transition, VisibilitySample, Watch, reachable_ratio,
};
use glint_core::trace::Tracer;
use js_sys::{Array, Object, WeakMap};
use kurbo::Size;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    DomRectReadOnly, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MutationObserver, MutationObserverInit, MutationRecord, Node,
};

use crate::console::{self, ConsoleSink};

type EntriesClosure = Closure<dyn FnMut(Array)>;

/// Reveals matching elements the first time they scroll into view.
pub struct RevealEngine {
    inner: Rc<EngineInner>,
}

struct EngineInner {
    config: RevealConfig,
    selector: String,
    tracker: RefCell<RevealTracker>,
    ids: WeakMap,
    intersection: RefCell<Option<IntersectionObserver>>,
    mutation: RefCell<Option<MutationObserver>>,
    on_intersect: RefCell<Option<EntriesClosure>>,
    on_mutate: RefCell<Option<EntriesClosure>>,
}

impl RevealEngine {
    /// Scans `root` for matches and starts watching them.
    ///
    /// With reduced motion every match is revealed immediately and no
    /// observers are installed. Otherwise a `MutationObserver` on `root`
    /// picks up matches inserted later. A missing `root` returns `Ok(None)`.
    pub fn initialize(
        root: Option<&Element>,
        config: RevealConfig,
        reduced_motion: bool,
    ) -> Result<Option<Self>, JsValue> {
        let Some(root) = root else {
            return Ok(None);
        };
        let mode = RevealMode::for_reduced_motion(reduced_motion);
        let engine = Self {
            inner: Rc::new(EngineInner {
                selector: config.selector_list(),
                tracker: RefCell::new(RevealTracker::new(mode, &config)),
                config,
                ids: WeakMap::new(),
                intersection: RefCell::new(None),
                mutation: RefCell::new(None),
                on_intersect: RefCell::new(None),
                on_mutate: RefCell::new(None),
            }),
        };

        if mode == RevealMode::OnIntersect {
            engine.install_intersection_observer()?;
        }
        engine.inner.observe_subtree(root)?;
        if mode == RevealMode::OnIntersect {
            engine.install_mutation_observer(root)?;
        }
        Ok(Some(engine))
    }

    /// Starts watching `el`. Idempotent.
    pub fn begin_observing(&self, el: &Element) -> Result<Watch, JsValue> {
        self.inner.begin_observing(el)
    }

    /// Returns `true` once `el` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, el: &Element) -> bool {
        self.inner
            .lookup(el)
            .is_some_and(|id| self.inner.tracker.borrow().is_revealed(id))
    }

    /// Returns `true` if `el` carries the watched marker.
    #[must_use]
    pub fn is_watched(&self, el: &Element) -> bool {
        self.inner
            .lookup(el)
            .is_some_and(|id| self.inner.tracker.borrow().is_watched(id))
    }

    /// Number of elements revealed so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.inner.tracker.borrow().revealed_count()
    }

    /// Disconnects both observers. Revealed elements keep their classes.
    pub fn disconnect(&self) {
        if let Some(observer) = self.inner.intersection.borrow_mut().take() {
            observer.disconnect();
        }
        if let Some(observer) = self.inner.mutation.borrow_mut().take() {
            observer.disconnect();
        }
        self.inner.on_intersect.borrow_mut().take();
        self.inner.on_mutate.borrow_mut().take();
    }

    fn install_intersection_observer(&self) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.inner);
        let closure = Closure::wrap(Box::new(move |entries: Array| {
            if let Some(inner) = weak.upgrade() {
                inner.on_entries(&entries);
            }
        }) as Box<dyn FnMut(Array)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.inner.config.threshold));
        options.set_root_margin(&self.inner.config.root_margin());
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)?;

        *self.inner.intersection.borrow_mut() = Some(observer);
        *self.inner.on_intersect.borrow_mut() = Some(closure);
        Ok(())
    }

    fn install_mutation_observer(&self, root: &Element) -> Result<(), JsValue> {
        let weak: Weak<EngineInner> = Rc::downgrade(&self.inner);
        let closure = Closure::wrap(Box::new(move |records: Array| {
            if let Some(inner) = weak.upgrade() {
                inner.on_mutations(&records);
            }
        }) as Box<dyn FnMut(Array)>);

        let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(root, &options)?;

        *self.inner.mutation.borrow_mut() = Some(observer);
        *self.inner.on_mutate.borrow_mut() = Some(closure);
        Ok(())
    }
}

impl EngineInner {
    fn lookup(&self, el: &Element) -> Option<NodeId> {
        let key: &Object = el.as_ref();
        let raw = self.ids.get(key).as_f64()?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "ids are u32 values stored as JS numbers"
        )]
        let id = NodeId(raw as u32);
        Some(id)
    }

    fn node_id(&self, el: &Element) -> NodeId {
        if let Some(id) = self.lookup(el) {
            return id;
        }
        let id = self.tracker.borrow_mut().register();
        let key: &Object = el.as_ref();
        self.ids.set(key, &JsValue::from(id.0));
        id
    }

    fn begin_observing(&self, el: &Element) -> Result<Watch, JsValue> {
        let id = self.node_id(el);
        let mut sink = ConsoleSink;
        let watch = self
            .tracker
            .borrow_mut()
            .begin_observing(id, &mut Tracer::new(&mut sink));
        match watch {
            Watch::Observe => {
                el.class_list().add_1(self.config.watched_class)?;
                if let Some(ref observer) = *self.intersection.borrow() {
                    observer.observe(el);
                }
            }
            Watch::RevealNow => {
                el.class_list()
                    .add_2(self.config.watched_class, self.config.revealed_class)?;
            }
            Watch::AlreadyWatched => {}
        }
        Ok(watch)
    }

    /// Watches `node` itself if it matches, then every match below it.
    fn observe_subtree(&self, node: &Node) -> Result<(), JsValue> {
        if node.node_type() != Node::ELEMENT_NODE {
            return Ok(());
        }
        let el: &Element = node.unchecked_ref();
        if el.matches(&self.selector)? {
            self.begin_observing(el)?;
        }
        let matches = el.query_selector_all(&self.selector)?;
        for i in 0..matches.length() {
            if let Some(child) = matches.get(i) {
                self.begin_observing(child.unchecked_ref())?;
            }
        }
        Ok(())
    }

    fn on_entries(&self, entries: &Array) {
        let mut sink = ConsoleSink;
        let mut tracer = Tracer::new(&mut sink);
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();
            let Some(id) = self.lookup(&target) else {
                continue;
            };
            let sample = sample_entry(&entry);
            let transition = self.tracker.borrow_mut().observe(id, sample, &mut tracer);
            if transition == Transition::Revealed {
                if let Some(ref observer) = *self.intersection.borrow() {
                    observer.unobserve(&target);
                }
                if let Err(err) = target.class_list().add_1(self.config.revealed_class) {
                    console::error("reveal", &err);
                }
            }
        }
    }

    fn on_mutations(&self, records: &Array) {
        for record in records.iter() {
            let record: MutationRecord = record.unchecked_into();
            let added = record.added_nodes();
            for i in 0..added.length() {
                let Some(node) = added.get(i) else {
                    continue;
                };
                if let Err(err) = self.observe_subtree(&node) {
                    console::error("reveal", &err);
                }
            }
        }
    }
}

fn rect_size(rect: &DomRectReadOnly) -> Size {
    Size::new(rect.width(), rect.height())
}

/// Converts an observer entry into a sample, including how much of the
/// target the margin-adjusted root can ever show.
fn sample_entry(entry: &IntersectionObserverEntry) -> VisibilitySample {
    let sample = VisibilitySample::new(entry.is_intersecting(), entry.intersection_ratio());
    match entry.root_bounds() {
        Some(root) => sample.with_reachable(reachable_ratio(
            rect_size(&entry.bounding_client_rect()),
            rect_size(&root),
        )),
        None => sample,
    }
}

impl Drop for RevealEngine {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl core::fmt::Debug for RevealEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tracker = self.inner.tracker.borrow();
        f.debug_struct("RevealEngine")
            .field("selector", &self.inner.selector)
            .field("mode", &tracker.mode())
            .field("watching", &tracker.watching_count())
            .field("revealed", &tracker.revealed_count())
            .finish_non_exhaustive()
    }
}
