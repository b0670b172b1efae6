// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot scroll reveal tracking.
//!
//! [`RevealTracker`] is a side table keyed by [`NodeId`]. Each record moves
//! through `Unseen → Watching → Revealed` and never back. The DOM layer owns
//! the mapping from elements to ids (a `WeakMap` on the web) and acts on the
//! outcomes the tracker returns:
//!
//! - [`Watch::Observe`]: add the watched class and register the element with
//!   the intersection observer.
//! - [`Watch::RevealNow`]: reduced motion; add both classes, observe nothing.
//! - [`Watch::AlreadyWatched`]: do nothing. Mutation batches routinely repeat
//!   nodes, so this is the common case.
//! - [`Transition::Revealed`]: add the revealed class and unobserve.
//!
//! [`Viewport`] models the intersection rule geometrically so the trigger
//! can be exercised without a browser.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};

use crate::config::RevealConfig;
use crate::trace::{RevealEvent, Tracer, WatchEvent};

/// Ratios reported by the browser at a threshold crossing can land a hair
/// below the threshold itself.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Opaque identity of an observed node.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// How reveals are triggered. Decided once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealMode {
    /// Reveal each node the first time it scrolls into view.
    OnIntersect,
    /// Reduced motion: reveal everything as soon as it is seen.
    Immediate,
}

impl RevealMode {
    /// Picks the mode for a reduced-motion preference.
    #[must_use]
    pub const fn for_reduced_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::Immediate
        } else {
            Self::OnIntersect
        }
    }
}

/// Lifecycle of one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Known to the table but never observed.
    #[default]
    Unseen,
    /// Carries the watched marker and awaits intersection.
    Watching,
    /// Revealed. Terminal.
    Revealed,
}

/// Outcome of [`RevealTracker::begin_observing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Watch {
    /// Newly watched; register with the intersection observer.
    Observe,
    /// Newly seen in [`RevealMode::Immediate`]; mark revealed right away.
    RevealNow,
    /// Already watched or revealed; no-op.
    AlreadyWatched,
}

/// Outcome of [`RevealTracker::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The node was revealed by this sample; stop watching it.
    Revealed,
    /// Nothing changed.
    Unchanged,
}

/// One intersection reading for a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilitySample {
    /// Whether the node intersects the (margin-adjusted) viewport at all.
    pub intersecting: bool,
    /// Visible fraction of the node, 0.0–1.0.
    pub ratio: f64,
    /// Largest fraction of the node the viewport can show at once.
    ///
    /// Below 1.0 only for nodes larger than the viewport; see
    /// [`reachable_ratio`].
    pub reachable: f64,
}

impl VisibilitySample {
    /// A reading for a node that fits inside the viewport.
    #[must_use]
    pub const fn new(intersecting: bool, ratio: f64) -> Self {
        Self {
            intersecting,
            ratio,
            reachable: 1.0,
        }
    }

    /// Sets the largest ratio the node can reach.
    #[must_use]
    pub const fn with_reachable(self, reachable: f64) -> Self {
        Self { reachable, ..self }
    }

    /// Returns `true` if the sample counts as visible under `threshold`.
    ///
    /// A node too large to ever reach `threshold` counts as visible as soon
    /// as it intersects at all.
    #[must_use]
    pub fn meets(&self, threshold: f64) -> bool {
        self.intersecting
            && (self.ratio + RATIO_TOLERANCE >= threshold || self.reachable < threshold)
    }
}

/// Largest intersection ratio a `node`-sized box can have in a `view`-sized
/// viewport. Empty nodes read as fully reachable.
#[must_use]
pub fn reachable_ratio(node: Size, view: Size) -> f64 {
    let axis = |n: f64, v: f64| if n > 0.0 { (v.max(0.0) / n).min(1.0) } else { 1.0 };
    axis(node.width, view.width) * axis(node.height, view.height)
}

/// The visible area that reveal samples are measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport bounds in the same coordinate space as node rectangles.
    pub bounds: Rect,
    /// Percentage of the viewport height removed from the bottom edge.
    pub margin_bottom_percent: f64,
}

impl Viewport {
    /// Creates a viewport with the margin from `config`.
    #[must_use]
    pub fn new(bounds: Rect, config: &RevealConfig) -> Self {
        Self {
            bounds,
            margin_bottom_percent: config.margin_bottom_percent,
        }
    }

    /// Returns the viewport with its bottom edge pulled in by the margin.
    #[must_use]
    pub fn effective_bounds(&self) -> Rect {
        let shrink = self.bounds.height() * self.margin_bottom_percent / 100.0;
        Rect::new(
            self.bounds.x0,
            self.bounds.y0,
            self.bounds.x1,
            self.bounds.y1 - shrink,
        )
    }

    /// Measures how much of `node` is visible.
    #[must_use]
    pub fn sample(&self, node: Rect) -> VisibilitySample {
        let view = self.effective_bounds();
        let w = node.x1.min(view.x1) - node.x0.max(view.x0);
        let h = node.y1.min(view.y1) - node.y0.max(view.y0);
        let intersecting = w >= 0.0 && h >= 0.0;
        let area = node.area();
        let ratio = match (intersecting, area > 0.0) {
            (false, _) => 0.0,
            (true, true) => (w * h) / area,
            (true, false) => 1.0,
        };
        VisibilitySample::new(intersecting, ratio)
            .with_reachable(reachable_ratio(node.size(), view.size()))
    }

    /// Scrolls the viewport vertically by `dy`.
    #[must_use]
    pub fn scrolled_by(&self, dy: f64) -> Self {
        Self {
            bounds: Rect::new(
                self.bounds.x0,
                self.bounds.y0 + dy,
                self.bounds.x1,
                self.bounds.y1 + dy,
            ),
            ..*self
        }
    }
}

/// Side table of reveal state, keyed by [`NodeId`].
#[derive(Clone, Debug)]
pub struct RevealTracker {
    mode: RevealMode,
    threshold: f64,
    nodes: Vec<NodeState>,
}

impl RevealTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new(mode: RevealMode, config: &RevealConfig) -> Self {
        Self {
            mode,
            threshold: config.threshold,
            nodes: Vec::new(),
        }
    }

    /// Returns the trigger mode.
    #[must_use]
    pub const fn mode(&self) -> RevealMode {
        self.mode
    }

    /// Allocates an id for a node the table has not seen before.
    pub fn register(&mut self) -> NodeId {
        let id = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(NodeState::Unseen);
        NodeId(id)
    }

    /// Returns the state of `node`. Unknown ids read as [`NodeState::Unseen`].
    #[must_use]
    pub fn state(&self, node: NodeId) -> NodeState {
        self.nodes
            .get(node.0 as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Returns `true` once `node` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.state(node) == NodeState::Revealed
    }

    /// Returns `true` if `node` carries the watched marker.
    #[must_use]
    pub fn is_watched(&self, node: NodeId) -> bool {
        self.state(node) != NodeState::Unseen
    }

    /// Number of nodes revealed so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|s| **s == NodeState::Revealed)
            .count()
    }

    /// Number of nodes currently waiting for an intersection.
    #[must_use]
    pub fn watching_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|s| **s == NodeState::Watching)
            .count()
    }

    /// Starts watching `node`. Idempotent.
    pub fn begin_observing(&mut self, node: NodeId, tracer: &mut Tracer<'_>) -> Watch {
        let mode = self.mode;
        let slot = self.slot_mut(node);
        if *slot != NodeState::Unseen {
            return Watch::AlreadyWatched;
        }
        let outcome = match mode {
            RevealMode::OnIntersect => {
                *slot = NodeState::Watching;
                Watch::Observe
            }
            RevealMode::Immediate => {
                *slot = NodeState::Revealed;
                Watch::RevealNow
            }
        };
        tracer.watch(&WatchEvent { node, outcome });
        if outcome == Watch::RevealNow {
            tracer.reveal(&RevealEvent {
                node,
                immediate: true,
            });
        }
        outcome
    }

    /// Feeds an intersection reading for `node`.
    ///
    /// Only a watched node with a sample meeting the threshold transitions.
    /// Revealed nodes ignore every later sample, so scrolling away never
    /// un-reveals.
    pub fn observe(
        &mut self,
        node: NodeId,
        sample: VisibilitySample,
        tracer: &mut Tracer<'_>,
    ) -> Transition {
        let threshold = self.threshold;
        let Some(slot) = self.nodes.get_mut(node.0 as usize) else {
            return Transition::Unchanged;
        };
        if *slot != NodeState::Watching || !sample.meets(threshold) {
            return Transition::Unchanged;
        }
        *slot = NodeState::Revealed;
        tracer.reveal(&RevealEvent {
            node,
            immediate: false,
        });
        Transition::Revealed
    }

    fn slot_mut(&mut self, node: NodeId) -> &mut NodeState {
        let idx = node.0 as usize;
        if self.nodes.len() <= idx {
            self.nodes.resize(idx + 1, NodeState::Unseen);
        }
        &mut self.nodes[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(mode: RevealMode) -> RevealTracker {
        RevealTracker::new(mode, &RevealConfig::site())
    }

    fn visible() -> VisibilitySample {
        VisibilitySample::new(true, 0.5)
    }

    fn hidden() -> VisibilitySample {
        VisibilitySample::new(false, 0.0)
    }

    #[test]
    fn begin_observing_is_idempotent() {
        let mut t = tracker(RevealMode::OnIntersect);
        let n = t.register();
        assert_eq!(t.begin_observing(n, &mut Tracer::none()), Watch::Observe);
        assert_eq!(
            t.begin_observing(n, &mut Tracer::none()),
            Watch::AlreadyWatched,
            "second call must not re-register"
        );
        assert_eq!(t.watching_count(), 1);
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut t = tracker(RevealMode::OnIntersect);
        let n = t.register();
        t.begin_observing(n, &mut Tracer::none());

        assert_eq!(t.observe(n, visible(), &mut Tracer::none()), Transition::Revealed);
        assert_eq!(t.observe(n, hidden(), &mut Tracer::none()), Transition::Unchanged);
        assert_eq!(t.observe(n, visible(), &mut Tracer::none()), Transition::Unchanged);
        assert!(t.is_revealed(n), "scrolling out never un-reveals");
        assert_eq!(
            t.begin_observing(n, &mut Tracer::none()),
            Watch::AlreadyWatched,
            "a revealed node is never watched again"
        );
    }

    #[test]
    fn unwatched_nodes_ignore_samples() {
        let mut t = tracker(RevealMode::OnIntersect);
        let n = t.register();
        assert_eq!(t.observe(n, visible(), &mut Tracer::none()), Transition::Unchanged);
        assert_eq!(t.state(n), NodeState::Unseen);
        assert_eq!(
            t.observe(NodeId(42), visible(), &mut Tracer::none()),
            Transition::Unchanged,
            "unknown ids are ignored"
        );
    }

    #[test]
    fn below_threshold_does_not_reveal() {
        let mut t = tracker(RevealMode::OnIntersect);
        let n = t.register();
        t.begin_observing(n, &mut Tracer::none());
        let sliver = VisibilitySample::new(true, 0.05);
        assert_eq!(t.observe(n, sliver, &mut Tracer::none()), Transition::Unchanged);
        let crossing = VisibilitySample::new(true, 0.0995);
        assert_eq!(
            t.observe(n, crossing, &mut Tracer::none()),
            Transition::Revealed,
            "ratios reported at the crossing are accepted"
        );
    }

    #[test]
    fn immediate_mode_reveals_on_sight() {
        let mut t = tracker(RevealMode::for_reduced_motion(true));
        let nodes: Vec<_> = (0..4).map(|_| t.register()).collect();
        for &n in &nodes {
            assert_eq!(t.begin_observing(n, &mut Tracer::none()), Watch::RevealNow);
        }
        assert_eq!(t.revealed_count(), 4);
        assert_eq!(t.watching_count(), 0);
    }

    #[test]
    fn viewport_margin_shrinks_bottom() {
        let vp = Viewport::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), &RevealConfig::site());
        assert_eq!(vp.effective_bounds(), Rect::new(0.0, 0.0, 1000.0, 940.0));

        // Node starts 950px down: inside the raw viewport, outside the margin.
        let node = Rect::new(0.0, 950.0, 1000.0, 1050.0);
        assert!(!vp.sample(node).intersecting);
        let s = vp.scrolled_by(60.0).sample(node);
        assert!((s.ratio - 0.5).abs() < 1e-9, "half visible, got {}", s.ratio);
    }

    #[test]
    fn scroll_scenario_reveals_exactly_crossing_nodes() {
        let config = RevealConfig::site();
        let mut t = RevealTracker::new(RevealMode::OnIntersect, &config);
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0), &config);

        // Five 400px-tall cards stacked below the fold, 100px apart.
        let mut rects: Vec<Rect> = (0..5)
            .map(|i| {
                let top = 700.0 + f64::from(i) * 500.0;
                Rect::new(0.0, top, 800.0, top + 400.0)
            })
            .collect();
        let mut ids: Vec<NodeId> = rects.iter().map(|_| t.register()).collect();
        for &id in &ids {
            t.begin_observing(id, &mut Tracer::none());
        }

        let feed = |t: &mut RevealTracker, vp: &Viewport, ids: &[NodeId], rects: &[Rect]| {
            for (&id, &r) in ids.iter().zip(rects) {
                t.observe(id, vp.sample(r), &mut Tracer::none());
            }
        };

        feed(&mut t, &vp, &ids, &rects);
        assert_eq!(t.revealed_count(), 0, "nothing visible at load");

        // Effective bottom at 564 + 700 = 1264: card 0 fully in, card 1
        // (1200..1600) 64px = 16% in, card 2 (1700..) not at all.
        vp = vp.scrolled_by(700.0);
        feed(&mut t, &vp, &ids, &rects);
        assert!(t.is_revealed(ids[0]) && t.is_revealed(ids[1]));
        assert_eq!(t.revealed_count(), 2, "exactly the two crossing cards");

        // A sixth card is inserted further down.
        rects.push(Rect::new(0.0, 3400.0, 800.0, 3800.0));
        ids.push(t.register());
        assert_eq!(t.begin_observing(ids[5], &mut Tracer::none()), Watch::Observe);
        assert_eq!(
            t.begin_observing(ids[0], &mut Tracer::none()),
            Watch::AlreadyWatched,
            "rescanning existing nodes is a no-op"
        );

        vp = vp.scrolled_by(3000.0);
        let mut reveals = 0;
        for _ in 0..3 {
            if t.observe(ids[5], vp.sample(rects[5]), &mut Tracer::none()) == Transition::Revealed
            {
                reveals += 1;
            }
        }
        assert_eq!(reveals, 1, "the inserted card reveals exactly once");
        assert_eq!(t.revealed_count(), 3);
        assert!(ids[2..5].iter().all(|&id| !t.is_revealed(id)));
    }

    #[test]
    fn oversized_node_reveals_on_first_intersection() {
        let config = RevealConfig::site();
        let mut t = RevealTracker::new(RevealMode::OnIntersect, &config);
        // Phone viewport; a gallery section ten viewports tall.
        let vp = Viewport::new(Rect::new(0.0, 0.0, 390.0, 700.0), &config);
        let section = Rect::new(0.0, 800.0, 390.0, 7800.0);
        let n = t.register();
        t.begin_observing(n, &mut Tracer::none());

        let mut revealed_at = None;
        let mut max_ratio: f64 = 0.0;
        for step in 0..200 {
            let sample = vp.scrolled_by(f64::from(step) * 50.0).sample(section);
            max_ratio = max_ratio.max(sample.ratio);
            if t.observe(n, sample, &mut Tracer::none()) == Transition::Revealed {
                revealed_at.get_or_insert(step);
            }
        }
        assert!(max_ratio < config.threshold, "section can never reach 10%");
        // Effective bottom is 658; the section top (800) enters at step 3.
        assert_eq!(revealed_at, Some(3), "reveals as soon as it intersects");
        assert!(t.is_revealed(n), "section is revealed");
    }

    #[test]
    fn reachable_ratio_caps_large_nodes() {
        let view = Size::new(390.0, 658.0);
        assert_eq!(reachable_ratio(Size::new(390.0, 329.0), view), 1.0);
        let tall = reachable_ratio(Size::new(390.0, 7000.0), view);
        assert!((tall - 0.094).abs() < 1e-9, "got {tall}");
        assert_eq!(reachable_ratio(Size::ZERO, view), 1.0, "empty nodes");

        let capped = VisibilitySample::new(true, 0.02).with_reachable(tall);
        assert!(capped.meets(0.10), "capped nodes reveal on any intersection");
        assert!(
            !VisibilitySample::new(false, 0.0)
                .with_reachable(tall)
                .meets(0.10),
            "but still have to intersect"
        );
        assert!(
            !VisibilitySample::new(true, 0.02).meets(0.10),
            "small nodes still wait for the threshold"
        );
    }
}
