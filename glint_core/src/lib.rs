// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-independent state for a static site's behavior layer.
//!
//! `glint_core` holds everything about the site script that can be reasoned
//! about without a browser: which nodes have been revealed, how the ambient
//! particle field evolves, when a resize burst has settled. It is `no_std`
//! compatible (with `alloc`). The `glint_web` crate binds these types to the
//! DOM.
//!
//! # Architecture
//!
//! Two independent subsystems form the core:
//!
//! ```text
//!   querySelectorAll / MutationObserver ──► RevealTracker::begin_observing()
//!                                                  │ Watch
//!                                                  ▼
//!   IntersectionObserver entry ──► VisibilitySample ──► RevealTracker::observe()
//!                                                  │ Transition
//!                                                  ▼
//!                                         add `in`, unobserve
//!
//!   window resize ──► ParticleField::resize_requested() ──► Debounce
//!                                                  │ DebouncePoll::Ready
//!                                                  ▼
//!   ParticleField::poll_resize() ──► regenerate ──► Surface::resize()
//!
//!   requestAnimationFrame(t) ──► ParticleField::render(t) ──► Surface
//! ```
//!
//! **[`reveal`]**: Per-node side table with one-shot `Unseen → Watching →
//! Revealed` transitions, plus a geometric [`Viewport`](reveal::Viewport)
//! model of the intersection rule.
//!
//! **[`field`]**: The particle field state machine (`Uninitialized`,
//! `Running`, `Paused`, `Stopped`, `Inactive`).
//!
//! **[`particle`]**: Particle generation and the sinusoidal brightness
//! function.
//!
//! **[`debounce`]**: Single-slot debounce deadline.
//!
//! **[`surface`]**: The [`Surface`](surface::Surface) trait that drawing
//! backends implement.
//!
//! **[`config`]**: Configuration with `const fn` presets.
//!
//! **[`nav`]** and **[`guard`]**: Pure decisions behind navigation
//! highlighting and the media-saving deterrents.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies.
//! - `trace-rich` (disabled by default, implies `trace`): Emits one event per
//!   rendered frame.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod debounce;
pub mod field;
pub mod guard;
pub mod nav;
pub mod particle;
pub mod reveal;
pub mod surface;
pub mod trace;
