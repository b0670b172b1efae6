// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording and pretty-printing for glint diagnostics.
//!
//! This crate provides [`TraceSink`](glint_core::trace::TraceSink)
//! implementations for development and tests:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: keeps every event in memory for assertions.

pub mod pretty;
pub mod recorder;
