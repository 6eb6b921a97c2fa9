// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `glyph_atlas`.
//!
//! - The `util` module holds a synthetic font and pixel inspection helpers shared by the
//!   topic modules.
//! - We do not use the default Rust test harness; this `mod.rs` is the single entry point for
//!   all other tests, which keeps the shared helpers in one place.
//! - Put new tests into the module matching their topic and start the test name with that
//!   topic, e.g. `artifacts_write_is_idempotent`.
//! - Tests that write files do so below `CARGO_TARGET_TMPDIR`, one directory per test.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

#[macro_use]
mod util;
