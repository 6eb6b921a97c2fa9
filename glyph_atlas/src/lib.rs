// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-grid glyph atlas baking.
//!
//! A bake measures every codepoint of a [`CodepointSet`] at a reference size,
//! derives one cell size and one baseline shared by all glyphs, rasterizes
//! each glyph into its cell and binarizes the result. The image comes with
//! two JSON records: [`Metadata`] (codepoint to `[row, col]`) and
//! [`FontInfo`] (cell geometry, baseline and the parameters of the bake).
//!
//! ```no_run
//! use glyph_atlas::{bake_font, BakeConfig, OutputPaths};
//!
//! # fn main() -> glyph_atlas::Result<()> {
//! let config = BakeConfig {
//!     font_path: "DejaVuSansMono.ttf".into(),
//!     ..BakeConfig::default()
//! };
//! let baked = bake_font(&config)?;
//! baked.write(&OutputPaths::in_dir("out"))?;
//! # Ok(())
//! # }
//! ```
//!
//! Fonts are read through the [`GlyphSource`] trait. [`FontGlyphSource`]
//! rasterizes real fonts with `swash`.

#![warn(clippy::print_stdout, clippy::print_stderr)]

mod binarize;
pub mod codepoints;
mod config;
mod error;
mod layout;
mod metadata;
mod metrics;
mod output;
mod pipeline;
mod preview;
mod raster;
mod source;

#[cfg(test)]
mod testing;

pub use image;
pub use swash;

pub use binarize::binarize;
pub use codepoints::CodepointSet;
pub use config::{BakeConfig, OutputPaths};
pub use error::{Error, Result};
pub use layout::{AtlasLayout, GridCell, Scaling};
pub use metadata::{FontInfo, Metadata, FORMAT_SOLID_COLOR, FORMAT_SOLID_WHITE};
pub use metrics::{measure_glyphs, missing_glyphs, Extents, GlyphMetrics};
pub use pipeline::{bake, bake_font, BakedAtlas};
pub use preview::{render_text, LoadedAtlas};
pub use raster::{rasterize_atlas, CoverageAtlas, GlyphPlacement};
pub use source::{FontGlyphSource, GlyphBBox, GlyphBitmap, GlyphSource};
