// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by every bake stage.

use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can stop a bake (or a read of a baked atlas).
///
/// Each variant names the stage it comes from and the resource involved, so the
/// message alone is enough to tell which input needs fixing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The font file could not be read from disk.
    #[error("font loading: cannot read `{path}`")]
    FontRead {
        /// Path to the font file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The font file was read but is not a font swash can parse.
    #[error("font loading: `{path}` has no parsable font at index {index}")]
    FontParse {
        /// Path to the font file.
        path: PathBuf,
        /// Requested index within the font collection.
        index: u32,
    },

    /// A configuration value is out of range.
    #[error("configuration: {0}")]
    InvalidConfig(&'static str),

    /// No glyph produced any ink, so no cell geometry can be derived.
    #[error(
        "layout: cannot size cells from {glyph_count} glyphs \
         (max width {max_width}, natural height {natural_height})"
    )]
    DegenerateLayout {
        /// Number of codepoints that were measured.
        glyph_count: usize,
        /// Widest ink box found.
        max_width: i32,
        /// Combined ascent and descent found.
        natural_height: i32,
    },

    /// The scale factor shrank the reference size to nothing.
    #[error("layout: reference size {reference_size}px scaled by {scale_factor} rounds to 0px")]
    ZeroFontSize {
        /// Size the metrics were measured at.
        reference_size: u32,
        /// Factor that was applied.
        scale_factor: f64,
    },

    /// The grid needs more pixels than one image can hold.
    #[error(
        "layout: {columns}x{rows} cells of {cell_width}x{cell_height}px do not fit in one image"
    )]
    AtlasTooLarge {
        /// Cells per row.
        columns: u32,
        /// Number of rows.
        rows: u32,
        /// Cell width in pixels.
        cell_width: u32,
        /// Cell height in pixels.
        cell_height: u32,
    },

    /// The atlas image could not be encoded or decoded.
    #[error("{artifact}: image codec failure")]
    Encode {
        /// Which artifact was being processed.
        artifact: &'static str,
        /// Underlying codec failure.
        #[source]
        source: image::ImageError,
    },

    /// A JSON artifact could not be produced.
    #[error("{artifact}: cannot serialize")]
    Serialize {
        /// Which artifact was being processed.
        artifact: &'static str,
        /// Underlying serializer failure.
        #[source]
        source: serde_json::Error,
    },

    /// Writing an artifact to disk failed.
    #[error("output: cannot write `{path}`")]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Reading a baked artifact back failed.
    #[error("reader: cannot read `{path}`")]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A baked JSON artifact exists but does not have the expected shape.
    #[error("reader: cannot decode `{path}`")]
    Decode {
        /// Path that was being decoded.
        path: PathBuf,
        /// Underlying deserializer failure.
        #[source]
        source: serde_json::Error,
    },
}
