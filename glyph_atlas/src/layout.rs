// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derivation of the single cell geometry shared by every glyph.
//!
//! Sizing happens in two steps. [`Scaling::derive`] turns the extents measured
//! at the reference size into a render size and a first cell estimate, keeping
//! the aspect ratio while the larger of width and height is normalized to the
//! target. [`AtlasLayout::fit`] then takes the extents re-measured at the render
//! size, which differ from a linear scale because of hinting and rounding, and
//! widens the estimate wherever the real ink would not fit.

use serde::{Deserialize, Serialize};

use crate::metrics::Extents;
use crate::{Error, Result};

/// Row and column of a glyph's cell in the atlas grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct GridCell {
    /// Zero-based row, counted from the top.
    pub row: u32,
    /// Zero-based column, counted from the left.
    pub col: u32,
}

impl From<[u32; 2]> for GridCell {
    fn from([row, col]: [u32; 2]) -> Self {
        Self { row, col }
    }
}

impl From<GridCell> for [u32; 2] {
    fn from(cell: GridCell) -> Self {
        [cell.row, cell.col]
    }
}

/// Render size and first cell estimate derived from reference-size extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaling {
    /// Factor from reference-size pixels to render-size pixels.
    pub scale_factor: f64,
    /// Size the glyphs are re-measured and rasterized at.
    pub font_size: u32,
    /// Scaled widest glyph.
    pub cell_width: u32,
    /// Scaled natural height.
    pub cell_height: u32,
    /// Scaled ascent.
    pub baseline_offset: u32,
}

impl Scaling {
    /// Derives the scaling from extents measured at `reference_size`.
    ///
    /// With a `target_glyph_size`, the larger of the natural width and height
    /// is normalized to it. Without one, the natural metrics are used as is.
    pub fn derive(
        extents: Extents,
        glyph_count: usize,
        reference_size: u32,
        target_glyph_size: Option<u32>,
    ) -> Result<Self> {
        let natural_height = extents.natural_height();
        if extents.is_degenerate() {
            return Err(Error::DegenerateLayout {
                glyph_count,
                max_width: extents.max_width,
                natural_height,
            });
        }

        let scale_factor = match target_glyph_size {
            Some(target) => f64::from(target) / f64::from(extents.max_width.max(natural_height)),
            None => 1.0,
        };
        let font_size = round_px(f64::from(reference_size) * scale_factor);
        if font_size == 0 {
            return Err(Error::ZeroFontSize {
                reference_size,
                scale_factor,
            });
        }

        let scale = |v: i32| round_px(f64::from(v) * scale_factor);
        Ok(Self {
            scale_factor,
            font_size,
            cell_width: scale(extents.max_width),
            cell_height: scale(natural_height),
            baseline_offset: scale(extents.max_above),
        })
    }
}

/// The grid geometry every glyph of one atlas shares.
///
/// No glyph measured at `font_size` is wider than `cell_width`, rises more
/// than `baseline_offset` above the baseline, or drops more than
/// `cell_height - baseline_offset` below it. A layout built by
/// [`AtlasLayout::fit`] has a pixel count that fits in a `u32`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtlasLayout {
    /// Width of every cell in pixels.
    pub cell_width: u32,
    /// Height of every cell in pixels.
    pub cell_height: u32,
    /// Distance from a cell's top edge to the baseline.
    pub baseline_offset: u32,
    /// Cells per row.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Number of glyphs in the atlas.
    pub glyph_count: usize,
    /// Factor from reference-size pixels to `font_size` pixels.
    pub scale_factor: f64,
    /// Pixel size glyphs are rasterized at.
    pub font_size: u32,
}

impl AtlasLayout {
    /// Combines the scaled estimate with the extents re-measured at
    /// `scaling.font_size`, growing the cell where the real ink is larger.
    pub fn fit(
        scaling: Scaling,
        measured: Extents,
        glyph_count: usize,
        columns: u32,
    ) -> Result<Self> {
        if columns == 0 {
            return Err(Error::InvalidConfig("columns must be at least 1"));
        }
        let cell_width = scaling.cell_width.max(measured.max_width.unsigned_abs());
        let baseline_offset = scaling
            .baseline_offset
            .max(measured.max_above.unsigned_abs());
        let below = scaling
            .cell_height
            .saturating_sub(scaling.baseline_offset)
            .max(measured.max_below.unsigned_abs());
        let cell_height = baseline_offset + below;

        if cell_width != scaling.cell_width || cell_height != scaling.cell_height {
            log::warn!(
                "glyph ink at {}px exceeds the scaled cell {}x{}, growing it to {}x{}",
                scaling.font_size,
                scaling.cell_width,
                scaling.cell_height,
                cell_width,
                cell_height
            );
        }
        if cell_width == 0 || cell_height == 0 || glyph_count == 0 {
            return Err(Error::DegenerateLayout {
                glyph_count,
                max_width: measured.max_width,
                natural_height: measured.natural_height(),
            });
        }

        let rows = u32::try_from(glyph_count.div_ceil(columns as usize))
            .map_err(|_| Error::InvalidConfig("too many glyphs for one atlas"))?;
        let too_large = || Error::AtlasTooLarge {
            columns,
            rows,
            cell_width,
            cell_height,
        };
        let width = columns.checked_mul(cell_width).ok_or_else(too_large)?;
        let height = rows.checked_mul(cell_height).ok_or_else(too_large)?;
        // The canvas holds `width * height` coverage bytes.
        width.checked_mul(height).ok_or_else(too_large)?;
        Ok(Self {
            cell_width,
            cell_height,
            baseline_offset,
            columns,
            rows,
            glyph_count,
            scale_factor: scaling.scale_factor,
            font_size: scaling.font_size,
        })
    }

    /// Atlas width in pixels.
    pub fn atlas_width(&self) -> u32 {
        self.columns.saturating_mul(self.cell_width)
    }

    /// Atlas height in pixels.
    pub fn atlas_height(&self) -> u32 {
        self.rows.saturating_mul(self.cell_height)
    }

    /// The cell holding grid index `index`, in row-major order.
    pub fn cell(&self, index: usize) -> GridCell {
        let columns = self.columns as usize;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "indices are below glyph_count, whose row count fits in u32"
        )]
        let (row, col) = ((index / columns) as u32, (index % columns) as u32);
        GridCell { row, col }
    }

    /// Pixel position of a cell's top-left corner.
    pub fn cell_origin(&self, cell: GridCell) -> (u32, u32) {
        (
            cell.col.saturating_mul(self.cell_width),
            cell.row.saturating_mul(self.cell_height),
        )
    }
}

/// Rounds half away from zero to a non-negative pixel count.
#[expect(
    clippy::cast_possible_truncation,
    reason = "atlas dimensions are far below u32::MAX"
)]
fn round_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}
