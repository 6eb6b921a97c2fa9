// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing every glyph into its grid cell of one grayscale canvas.

use image::{GrayImage, Luma};

use crate::{AtlasLayout, CodepointSet, GlyphBBox, GlyphSource, GridCell, Result};

/// Where one glyph was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// The character.
    pub ch: char,
    /// Its grid cell.
    pub cell: GridCell,
    /// Canvas x of the glyph's drawing origin: the cell's left edge shifted by
    /// the negated left-side bearing.
    pub origin_x: i32,
    /// Canvas y of the glyph's baseline.
    pub origin_y: i32,
    /// Ink box at the render size, relative to the drawing origin.
    pub bbox: GlyphBBox,
}

/// The grayscale coverage canvas and the grid assignment it was drawn with.
#[derive(Clone, Debug)]
pub struct CoverageAtlas {
    /// Coverage per pixel, 0 where no glyph has ink.
    pub canvas: GrayImage,
    /// One entry per character, in grid order.
    pub placements: Vec<GlyphPlacement>,
}

/// Rasterizes every character of `set` at `layout.font_size`.
///
/// Each glyph is measured again at the render size right before it is drawn,
/// and that box (not a scaled one) decides the left-bearing shift.
pub fn rasterize_atlas(
    source: &mut impl GlyphSource,
    set: &CodepointSet,
    layout: &AtlasLayout,
) -> Result<CoverageAtlas> {
    let mut canvas = GrayImage::new(layout.atlas_width(), layout.atlas_height());
    let mut placements = Vec::with_capacity(set.len());

    for (index, ch) in set.iter() {
        let bitmap = source.rasterize(ch, layout.font_size)?;
        let bbox = bitmap.bbox();
        let cell = layout.cell(index);
        let (cell_x, cell_y) = layout.cell_origin(cell);
        let (cell_x, cell_y) = (to_i32(cell_x), to_i32(cell_y));

        let origin_x = cell_x - bbox.left;
        let origin_y = cell_y + to_i32(layout.baseline_offset);

        let cell_right = cell_x + to_i32(layout.cell_width);
        let cell_bottom = cell_y + to_i32(layout.cell_height);
        let mut clipped = 0_usize;
        for (dx, dy, coverage) in bitmap.pixels() {
            let x = origin_x + bbox.left + to_i32(dx);
            let y = origin_y + bbox.top + to_i32(dy);
            if x < cell_x || x >= cell_right || y < cell_y || y >= cell_bottom {
                clipped += 1;
                continue;
            }
            let pixel = canvas.get_pixel_mut(x.unsigned_abs(), y.unsigned_abs());
            *pixel = Luma([pixel.0[0].max(coverage)]);
        }
        if clipped > 0 {
            log::warn!(
                "U+{:04X}: {clipped} pixels fall outside cell ({}, {})",
                u32::from(ch),
                cell.row,
                cell.col
            );
        }

        placements.push(GlyphPlacement {
            ch,
            cell,
            origin_x,
            origin_y,
            bbox,
        });
    }

    Ok(CoverageAtlas { canvas, placements })
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
