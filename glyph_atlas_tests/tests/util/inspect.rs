// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel inspection of baked atlases.

use std::collections::BTreeSet;

use glyph_atlas::{FontInfo, GridCell};
use image::RgbaImage;

/// Inclusive bounds of the opaque pixels in one cell, relative to the cell's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InkBounds {
    pub(crate) left: u32,
    pub(crate) top: u32,
    pub(crate) right: u32,
    pub(crate) bottom: u32,
}

/// Every distinct alpha value in `image`.
pub(crate) fn alpha_values(image: &RgbaImage) -> BTreeSet<u8> {
    image.pixels().map(|p| p.0[3]).collect()
}

/// The ink of `cell`, or `None` for a blank cell.
pub(crate) fn cell_ink_bounds(
    image: &RgbaImage,
    font_info: &FontInfo,
    cell: GridCell,
) -> Option<InkBounds> {
    let (x0, y0, w, h) = font_info.cell_rect(cell);
    let mut bounds: Option<InkBounds> = None;
    for y in 0..h {
        for x in 0..w {
            if image.get_pixel(x0 + x, y0 + y).0[3] == 0 {
                continue;
            }
            let b = bounds.get_or_insert(InkBounds {
                left: x,
                top: y,
                right: x,
                bottom: y,
            });
            b.left = b.left.min(x);
            b.top = b.top.min(y);
            b.right = b.right.max(x);
            b.bottom = b.bottom.max(y);
        }
    }
    bounds
}
