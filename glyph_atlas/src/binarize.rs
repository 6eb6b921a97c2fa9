// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hard-threshold conversion of coverage into on/off RGBA.

use image::{GrayImage, Rgba, RgbaImage};

/// Maps every coverage value at or above `threshold` to opaque `foreground`
/// and everything else to fully transparent black.
///
/// This is a pure per-pixel map; glyph silhouettes come out exactly as they
/// were rasterized, without any anti-aliased fringe.
pub fn binarize(coverage: &GrayImage, threshold: u8, foreground: [u8; 3]) -> RgbaImage {
    let [r, g, b] = foreground;
    let ink = Rgba([r, g, b, u8::MAX]);
    let clear = Rgba([0, 0, 0, 0]);

    let mut out = RgbaImage::new(coverage.width(), coverage.height());
    for (dst, src) in out.pixels_mut().zip(coverage.pixels()) {
        *dst = if src.0[0] >= threshold { ink } else { clear };
    }
    out
}
