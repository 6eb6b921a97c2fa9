// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A synthetic font whose glyphs are solid rectangles, for unit tests.

use std::collections::HashMap;

use crate::{GlyphBBox, GlyphBitmap, GlyphSource, Result};

/// Drawn for characters marked missing.
pub(crate) const NOTDEF: GlyphBBox = GlyphBBox::new(1, -6, 5, 0);

/// Glyph boxes are declared at `design_size` and scaled linearly for any other
/// pixel size. Every ink pixel has full coverage except the leftmost column,
/// which carries `edge_coverage`.
#[derive(Debug)]
pub(crate) struct BoxFont {
    design_size: u32,
    glyphs: HashMap<char, GlyphBBox>,
    missing: Vec<char>,
    edge_coverage: u8,
    pub(crate) calls: Vec<(char, u32)>,
}

impl BoxFont {
    pub(crate) fn new(design_size: u32) -> Self {
        Self {
            design_size,
            glyphs: HashMap::new(),
            missing: Vec::new(),
            edge_coverage: 255,
            calls: Vec::new(),
        }
    }

    pub(crate) fn with_glyph(mut self, ch: char, bbox: GlyphBBox) -> Self {
        self.glyphs.insert(ch, bbox);
        self
    }

    pub(crate) fn with_missing(mut self, ch: char) -> Self {
        self.missing.push(ch);
        self
    }

    pub(crate) fn with_edge_coverage(mut self, coverage: u8) -> Self {
        self.edge_coverage = coverage;
        self
    }

    fn scaled(&self, bbox: GlyphBBox, px_size: u32) -> GlyphBBox {
        let s = f64::from(px_size) / f64::from(self.design_size);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test boxes are a few pixels wide"
        )]
        let scale = |v: i32| (f64::from(v) * s).round() as i32;
        GlyphBBox::new(
            scale(bbox.left),
            scale(bbox.top),
            scale(bbox.right),
            scale(bbox.bottom),
        )
    }
}

impl GlyphSource for BoxFont {
    fn rasterize(&mut self, ch: char, px_size: u32) -> Result<GlyphBitmap> {
        self.calls.push((ch, px_size));
        let design = if self.missing.contains(&ch) {
            NOTDEF
        } else {
            match self.glyphs.get(&ch) {
                Some(bbox) => *bbox,
                None => return Ok(GlyphBitmap::empty()),
            }
        };
        let bbox = self.scaled(design, px_size);
        let width = bbox.width().unsigned_abs() as usize;
        let height = bbox.height().unsigned_abs() as usize;
        let mut coverage = vec![255_u8; width * height];
        for row in coverage.chunks_exact_mut(width.max(1)) {
            row[0] = self.edge_coverage;
        }
        Ok(GlyphBitmap::new(bbox, coverage).unwrap_or_else(GlyphBitmap::empty))
    }

    fn has_glyph(&self, ch: char) -> bool {
        !self.missing.contains(&ch)
    }
}
