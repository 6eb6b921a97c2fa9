// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A font made of solid rectangles.

use std::collections::HashMap;

use glyph_atlas::{GlyphBBox, GlyphBitmap, GlyphSource, Result};

/// Every glyph is a fully covered rectangle declared at `design_size` and
/// scaled linearly (with rounding) to the requested size.
///
/// Without explicit glyphs, every character except space gets a box derived
/// from its codepoint: left bearing in `-1..=1`, width `4..=8`, ascent
/// `6..=11` and a descent of 3 for every fourth codepoint.
#[derive(Debug, Clone)]
pub(crate) struct SyntheticFont {
    design_size: u32,
    glyphs: HashMap<char, GlyphBBox>,
    derive_missing: bool,
}

impl SyntheticFont {
    /// A font that has a glyph for every character.
    pub(crate) fn covering(design_size: u32) -> Self {
        Self {
            design_size,
            glyphs: HashMap::new(),
            derive_missing: true,
        }
    }

    /// A font that has only the glyphs added with [`Self::with_glyph`].
    pub(crate) fn sparse(design_size: u32) -> Self {
        Self {
            derive_missing: false,
            ..Self::covering(design_size)
        }
    }

    pub(crate) fn with_glyph(mut self, ch: char, bbox: GlyphBBox) -> Self {
        self.glyphs.insert(ch, bbox);
        self
    }

    /// The design-size box of `ch`.
    pub(crate) fn design_box(&self, ch: char) -> GlyphBBox {
        if let Some(bbox) = self.glyphs.get(&ch) {
            return *bbox;
        }
        if !self.derive_missing || ch == ' ' {
            return GlyphBBox::EMPTY;
        }
        let cp = u32::from(ch) as i32;
        let left = cp % 3 - 1;
        let width = 4 + cp % 5;
        let top = -(6 + cp % 6);
        let bottom = if cp % 4 == 0 { 3 } else { 0 };
        GlyphBBox::new(left, top, left + width, bottom)
    }

    /// The box of `ch` at `px_size`.
    pub(crate) fn box_at(&self, ch: char, px_size: u32) -> GlyphBBox {
        let bbox = self.design_box(ch);
        if bbox.is_empty() {
            return GlyphBBox::EMPTY;
        }
        let s = f64::from(px_size) / f64::from(self.design_size);
        let scale = |v: i32| (f64::from(v) * s).round() as i32;
        GlyphBBox::new(
            scale(bbox.left),
            scale(bbox.top),
            scale(bbox.right),
            scale(bbox.bottom),
        )
    }
}

impl GlyphSource for SyntheticFont {
    fn rasterize(&mut self, ch: char, px_size: u32) -> Result<GlyphBitmap> {
        let bbox = self.box_at(ch, px_size);
        if bbox.is_empty() {
            return Ok(GlyphBitmap::empty());
        }
        let len = (bbox.width() * bbox.height()) as usize;
        Ok(GlyphBitmap::new(bbox, vec![u8::MAX; len]).expect("buffer sized from the box"))
    }
}
