// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-glyph ink measurement and the union of all glyph extents.

use crate::{CodepointSet, GlyphBBox, GlyphSource, Result};

/// Ink boxes for every character of a [`CodepointSet`], measured at one pixel
/// size. `boxes()[i]` belongs to the character at grid index `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMetrics {
    px_size: u32,
    boxes: Vec<GlyphBBox>,
}

impl GlyphMetrics {
    /// Wraps already measured boxes.
    pub fn from_boxes(px_size: u32, boxes: Vec<GlyphBBox>) -> Self {
        Self { px_size, boxes }
    }

    /// The pixel size the boxes were measured at.
    pub fn px_size(&self) -> u32 {
        self.px_size
    }

    /// The boxes, in grid order.
    pub fn boxes(&self) -> &[GlyphBBox] {
        &self.boxes
    }

    /// The union of all boxes' extents.
    pub fn extents(&self) -> Extents {
        Extents::of(&self.boxes)
    }
}

/// The largest ink extents found across a set of glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extents {
    /// Widest ink box.
    pub max_width: i32,
    /// Tallest ink above the baseline.
    pub max_above: i32,
    /// Deepest ink below the baseline.
    pub max_below: i32,
}

impl Extents {
    /// Computes the union of `boxes`. Empty boxes contribute nothing.
    pub fn of(boxes: &[GlyphBBox]) -> Self {
        boxes.iter().fold(Self::default(), |acc, bbox| Self {
            max_width: acc.max_width.max(bbox.width()),
            max_above: acc.max_above.max(bbox.above_baseline()),
            max_below: acc.max_below.max(bbox.below_baseline()),
        })
    }

    /// Combined ascent and descent.
    pub fn natural_height(&self) -> i32 {
        self.max_above + self.max_below
    }

    /// Whether there is no ink to size a cell from.
    pub fn is_degenerate(&self) -> bool {
        self.max_width == 0 && self.natural_height() == 0
    }
}

/// Measures every character of `set` at `px_size`.
pub fn measure_glyphs(
    source: &mut impl GlyphSource,
    set: &CodepointSet,
    px_size: u32,
) -> Result<GlyphMetrics> {
    let mut boxes = Vec::with_capacity(set.len());
    for (_, ch) in set.iter() {
        let bbox = source.measure(ch, px_size)?;
        if bbox.is_empty() {
            log::debug!("U+{:04X} has no ink at {px_size}px", u32::from(ch));
        } else {
            log::debug!(
                "U+{:04X} at {px_size}px: left {} top {} right {} bottom {}",
                u32::from(ch),
                bbox.left,
                bbox.top,
                bbox.right,
                bbox.bottom
            );
        }
        boxes.push(bbox);
    }
    Ok(GlyphMetrics::from_boxes(px_size, boxes))
}

/// Characters of `set` the source can only draw as its fallback glyph.
pub fn missing_glyphs(source: &impl GlyphSource, set: &CodepointSet) -> Vec<char> {
    set.iter()
        .map(|(_, ch)| ch)
        .filter(|&ch| !source.has_glyph(ch))
        .collect()
}
