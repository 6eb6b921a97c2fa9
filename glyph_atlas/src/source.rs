// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Access to glyph ink: the [`GlyphSource`] trait and its swash-backed
//! implementation, [`FontGlyphSource`].

use std::path::Path;

use swash::scale::image::{Content, Image as SwashImage};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use crate::{Error, Result};

/// Ink bounding box of one glyph, in pixels, relative to its drawing origin.
///
/// The origin sits on the baseline, so `top` is usually negative (ink above the
/// baseline) and `bottom` positive only for descenders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphBBox {
    /// Left edge of the ink; the left-side bearing.
    pub left: i32,
    /// Top edge of the ink.
    pub top: i32,
    /// Right edge of the ink (exclusive).
    pub right: i32,
    /// Bottom edge of the ink (exclusive).
    pub bottom: i32,
}

impl GlyphBBox {
    /// The box of a glyph with no ink, such as a space.
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Creates a box from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal ink extent; never negative.
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    /// Vertical ink extent; never negative.
    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    /// Whether the glyph has no ink at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Ink height above the baseline, clamped at 0.
    pub fn above_baseline(&self) -> i32 {
        (-self.top).max(0)
    }

    /// Ink depth below the baseline, clamped at 0.
    pub fn below_baseline(&self) -> i32 {
        self.bottom.max(0)
    }
}

/// A rasterized glyph: its box plus a row-major 8-bit coverage buffer of
/// exactly `bbox.width() * bbox.height()` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    bbox: GlyphBBox,
    coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// A glyph with no ink.
    pub fn empty() -> Self {
        Self {
            bbox: GlyphBBox::EMPTY,
            coverage: Vec::new(),
        }
    }

    /// Wraps a coverage buffer. Returns `None` when the buffer length does not
    /// match the box.
    pub fn new(bbox: GlyphBBox, coverage: Vec<u8>) -> Option<Self> {
        let expected = usize::try_from(bbox.width()).ok()? * usize::try_from(bbox.height()).ok()?;
        if coverage.len() != expected {
            return None;
        }
        if expected == 0 {
            return Some(Self::empty());
        }
        Some(Self { bbox, coverage })
    }

    /// The glyph's ink box.
    pub fn bbox(&self) -> GlyphBBox {
        self.bbox
    }

    /// Row-major coverage values.
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Iterates over `(dx, dy, coverage)` for every pixel of the box, where
    /// `dx`/`dy` are offsets from the box's top-left corner.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        let width = self.bbox.width().unsigned_abs().max(1);
        self.coverage.iter().enumerate().map(move |(i, &value)| {
            let i = u32::try_from(i).unwrap_or(u32::MAX);
            (i % width, i / width, value)
        })
    }
}

/// Something that can draw characters at a pixel size.
///
/// The baker only ever talks to fonts through this trait.
pub trait GlyphSource {
    /// Rasterizes `ch` at `px_size` pixels per em, returning its coverage and
    /// its ink box relative to the baseline origin.
    ///
    /// A character with no ink must come back as [`GlyphBitmap::empty`], not as
    /// an error.
    fn rasterize(&mut self, ch: char, px_size: u32) -> Result<GlyphBitmap>;

    /// Measures the ink box of `ch` at `px_size`.
    fn measure(&mut self, ch: char, px_size: u32) -> Result<GlyphBBox> {
        Ok(self.rasterize(ch, px_size)?.bbox())
    }

    /// Whether `ch` maps to a real glyph rather than the fallback (`.notdef`)
    /// glyph.
    fn has_glyph(&self, ch: char) -> bool {
        let _ = ch;
        true
    }
}

/// A font file rendered with swash.
pub struct FontGlyphSource {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    scale_cx: ScaleContext,
    hint: bool,
}

impl FontGlyphSource {
    /// Reads and parses the font at `path`, selecting face `index` of a
    /// collection.
    pub fn open(path: &Path, index: u32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| Error::FontRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_data(data, index).ok_or_else(|| Error::FontParse {
            path: path.to_owned(),
            index,
        })
    }

    /// Parses an in-memory font. Returns `None` when `data` holds no font at
    /// `index`.
    pub fn from_data(data: Vec<u8>, index: u32) -> Option<Self> {
        let font = FontRef::from_index(&data, usize::try_from(index).ok()?)?;
        let (offset, key) = (font.offset, font.key);
        Some(Self {
            data,
            offset,
            key,
            scale_cx: ScaleContext::new(),
            hint: true,
        })
    }

    /// Enables or disables hinting. Hinting is on by default.
    pub fn with_hinting(mut self, hint: bool) -> Self {
        self.hint = hint;
        self
    }

    fn font(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}

impl GlyphSource for FontGlyphSource {
    fn rasterize(&mut self, ch: char, px_size: u32) -> Result<GlyphBitmap> {
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let glyph_id = font.charmap().map(ch);
        let mut scaler = self
            .scale_cx
            .builder(font)
            .size(px_size as f32)
            .hint(self.hint)
            .build();

        let rendered = Render::new(&[Source::Outline, Source::Bitmap(StrikeWith::BestFit)])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id);

        Ok(rendered.map_or_else(GlyphBitmap::empty, bitmap_from_swash))
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font().charmap().map(ch) != 0
    }
}

impl core::fmt::Debug for FontGlyphSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontGlyphSource")
            .field("len", &self.data.len())
            .field("offset", &self.offset)
            .field("hint", &self.hint)
            .finish_non_exhaustive()
    }
}

/// Converts a swash image into a box and a single coverage channel.
fn bitmap_from_swash(image: SwashImage) -> GlyphBitmap {
    let placement = image.placement;
    let (Ok(width), Ok(height)) = (
        i32::try_from(placement.width),
        i32::try_from(placement.height),
    ) else {
        return GlyphBitmap::empty();
    };
    let left = placement.left;
    let top = -placement.top;
    let bbox = GlyphBBox::new(left, top, left + width, top + height);

    let coverage = match image.content {
        Content::Mask => image.data,
        // Color bitmaps keep their silhouette in the alpha channel.
        Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
        Content::SubpixelMask => image
            .data
            .chunks_exact(4)
            .map(|px| px[0].max(px[1]).max(px[2]))
            .collect(),
    };

    GlyphBitmap::new(bbox, coverage).unwrap_or_else(GlyphBitmap::empty)
}
