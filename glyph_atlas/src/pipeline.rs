// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One bake, from codepoints to the finished artifact triple.

use image::RgbaImage;

use crate::binarize::binarize;
use crate::layout::Scaling;
use crate::metrics::{measure_glyphs, missing_glyphs};
use crate::output::{commit, encode_json, encode_png};
use crate::raster::rasterize_atlas;
use crate::{
    AtlasLayout, BakeConfig, CodepointSet, FontGlyphSource, FontInfo, GlyphSource, Metadata,
    OutputPaths, Result,
};

/// The in-memory result of a bake. Nothing has touched the filesystem yet.
#[derive(Clone, Debug)]
pub struct BakedAtlas {
    /// The binarized atlas image.
    pub image: RgbaImage,
    /// Codepoint to cell mapping.
    pub metadata: Metadata,
    /// Parameters a renderer needs to slice the image.
    pub font_info: FontInfo,
    /// The full layout the image was drawn with.
    pub layout: AtlasLayout,
}

impl BakedAtlas {
    /// Encodes all three artifacts and writes them together, or not at all.
    pub fn write(&self, paths: &OutputPaths) -> Result<()> {
        let files = [
            (paths.atlas(), encode_png(&self.image)?),
            (paths.metadata(), encode_json("metadata", &self.metadata)?),
            (paths.font_info(), encode_json("font info", &self.font_info)?),
        ];
        commit(&files)?;
        log::info!(
            "wrote {}, {} and {}",
            paths.atlas().display(),
            paths.metadata().display(),
            paths.font_info().display()
        );
        Ok(())
    }
}

/// Opens the configured font and bakes the standard codepoint set.
pub fn bake_font(config: &BakeConfig) -> Result<BakedAtlas> {
    config.validate()?;
    let mut source =
        FontGlyphSource::open(&config.font_path, config.font_index)?.with_hinting(config.hint);
    log::info!("baking {}", config.font_path.display());
    bake(config, &CodepointSet::standard(), &mut source)
}

/// Bakes `set` from `source`.
///
/// Stages run strictly in order: measure at the reference size, derive the
/// scaling, re-measure at the render size and fit the cell, rasterize, then
/// binarize. Metadata is projected from the placements the rasterizer
/// actually used.
pub fn bake(
    config: &BakeConfig,
    set: &CodepointSet,
    source: &mut impl GlyphSource,
) -> Result<BakedAtlas> {
    config.validate()?;

    for ch in missing_glyphs(source, set) {
        log::warn!("font has no glyph for U+{:04X}, baking .notdef", u32::from(ch));
    }

    let reference = measure_glyphs(source, set, config.reference_size)?;
    let scaling = Scaling::derive(
        reference.extents(),
        set.len(),
        config.reference_size,
        config.target_glyph_size,
    )?;

    let rendered = measure_glyphs(source, set, scaling.font_size)?;
    let layout = AtlasLayout::fit(scaling, rendered.extents(), set.len(), config.columns)?;
    log::info!(
        "{} glyphs at {}px (scale {:.2}): cells {}x{}, baseline {}, atlas {}x{}",
        layout.glyph_count,
        layout.font_size,
        layout.scale_factor,
        layout.cell_width,
        layout.cell_height,
        layout.baseline_offset,
        layout.atlas_width(),
        layout.atlas_height()
    );

    let coverage = rasterize_atlas(source, set, &layout)?;
    let image = binarize(&coverage.canvas, config.threshold, config.foreground);
    let metadata = Metadata::from_placements(&coverage.placements);
    let font_info = FontInfo::new(
        &layout,
        config.target_glyph_size,
        config.threshold,
        config.foreground,
    );

    Ok(BakedAtlas {
        image,
        metadata,
        font_info,
        layout,
    })
}
