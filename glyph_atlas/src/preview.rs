// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading a baked atlas back and compositing text from it.

use std::fs;
use std::path::Path;

use image::{imageops, ImageFormat, RgbaImage};
use serde::de::DeserializeOwned;

use crate::{Error, FontInfo, Metadata, OutputPaths, Result};

/// An artifact triple loaded from disk.
#[derive(Clone, Debug)]
pub struct LoadedAtlas {
    /// The atlas image.
    pub image: RgbaImage,
    /// Codepoint to cell mapping.
    pub metadata: Metadata,
    /// Cell geometry.
    pub font_info: FontInfo,
}

impl LoadedAtlas {
    /// Reads the three files named by `paths`.
    pub fn open(paths: &OutputPaths) -> Result<Self> {
        let path = paths.atlas();
        let bytes = read(&path)?;
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|source| Error::Encode {
                artifact: "atlas image",
                source,
            })?
            .to_rgba8();
        let metadata: Metadata = read_json(&paths.metadata())?;
        let font_info: FontInfo = read_json(&paths.font_info())?;
        log::debug!(
            "loaded {} ({}x{}, {} glyphs)",
            path.display(),
            image.width(),
            image.height(),
            metadata.len()
        );
        Ok(Self {
            image,
            metadata,
            font_info,
        })
    }

    /// Composites `text` from this atlas. See [`render_text`].
    pub fn render(&self, text: &str) -> RgbaImage {
        render_text(&self.image, &self.metadata, &self.font_info, text)
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
        path: path.to_owned(),
        source,
    })
}

/// Lays `text` out on the fixed grid, one cell per character.
///
/// Lines are split on `\n`. The output is as wide as the longest line and one
/// cell tall per line. A character the atlas does not contain leaves its cell
/// transparent.
pub fn render_text(
    atlas: &RgbaImage,
    metadata: &Metadata,
    font_info: &FontInfo,
    text: &str,
) -> RgbaImage {
    let (cell_w, cell_h) = (font_info.glyph_box_width, font_info.glyph_box_height);
    let lines: Vec<&str> = text.split('\n').collect();
    let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut out = RgbaImage::new(
        saturating_u32(longest).saturating_mul(cell_w),
        saturating_u32(lines.len()).saturating_mul(cell_h),
    );
    for (line_idx, line) in lines.iter().enumerate() {
        let y = i64::from(cell_h) * i64::try_from(line_idx).unwrap_or(i64::MAX);
        for (char_idx, ch) in line.chars().enumerate() {
            let Some(cell) = metadata.cell(ch) else {
                continue;
            };
            let (sx, sy, w, h) = font_info.cell_rect(cell);
            let glyph = imageops::crop_imm(atlas, sx, sy, w, h).to_image();
            let x = i64::from(cell_w) * i64::try_from(char_idx).unwrap_or(i64::MAX);
            imageops::replace(&mut out, &glyph, x, y);
        }
    }
    out
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::{GridCell, FORMAT_SOLID_COLOR};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn font_info() -> FontInfo {
        FontInfo {
            glyph_box_width: 2,
            glyph_box_height: 3,
            columns: 2,
            baseline_offset: 2,
            font_size: 3,
            target_glyph_size: None,
            scale_factor: 1.0,
            threshold: 1,
            format: FORMAT_SOLID_COLOR.to_owned(),
        }
    }

    /// Two cells side by side: `a` is solid red, `b` solid blue.
    fn atlas() -> (RgbaImage, Metadata) {
        let image = RgbaImage::from_fn(4, 3, |x, _| if x < 2 { RED } else { BLUE });
        let metadata = Metadata::from_entries([
            ('a', GridCell { row: 0, col: 0 }),
            ('b', GridCell { row: 0, col: 1 }),
        ]);
        (image, metadata)
    }

    #[test]
    fn copies_cells_onto_the_grid() {
        let (image, metadata) = atlas();
        let out = render_text(&image, &metadata, &font_info(), "ab\nb");
        assert_eq!(out.dimensions(), (4, 6));
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(3, 2), BLUE);
        assert_eq!(*out.get_pixel(1, 4), BLUE);
        // The second line is shorter than the first.
        assert_eq!(*out.get_pixel(2, 4), CLEAR);
    }

    #[test]
    fn unknown_characters_still_advance() {
        let (image, metadata) = atlas();
        let out = render_text(&image, &metadata, &font_info(), "?a");
        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(*out.get_pixel(0, 1), CLEAR);
        assert_eq!(*out.get_pixel(2, 1), RED);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let (image, metadata) = atlas();
        let out = render_text(&image, &metadata, &font_info(), "");
        assert_eq!(out.dimensions(), (0, 3));
    }

    #[test]
    fn cells_outside_the_image_render_clipped() {
        let (image, _) = atlas();
        let metadata = Metadata::from_entries([('z', GridCell { row: 5, col: 5 })]);
        let out = render_text(&image, &metadata, &font_info(), "z");
        assert_eq!(out.dimensions(), (2, 3));
        assert!(out.pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn open_reports_missing_files() {
        let dir = std::env::temp_dir().join("glyph_atlas_preview_tests").join("missing");
        let _ = fs::remove_dir_all(&dir);
        let err = LoadedAtlas::open(&OutputPaths::in_dir(&dir)).expect_err("nothing baked");
        assert!(matches!(err, Error::Read { .. }));
    }
}
