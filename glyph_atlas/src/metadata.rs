// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two JSON records that accompany an atlas image.
//!
//! `Metadata` maps each codepoint, written as a decimal string, to its
//! `[row, col]` cell. `FontInfo` carries the numbers a renderer needs to cut
//! cells out of the image.

use std::collections::HashMap;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::{AtlasLayout, GlyphPlacement, GridCell};

/// Format tag for atlases drawn in the default white.
pub const FORMAT_SOLID_WHITE: &str = "RGBA_solid_white_no_antialiasing";

/// Format tag for atlases drawn in any other solid color.
pub const FORMAT_SOLID_COLOR: &str = "RGBA_solid_color_no_antialiasing";

/// Codepoint to grid cell mapping, kept in grid order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(char, GridCell)>,
    index: HashMap<char, usize>,
}

impl Metadata {
    /// Projects the grid assignment the rasterizer used.
    pub fn from_placements(placements: &[GlyphPlacement]) -> Self {
        Self::from_entries(placements.iter().map(|p| (p.ch, p.cell)))
    }

    /// Builds metadata from `(char, cell)` pairs. A repeated character keeps
    /// its first cell.
    pub fn from_entries(entries: impl IntoIterator<Item = (char, GridCell)>) -> Self {
        let mut metadata = Self::default();
        for (ch, cell) in entries {
            if metadata.index.contains_key(&ch) {
                continue;
            }
            metadata.index.insert(ch, metadata.entries.len());
            metadata.entries.push((ch, cell));
        }
        metadata
    }

    /// The cell holding `ch`, if it was baked.
    pub fn cell(&self, ch: char) -> Option<GridCell> {
        self.index.get(&ch).map(|&i| self.entries[i].1)
    }

    /// All entries in grid order.
    pub fn entries(&self) -> &[(char, GridCell)] {
        &self.entries
    }

    /// Number of baked characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was baked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ch, cell) in &self.entries {
            map.serialize_entry(&u32::from(*ch).to_string(), cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetadataVisitor;

        impl<'de> Visitor<'de> for MetadataVisitor {
            type Value = Metadata;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a map from decimal codepoints to [row, col] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metadata, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, cell)) = access.next_entry::<String, GridCell>()? {
                    let ch = parse_codepoint(&key).ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "metadata key `{key}` is not a decimal codepoint"
                        ))
                    })?;
                    entries.push((ch, cell));
                }
                // Files written by other tools may not keep grid order.
                entries.sort_by_key(|&(_, cell)| cell);
                Ok(Metadata::from_entries(entries))
            }
        }

        deserializer.deserialize_map(MetadataVisitor)
    }
}

fn parse_codepoint(key: &str) -> Option<char> {
    key.parse::<u32>().ok().and_then(char::from_u32)
}

/// Layout parameters exported next to the atlas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    /// Cell width in pixels.
    pub glyph_box_width: u32,
    /// Cell height in pixels.
    pub glyph_box_height: u32,
    /// Cells per row.
    pub columns: u32,
    /// Distance from a cell's top edge to the baseline.
    pub baseline_offset: u32,
    /// Pixel size the glyphs were rasterized at.
    pub font_size: u32,
    /// Size the larger glyph dimension was normalized to; absent when the
    /// atlas was baked at natural metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_glyph_size: Option<u32>,
    /// Factor from reference-size metrics to `font_size`.
    pub scale_factor: f64,
    /// Minimum coverage that became ink.
    pub threshold: u8,
    /// Pixel format tag.
    pub format: String,
}

impl FontInfo {
    /// Projects a finished layout.
    pub fn new(
        layout: &AtlasLayout,
        target_glyph_size: Option<u32>,
        threshold: u8,
        foreground: [u8; 3],
    ) -> Self {
        let format = if foreground == [u8::MAX; 3] {
            FORMAT_SOLID_WHITE
        } else {
            FORMAT_SOLID_COLOR
        };
        Self {
            glyph_box_width: layout.cell_width,
            glyph_box_height: layout.cell_height,
            columns: layout.columns,
            baseline_offset: layout.baseline_offset,
            font_size: layout.font_size,
            target_glyph_size,
            scale_factor: layout.scale_factor,
            threshold,
            format: format.to_owned(),
        }
    }

    /// Pixel rectangle `(x, y, width, height)` of `cell` in the atlas image.
    pub fn cell_rect(&self, cell: GridCell) -> (u32, u32, u32, u32) {
        (
            cell.col * self.glyph_box_width,
            cell.row * self.glyph_box_height,
            self.glyph_box_width,
            self.glyph_box_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metadata {
        Metadata::from_entries([
            ('~', GridCell { row: 0, col: 0 }),
            ('A', GridCell { row: 0, col: 1 }),
            ('Ё', GridCell { row: 1, col: 0 }),
        ])
    }

    #[test]
    fn metadata_keeps_grid_order_in_json() {
        let json = serde_json::to_string(&sample()).expect("plain data");
        assert_eq!(json, r#"{"126":[0,0],"65":[0,1],"1025":[1,0]}"#);
    }

    #[test]
    fn metadata_pretty_layout_matches_two_space_indent() {
        let metadata = Metadata::from_entries([('A', GridCell { row: 0, col: 1 })]);
        let json = serde_json::to_string_pretty(&metadata).expect("plain data");
        assert_eq!(json, "{\n  \"65\": [\n    0,\n    1\n  ]\n}");
    }

    #[test]
    fn metadata_reads_back() {
        let json = r#"{"1025":[1,0],"126":[0,0],"65":[0,1]}"#;
        let metadata: Metadata = serde_json::from_str(json).expect("valid metadata");
        assert_eq!(metadata, sample());
        assert_eq!(metadata.cell('Ё'), Some(GridCell { row: 1, col: 0 }));
        assert_eq!(metadata.cell('z'), None);
    }

    #[test]
    fn metadata_rejects_non_numeric_keys() {
        let result: Result<Metadata, _> = serde_json::from_str(r#"{"A":[0,0]}"#);
        assert!(result.is_err());
        let result: Result<Metadata, _> = serde_json::from_str(r#"{"55296":[0,0]}"#);
        assert!(result.is_err(), "surrogates are not characters");
    }

    #[test]
    fn repeated_characters_keep_first_cell() {
        let metadata = Metadata::from_entries([
            ('a', GridCell { row: 0, col: 0 }),
            ('a', GridCell { row: 0, col: 1 }),
        ]);
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.cell('a'), Some(GridCell { row: 0, col: 0 }));
    }

    fn layout() -> AtlasLayout {
        AtlasLayout {
            cell_width: 19,
            cell_height: 32,
            baseline_offset: 24,
            columns: 16,
            rows: 11,
            glyph_count: 161,
            scale_factor: 1.25,
            font_size: 20,
        }
    }

    #[test]
    fn font_info_field_order() {
        let info = FontInfo::new(&layout(), Some(32), 1, [255, 255, 255]);
        let json = serde_json::to_string(&info).expect("plain data");
        assert_eq!(
            json,
            r#"{"glyph_box_width":19,"glyph_box_height":32,"columns":16,"baseline_offset":24,"font_size":20,"target_glyph_size":32,"scale_factor":1.25,"threshold":1,"format":"RGBA_solid_white_no_antialiasing"}"#
        );
    }

    #[test]
    fn font_info_unscaled_omits_target() {
        let info = FontInfo::new(&layout(), None, 1, [0, 128, 0]);
        let json = serde_json::to_string(&info).expect("plain data");
        assert!(!json.contains("target_glyph_size"));
        assert!(json.contains(FORMAT_SOLID_COLOR));
        let back: FontInfo = serde_json::from_str(&json).expect("valid font info");
        assert_eq!(back, info);
    }

    #[test]
    fn cell_rect_uses_cell_geometry() {
        let info = FontInfo::new(&layout(), Some(32), 1, [255, 255, 255]);
        assert_eq!(info.cell_rect(GridCell { row: 2, col: 3 }), (57, 64, 19, 32));
    }
}
