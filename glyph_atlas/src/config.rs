// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bake configuration and artifact naming.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Everything that decides what a bake produces.
///
/// Deserializes from JSON with every field optional; missing fields take the
/// [`Default`] values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeConfig {
    /// Font file to bake from.
    pub font_path: PathBuf,
    /// Face index inside a font collection.
    pub font_index: u32,
    /// Pixel size the natural metrics are measured at.
    pub reference_size: u32,
    /// Size the larger of cell width and height is normalized to. `None`
    /// bakes at the reference size without scaling.
    pub target_glyph_size: Option<u32>,
    /// Cells per atlas row.
    pub columns: u32,
    /// Minimum coverage that becomes ink.
    pub threshold: u8,
    /// Ink color.
    pub foreground: [u8; 3],
    /// Whether outlines are hinted.
    pub hint: bool,
}

impl BakeConfig {
    /// Rejects values no bake can succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(Error::InvalidConfig("columns must be at least 1"));
        }
        if self.reference_size == 0 {
            return Err(Error::InvalidConfig("reference_size must be at least 1px"));
        }
        if self.target_glyph_size == Some(0) {
            return Err(Error::InvalidConfig("target_glyph_size must be at least 1px"));
        }
        Ok(())
    }
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("NotoSansMono-Regular.ttf"),
            font_index: 0,
            reference_size: 16,
            target_glyph_size: Some(32),
            columns: 16,
            threshold: 1,
            foreground: [u8::MAX; 3],
            hint: true,
        }
    }
}

/// Names of the three files one bake writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    /// Directory the files live in.
    pub dir: PathBuf,
    /// Common file name prefix.
    pub stem: String,
}

impl OutputPaths {
    /// Stem used when none is given.
    pub const DEFAULT_STEM: &'static str = "font_atlas_fixed_grid_baseline_fixed";

    /// Artifacts named `stem` inside `dir`.
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    /// Artifacts with the default stem inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, Self::DEFAULT_STEM)
    }

    /// `<stem>.png`
    pub fn atlas(&self) -> PathBuf {
        self.file(&format!("{}.png", self.stem))
    }

    /// `<stem>_metadata.json`
    pub fn metadata(&self) -> PathBuf {
        self.file(&format!("{}_metadata.json", self.stem))
    }

    /// `<stem>_fontinfo.json`
    pub fn font_info(&self) -> PathBuf {
        self.file(&format!("{}_fontinfo.json", self.stem))
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}
