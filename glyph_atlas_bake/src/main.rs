// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bakes a fixed-grid glyph atlas, or previews text with one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glyph_atlas::{bake_font, BakeConfig, BakedAtlas, LoadedAtlas, OutputPaths};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Log per-glyph details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bake an atlas image with its metadata and font info.
    Bake(BakeArgs),
    /// Render text with a previously baked atlas.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct BakeArgs {
    /// JSON file with bake settings. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Font file to bake.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Face index inside a font collection.
    #[arg(long)]
    font_index: Option<u32>,
    /// Pixel size natural metrics are measured at.
    #[arg(long)]
    reference_size: Option<u32>,
    /// Size the larger cell dimension is normalized to.
    #[arg(long, conflicts_with = "unscaled")]
    target_size: Option<u32>,
    /// Bake at natural metrics without scaling.
    #[arg(long)]
    unscaled: bool,
    /// Cells per atlas row.
    #[arg(long)]
    columns: Option<u32>,
    /// Minimum coverage (1-255) that becomes ink.
    #[arg(long)]
    threshold: Option<u8>,
    /// Ink color as `R,G,B`, each 0-255.
    #[arg(long, value_parser = parse_rgb)]
    foreground: Option<[u8; 3]>,
    /// Disable outline hinting.
    #[arg(long)]
    no_hint: bool,
    /// Directory the artifacts are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// File name prefix of the artifacts.
    #[arg(long, default_value = OutputPaths::DEFAULT_STEM)]
    stem: String,
}

impl BakeArgs {
    fn config(&self) -> Result<BakeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BakeConfig::default(),
        };
        if let Some(font) = &self.font {
            config.font_path.clone_from(font);
        }
        if let Some(index) = self.font_index {
            config.font_index = index;
        }
        if let Some(size) = self.reference_size {
            config.reference_size = size;
        }
        if self.unscaled {
            config.target_glyph_size = None;
        } else if let Some(size) = self.target_size {
            config.target_glyph_size = Some(size);
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(foreground) = self.foreground {
            config.foreground = foreground;
        }
        if self.no_hint {
            config.hint = false;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Text to render. Lines are separated by `\n`.
    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    text: Option<String>,
    /// File whose contents are rendered.
    #[arg(long)]
    text_file: Option<PathBuf>,
    /// Directory holding the baked artifacts.
    #[arg(long, default_value = ".")]
    atlas_dir: PathBuf,
    /// File name prefix of the artifacts.
    #[arg(long, default_value = OutputPaths::DEFAULT_STEM)]
    stem: String,
    /// PNG file to write.
    #[arg(long)]
    output: PathBuf,
}

fn parse_rgb(value: &str) -> Result<[u8; 3], String> {
    let channels = value
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("`{value}`: {err}"))?;
    <[u8; 3]>::try_from(channels)
        .map_err(|_| format!("`{value}`: expected three channels, like 255,255,255"))
}

fn load_config(path: &Path) -> Result<BakeConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn bake(args: &BakeArgs) -> Result<()> {
    let config = args.config()?;
    let baked = bake_font(&config).context("baking atlas")?;
    let paths = OutputPaths::new(&args.out_dir, args.stem.as_str());
    baked.write(&paths).context("writing atlas")?;
    print_summary(&baked, &paths);
    Ok(())
}

fn print_summary(baked: &BakedAtlas, paths: &OutputPaths) {
    let layout = &baked.layout;
    let size = match baked.font_info.target_glyph_size {
        Some(target) => format!("{target}px target"),
        None => "natural metrics".to_owned(),
    };
    println!("Generated {}", paths.atlas().display());
    println!("Atlas size: {}x{}", baked.image.width(), baked.image.height());
    println!("Glyphs: {}", baked.metadata.len());
    println!(
        "Cell: {}x{} ({size}), baseline at {}",
        layout.cell_width, layout.cell_height, layout.baseline_offset
    );
    println!(
        "Scale factor: {:.3}, font size {}px",
        layout.scale_factor, layout.font_size
    );
    println!("Format: {}", baked.font_info.format);
    println!("Metadata: {}", paths.metadata().display());
    println!("Font info: {}", paths.font_info().display());
}

fn preview(args: &PreviewArgs) -> Result<()> {
    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        (None, None) => anyhow::bail!("one of --text or --text-file is required"),
    };
    let paths = OutputPaths::new(&args.atlas_dir, args.stem.as_str());
    let atlas = LoadedAtlas::open(&paths).context("loading atlas")?;
    let image = atlas.render(&text);
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "rendered {}x{} preview to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match &cli.command {
        Command::Bake(args) => bake(args),
        Command::Preview(args) => preview(args),
    }
}
