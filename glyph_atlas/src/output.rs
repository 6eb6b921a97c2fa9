// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoding and all-or-nothing writing of the artifact triple.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::RgbaImage;
use serde::Serialize;

use crate::{Error, Result};

/// Encodes an RGBA image as PNG bytes.
pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut bytes))
        .map_err(|source| Error::Encode {
            artifact: "atlas image",
            source,
        })?;
    Ok(bytes)
}

/// Serializes a record as two-space indented JSON.
pub(crate) fn encode_json(artifact: &'static str, value: &impl Serialize) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|source| Error::Serialize { artifact, source })
}

/// Writes every `(path, bytes)` pair, or none of them.
///
/// Every file is first written to a hidden sibling. Only once all of them are
/// on disk are the siblings renamed over their targets, each existing target
/// being moved aside to a backup first. If a rename fails, the targets already
/// replaced get their backups back, so the directory keeps the previous
/// artifact set. Temporaries and backups never outlive the call.
pub(crate) fn commit(files: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    commit_with(files, |from, to| fs::rename(from, to))
}

fn commit_with(
    files: &[(PathBuf, Vec<u8>)],
    mut rename: impl FnMut(&Path, &Path) -> io::Result<()>,
) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for (path, bytes) in files {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(source) = fs::create_dir_all(parent) {
                discard(&staged);
                return Err(Error::Write {
                    path: parent.to_owned(),
                    source,
                });
            }
        }
        let temp = hidden_sibling(path, "tmp");
        if let Err(source) = fs::write(&temp, bytes) {
            let _ = fs::remove_file(&temp);
            discard(&staged);
            return Err(Error::Write { path: temp, source });
        }
        staged.push((temp, path.as_path()));
    }

    // Targets already replaced, with the backup of what they held before.
    let mut replaced: Vec<(&Path, Option<PathBuf>)> = Vec::with_capacity(staged.len());
    for (i, (temp, path)) in staged.iter().enumerate() {
        let backup = if path.exists() {
            let backup = hidden_sibling(path, "bak");
            if let Err(source) = rename(path, &backup) {
                roll_back(&replaced, &mut rename);
                discard(&staged[i..]);
                return Err(Error::Write {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Some(backup)
        } else {
            None
        };
        if let Err(source) = rename(temp, path) {
            replaced.push((*path, backup));
            roll_back(&replaced, &mut rename);
            discard(&staged[i..]);
            return Err(Error::Write {
                path: path.to_path_buf(),
                source,
            });
        }
        replaced.push((*path, backup));
    }

    for (path, backup) in &replaced {
        if let Some(backup) = backup {
            if let Err(err) = fs::remove_file(backup) {
                log::warn!("could not remove {}: {err}", backup.display());
            }
        }
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

/// Puts every backup in `replaced` back over its target, newest first. A
/// target that had no previous version is removed.
fn roll_back(
    replaced: &[(&Path, Option<PathBuf>)],
    rename: &mut impl FnMut(&Path, &Path) -> io::Result<()>,
) {
    for (path, backup) in replaced.iter().rev() {
        let restored = match backup {
            Some(backup) => rename(backup, path),
            // The last entry may not have been renamed into place yet.
            None if path.exists() => fs::remove_file(path),
            None => Ok(()),
        };
        if let Err(err) = restored {
            log::warn!("could not restore {}: {err}", path.display());
        }
    }
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp, _) in staged {
        if let Err(err) = fs::remove_file(temp) {
            log::warn!("could not remove {}: {err}", temp.display());
        }
    }
}

/// `dir/name` becomes `dir/.name.<suffix>`.
fn hidden_sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file_name) = path.file_name() {
        name.push(file_name);
    }
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
