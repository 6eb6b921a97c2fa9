// Copyright 2026 the Glyph Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered set of characters baked into an atlas.

use std::collections::HashSet;

/// Printable ASCII, `U+0020..=U+007E`.
pub const ASCII: core::ops::RangeInclusive<u32> = 0x20..=0x7E;

/// `Ё` and `ё`, which sit outside the contiguous Cyrillic blocks.
pub const CYRILLIC_IO: [u32; 2] = [0x401, 0x451];

/// Cyrillic capitals `А..=Я`.
pub const CYRILLIC_UPPER: core::ops::RangeInclusive<u32> = 0x410..=0x42F;

/// Cyrillic small letters `а..=я`.
pub const CYRILLIC_LOWER: core::ops::RangeInclusive<u32> = 0x430..=0x44F;

/// An ordered, duplicate-free sequence of characters.
///
/// The position of a character in this sequence is its grid index in the atlas,
/// so the order must never depend on anything but the inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodepointSet {
    chars: Vec<char>,
}

impl CodepointSet {
    /// The standard Latin + Cyrillic set: ASCII, then `Ё ё`, then the capitals,
    /// then the small letters. 161 characters.
    pub fn standard() -> Self {
        let scalars = ASCII
            .chain(CYRILLIC_IO)
            .chain(CYRILLIC_UPPER)
            .chain(CYRILLIC_LOWER);
        Self::from_scalars(scalars)
    }

    /// Builds a set from arbitrary characters, keeping the first occurrence of
    /// each.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut seen = HashSet::new();
        Self {
            chars: chars.into_iter().filter(|c| seen.insert(*c)).collect(),
        }
    }

    /// Builds a set from raw scalar values. Values that are not Unicode scalar
    /// values (surrogates, out of range) are skipped.
    pub fn from_scalars(scalars: impl IntoIterator<Item = u32>) -> Self {
        Self::from_chars(scalars.into_iter().filter_map(char::from_u32))
    }

    /// Number of characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the set holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters in grid order.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Iterates over `(grid index, character)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, char)> + '_ {
        self.chars.iter().copied().enumerate()
    }
}

impl Default for CodepointSet {
    fn default() -> Self {
        Self::standard()
    }
}
