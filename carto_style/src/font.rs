// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::hash::{Hash, Hasher};

/// Horizontal text alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Align to the left edge.
    Left,
    /// Center between the edges.
    #[default]
    Center,
    /// Align to the right edge.
    Right,
}

/// Font description.
///
/// Equality and hashing compare the size bit for bit so fonts can be part of
/// cache keys.
#[derive(Clone, Debug)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: String::from("Arial"),
            size: 10.0,
            bold: false,
            italic: false,
        }
    }
}

impl Font {
    /// Creates a regular font.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.size.to_bits() == other.size.to_bits()
            && self.bold == other.bold
            && self.italic == other.italic
    }
}

impl Eq for Font {}

impl Hash for Font {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
    }
}
