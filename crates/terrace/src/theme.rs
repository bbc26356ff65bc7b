//! Elevation band color themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerraceError};

/// RGBA with every channel in [0, 1].
pub type ColorRGBA = [f32; 4];

/// Convert 8-bit channels to a [`ColorRGBA`], each channel rounded to two
/// decimals.
pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> ColorRGBA {
    [r, g, b, a].map(|c| ((c as f64 / 255.0 * 100.0).round() / 100.0) as f32)
}

/// Elevations up to and including `upper_bound` take `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeBand {
    pub upper_bound: f32,
    pub color: ColorRGBA,
}

impl ThemeBand {
    pub const fn new(upper_bound: f32, color: ColorRGBA) -> Self {
        Self { upper_bound, color }
    }
}

/// A named, ordered list of color bands. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    bands: Vec<ThemeBand>,
}

impl Theme {
    pub fn new(name: impl Into<String>, bands: Vec<ThemeBand>) -> Result<Self> {
        let name = name.into();
        if bands.is_empty() {
            return Err(TerraceError::EmptyTheme(name));
        }
        Ok(Self { name, bands })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bands(&self) -> &[ThemeBand] {
        &self.bands
    }

    /// First band whose upper bound is >= `z`. Elevations above every bound
    /// (and NaN) fall back to the last band.
    pub fn color_for_elevation(&self, z: f32) -> ColorRGBA {
        self.bands
            .iter()
            .find(|band| z <= band.upper_bound)
            .or_else(|| self.bands.last())
            .map(|band| band.color)
            .unwrap_or([1.0, 1.0, 1.0, 1.0])
    }
}

/// Free-function form of [`Theme::color_for_elevation`].
pub fn color_for_elevation(theme: &Theme, z: f32) -> ColorRGBA {
    theme.color_for_elevation(z)
}

/// (upper bound, 8-bit RGBA) per band.
type BandTable = [(f32, [u8; 4])];

const MOUNTAIN: &BandTable = &[
    (0.5, [25, 47, 96, 255]),   // iron blue
    (0.6, [38, 73, 157, 255]),  // oriental blue
    (0.63, [111, 84, 54, 255]), // burnt umber
    (0.8, [0, 51, 25, 255]),
    (1.0, [0, 102, 49, 255]),
    (f32::INFINITY, [0, 133, 54, 255]),
];

const SNOW_MOUNTAIN: &BandTable = &[
    (0.3, [3, 51, 102, 255]),
    (0.5, [38, 73, 157, 255]),
    (0.6, [130, 205, 221, 255]),
    (0.8, [125, 125, 125, 255]),
    (0.9, [90, 90, 90, 255]),
    (f32::INFINITY, [255, 255, 255, 255]),
];

const DESERT: &BandTable = &[
    (0.5, [237, 209, 142, 255]),
    (0.58, [250, 197, 89, 255]),
    (0.85, [153, 96, 49, 255]),
    (1.1, [108, 53, 36, 255]),
    (f32::INFINITY, [51, 39, 16, 255]),
];

/// Built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeKind {
    #[default]
    Mountain,
    SnowMountain,
    Desert,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 3] = [ThemeKind::Mountain, ThemeKind::SnowMountain, ThemeKind::Desert];

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Mountain => "mountain",
            ThemeKind::SnowMountain => "snowmountain",
            ThemeKind::Desert => "desert",
        }
    }

    fn table(self) -> &'static BandTable {
        match self {
            ThemeKind::Mountain => MOUNTAIN,
            ThemeKind::SnowMountain => SNOW_MOUNTAIN,
            ThemeKind::Desert => DESERT,
        }
    }

    pub fn theme(self) -> Theme {
        let bands = self
            .table()
            .iter()
            .map(|&(upper_bound, [r, g, b, a])| ThemeBand::new(upper_bound, rgba8(r, g, b, a)))
            .collect();
        Theme {
            name: self.name().to_string(),
            bands,
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ThemeKind {
    type Err = TerraceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.replace(['_', '-', ' '], "").to_ascii_lowercase();
        ThemeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| TerraceError::UnknownTheme(s.to_string()))
    }
}
