//! Noise sources feeding the height field.
//!
//! Any `noise::NoiseFn<f64, 2>` is usable as a [`NoiseSource`], so tests can
//! inject `noise::Constant` or a hand-written field in place of the
//! generators picked by [`NoiseKind`].

use std::fmt;
use std::str::FromStr;

use noise::core::worley::ReturnType;
use noise::{NoiseFn, Perlin, Simplex, Worley};
use serde::{Deserialize, Serialize};

use crate::error::TerraceError;

/// Deterministic 2D noise, roughly in [-1, 1].
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<N: NoiseFn<f64, 2>> NoiseSource for N {
    #[inline]
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.get([x, y])
    }
}

/// Octave constants for one noise kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctavePreset {
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Final multiplier applied to the sample coordinates.
    pub scale: f64,
}

impl OctavePreset {
    pub const SIMPLEX: Self = Self {
        frequency: 0.055,
        persistence: 0.375,
        lacunarity: 2.52,
        scale: 5.0,
    };

    pub const PERLIN: Self = Self::SIMPLEX;

    /// Cell distances vary slowly, so cellular noise is sampled at twice the scale.
    pub const CELLULAR: Self = Self {
        scale: 10.0,
        ..Self::SIMPLEX
    };

    /// Same preset with a different coordinate scale.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
}

/// The noise generators a config can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoiseKind {
    #[default]
    Simplex,
    Perlin,
    /// Worley noise returning the distance to the nearest feature point.
    Cellular,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 3] = [NoiseKind::Simplex, NoiseKind::Perlin, NoiseKind::Cellular];

    pub fn preset(self) -> OctavePreset {
        match self {
            NoiseKind::Simplex => OctavePreset::SIMPLEX,
            NoiseKind::Perlin => OctavePreset::PERLIN,
            NoiseKind::Cellular => OctavePreset::CELLULAR,
        }
    }

    /// Build the generator for this kind. Worley holds an `Rc`, so the result
    /// is not `Send`; build it on the thread that samples it.
    pub fn build(self, seed: u32) -> Box<dyn NoiseSource> {
        match self {
            NoiseKind::Simplex => Box::new(Simplex::new(seed)),
            NoiseKind::Perlin => Box::new(Perlin::new(seed)),
            NoiseKind::Cellular => {
                Box::new(Worley::new(seed).set_return_type(ReturnType::Distance))
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Simplex => "simplex",
            NoiseKind::Perlin => "perlin",
            NoiseKind::Cellular => "cellular",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = TerraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simplex" | "simplexnoise" => Ok(NoiseKind::Simplex),
            "perlin" | "perlinnoise" => Ok(NoiseKind::Perlin),
            "cellular" | "cellularnoise" | "worley" => Ok(NoiseKind::Cellular),
            _ => Err(TerraceError::UnknownNoise(s.to_string())),
        }
    }
}
