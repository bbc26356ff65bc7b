//! Octave-summed elevation over the footprint plane.

use glam::DVec2;
use rand::Rng;

use crate::noise_source::{NoiseSource, OctavePreset};

/// Per-pass random state: one offset per octave plus a global phase.
///
/// Drawn once at the start of a generation pass so every vertex of that pass
/// samples the same field, while successive passes look different.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightFieldParams {
    pub offsets: Vec<DVec2>,
    pub phase: f64,
}

impl HeightFieldParams {
    /// Offsets are integers in [-1000, 1000] per axis, phase is in [0, 1000).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, octaves: u32) -> Self {
        let offsets = (0..octaves)
            .map(|_| {
                DVec2::new(
                    rng.gen_range(-1000_i32..=1000) as f64,
                    rng.gen_range(-1000_i32..=1000) as f64,
                )
            })
            .collect();
        Self {
            offsets,
            phase: rng.gen_range(0.0..1000.0),
        }
    }

    /// No offsets and no phase; every octave samples around the origin.
    pub fn zeroed(octaves: u32) -> Self {
        Self {
            offsets: vec![DVec2::ZERO; octaves as usize],
            phase: 0.0,
        }
    }

    pub fn octaves(&self) -> usize {
        self.offsets.len()
    }
}

/// Combines octaves of a [`NoiseSource`] into a scalar elevation.
pub struct HeightField<'a> {
    noise: &'a dyn NoiseSource,
    preset: OctavePreset,
    params: HeightFieldParams,
}

impl<'a> HeightField<'a> {
    pub fn new(noise: &'a dyn NoiseSource, preset: OctavePreset, params: HeightFieldParams) -> Self {
        Self {
            noise,
            preset,
            params,
        }
    }

    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }

    /// Amplitude-weighted octave sum. Not normalized: the range grows with the
    /// octave count and depends on the noise kind.
    pub fn height(&self, x: f64, y: f64) -> f64 {
        let OctavePreset {
            frequency,
            persistence,
            lacunarity,
            scale,
        } = self.preset;
        let t = self.params.phase;

        let mut height = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = frequency;

        for offset in &self.params.offsets {
            let fx = x * frequency + offset.x;
            let fy = y * frequency + offset.y;
            height += amplitude * self.noise.sample((fx + t) * scale, (fy + t) * scale);

            frequency *= lacunarity;
            amplitude *= persistence;
        }

        height
    }
}
