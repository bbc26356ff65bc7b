//! Generator configuration. Owned by the caller between passes, read-only
//! while a pass runs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerraceError};
use crate::noise_source::{NoiseKind, OctavePreset};
use crate::subdivide::PolygonSubdivider;
use crate::theme::ThemeKind;

/// Parameters for one terrain generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Noise generator driving the height field.
    #[serde(default)]
    pub noise: NoiseKind,
    /// Number of sides of the footprint polygon (>= 3).
    #[serde(default = "default_segments")]
    pub segments: u32,
    /// Circumradius of the footprint polygon (> 0).
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Subdivision depth; depth 1 keeps the polygon fan as is (>= 1).
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Number of noise octaves (>= 1).
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    /// Color theme for the terrace bands.
    #[serde(default)]
    pub theme: ThemeKind,
    /// Overrides the noise kind's coordinate scale.
    #[serde(default)]
    pub scale: Option<f64>,
    /// Fixed seed for reproducible terrain. `None` draws fresh randomness per pass.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_segments() -> u32 {
    8
}
fn default_radius() -> f32 {
    3.0
}
fn default_max_depth() -> u32 {
    6
}
fn default_octaves() -> u32 {
    3
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            noise: NoiseKind::default(),
            segments: default_segments(),
            radius: default_radius(),
            max_depth: default_max_depth(),
            octaves: default_octaves(),
            theme: ThemeKind::default(),
            scale: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Reject configs that would produce degenerate or empty geometry.
    pub fn validate(&self) -> Result<()> {
        if self.segments < 3 {
            return Err(invalid("segments", format!("must be at least 3, got {}", self.segments)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius", format!("must be positive, got {}", self.radius)));
        }
        if self.max_depth < 1 {
            return Err(invalid("max_depth", format!("must be at least 1, got {}", self.max_depth)));
        }
        // Vertex indices are u32; reject depths whose flat mesh already overflows them.
        let subdivider = self.subdivider();
        if subdivider.min_vertex_count().map_or(true, |n| n > u32::MAX as usize) {
            return Err(invalid(
                "max_depth",
                format!(
                    "{} is too deep for {} segments, the mesh would exceed {} vertices",
                    self.max_depth,
                    self.segments,
                    u32::MAX
                ),
            ));
        }
        if self.octaves < 1 {
            return Err(invalid("octaves", format!("must be at least 1, got {}", self.octaves)));
        }
        if let Some(scale) = self.scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(invalid("scale", format!("must be positive, got {scale}")));
            }
        }
        Ok(())
    }

    /// The noise kind's preset with the scale override applied.
    pub fn octave_preset(&self) -> OctavePreset {
        let preset = self.noise.preset();
        match self.scale {
            Some(scale) => preset.with_scale(scale),
            None => preset,
        }
    }

    pub fn subdivider(&self) -> PolygonSubdivider {
        PolygonSubdivider::new(self.segments, self.radius, self.max_depth)
    }

    /// Leaf triangles the subdivider will produce.
    pub fn leaf_triangles(&self) -> usize {
        self.subdivider().leaf_count()
    }
}

fn invalid(field: &'static str, reason: String) -> TerraceError {
    TerraceError::InvalidConfig { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(config: GeneratorConfig) -> &'static str {
        match config.validate() {
            Err(TerraceError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        GeneratorConfig::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let base = GeneratorConfig::default();
        assert_eq!(rejected_field(GeneratorConfig { segments: 2, ..base.clone() }), "segments");
        assert_eq!(rejected_field(GeneratorConfig { radius: 0.0, ..base.clone() }), "radius");
        assert_eq!(rejected_field(GeneratorConfig { radius: -1.5, ..base.clone() }), "radius");
        assert_eq!(rejected_field(GeneratorConfig { radius: f32::NAN, ..base.clone() }), "radius");
        assert_eq!(rejected_field(GeneratorConfig { max_depth: 0, ..base.clone() }), "max_depth");
        assert_eq!(rejected_field(GeneratorConfig { octaves: 0, ..base.clone() }), "octaves");
        assert_eq!(rejected_field(GeneratorConfig { scale: Some(0.0), ..base }), "scale");
    }

    #[test]
    fn depth_beyond_u32_indices_is_rejected() {
        let base = GeneratorConfig::default();
        assert_eq!(rejected_field(GeneratorConfig { max_depth: 40, ..base.clone() }), "max_depth");
        assert_eq!(rejected_field(GeneratorConfig { max_depth: u32::MAX, ..base.clone() }), "max_depth");
        // 8 segments: 24 * 4^13 vertices fit in u32, 24 * 4^14 do not.
        assert_eq!(rejected_field(GeneratorConfig { max_depth: 15, ..base.clone() }), "max_depth");
        GeneratorConfig { max_depth: 14, ..base }.validate().unwrap();
    }

    #[test]
    fn scale_override_replaces_preset_scale() {
        let config = GeneratorConfig {
            noise: NoiseKind::Cellular,
            scale: Some(7.5),
            ..Default::default()
        };
        let preset = config.octave_preset();
        assert_eq!(preset.scale, 7.5);
        assert_eq!(preset.frequency, OctavePreset::CELLULAR.frequency);
    }

    #[test]
    fn leaf_triangles_follows_subdivision() {
        let config = GeneratorConfig {
            segments: 5,
            max_depth: 2,
            ..Default::default()
        };
        assert_eq!(config.leaf_triangles(), 20);
    }
}
