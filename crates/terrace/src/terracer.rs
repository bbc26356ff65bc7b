//! Terracing: slice elevated triangles into flat bands joined by vertical walls.
//!
//! Each triangle is cut by horizontal planes spaced [`BAND_HEIGHT`] apart,
//! from the band of its lowest vertex to the band of its highest. For every
//! plane the part of the triangle at or above it is projected flat onto the
//! plane (the roof), and where the plane crosses the triangle a wall drops one
//! band down. Stacked roofs overdraw each other from below, so only the top of
//! each step stays visible.

use glam::{Vec2, Vec3};

use crate::mesh_builder::MeshBuilder;
use crate::subdivide::Triangle;
use crate::theme::{ColorRGBA, Theme};

/// Vertical distance between terrace planes.
pub const BAND_HEIGHT: f32 = 0.1;

/// Inverse of [`BAND_HEIGHT`], used to quantize elevations into band indices.
const BANDS_PER_UNIT: f32 = 10.0;

/// Index of the highest plane at or below `z`.
#[inline]
pub fn band_index(z: f32) -> i32 {
    (z * BANDS_PER_UNIT).floor() as i32
}

/// Elevation of plane `band`.
#[inline]
pub fn band_elevation(band: i32) -> f32 {
    band as f32 * BAND_HEIGHT
}

/// Counts of emitted polygons, kept for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerraceStats {
    pub triangles: usize,
    pub roofs: usize,
    pub walls: usize,
}

/// Emits terraced geometry for a stream of elevated triangles.
pub struct Terracer<'a> {
    theme: &'a Theme,
    radius: f32,
    stats: TerraceStats,
}

impl<'a> Terracer<'a> {
    /// `radius` is the footprint radius used for the planar UV projection.
    pub fn new(theme: &'a Theme, radius: f32) -> Self {
        Self {
            theme,
            radius,
            stats: TerraceStats::default(),
        }
    }

    pub fn stats(&self) -> TerraceStats {
        self.stats
    }

    /// Planar projection centered on the origin; z is ignored, so walls share
    /// the roof mapping and stretch vertically.
    pub fn uv(&self, p: Vec3) -> Vec2 {
        Vec2::new(0.5 + p.x / self.radius * 0.5, 0.5 + p.y / self.radius * 0.5)
    }

    pub fn terrace_triangle(&mut self, tri: &Triangle, mesh: &mut MeshBuilder) {
        self.stats.triangles += 1;

        let mut v = tri.vertices;
        let bands = tri.heights().map(band_index);
        let lowest = bands.iter().copied().min().unwrap_or(0);
        let highest = bands.iter().copied().max().unwrap_or(0);

        for band in lowest..=highest {
            let plane = band_elevation(band);

            // Rotate so a lone vertex above the plane, or a lone vertex below
            // it, ends up last. Rotation keeps the winding.
            let above = v.map(|p| band_index(p.z) >= band);
            let points_above = match above {
                [false, false, true] | [true, true, false] => above_count(above),
                [false, true, false] | [true, false, true] => {
                    v.rotate_right(1);
                    above_count(above)
                }
                [true, false, false] | [false, true, true] => {
                    v.rotate_left(1);
                    above_count(above)
                }
                [true, true, true] => 3,
                [false, false, false] => continue,
            };

            let [v1, v2, v3] = v;
            let (h1, h2, h3) = (v1.z, v2.z, v3.z);

            let v1_c = at_height(v1, plane);
            let v2_c = at_height(v2, plane);
            let v3_c = at_height(v3, plane);

            if points_above == 3 {
                let color = self.theme.color_for_elevation(v1_c.z);
                self.roof_triangle([v1_c, v2_c, v3_c], color, mesh);
                continue;
            }

            // Band indices differ across the crossing edges, so the heights do too.
            debug_assert!(h1 != h3 && h2 != h3, "plane {plane} does not cross {v:?}");

            let floor = plane - BAND_HEIGHT;
            let v1_b = at_height(v1, floor);
            let v2_b = at_height(v2, floor);
            let v3_b = at_height(v3, floor);

            let t1 = ((h1 - plane) / (h1 - h3)).clamp(0.0, 1.0);
            let v1_c_n = v1_c.lerp(v3_c, t1);
            let v1_b_n = v1_b.lerp(v3_b, t1);

            let t2 = ((h2 - plane) / (h2 - h3)).clamp(0.0, 1.0);
            let v2_c_n = v2_c.lerp(v3_c, t2);
            let v2_b_n = v2_b.lerp(v3_b, t2);

            if points_above == 2 {
                let color = self.theme.color_for_elevation(v1_c.z);
                self.roof_quad([v1_c, v2_c, v2_c_n, v1_c_n], color, mesh);
                self.wall_quad([v1_c_n, v2_c_n, v2_b_n, v1_b_n], color, mesh);
            } else {
                let color = self.theme.color_for_elevation(v3_c.z);
                self.roof_triangle([v3_c, v1_c_n, v2_c_n], color, mesh);
                self.wall_quad([v2_c_n, v1_c_n, v1_b_n, v2_b_n], color, mesh);
            }
        }
    }

    fn push(&self, p: Vec3, color: ColorRGBA, normal: Vec3, mesh: &mut MeshBuilder) -> u32 {
        mesh.add_vertex(p, color, normal, self.uv(p))
    }

    fn roof_triangle(&mut self, tri: [Vec3; 3], color: ColorRGBA, mesh: &mut MeshBuilder) {
        let [a, b, c] = tri.map(|p| self.push(p, color, Vec3::Z, mesh));
        mesh.add_triangle(a, b, c);
        self.stats.roofs += 1;
    }

    fn roof_quad(&mut self, quad: [Vec3; 4], color: ColorRGBA, mesh: &mut MeshBuilder) {
        let idx = quad.map(|p| self.push(p, color, Vec3::Z, mesh));
        add_quad(idx, mesh);
        self.stats.roofs += 1;
    }

    /// Walls use an outward radial normal rather than the true face normal.
    fn wall_quad(&mut self, quad: [Vec3; 4], color: ColorRGBA, mesh: &mut MeshBuilder) {
        let idx = quad.map(|p| {
            let normal = Vec3::new(p.x, p.y, 0.0).normalize_or_zero();
            self.push(p, color, normal, mesh)
        });
        add_quad(idx, mesh);
        self.stats.walls += 1;
    }
}

fn above_count(above: [bool; 3]) -> u8 {
    above.iter().filter(|&&a| a).count() as u8
}

fn at_height(p: Vec3, z: f32) -> Vec3 {
    Vec3::new(p.x, p.y, z)
}

/// Split as (0,1,2), (2,3,0).
fn add_quad([a, b, c, d]: [u32; 4], mesh: &mut MeshBuilder) {
    mesh.add_triangle(a, b, c);
    mesh.add_triangle(c, d, a);
}
