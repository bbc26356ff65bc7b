//! Regular polygon footprint and recursive midpoint subdivision.

use glam::Vec3;

/// Ordered vertex triple. Winding is significant and is preserved by
/// subdivision so every leaf faces the same way as its base triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Edge midpoints in edge order: (v0,v1), (v1,v2), (v2,v0).
    pub fn midpoints(&self) -> [Vec3; 3] {
        let [a, b, c] = self.vertices;
        [(a + b) * 0.5, (b + c) * 0.5, (c + a) * 0.5]
    }

    /// The four children of a 4-way midpoint split: three corners, then the
    /// center triangle. Corner `i` is (v[i], m[i], m[i-1]), wrapping to the
    /// last midpoint for `i == 0`.
    pub fn split(&self) -> [Triangle; 4] {
        let m = self.midpoints();
        let v = self.vertices;
        [
            Triangle::new(v[0], m[0], m[2]),
            Triangle::new(v[1], m[1], m[0]),
            Triangle::new(v[2], m[2], m[1]),
            Triangle::new(m[0], m[1], m[2]),
        ]
    }

    /// Vertex elevations in vertex order.
    pub fn heights(&self) -> [f32; 3] {
        self.vertices.map(|v| v.z)
    }

    /// Signed area of the xy projection; positive for counter-clockwise.
    pub fn signed_area_xy(&self) -> f32 {
        let [a, b, c] = self.vertices;
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }
}

/// Point on a circle of `radius` around the origin at `theta` degrees, z = 0.
pub fn polygon_vertex(radius: f32, theta: f32) -> Vec3 {
    let rad = theta.to_radians();
    Vec3::new(radius * rad.cos(), radius * rad.sin(), 0.0)
}

/// Consecutive edges of a regular `segments`-gon, counter-clockwise. Vertex
/// `i` sits at `360 / segments * (i + 1)` degrees; the last edge closes back
/// to the first vertex.
pub fn polygon_edges(segments: u32, radius: f32) -> Vec<(Vec3, Vec3)> {
    let deg = 360.0 / segments as f32;
    (0..segments)
        .map(|i| {
            let current = i + 1;
            let next = if current + 1 > segments { 1 } else { current + 1 };
            (
                polygon_vertex(radius, deg * current as f32),
                polygon_vertex(radius, deg * next as f32),
            )
        })
        .collect()
}

/// Splits each fan triangle (edge start, edge end, center) of a regular
/// polygon down to `max_depth` levels and hands every leaf to a visitor.
#[derive(Debug, Clone, Copy)]
pub struct PolygonSubdivider {
    pub segments: u32,
    pub radius: f32,
    pub max_depth: u32,
}

impl PolygonSubdivider {
    pub fn new(segments: u32, radius: f32, max_depth: u32) -> Self {
        Self {
            segments,
            radius,
            max_depth,
        }
    }

    /// The undivided fan, one triangle per polygon edge.
    pub fn base_triangles(&self) -> Vec<Triangle> {
        polygon_edges(self.segments, self.radius)
            .into_iter()
            .map(|(p1, p2)| Triangle::new(p1, p2, Vec3::ZERO))
            .collect()
    }

    /// Visit leaves in depth-first order without materializing intermediate
    /// levels. Depth 1 yields the base triangles unchanged.
    pub fn for_each_triangle<F: FnMut(Triangle)>(&self, mut visit: F) {
        for base in self.base_triangles() {
            subdivide(base, 1, self.max_depth, &mut visit);
        }
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        let mut leaves = Vec::with_capacity(self.checked_leaf_count().unwrap_or(0));
        self.for_each_triangle(|tri| leaves.push(tri));
        leaves
    }

    /// `segments * 4^(max_depth - 1)`, or `None` when that overflows `usize`.
    pub fn checked_leaf_count(&self) -> Option<usize> {
        let levels = self.max_depth.saturating_sub(1);
        4usize.checked_pow(levels)?.checked_mul(self.segments as usize)
    }

    /// Saturates at `usize::MAX`.
    pub fn leaf_count(&self) -> usize {
        self.checked_leaf_count().unwrap_or(usize::MAX)
    }

    /// Vertices emitted when every leaf is flat and becomes a single roof.
    pub fn min_vertex_count(&self) -> Option<usize> {
        self.checked_leaf_count()?.checked_mul(3)
    }
}

fn subdivide<F: FnMut(Triangle)>(tri: Triangle, depth: u32, max_depth: u32, visit: &mut F) {
    if depth >= max_depth {
        visit(tri);
        return;
    }
    for child in tri.split() {
        subdivide(child, depth + 1, max_depth, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn leaf_count_grows_by_four_per_level() {
        for depth in 1..=6 {
            let sub = PolygonSubdivider::new(1, 1.0, depth);
            let mut count = 0usize;
            subdivide(sub.base_triangles()[0], 1, depth, &mut |_| count += 1);
            assert_eq!(count, 4usize.pow(depth - 1), "depth {depth}");
        }
    }

    #[test]
    fn polygon_leaf_count_matches_formula() {
        let sub = PolygonSubdivider::new(5, 3.0, 3);
        assert_eq!(sub.triangles().len(), 5 * 16);
        assert_eq!(sub.leaf_count(), 80);
    }

    #[test]
    fn leaf_count_overflow_is_detected() {
        let deep = PolygonSubdivider::new(8, 3.0, 40);
        assert_eq!(deep.checked_leaf_count(), None);
        assert_eq!(deep.leaf_count(), usize::MAX);
        assert_eq!(deep.min_vertex_count(), None);

        let sub = PolygonSubdivider::new(8, 3.0, 14);
        assert_eq!(sub.checked_leaf_count(), Some(8 * 4usize.pow(13)));
        assert_eq!(sub.min_vertex_count(), Some(24 * 4usize.pow(13)));
    }

    #[test]
    fn depth_zero_still_yields_base_polygon() {
        let sub = PolygonSubdivider::new(6, 2.0, 0);
        assert_eq!(sub.triangles().len(), 6);
    }

    #[test]
    fn edges_close_the_polygon() {
        let edges = polygon_edges(4, 2.0);
        assert_eq!(edges.len(), 4);
        for i in 0..4 {
            assert!(approx(edges[i].1, edges[(i + 1) % 4].0));
            assert!((edges[i].0.length() - 2.0).abs() < 1e-5);
        }
        // First vertex sits at 90 degrees for a square.
        assert!(approx(edges[0].0, Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn split_uses_previous_midpoint_for_first_corner() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        );
        let [c0, c1, c2, center] = tri.split();
        assert_eq!(c0.vertices, [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]);
        assert_eq!(c1.vertices[0], Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(c2.vertices[2], Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(center.vertices, tri.midpoints());
    }

    #[test]
    fn leaves_keep_winding_and_cover_the_polygon() {
        let sub = PolygonSubdivider::new(5, 3.0, 4);
        let base = sub.base_triangles();
        let base_sign = base[0].signed_area_xy().signum();
        let leaves = sub.triangles();
        assert!(leaves
            .iter()
            .all(|t| t.signed_area_xy().signum() == base_sign));
        let total: f32 = leaves.iter().map(|t| t.signed_area_xy()).sum();
        let expected: f32 = base.iter().map(|t| t.signed_area_xy()).sum();
        assert!((total - expected).abs() < 1e-3);
    }
}
