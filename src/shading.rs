//! Normal computation and flat shading.

use glam::Vec3;

use crate::mesh::{Mesh, Vertex};

/// How each triangle's normal contributes to its vertices.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NormalWeighting {
    /// Weight by the triangle's interior angle at the vertex. Stable on
    /// irregular triangulations.
    #[default]
    Angle,
    /// Every incident triangle counts equally.
    Uniform,
}

/// Unit normal of a triangle by the right-hand rule, zero if degenerate.
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p0 - p1).cross(p0 - p2).normalize_or_zero()
}

/// Angle at `at` between the edges towards `a` and `b`.
fn corner_angle(at: Vec3, a: Vec3, b: Vec3) -> f32 {
    let cos = (a - at).normalize_or_zero().dot((b - at).normalize_or_zero());
    cos.clamp(-1.0, 1.0).acos()
}

impl Mesh {
    /// Recomputes smooth vertex normals from the triangles.
    ///
    /// All normals are zeroed first, so repeated calls on unchanged geometry
    /// give the same result.
    pub fn compute_normals(&mut self, weighting: NormalWeighting) {
        for v in &mut self.vertices {
            v.normal = Vec3::ZERO;
        }

        for t in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [t[0], t[1], t[2]].map(|i| i as usize);
            let [p0, p1, p2] = [i0, i1, i2].map(|i| self.vertices[i].pos);
            let n = face_normal(p0, p1, p2);

            let weights = match weighting {
                NormalWeighting::Angle => [
                    corner_angle(p0, p1, p2),
                    corner_angle(p1, p0, p2),
                    corner_angle(p2, p0, p1),
                ],
                NormalWeighting::Uniform => [1.0; 3],
            };

            for (i, w) in [i0, i1, i2].into_iter().zip(weights) {
                self.vertices[i].normal += n * w;
            }
        }

        for v in &mut self.vertices {
            v.normal = v.normal.normalize_or_zero();
        }
    }

    /// Gives every triangle its own three vertices sharing the triangle's face
    /// normal, for faceted shading.
    ///
    /// This throws away all vertex sharing, so it must be the last editing
    /// step: subdividing or rounding afterwards would tear the mesh apart.
    pub fn make_flat_shade(&mut self) {
        let mut vertices = Vec::with_capacity(self.indices.len());

        for t in self.indices.chunks_exact(3) {
            let corners: [Vertex; 3] = [t[0], t[1], t[2]].map(|i| self.vertices[i as usize]);
            let n = face_normal(corners[0].pos, corners[1].pos, corners[2].pos);
            vertices.extend(corners.map(|v| Vertex { normal: n, ..v }));
        }

        self.indices = (0..vertices.len() as u32).collect();
        self.vertices = vertices;
    }
}
