//! Base shapes the editing operators start from.
//!
//! The cube and slab are 2×2×2 / 1×1×1 boxes centered on the origin and tag
//! their vertices with the faces they lie on. The ring has no face tags.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::{
    face::{Face, FaceSet},
    mesh::{Mesh, Vertex},
    shading::NormalWeighting,
};

/// `(y, z)` of the four corners of one cube cross-section, in winding order.
const SECTION: [(f32, f32); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

const POS_END: [u32; 6] = [3, 2, 0, 0, 2, 1];
const NEG_END: [u32; 6] = [3, 0, 2, 2, 0, 1];
const SIDES: [u32; 24] = [
    0, 1, 4, 4, 1, 5, //
    1, 2, 5, 5, 2, 6, //
    2, 3, 6, 6, 3, 7, //
    3, 0, 7, 7, 0, 4,
];

/// Generates a 2×2×2 cube split into `x_sections` segments along X.
///
/// Only the long sides are split; each end stays two triangles. With one
/// section this is the 8 vertex, 12 triangle cube. Normals are zero.
pub fn cube(color: Vec3, x_sections: u32) -> Mesh {
    let x_sections = x_sections.max(1);
    let mut mesh = Mesh::default();

    for i in 0..=x_sections {
        let x = 1.0 - 2.0 * i as f32 / x_sections as f32;
        let end = match i {
            0 => FaceSet::POS_END,
            i if i == x_sections => FaceSet::NEG_END,
            _ => FaceSet::empty(),
        };

        for (y, z) in SECTION {
            let y_face = if y > 0.0 { FaceSet::TOP } else { FaceSet::BOTTOM };
            let z_face = if z > 0.0 { FaceSet::FRONT } else { FaceSet::BACK };
            mesh.push_vertex(
                Vertex::new(Vec3::new(x, y, z), color, Vec3::ZERO)
                    .with_faces(end | y_face | z_face),
            );
        }
    }

    mesh.append_indices(&POS_END);
    for i in 0..x_sections {
        let offset = 4 * i;
        mesh.indices.extend(SIDES.iter().map(|idx| idx + offset));
    }
    let offset = 4 * x_sections;
    mesh.indices.extend(NEG_END.iter().map(|idx| idx + offset));

    mesh
}

/// Generates a flat annulus between `inner_radius` and `outer_radius` in the
/// XZ plane, one unit tall in Y, with normals already set.
pub fn ring(color: Vec3, sections: u32, inner_radius: f32, outer_radius: f32) -> Mesh {
    const QUADS: [u32; 24] = [
        0, 1, 8, 8, 1, 9, //
        2, 10, 3, 3, 10, 11, //
        4, 12, 5, 5, 12, 13, //
        6, 7, 14, 14, 7, 15,
    ];

    let mut mesh = Mesh::default();
    let da = TAU / sections as f32;
    let wrap = sections * 8;

    for i in 0..sections {
        let rotation = Quat::from_rotation_y(da * i as f32);
        let p0 = rotation * Vec3::new(outer_radius, 0.5, 0.0);
        let p1 = Vec3::new(p0.x, -0.5, p0.z);
        let p2 = rotation * Vec3::new(inner_radius, 0.5, 0.0);
        let p3 = Vec3::new(p2.x, -0.5, p2.z);

        // Outer wall, inner wall, top, bottom.
        let corners = [
            (p0, p0),
            (p1, p1),
            (p2, -p2),
            (p3, -p3),
            (p0, Vec3::Y),
            (p2, Vec3::Y),
            (p1, -Vec3::Y),
            (p3, -Vec3::Y),
        ];
        for (pos, normal) in corners {
            mesh.append(pos, color, normal.normalize_or_zero());
        }

        mesh.indices
            .extend(QUADS.iter().map(|idx| (idx + i * 8) % wrap));
    }

    mesh
}

/// Projects a subdivided cube onto a sphere. Used as the light marker.
pub fn sphere(color: Vec3, subdivisions: u32, radius: f32) -> Mesh {
    let mut mesh = cube(color, 1);
    mesh.subdivide(subdivisions);
    mesh.normalize_points(radius);
    mesh.compute_normals(NormalWeighting::Uniform);
    mesh
}

/// A flat, upward facing square of side `2 * half_extent` at `y = 0`.
pub fn ground_quad(color: Vec3, half_extent: f32) -> Mesh {
    let h = half_extent;
    #[rustfmt::skip]
    let positions = [
        h, 0.0, h,
        h, 0.0, -h,
        -h, 0.0, -h,
        -h, 0.0, h,
    ];

    let mut mesh = Mesh::default();
    mesh.set_from_flat_arrays(
        &positions,
        &[color.to_array(); 4].concat(),
        &[Vec3::Y.to_array(); 4].concat(),
        &[0, 1, 3, 3, 1, 2],
    );
    mesh
}

/// A 1×1×1 box centered on the origin with four private vertices per face, so
/// its edges stay sharp under smooth normal computation.
pub fn slab(color: Vec3) -> Mesh {
    #[rustfmt::skip]
    const CORNERS: [(Face, [[f32; 3]; 4]); 6] = [
        (Face::Top, [[1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]]),
        (Face::Bottom, [[1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]]),
        (Face::Front, [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]]),
        (Face::Back, [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]]),
        (Face::PosEnd, [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]]),
        (Face::NegEnd, [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0]]),
    ];

    let mut mesh = Mesh::default();
    for (face, corners) in CORNERS {
        let base = mesh.vertex_count() as u32;
        for corner in corners {
            mesh.push_vertex(
                Vertex::new(Vec3::from(corner), color, Vec3::ZERO).with_faces(face.into()),
            );
        }
        mesh.append_indices(&[0, 1, 3, 3, 1, 2].map(|idx| idx + base));
    }

    mesh.compute_normals(NormalWeighting::Angle);
    mesh.scale_uniform(0.5);
    mesh
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_abs_diff_eq;

    use super::*;

    /// Counts how many triangles use each undirected edge.
    fn edge_uses(mesh: &Mesh) -> HashMap<(u32, u32), usize> {
        let mut uses = HashMap::new();
        for [a, b, c] in mesh.triangles() {
            for (s, e) in [(a, b), (b, c), (c, a)] {
                *uses.entry((s.min(e), s.max(e))).or_insert(0) += 1;
            }
        }
        uses
    }

    #[test]
    fn test_unit_cube_counts() {
        let mesh = cube(Vec3::ONE, 1);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(edge_uses(&mesh).values().all(|&n| n == 2));
    }

    #[test]
    fn test_sectioned_cube_is_closed() {
        let mesh = cube(Vec3::ONE, 3);
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 4 + 8 * 3);
        assert!(edge_uses(&mesh).values().all(|&n| n == 2));
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let mesh = cube(Vec3::ONE, 2);
        for [a, b, c] in mesh.triangles() {
            let [p0, p1, p2] = [a, b, c].map(|i| mesh.vertices[i as usize].pos);
            let n = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(n.dot(centroid) > 0.0, "inward triangle {a} {b} {c}");
        }
    }

    #[test]
    fn test_cube_face_tags() {
        let mesh = cube(Vec3::ONE, 2);
        // Corner at +X +Y +Z.
        assert_eq!(
            mesh.vertices[0].faces,
            FaceSet::POS_END | FaceSet::TOP | FaceSet::FRONT
        );
        // Middle section vertices are on two faces only.
        assert_eq!(mesh.vertices[4].faces, FaceSet::TOP | FaceSet::FRONT);
        assert_eq!(mesh.vertices[4].pos.x, 0.0);
        assert!(mesh.vertices[8..].iter().all(|v| v.faces.contains(FaceSet::NEG_END)));
    }

    #[test]
    fn test_ring_indices_wrap() {
        let mesh = ring(Vec3::ONE, 60, 1.0, 2.0);
        assert_eq!(mesh.vertex_count(), 60 * 8);
        assert_eq!(mesh.triangle_count(), 60 * 8);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));

        for v in &mesh.vertices {
            let r = (v.pos.x * v.pos.x + v.pos.z * v.pos.z).sqrt();
            assert!((0.999..=2.001).contains(&r));
            assert_abs_diff_eq!(v.pos.y.abs(), 0.5, epsilon = 1e-6);
            assert_abs_diff_eq!(v.normal.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = sphere(Vec3::ONE, 2, 0.3);
        assert_eq!(mesh.triangle_count(), 12 * 16);
        for v in &mesh.vertices {
            assert_abs_diff_eq!(v.pos.length(), 0.3, epsilon = 1e-5);
            // Normals of a sphere point away from the center.
            assert!(v.normal.dot(v.pos) > 0.0);
        }
    }

    #[test]
    fn test_ground_quad_faces_up() {
        let mesh = ground_quad(Vec3::new(0.0, 0.6, 0.0), 500.0);
        assert_eq!(mesh.triangle_count(), 2);
        let [p0, p1, p2] = mesh.triangle(0).map(|i| mesh.vertices[i as usize].pos);
        assert!((p1 - p0).cross(p2 - p0).y > 0.0);
        assert_eq!(mesh.vertices[2].pos, Vec3::new(-500.0, 0.0, -500.0));
    }

    #[test]
    fn test_slab_normals_match_faces() {
        let mesh = slab(Vec3::ONE);
        assert_eq!(mesh.vertex_count(), 24);
        for v in &mesh.vertices {
            let face = v.faces.primary().unwrap();
            assert_abs_diff_eq!(v.normal.dot(face.normal()), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(v.pos.abs().max_element(), 0.5, epsilon = 1e-6);
        }
    }
}
