//! The canonical brick and mortar meshes.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{material::Material, mesh::Mesh, primitives, shading::NormalWeighting};

/// Outer dimensions of one brick and the joint between bricks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub spacing: f32,
}

impl BrickSize {
    /// Distance between the starts of two neighbouring bricks in a row. Must be
    /// positive.
    pub fn pitch(&self) -> f32 {
        self.width + self.spacing
    }

    /// Width fraction of a half brick used to square off row ends.
    pub fn half_brick(&self) -> f32 {
        0.5 * (self.width / self.pitch())
    }

    pub fn course_height(&self) -> f32 {
        self.height + self.spacing
    }
}

/// Parameters of the brick mesh. Changing any of them requires a full rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub spacing: f32,
    pub roughness: f32,
    /// Corner radius in the 2×2×2 cube's units, `0` for sharp edges.
    pub radius: f32,
    pub subdivisions: u32,
    pub flat_shade: bool,
    pub color: Vec3,
}

impl Default for BrickParams {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 0.7,
            depth: 1.0,
            spacing: 0.1,
            roughness: 0.5,
            radius: 0.0,
            subdivisions: 4,
            flat_shade: false,
            color: Vec3::new(255.0, 100.0, 15.0) / 255.0,
        }
    }
}

impl BrickParams {
    pub fn size(&self) -> BrickSize {
        BrickSize {
            width: self.width,
            height: self.height,
            depth: self.depth,
            spacing: self.spacing,
        }
    }
}

/// Builds the brick mesh, sized to `params` and centered on the origin.
///
/// The stages run in a fixed order: each one depends on the geometry the
/// previous one left behind, and flat shading has to come last.
pub fn build_brick(params: &BrickParams, rng: &mut impl Rng) -> Mesh {
    let mut mesh = primitives::cube(params.color, 2);
    mesh.subdivide(params.subdivisions);
    mesh.round_edges(params.radius);
    mesh.compute_normals(NormalWeighting::Angle);
    mesh.roughen(params.roughness, params.subdivisions, rng);

    if params.flat_shade {
        mesh.make_flat_shade();
    } else {
        mesh.compute_normals(NormalWeighting::Angle);
    }

    // Roughening is tuned for the 2×2×2 cube, so shrink to unit size only now.
    mesh.scale_uniform(0.5);
    mesh.scale(Vec3::new(params.width, params.height, params.depth));
    mesh.material = Material::brick();

    log::debug!(
        "built brick: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count(),
    );

    mesh
}

/// Builds the flat-shaded 2×2×2 box instanced for straight mortar joints.
pub fn build_mortar(color: Vec3) -> Mesh {
    let mut mesh = primitives::cube(color, 1);
    mesh.make_flat_shade();
    mesh.compute_normals(NormalWeighting::Angle);
    mesh
}
