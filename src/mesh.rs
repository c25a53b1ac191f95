use std::path::Path;

use glam::{Mat4, Vec3};

use crate::{
    error::{Error, Result},
    face::FaceSet,
    material::Material,
};

/// Editable triangle mesh: vertex attributes, a flattened index list, a model
/// transform and a material.
///
/// Every three consecutive indices form one triangle wound counter-clockwise
/// when seen from outside. Indices are not bounds checked; editing operations
/// rely on callers only referencing vertices that exist.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub model_matrix: Mat4,
    pub material: Material,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    /// Base color plus any weathering tint added by roughening.
    pub color: Vec3,
    pub normal: Vec3,
    pub faces: FaceSet,
}

impl Vertex {
    pub fn new(pos: Vec3, color: Vec3, normal: Vec3) -> Self {
        Self {
            pos,
            color,
            normal,
            faces: FaceSet::empty(),
        }
    }

    pub fn with_faces(mut self, faces: FaceSet) -> Self {
        self.faces = faces;
        self
    }
}

impl Mesh {
    /// Removes all vertices and triangles. The model matrix and material are
    /// kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends an untagged vertex and returns its index.
    pub fn append(&mut self, pos: Vec3, color: Vec3, normal: Vec3) -> u32 {
        self.push_vertex(Vertex::new(pos, color, normal))
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        self.vertices.push(vertex);
        self.vertices.len() as u32 - 1
    }

    pub fn append_indices(&mut self, indices: &[u32]) {
        self.indices.extend_from_slice(indices);
    }

    /// Multiplies every position component-wise. Normals are left alone, so
    /// they must be recomputed afterwards if the scale is not uniform.
    pub fn scale(&mut self, s: Vec3) {
        for v in &mut self.vertices {
            v.pos *= s;
        }
    }

    pub fn scale_uniform(&mut self, s: f32) {
        self.scale(Vec3::splat(s));
    }

    pub fn translate(&mut self, t: Vec3) {
        for v in &mut self.vertices {
            v.pos += t;
        }
    }

    /// Applies an affine transform to positions, and its linear part to
    /// normals.
    pub fn transform(&mut self, t: Mat4) {
        for v in &mut self.vertices {
            v.pos = t.transform_point3(v.pos);
            v.normal = t.transform_vector3(v.normal);
        }
    }

    pub fn reverse_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = -v.normal;
        }
    }

    /// Pushes every vertex onto a sphere of radius `len` around the origin.
    pub fn normalize_points(&mut self, len: f32) {
        for v in &mut self.vertices {
            v.pos = v.pos.normalize_or_zero() * len;
        }
    }

    /// Replaces the contents with flat `xyz` arrays.
    ///
    /// `colors` and `normals` may be empty, in which case vertices are white
    /// and have zero normals. Faces are untagged.
    pub fn set_from_flat_arrays(
        &mut self,
        positions: &[f32],
        colors: &[f32],
        normals: &[f32],
        indices: &[u32],
    ) {
        self.clear();

        let colors = colors
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .chain(std::iter::repeat(Vec3::ONE));
        let normals = normals
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .chain(std::iter::repeat(Vec3::ZERO));

        for ((pos, color), normal) in positions
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .zip(colors)
            .zip(normals)
        {
            self.append(pos, color, normal);
        }
        self.append_indices(indices);
    }

    /// Loads the first model of an OBJ file as a base shape.
    ///
    /// Faces are tagged from the file's normals so the shape can be roughened
    /// like a cube.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (models, _) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)?;

        let model = models.first().ok_or_else(|| Error::EmptyObj {
            path: path.to_path_buf(),
        })?;

        let mut mesh = Mesh::default();
        mesh.set_from_flat_arrays(
            &model.mesh.positions,
            model.mesh.vertex_color.as_slice(),
            &model.mesh.normals,
            &model.mesh.indices,
        );
        mesh.tag_faces_from_normals();

        log::debug!(
            "loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count(),
        );

        Ok(mesh)
    }

    /// Re-infers every vertex's face set from its current normal.
    pub fn tag_faces_from_normals(&mut self) {
        for v in &mut self.vertices {
            v.faces = FaceSet::from_normal(v.normal);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle(&self, i: usize) -> [u32; 3] {
        [
            self.indices[3 * i],
            self.indices[3 * i + 1],
            self.indices[3 * i + 2],
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.pos.to_array()).collect()
    }

    pub fn colors(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.color.to_array()).collect()
    }

    pub fn normals(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.normal.to_array()).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::default();
        mesh.set_from_flat_arrays(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[],
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            &[0, 1, 2],
        );
        mesh
    }

    #[test]
    fn test_set_from_flat_arrays_fills_missing_colors() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.vertices.iter().all(|v| v.color == Vec3::ONE));
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn test_clear_keeps_material() {
        let mut mesh = triangle_mesh();
        mesh.material = Material::brick();
        mesh.clear();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.is_empty());
        assert_eq!(mesh.material, Material::brick());
    }

    #[test]
    fn test_scale_leaves_normals() {
        let mut mesh = triangle_mesh();
        mesh.scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(mesh.vertices[1].pos, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[2].pos, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(mesh.vertices[0].normal, Vec3::Z);
    }

    #[test]
    fn test_transform_ignores_translation_for_normals() {
        let mut mesh = triangle_mesh();
        let t = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0))
            * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2);
        mesh.transform(t);

        assert_abs_diff_eq!(mesh.vertices[0].pos.x, 5.0, epsilon = 1e-6);
        let n = mesh.vertices[0].normal;
        assert_abs_diff_eq!(n.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(n.y, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(n.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_translate_and_reverse() {
        let mut mesh = triangle_mesh();
        mesh.translate(Vec3::Y);
        mesh.reverse_normals();
        assert_eq!(mesh.vertices[0].pos, Vec3::Y);
        assert_eq!(mesh.vertices[0].normal, -Vec3::Z);
    }

    #[test]
    fn test_normalize_points() {
        let mut mesh = triangle_mesh();
        mesh.normalize_points(0.3);
        assert_abs_diff_eq!(mesh.vertices[1].pos.length(), 0.3, epsilon = 1e-6);
        // The origin has no direction and stays put.
        assert_eq!(mesh.vertices[0].pos, Vec3::ZERO);
    }

    #[test]
    fn test_flat_exports() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.positions()[1], [1.0, 0.0, 0.0]);
        assert_eq!(mesh.normals()[2], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.colors().len(), 3);
    }

    #[test]
    fn test_load_obj() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(
            &path,
            "v 0 0 1\nv 1 0 1\nv 1 1 1\nv 0 1 1\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1//1 3//1 4//1\n",
        )
        .unwrap();

        let mesh = Mesh::load_obj(&path).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.faces == FaceSet::FRONT));
    }

    #[test]
    fn test_load_obj_missing_file() {
        assert!(Mesh::load_obj("does/not/exist.obj").is_err());
    }
}
