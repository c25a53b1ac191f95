use std::{collections::HashMap, ops::Range};

use glam::Mat4;

use crate::{
    dense_storage::{DenseStorage, DenseStorageIndex},
    mesh::Mesh,
    mesh_object::MeshObject,
    shader_types::{GpuInstance, GpuMaterial, GpuVertex},
};

/// A scene that contains mesh objects and their meshes
#[derive(Debug, Default, Clone)]
pub struct Scene {
    meshes: DenseStorage<Mesh>,
    mesh_objects: DenseStorage<MeshObject>,
}

impl Scene {
    /// Inserts a mesh and returns a handle
    pub fn insert_mesh(&mut self, mesh: Mesh) -> DenseStorageIndex {
        self.meshes.push(mesh)
    }

    /// Inserts a mesh object and returns a handle
    pub fn insert_mesh_object(&mut self, mesh_object: MeshObject) -> DenseStorageIndex {
        self.mesh_objects.push(mesh_object)
    }

    pub fn mesh(&self, index: DenseStorageIndex) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn remove_mesh_object(&mut self, index: DenseStorageIndex) -> Option<MeshObject> {
        self.mesh_objects.remove(index)
    }

    pub fn mesh_objects(&self) -> impl Iterator<Item = &MeshObject> {
        self.mesh_objects.values()
    }

    /// Flattens the scene into the buffers a renderer uploads: one shared
    /// vertex and index buffer and one draw per mesh.
    ///
    /// Objects sharing a mesh are merged into a single instanced draw, in the
    /// order their meshes were first referenced. Objects pointing at missing
    /// or empty meshes are skipped.
    pub fn snapshot(&self) -> RenderSnapshot {
        let mut order = Vec::new();
        let mut instances = HashMap::<_, Vec<GpuInstance>>::new();

        for mesh_object in self.mesh_objects.values() {
            let entry = instances.entry(mesh_object.mesh).or_insert_with(|| {
                order.push(mesh_object.mesh);
                Vec::new()
            });
            entry.extend(mesh_object.instances.iter().copied().map(GpuInstance::from));
        }

        let mut snapshot = RenderSnapshot::default();

        for index in order {
            let Some(mesh) = self.meshes.get(index) else {
                log::warn!("mesh object refers to a removed mesh {index:?}");
                continue;
            };
            if mesh.is_empty() {
                log::warn!("skipping empty mesh {index:?}");
                continue;
            }

            let start_vertex = snapshot.vertices.len();
            let start_index = snapshot.indices.len();
            snapshot
                .vertices
                .extend(mesh.vertices.iter().map(GpuVertex::from));
            snapshot.indices.extend_from_slice(&mesh.indices);

            snapshot.draws.push(Draw {
                vertices: start_vertex..snapshot.vertices.len(),
                indices: start_index..snapshot.indices.len(),
                material: GpuMaterial::from(&mesh.material),
                model: mesh.model_matrix,
                instances: instances.remove(&index).unwrap_or_default(),
            });
        }

        snapshot
    }
}

/// Renderer-ready copy of a [`Scene`].
#[derive(Debug, Default, Clone)]
pub struct RenderSnapshot {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub draws: Vec<Draw>,
}

impl RenderSnapshot {
    pub fn instance_count(&self) -> usize {
        self.draws.iter().map(|d| d.instances.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.draws
            .iter()
            .map(|d| d.indices.len() / 3 * d.instances.len())
            .sum()
    }
}

/// One instanced draw. Indices are relative to the draw's first vertex.
#[derive(Debug, Clone)]
pub struct Draw {
    pub vertices: Range<usize>,
    pub indices: Range<usize>,
    pub material: GpuMaterial,
    /// Applied before every instance transform.
    pub model: Mat4,
    pub instances: Vec<GpuInstance>,
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{material::Material, mesh_object::InstanceSet, primitives};

    #[test]
    fn test_snapshot_merges_instances_per_mesh() {
        let mut scene = Scene::default();
        let cube = scene.insert_mesh(primitives::cube(Vec3::ONE, 1));
        let mut quad = primitives::ground_quad(Vec3::ONE, 1.0);
        quad.material = Material::ground();
        let quad = scene.insert_mesh(quad);

        let two: InstanceSet = [Mat4::IDENTITY, Mat4::from_translation(Vec3::X)]
            .into_iter()
            .collect();
        scene.insert_mesh_object(MeshObject {
            mesh: cube,
            instances: two,
        });
        scene.insert_mesh_object(MeshObject::single(quad));
        scene.insert_mesh_object(MeshObject::single(cube));

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.draws.len(), 2);
        assert_eq!(snapshot.draws[0].instances.len(), 3);
        assert_eq!(snapshot.draws[0].vertices, 0..8);
        assert_eq!(snapshot.draws[1].vertices, 8..12);
        assert_eq!(snapshot.draws[1].indices, 36..42);
        assert_eq!(snapshot.draws[1].material.specular, 0.0);
        assert_eq!(snapshot.vertices.len(), 12);
        assert_eq!(snapshot.instance_count(), 4);
        assert_eq!(snapshot.triangle_count(), 12 * 3 + 2);
    }

    #[test]
    fn test_snapshot_skips_empty_and_removed() {
        let mut scene = Scene::default();
        let empty = scene.insert_mesh(Mesh::default());
        let cube = scene.insert_mesh(primitives::cube(Vec3::ONE, 1));
        scene.insert_mesh_object(MeshObject::single(empty));
        let gone = scene.insert_mesh_object(MeshObject::single(cube));
        assert!(scene.remove_mesh_object(gone).is_some());

        let snapshot = scene.snapshot();
        assert!(snapshot.draws.is_empty());
        assert!(snapshot.vertices.is_empty());
    }
}
