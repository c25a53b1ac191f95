use glam::Mat4;

use crate::dense_storage::DenseStorageIndex;

/// An ordered list of per-instance model matrices.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InstanceSet {
    transforms: Vec<Mat4>,
}

impl InstanceSet {
    pub fn clear(&mut self) {
        self.transforms.clear();
    }

    pub fn push(&mut self, transform: Mat4) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Returns the transform at `i`, or the identity if there is none.
    pub fn get(&self, i: usize) -> Mat4 {
        match self.transforms.get(i) {
            Some(m) => *m,
            None => {
                log::warn!("instance {i} out of range ({} instances)", self.len());
                Mat4::IDENTITY
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mat4> {
        self.transforms.iter()
    }

    pub fn as_slice(&self) -> &[Mat4] {
        &self.transforms
    }
}

impl FromIterator<Mat4> for InstanceSet {
    fn from_iter<I: IntoIterator<Item = Mat4>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

/// A mesh drawn once per instance transform.
#[derive(Debug, Clone)]
pub struct MeshObject {
    pub mesh: DenseStorageIndex,
    pub instances: InstanceSet,
}

impl MeshObject {
    /// Draws `mesh` once at its own model matrix.
    pub fn single(mesh: DenseStorageIndex) -> Self {
        Self {
            mesh,
            instances: std::iter::once(Mat4::IDENTITY).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_get_out_of_range_is_identity() {
        let mut set = InstanceSet::default();
        let m = Mat4::from_translation(Vec3::X);
        set.push(m);
        assert_eq!(set.get(0), m);
        assert_eq!(set.get(1), Mat4::IDENTITY);
        set.clear();
        assert!(set.is_empty());
    }
}
