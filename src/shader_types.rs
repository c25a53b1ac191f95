use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::{material::Material, mesh::Vertex};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, Default, PartialEq)]
pub struct GpuVertex {
    pub pos: Vec3,
    _p0: u32,
    pub color: Vec3,
    _p1: u32,
    pub normal: Vec3,
    _p2: u32,
}

impl From<Vertex> for GpuVertex {
    fn from(value: Vertex) -> Self {
        Self::from(&value)
    }
}

impl From<&Vertex> for GpuVertex {
    fn from(value: &Vertex) -> Self {
        Self {
            pos: value.pos,
            color: value.color,
            normal: value.normal,
            ..Default::default()
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, Default, PartialEq)]
pub struct GpuInstance {
    pub model: Mat4,
}

impl From<Mat4> for GpuInstance {
    fn from(model: Mat4) -> Self {
        Self { model }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Default, Debug, PartialEq)]
pub struct GpuMaterial {
    pub specular_color: Vec3,
    pub shininess: f32,
    pub specular: f32,
    pub diffuse: f32,
    pub ambient: f32,
    pub attenuation: f32,
    pub specular_attenuation: f32,
    pub glow: f32,
    pub _p0: [u32; 2],
}

impl From<Material> for GpuMaterial {
    fn from(value: Material) -> Self {
        Self::from(&value)
    }
}

impl From<&Material> for GpuMaterial {
    fn from(value: &Material) -> Self {
        Self {
            specular_color: value.specular_color,
            shininess: value.shininess,
            specular: value.specular,
            diffuse: value.diffuse,
            ambient: value.ambient,
            attenuation: value.attenuation,
            specular_attenuation: value.specular_attenuation,
            glow: value.glow,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 48);
        assert_eq!(std::mem::size_of::<GpuInstance>(), 64);
        assert_eq!(std::mem::size_of::<GpuMaterial>(), 48);
    }

    #[test]
    fn test_vertex_bytes() {
        let v = GpuVertex::from(Vertex::new(Vec3::X, Vec3::Y, Vec3::Z));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[5], 1.0);
        assert_eq!(floats[10], 1.0);
    }
}
