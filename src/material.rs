use glam::Vec3;

/// Lighting coefficients handed to the renderer alongside a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shininess: f32,
    pub specular: f32,
    pub diffuse: f32,
    pub ambient: f32,
    pub attenuation: f32,
    pub specular_attenuation: f32,
    pub glow: f32,
    pub specular_color: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shininess: 100.0,
            specular: 0.7,
            diffuse: 0.8,
            ambient: 0.2,
            attenuation: 0.2,
            specular_attenuation: 0.2,
            glow: 0.0,
            specular_color: Vec3::ONE,
        }
    }
}

impl Material {
    pub fn brick() -> Self {
        Self {
            specular: 0.3,
            shininess: 25.0,
            ..Default::default()
        }
    }

    pub fn floor() -> Self {
        Self {
            specular: 0.4,
            ..Default::default()
        }
    }

    pub fn roof() -> Self {
        Self {
            specular: 0.5,
            ..Default::default()
        }
    }

    pub fn ground() -> Self {
        Self {
            specular: 0.0,
            ..Default::default()
        }
    }
}
