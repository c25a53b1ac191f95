//! Everything that makes up the rendered house, rebuilt on demand.

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::{
    brick::{self, BrickParams},
    config::{Config, LayoutConfig},
    layout::WallLayout,
    material::Material,
    mesh::Mesh,
    mesh_object::MeshObject,
    primitives,
    scene::Scene,
};

const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 7.0, -5.0);
const GROUND_COLOR: Vec3 = Vec3::new(0.0, 0.6, 0.0);

/// Owns every mesh of the house and the wall layout placing the bricks.
///
/// Parameter changes never patch geometry in place: the affected meshes are
/// rebuilt from scratch and the walls are laid out again.
#[derive(Debug, Clone)]
pub struct House {
    config: Config,
    rng: ChaCha12Rng,
    pub brick: Mesh,
    pub mortar: Mesh,
    pub light: Mesh,
    pub ground: Mesh,
    pub floor: Mesh,
    pub roof: Mesh,
    pub layout: WallLayout,
}

impl House {
    pub fn new(config: Config) -> Self {
        let mut light = primitives::sphere(Vec3::ONE, 3, 0.3);
        light.model_matrix = Mat4::from_translation(LIGHT_POSITION);

        let mut ground = primitives::ground_quad(GROUND_COLOR, 500.0);
        ground.material = Material::ground();

        let mut house = Self {
            rng: ChaCha12Rng::seed_from_u64(config.seed),
            layout: WallLayout::new(config.layout_params()),
            config,
            brick: Mesh::default(),
            mortar: Mesh::default(),
            light,
            ground,
            floor: Mesh::default(),
            roof: Mesh::default(),
        };
        house.rebuild_geometry();
        house.rebuild_walls();
        house
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuilds the brick, mortar, floor and roof meshes.
    ///
    /// The noise stream continues from the previous build, so calling this
    /// twice gives two differently roughened bricks.
    pub fn rebuild_geometry(&mut self) {
        self.brick = brick::build_brick(&self.config.brick, &mut self.rng);
        self.mortar = brick::build_mortar(self.config.layout.mortar_color);

        let mut floor = primitives::slab(self.config.brick.color);
        floor.scale(Vec3::new(19.0, 0.1, 13.0));
        floor.translate(Vec3::new(3.0, 0.05, 0.0));
        floor.material = Material::floor();
        self.floor = floor;

        let mut roof = primitives::slab(self.config.layout.mortar_color);
        roof.scale(Vec3::new(22.0, 1.0, 16.0));
        roof.material = Material::roof();
        self.roof = roof;
    }

    /// Lays out every wall again and moves the roof on top of them.
    pub fn rebuild_walls(&mut self) {
        self.layout.params = self.config.layout_params();
        self.layout.build_house(&self.config.plan());

        let course = self.config.brick.size().course_height();
        let height = self.config.layout.rows as f32 * course + course / 2.0;
        self.roof.model_matrix = Mat4::from_translation(Vec3::new(3.0, height, 0.0));

        log::info!(
            "house rebuilt: {} bricks, {} mortar boxes",
            self.layout.bricks.len(),
            self.layout.mortar.len(),
        );
    }

    pub fn set_brick_params(&mut self, params: BrickParams) {
        self.config.brick = params;
        self.rebuild_geometry();
        self.rebuild_walls();
    }

    pub fn set_layout_params(&mut self, layout: LayoutConfig) {
        let recolor = layout.mortar_color != self.config.layout.mortar_color;
        self.config.layout = layout;
        if recolor {
            self.mortar = brick::build_mortar(layout.mortar_color);
        }
        self.rebuild_walls();
    }

    /// Assembles the current meshes and placements into a scene.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();

        let brick = scene.insert_mesh(self.brick.clone());
        scene.insert_mesh_object(MeshObject {
            mesh: brick,
            instances: self.layout.bricks.clone(),
        });

        if !self.layout.mortar.is_empty() {
            let mortar = scene.insert_mesh(self.mortar.clone());
            scene.insert_mesh_object(MeshObject {
                mesh: mortar,
                instances: self.layout.mortar.clone(),
            });
        }

        let singles = [&self.ground, &self.floor, &self.roof, &self.light]
            .into_iter()
            .chain(self.layout.mortar_ring.as_ref());
        for mesh in singles {
            let mesh = scene.insert_mesh(mesh.clone());
            scene.insert_mesh_object(MeshObject::single(mesh));
        }

        scene
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::layout::WallShape;

    fn quick_config() -> Config {
        Config {
            brick: BrickParams {
                subdivisions: 2,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_house() {
        let house = House::new(quick_config());
        assert!(!house.layout.bricks.is_empty());
        // One mortar box per wall that holds any bricks.
        assert!(house.layout.mortar.len() <= 16);
        assert!(house.layout.mortar_ring.is_none());

        let roof = house.roof.model_matrix.w_axis;
        assert_abs_diff_eq!(roof.y, 9.0 * 0.8 + 0.4, epsilon = 1e-5);
    }

    #[test]
    fn test_same_seed_same_house() {
        let a = House::new(quick_config());
        let b = House::new(quick_config());
        assert_eq!(a.brick.positions(), b.brick.positions());
        assert_eq!(a.layout.bricks, b.layout.bricks);
    }

    #[test]
    fn test_layout_change_keeps_brick() {
        let mut house = House::new(quick_config());
        let brick = house.brick.positions();
        let bricks = house.layout.bricks.len();

        house.set_layout_params(LayoutConfig {
            rows: 12,
            ..house.config().layout
        });
        assert_eq!(house.brick.positions(), brick);
        assert!(house.layout.bricks.len() > bricks);
    }

    #[test]
    fn test_brick_change_rebuilds() {
        let mut house = House::new(quick_config());
        let params = BrickParams {
            width: 1.0,
            ..house.config().brick
        };
        let bricks = house.layout.bricks.len();
        house.set_brick_params(params);
        assert!(house.layout.bricks.len() > bricks);

        let width = house
            .brick
            .vertices
            .iter()
            .map(|v| v.pos.x)
            .fold(f32::MIN, f32::max);
        assert!(width < 1.0);
    }

    #[test]
    fn test_circle_house_scene() {
        let mut config = quick_config();
        config.layout.shape = WallShape::Circle;
        let house = House::new(config);
        assert!(house.layout.mortar.is_empty());
        assert!(house.layout.mortar_ring.is_some());

        let snapshot = house.scene().snapshot();
        // Brick, then the ground, floor, roof, light and mortar ring.
        assert_eq!(snapshot.draws.len(), 6);
        assert_eq!(snapshot.draws[0].instances.len(), house.layout.bricks.len());
    }

    #[test]
    fn test_scene_draws() {
        let house = House::new(quick_config());
        let snapshot = house.scene().snapshot();
        assert_eq!(snapshot.draws.len(), 6);
        assert_eq!(snapshot.draws[1].instances.len(), house.layout.mortar.len());
        assert_eq!(snapshot.draws[1].vertices.len(), 36);
    }
}
