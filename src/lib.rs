//! Procedural brick meshes and the wall layouts that instance them.
//!
//! A single brick mesh is generated from a cube by subdividing, rounding and
//! roughening it, and a [`WallLayout`] places that one mesh thousands of times
//! along wall segments in a running bond.

pub mod brick;
pub mod config;
pub mod dense_storage;
pub mod error;
pub mod face;
pub mod house;
pub mod layout;
pub mod material;
pub mod mesh;
pub mod mesh_object;
pub mod plan;
pub mod primitives;
mod refine;
pub mod scene;
pub mod shader_types;
pub mod shading;
pub mod transform;

pub use brick::{BrickParams, BrickSize, build_brick, build_mortar};
pub use config::Config;
pub use error::{Error, Result};
pub use house::House;
pub use layout::{LayoutParams, WallLayout, WallSegment, WallShape};
pub use mesh::{Mesh, Vertex};
pub use plan::{HousePlan, Leg, WallCourse};
pub use scene::{RenderSnapshot, Scene};
