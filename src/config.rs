//! Configuration loaded from a TOML file.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    brick::BrickParams,
    error::{Error, Result},
    layout::{LayoutParams, WallShape},
    plan::HousePlan,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seeds the roughening noise.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub brick: BrickParams,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Walls to build instead of [`HousePlan::standard`].
    #[serde(default)]
    pub plan: Option<HousePlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default)]
    pub shape: WallShape,
    #[serde(default = "default_inset")]
    pub inset: f32,
    #[serde(default = "default_mortar_color")]
    pub mortar_color: Vec3,
}

fn default_seed() -> u64 { 0x6272_6963_6b73 }
fn default_rows() -> u32 { 9 }
fn default_inset() -> f32 { 0.05 }
fn default_mortar_color() -> Vec3 { Vec3::ONE }

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            brick: BrickParams::default(),
            layout: LayoutConfig::default(),
            plan: None,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            shape: WallShape::default(),
            inset: default_inset(),
            mortar_color: default_mortar_color(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Mortar inset, widened for rough bricks so they do not poke through the
    /// mortar.
    pub fn inset(&self) -> f32 {
        let roughness = self.brick.roughness;
        if roughness >= 0.8 {
            default_inset() + 0.1 * (roughness - 0.8)
        } else {
            self.layout.inset
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            size: self.brick.size(),
            inset: self.inset(),
            shape: self.layout.shape,
            mortar_color: self.layout.mortar_color,
        }
    }

    pub fn plan(&self) -> HousePlan {
        self.plan
            .clone()
            .unwrap_or_else(|| HousePlan::standard(self.layout.rows))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.layout.rows, 9);
        assert_eq!(config.layout.shape, WallShape::Single);
        assert_eq!(config.brick, BrickParams::default());
        assert_abs_diff_eq!(config.inset(), 0.05);
        assert_eq!(config.plan(), HousePlan::standard(9));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            seed = 7

            [brick]
            roughness = 0.9
            flat_shade = true

            [layout]
            shape = "circle"
            rows = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert!(config.brick.flat_shade);
        assert_abs_diff_eq!(config.brick.width, 2.0);
        assert_eq!(config.layout.shape, WallShape::Circle);
        assert_eq!(config.layout.rows, 4);
        assert_eq!(config.layout.mortar_color, Vec3::ONE);
        assert_abs_diff_eq!(config.inset(), 0.06, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[layout]\nshape = \"hexagon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[brick]\nsubdivisions = 2").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.brick.subdivisions, 2);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/brickwork.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
