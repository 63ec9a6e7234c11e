/*
 * Scene Configuration Module
 *
 * This module defines the SceneConfig struct holding the fixed, build-time
 * parameters of the scene: camera, lights, sphere shape and the list of
 * bodies with their textures and velocities. Every field has a default, so
 * a YAML file only needs to list the values it overrides. Relative texture
 * paths in a file are taken relative to that file; the built-in scene names
 * the images shipped in the assets folder.
 *
 *   camera:
 *     fov_degrees: 45.0
 *     distance: 15.0
 *   bodies:
 *     - texture: ../assets/crisp.png
 *       velocity: [0.06, 0.04]
 *       fallback_color: [214, 170, 96]
 */

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SpheresError};

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rolling Spheres".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32, // camera z, looking at the origin
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            distance: 15.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.8,
            directional_intensity: 1.0,
            directional_position: [5.0, 10.0, 7.5],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub spacing: f32,  // x distance between neighbouring bodies
    pub stagger: f32,  // y offset applied to odd bodies
    pub spin: [f32; 2], // radians per frame around x and y
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 0.8,
            width_segments: 64,
            height_segments: 64,
            spacing: 2.5,
            stagger: 1.5,
            spin: [0.02, 0.025],
            roughness: 0.5,
            metalness: 0.2,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub texture: PathBuf,
    pub velocity: [f32; 2],
    #[serde(default = "default_fallback_color")]
    pub fallback_color: [u8; 3],
}

fn default_fallback_color() -> [u8; 3] {
    [200, 200, 200]
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub sphere: SphereConfig,
    pub bodies: Vec<BodyConfig>,
    pub background: [u8; 3],
    pub max_pixel_ratio: f32,
    pub show_debug: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            sphere: SphereConfig::default(),
            bodies: vec![
                BodyConfig {
                    texture: PathBuf::from("crisp.png"),
                    velocity: [0.06, 0.04],
                    fallback_color: [214, 170, 96],
                },
                BodyConfig {
                    texture: PathBuf::from("juniper.png"),
                    velocity: [-0.05, 0.07],
                    fallback_color: [92, 128, 110],
                },
                BodyConfig {
                    texture: PathBuf::from("puddle.png"),
                    velocity: [0.04, -0.05],
                    fallback_color: [120, 150, 190],
                },
            ],
            background: [0xfa, 0x80, 0x72], // salmon
            max_pixel_ratio: 2.0,
            show_debug: false,
        }
    }
}

impl SceneConfig {
    // Load a scene from a YAML file and validate it
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = fs::canonicalize(path.as_ref())?;
        let reader = BufReader::new(File::open(&path)?);
        let mut config: SceneConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        if let Some(dir) = path.parent() {
            config.resolve_textures(dir);
        }
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: SceneConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(format!("fov_degrees must be in (0, 180), got {}", camera.fov_degrees)));
        }
        if !(camera.distance > 0.0) {
            return Err(invalid(format!("camera distance must be positive, got {}", camera.distance)));
        }
        if !(camera.near > 0.0) || !(camera.far > camera.near) {
            return Err(invalid(format!("clip planes must satisfy 0 < near < far, got {} / {}", camera.near, camera.far)));
        }
        if !(self.sphere.radius > 0.0) {
            return Err(invalid(format!("sphere radius must be positive, got {}", self.sphere.radius)));
        }
        if self.sphere.width_segments < 3 || self.sphere.height_segments < 2 {
            return Err(invalid("sphere needs at least 3 width and 2 height segments".to_string()));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(invalid(format!("max_pixel_ratio must be at least 1, got {}", self.max_pixel_ratio)));
        }
        Ok(())
    }

    // Join relative texture paths onto base, absolute ones are left alone
    pub fn resolve_textures(&mut self, base: &Path) {
        for body in &mut self.bodies {
            if body.texture.is_relative() {
                body.texture = base.join(&body.texture);
            }
        }
    }

    // Index of the body that sits at x = 0
    pub fn center_index(&self) -> f32 {
        self.bodies.len().saturating_sub(1) as f32 / 2.0
    }
}

fn invalid(message: String) -> SpheresError {
    SpheresError::InvalidConfig(message)
}
