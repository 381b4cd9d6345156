//! Scene descriptions.
//!
//! A [`SceneDescription`] is the serializable form of a scene: camera
//! settings, named materials, and spheres referring to materials by name.
//! [`SceneDescription::build`] turns it into a renderable [`Scene`], creating
//! each material once and sharing it between every sphere that uses it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Camera, CameraConfig, Color, ConfigError, Dielectric, HittableList, Lambertian, Material,
    Metal, Point3, Sphere,
};

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: &'static str },

    #[error("invalid camera: {0}")]
    Config(#[from] ConfigError),
}

/// Serializable material parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ior: f32,
    },
}

impl MaterialDesc {
    fn build(&self, name: &str) -> Result<Arc<dyn Material>, SceneError> {
        let invalid = |reason: &'static str| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason,
        };

        let material: Arc<dyn Material> = match *self {
            MaterialDesc::Lambertian { albedo } => {
                if !albedo.is_finite() {
                    return Err(invalid("albedo must be finite"));
                }
                Arc::new(Lambertian::new(albedo))
            }
            MaterialDesc::Metal { albedo, fuzz } => {
                if !albedo.is_finite() || !fuzz.is_finite() {
                    return Err(invalid("albedo and fuzz must be finite"));
                }
                Arc::new(Metal::new(albedo, fuzz))
            }
            MaterialDesc::Dielectric { ior } => {
                if !ior.is_finite() || ior <= 0.0 {
                    return Err(invalid("index of refraction must be finite and positive"));
                }
                Arc::new(Dielectric::new(ior))
            }
        };
        Ok(material)
    }
}

/// A sphere referring to a named material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f32,
    pub material: String,
}

/// Serializable scene: camera, named materials and spheres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

/// A renderable scene.
pub struct Scene {
    pub camera: Camera,
    pub world: HittableList,
}

impl SceneDescription {
    /// Create an empty scene with the given camera.
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Register a material under `name`, replacing any previous one.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere using a previously registered material.
    pub fn add_sphere(&mut self, center: Point3, radius: f32, material: impl Into<String>) {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.into(),
        });
    }

    /// Parse a scene from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        log::debug!("Loading scene from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the description and build the camera and object list.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let camera = Camera::new(self.camera)?;

        let mut materials: BTreeMap<&str, Arc<dyn Material>> = BTreeMap::new();
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), desc.build(name)?);
        }

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, material.clone())));
        }

        if world.is_empty() {
            log::warn!("Scene has no objects, only the sky will be visible");
        }
        log::debug!(
            "Built scene with {} spheres sharing {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene { camera, world })
    }
}
