//! Scene description types for Lux.
//!
//! This module defines the renderer-agnostic scene representation: named
//! materials, a list of objects that reference them by name, and the render
//! settings. The renderer turns a description into hittable geometry.

use std::collections::BTreeMap;

use lux_math::{Color, Point3};
use serde::{Deserialize, Serialize};

use crate::loader::{SceneError, SceneResult};
use crate::settings::RenderSettings;

/// A material definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Ideal diffuse reflector
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` in [0, 1] roughens the reflection
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    /// Clear refractive material such as glass or water
    Dielectric { refraction_index: f64 },
}

/// A geometric object in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    /// A sphere, optionally moving linearly from `center` (time 0) to
    /// `center_end` (time 1).
    Sphere {
        center: Point3,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center_end: Option<Point3>,
        radius: f64,
        material: String,
    },
}

impl ObjectDesc {
    /// Name of the material this object references.
    pub fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. } => material,
        }
    }
}

/// A complete scene: settings, materials and objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub settings: RenderSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Register a material under `name`, replacing any previous definition.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Append a static sphere.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: impl Into<String>) {
        self.objects.push(ObjectDesc::Sphere {
            center,
            center_end: None,
            radius,
            material: material.into(),
        });
    }

    /// Append a sphere moving from `center` to `center_end` over the shutter interval.
    pub fn add_moving_sphere(
        &mut self,
        center: Point3,
        center_end: Point3,
        radius: f64,
        material: impl Into<String>,
    ) {
        self.objects.push(ObjectDesc::Sphere {
            center,
            center_end: Some(center_end),
            radius,
            material: material.into(),
        });
    }

    /// Check that every object references a defined material.
    ///
    /// Out-of-range values that the renderer clamps are only warned about.
    pub fn validate(&self) -> SceneResult<()> {
        let aspect = self.settings.aspect_ratio;
        if !(aspect.is_finite() && aspect > 0.0) {
            log::warn!("Aspect ratio {} is not a positive number, using 1.0", aspect);
        }

        for (index, object) in self.objects.iter().enumerate() {
            let name = object.material();
            if !self.materials.contains_key(name) {
                return Err(SceneError::UnknownMaterial {
                    object: index,
                    name: name.to_string(),
                });
            }
            let ObjectDesc::Sphere { radius, .. } = object;
            if *radius < 0.0 {
                log::warn!("Object {} has negative radius {}, clamping to 0", index, radius);
            } else if *radius == 0.0 {
                log::warn!("Object {} has zero radius and will never be hit", index);
            }
        }

        for (name, material) in &self.materials {
            if let MaterialDesc::Metal { fuzz, .. } = material {
                if !(0.0..=1.0).contains(fuzz) {
                    log::warn!("Metal '{}' fuzz {} outside [0, 1], clamping", name, fuzz);
                }
            }
        }

        if self.objects.is_empty() {
            log::warn!("Scene has no objects; only the background will be visible");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_json_forms() {
        let json = r#"[
            { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
            { "type": "metal", "albedo": [0.8, 0.6, 0.2] },
            { "type": "dielectric", "refraction_index": 1.5 }
        ]"#;
        let materials: Vec<MaterialDesc> = serde_json::from_str(json).unwrap();

        assert_eq!(
            materials[1],
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.0
            }
        );
        assert_eq!(materials[2], MaterialDesc::Dielectric { refraction_index: 1.5 });
    }

    #[test]
    fn test_validate_rejects_unknown_material() {
        let mut scene = SceneDescription::default();
        scene.add_material("grey", MaterialDesc::Lambertian { albedo: Color::splat(0.5) });
        scene.add_sphere(Point3::ZERO, 1.0, "grey");
        scene.add_sphere(Point3::X, 1.0, "chrome");

        match scene.validate() {
            Err(SceneError::UnknownMaterial { object, name }) => {
                assert_eq!(object, 1);
                assert_eq!(name, "chrome");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_only_warns_about_clamped_values() {
        let mut scene = SceneDescription::default();
        scene.settings.aspect_ratio = 0.0;
        scene.add_material("rough", MaterialDesc::Metal { albedo: Color::ONE, fuzz: 4.0 });
        scene.add_sphere(Point3::ZERO, 0.0, "rough");
        scene.add_sphere(Point3::X, -1.0, "rough");

        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_shared_material() {
        let mut scene = SceneDescription::default();
        scene.add_material("glass", MaterialDesc::Dielectric { refraction_index: 1.5 });
        scene.add_sphere(Point3::ZERO, 0.5, "glass");
        scene.add_moving_sphere(Point3::X, Point3::Y, 0.4, "glass");

        assert!(scene.validate().is_ok());
    }
}
