//! Scene loading from JSON files.

use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {object} references unknown material '{name}'")]
    UnknownMaterial { object: usize, name: String },

    #[error("Unknown built-in scene '{0}'")]
    UnknownScene(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load and validate a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene {} ({} materials, {} objects)",
        path.display(),
        scene.materials.len(),
        scene.objects.len()
    );

    Ok(scene)
}

/// Parse and validate a scene description from a JSON string.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(text)?;
    scene.validate()?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MaterialDesc, ObjectDesc};
    use lux_math::{Color, Point3};

    const SCENE: &str = r#"{
        "settings": { "image_width": 32, "samples_per_pixel": 8, "seed": 7 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "glass": { "type": "dielectric", "refraction_index": 1.5 }
        },
        "objects": [
            { "type": "sphere", "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
            { "type": "sphere", "center": [0, 0, -1], "center_end": [0, 0.5, -1],
              "radius": 0.5, "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_load_scene_from_str() {
        let scene = load_scene_from_str(SCENE).unwrap();

        assert_eq!(scene.settings.image_width, 32);
        assert_eq!(scene.settings.seed, Some(7));
        assert_eq!(
            scene.materials["ground"],
            MaterialDesc::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0)
            }
        );
        assert_eq!(
            scene.objects[1],
            ObjectDesc::Sphere {
                center: Point3::new(0.0, 0.0, -1.0),
                center_end: Some(Point3::new(0.0, 0.5, -1.0)),
                radius: 0.5,
                material: "glass".to_string(),
            }
        );
    }

    #[test]
    fn test_load_scene_reports_parse_errors() {
        let err = load_scene_from_str("{ \"objects\": [ { \"type\": \"cube\" } ] }").unwrap_err();
        assert!(matches!(err, SceneError::Parse(_)));
    }

    #[test]
    fn test_load_scene_reports_missing_material() {
        let json = r#"{ "objects": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "nope" }
        ] }"#;
        let err = load_scene_from_str(json).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial { object: 0, .. }));
        assert_eq!(err.to_string(), "Object 0 references unknown material 'nope'");
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
