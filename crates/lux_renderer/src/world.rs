//! Conversion of a scene description into renderable geometry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::{BvhNode, Dielectric, Hittable, Lambertian, Material, Metal, Sphere};
use lux_core::{MaterialDesc, ObjectDesc, SceneDescription, SceneError, SceneResult};
use rand::RngCore;

/// Instantiate a material from its description.
pub fn build_material(desc: &MaterialDesc) -> Arc<dyn Material> {
    match *desc {
        MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
        MaterialDesc::Dielectric { refraction_index } => {
            Arc::new(Dielectric::new(refraction_index))
        }
    }
}

/// Build a BVH over every object in `scene`.
///
/// Objects sharing a material name share one material instance. Fails if an
/// object references a material that is not defined.
pub fn build_world(scene: &SceneDescription, rng: &mut dyn RngCore) -> SceneResult<BvhNode> {
    let start = Instant::now();

    let materials: HashMap<&str, Arc<dyn Material>> = scene
        .materials
        .iter()
        .map(|(name, desc)| (name.as_str(), build_material(desc)))
        .collect();

    let mut objects: Vec<Arc<dyn Hittable>> = Vec::with_capacity(scene.objects.len());
    for (index, object) in scene.objects.iter().enumerate() {
        let material = materials
            .get(object.material())
            .cloned()
            .ok_or_else(|| SceneError::UnknownMaterial {
                object: index,
                name: object.material().to_string(),
            })?;

        let hittable: Arc<dyn Hittable> = match *object {
            ObjectDesc::Sphere {
                center,
                center_end: Some(center_end),
                radius,
                ..
            } => Arc::new(Sphere::moving(center, center_end, radius, material)),
            ObjectDesc::Sphere {
                center,
                center_end: None,
                radius,
                ..
            } => Arc::new(Sphere::new(center, radius, material)),
        };
        objects.push(hittable);
    }

    let count = objects.len();
    let bvh = BvhNode::new(objects, rng);
    log::info!(
        "Built BVH over {} primitives (depth {}) in {:.2?}",
        count,
        bvh.depth(),
        start.elapsed()
    );

    Ok(bvh)
}
