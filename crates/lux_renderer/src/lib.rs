//! Lux renderer: CPU path tracing.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials, accelerated by a bounding volume hierarchy and rendered in
//! parallel buckets.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod sphere;
mod world;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    background_color, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer,
};
pub use sphere::Sphere;
pub use world::{build_material, build_world};

/// Re-export common math types from lux_math
pub use lux_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
