//! Render configuration.
//!
//! `RenderSettings` carries every numeric parameter the camera and the
//! integrator need. All fields have defaults so partial JSON is accepted.

use lux_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Vertical white to sky-blue gradient; acts as an infinite area light.
    #[default]
    Sky,
    /// A constant color.
    Solid(Color),
}

/// Camera and integrator parameters for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub image_width: u32,
    /// Width over height; the image height is derived from it
    pub aspect_ratio: f64,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: Point3,
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees (0 = pinhole)
    pub defocus_angle: f64,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f64,
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per camera ray
    pub max_depth: u32,
    pub background: Background,
    /// Base seed for the per-bucket random streams; random when absent
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Background::Sky,
            seed: None,
        }
    }
}
