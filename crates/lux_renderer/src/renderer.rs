//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with bounded depth
//! - Gamma correction on output
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{Camera, Hittable};
use lux_core::{Background, OutputResult, PixelSink};
use lux_math::{Color, Interval, Ray};
use rand::RngCore;

/// Closest distance along a ray that counts as a hit; avoids shadow acne.
const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and multiplying
/// in each material's attenuation. Escaping rays see the background.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Background,
    rng: &mut dyn RngCore,
) -> Color {
    // Out of bounces: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return background_color(ray, background);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, background, rng)
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Color of a ray that escaped the scene.
pub fn background_color(ray: &Ray, background: Background) -> Color {
    match background {
        Background::Sky => sky_gradient(ray),
        Background::Solid(color) => color,
    }
}

/// Vertical white-to-blue sky gradient.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Render a single pixel: the mean of `samples_per_pixel` path samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, camera.background, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear-color image buffer, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-correct every pixel and feed it to `sink` in row-major order.
    pub fn write_to(&self, sink: &mut dyn PixelSink) -> OutputResult<()> {
        sink.begin(self.width, self.height)?;
        for color in &self.pixels {
            let corrected = Color::new(
                linear_to_gamma(color.x),
                linear_to_gamma(color.y),
                linear_to_gamma(color.z),
            );
            sink.write_pixel(corrected)?;
        }
        sink.finish()
    }
}

/// Render the entire scene serially, row by row, from a single generator.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} at {} spp (serial)",
        width,
        height,
        camera.samples_per_pixel
    );
    let start = Instant::now();

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    log_stats(camera, start);
    image
}

/// Log elapsed time and camera ray count for a finished render.
pub(crate) fn log_stats(camera: &Camera, start: Instant) {
    let elapsed = start.elapsed();
    let rays = camera.image_width as u64
        * camera.image_height() as u64
        * camera.samples_per_pixel as u64;
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { rays as f64 / secs } else { 0.0 };
    log::info!(
        "Render finished in {:.2?}: {} camera rays ({:.0} rays/s)",
        elapsed,
        rays,
        rate
    );
}
