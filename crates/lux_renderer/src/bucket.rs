//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon, then stitched back into one image.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::renderer::{log_stats, render_pixel, ImageBuffer};
use crate::{Camera, Hittable};
use lux_math::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Seed for this bucket's generator, derived from the render seed and
    /// the bucket's position so it does not depend on scheduling.
    pub fn seed(&self, render_seed: u64) -> u64 {
        let position = ((self.x as u64) << 32) | self.y as u64;
        splitmix64(render_seed ^ splitmix64(position))
    }
}

/// SplitMix64 finalizer; spreads nearby inputs across the whole u64 range.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets near the middle of the frame come first. A zero bucket size is
/// treated as one pixel.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order among equidistant buckets
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into their place in `image`.
    pub fn stitch_into(&self, image: &mut ImageBuffer) {
        let mut colors = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(&color) = colors.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, color);
                }
            }
        }
    }
}

/// Render the scene in parallel buckets on the current rayon pool.
///
/// Each bucket draws from its own generator seeded by [`Bucket::seed`], so
/// the output for a given `seed` does not depend on thread count or order.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    bucket_size: u32,
    seed: u64,
) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, bucket_size);
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} at {} spp: {} buckets on {} threads",
        width,
        height,
        camera.samples_per_pixel,
        total,
        rayon::current_num_threads()
    );
    let start = Instant::now();
    let completed = AtomicUsize::new(0);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(bucket.seed(seed));
            let pixels = render_bucket(bucket, camera, world, &mut rng);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!(
                "Bucket {} at ({}, {}) done [{}/{}]",
                bucket.index,
                bucket.x,
                bucket.y,
                done,
                total
            );
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        result.stitch_into(&mut image);
    }

    log_stats(camera, start);
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Metal, Sphere};
    use lux_math::Point3;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn small_scene() -> (Camera, HittableList) {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(
            Point3::new(0.0, -100.5, -1.0),
            100.0,
            Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
        )));
        world.add(Arc::new(Sphere::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
        )));

        let mut camera = Camera::new().with_image(13, 1.5).with_quality(3, 6);
        camera.initialize();
        (camera, world)
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
    }

    #[test]
    fn test_generate_buckets_zero_size() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_bucket_seeds_differ() {
        let buckets = generate_buckets(64, 64, 8);
        let seeds: HashSet<u64> = buckets.iter().map(|b| b.seed(7)).collect();
        assert_eq!(seeds.len(), buckets.len());
        assert_ne!(buckets[0].seed(7), buckets[0].seed(8));
    }

    #[test]
    fn test_stitch_places_pixels() {
        let bucket = Bucket::new(1, 1, 2, 1, 0);
        let result = BucketResult::new(bucket, vec![Color::X, Color::Y]);
        let mut image = ImageBuffer::new(4, 3);
        result.stitch_into(&mut image);

        assert_eq!(image.get(1, 1), Color::X);
        assert_eq!(image.get(2, 1), Color::Y);
        assert_eq!(image.get(0, 1), Color::ZERO);
        assert_eq!(image.get(1, 0), Color::ZERO);
    }

    #[test]
    fn test_render_parallel_is_deterministic() {
        let (camera, world) = small_scene();

        let a = render_parallel(&camera, &world, 4, 42);
        let b = render_parallel(&camera, &world, 4, 42);
        assert_eq!(a, b);
        assert_eq!(a.pixels.len(), 13 * 8);
    }

    #[test]
    fn test_render_parallel_matches_per_bucket_render() {
        let (camera, world) = small_scene();
        let image = render_parallel(&camera, &world, 5, 9);

        // Re-render one bucket by hand and compare
        let bucket = generate_buckets(camera.image_width, camera.image_height(), 5)[2];
        let mut rng = StdRng::seed_from_u64(bucket.seed(9));
        let pixels = render_bucket(&bucket, &camera, &world, &mut rng);

        let mut expected = ImageBuffer::new(camera.image_width, camera.image_height());
        BucketResult::new(bucket, pixels).stitch_into(&mut expected);
        for y in bucket.y..bucket.y + bucket.height {
            for x in bucket.x..bucket.x + bucket.width {
                assert_eq!(image.get(x, y), expected.get(x, y));
            }
        }
    }

    #[test]
    fn test_render_parallel_thread_count_independent() {
        let (camera, world) = small_scene();
        let pool = |n| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .unwrap()
        };

        let one = pool(1).install(|| render_parallel(&camera, &world, 3, 5));
        let four = pool(4).install(|| render_parallel(&camera, &world, 3, 5));
        assert_eq!(one, four);
    }
}
