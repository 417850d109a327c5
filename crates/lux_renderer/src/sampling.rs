//! Random sampling helpers.
//!
//! Every helper draws from an explicitly passed generator so that renders are
//! reproducible per seed and safe to run on many threads at once.

use lux_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Uniform random integer axis index in {0, 1, 2}.
#[inline]
pub fn gen_axis(rng: &mut dyn RngCore) -> usize {
    rng.gen_range(0..3)
}

/// Random vector uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling inside the unit ball, then project onto the sphere
    loop {
        let v = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random point uniformly distributed in the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random point in the square [-0.5, 0.5] x [-0.5, 0.5] on the z = 0 plane.
#[inline]
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f64(rng) - 0.5, gen_f64(rng) - 0.5, 0.0)
}
