//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f64, random_unit_vector};
use lux_math::{Color, Ray, Vec3Ext};
use rand::RngCore;

/// Outcome of a successful scatter: the ray to follow next and the color it
/// is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` if the ray scatters, or `None` if it is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Normal plus a point on the unit sphere gives a cosine-weighted direction
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough (clamped to [0, 1])
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: if fuzz.is_nan() { 0.0 } else { fuzz.clamp(0.0, 1.0) },
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = ray_in.direction().reflect(rec.normal).normalize();
        let direction = (reflected + self.fuzz * random_unit_vector(rng)).normalize_or_zero();

        // Fuzz may push the ray below the surface; such rays are absorbed
        if direction.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, direction, ray_in.time()),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Refractive index in vacuum or air, or the ratio of the material's
    /// index over the index of the enclosing medium
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = ri * sin_theta > 1.0;

        let direction = if cannot_refract || Self::reflectance(cos_theta, ri) > gen_f64(rng) {
            unit_direction.reflect(rec.normal)
        } else {
            unit_direction.refract(rec.normal, ri)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A front-face hit at the origin on the y = 0 plane.
    fn floor_hit<'a>(ray: &Ray, material: &'a dyn Material) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, Vec3::Y, material)
    }

    fn incoming(direction: Vec3) -> Ray {
        Ray::new(Point3::ZERO - direction, direction, 0.25)
    }

    #[test]
    fn test_lambertian_always_scatters_into_hemisphere() {
        let material = Lambertian::new(Color::new(0.2, 0.4, 0.6));
        let ray = incoming(Vec3::new(0.3, -1.0, 0.0));
        let rec = floor_hit(&ray, &material);
        let mut rng = StdRng::seed_from_u64(10);

        for _ in 0..500 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.2, 0.4, 0.6));
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(result.scattered.origin(), rec.p);
            assert_eq!(result.scattered.time(), 0.25);
        }
    }

    #[test]
    fn test_metal_mirror_reflects_exactly() {
        let material = Metal::new(Color::splat(0.9), 0.0);
        let ray = incoming(Vec3::new(1.0, -1.0, 0.0));
        let rec = floor_hit(&ray, &material);
        let mut rng = StdRng::seed_from_u64(11);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-12);
        assert_eq!(result.attenuation, Color::splat(0.9));
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::ONE, f64::NAN).fuzz(), 0.0);
    }

    #[test]
    fn test_metal_grazing_fuzzy_rays_can_be_absorbed() {
        let material = Metal::new(Color::splat(0.5), 1.0);
        let ray = incoming(Vec3::new(1.0, -0.05, 0.0));
        let rec = floor_hit(&ray, &material);
        let mut rng = StdRng::seed_from_u64(12);

        let mut absorbed = 0;
        for _ in 0..500 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => {
                    assert!(result.scattered.direction().dot(rec.normal) > 0.0);
                    assert!((result.scattered.direction().length() - 1.0).abs() < 1e-9);
                    assert!(result.attenuation.cmple(Color::splat(0.5)).all());
                }
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_attenuation_is_exactly_one() {
        let material = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(13);

        for direction in [Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, -0.2, 0.3)] {
            let ray = incoming(direction);
            let rec = floor_hit(&ray, &material);
            for _ in 0..100 {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle: sin(theta) * 1.5 > 1
        let material = Dielectric::new(1.5);
        let ray = incoming(Vec3::new(1.0, 0.3, 0.0));
        // Back-face hit: the outward normal points along the ray
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, &material);
        assert!(!rec.front_face);
        let mut rng = StdRng::seed_from_u64(14);

        for _ in 0..50 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = ray.direction().normalize().reflect(rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-12);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let material = Dielectric::new(1.5);
        let ray = incoming(-Vec3::Y);
        let rec = floor_hit(&ray, &material);
        let mut rng = StdRng::seed_from_u64(15);

        let transmitted = (0..1000)
            .filter(|_| {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                result.scattered.direction().y < 0.0
            })
            .count();
        // Normal-incidence reflectance of glass is 4%
        assert!(transmitted > 900, "transmitted {}", transmitted);
    }

    #[test]
    fn test_schlick_reflectance() {
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-12);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-12);
        assert_eq!(Dielectric::reflectance(1.0, 1.0), 0.0);
    }
}
