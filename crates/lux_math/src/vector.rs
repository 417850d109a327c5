// Vector utilities for DVec3
//
// Extends glam::DVec3 with the reflection and refraction helpers used by the
// scattering models.

use glam::DVec3;

/// Extension trait for DVec3 with ray tracing helpers.
pub trait Vec3Ext {
    /// True if every component is within 1e-8 of zero.
    fn near_zero(&self) -> bool;

    /// Mirror this vector about the (unit) normal `n`: v - 2(v·n)n.
    fn reflect(&self, n: DVec3) -> DVec3;

    /// Refract this unit vector through a surface with unit normal `n`.
    ///
    /// `etai_over_etat` is the ratio of refractive indices across the boundary.
    fn refract(&self, n: DVec3, etai_over_etat: f64) -> DVec3;
}

impl Vec3Ext for DVec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const S: f64 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }

    #[inline]
    fn reflect(&self, n: DVec3) -> DVec3 {
        *self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract(&self, n: DVec3, etai_over_etat: f64) -> DVec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
