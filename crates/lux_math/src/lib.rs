//! Lux math: vectors, intervals, rays and bounding boxes.
//!
//! All geometry is double precision. `Vec3`, `Point3` and `Color` are the
//! same glam type used in three different roles.

// Re-export glam for convenience
pub use glam::DVec3;

/// 3-component double precision vector.
pub type Vec3 = DVec3;
/// A position in world space.
pub type Point3 = DVec3;
/// Linear RGB color, components nominally in [0, 1].
pub type Color = DVec3;

mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::Vec3Ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_color_is_vec3() {
        let c: Color = Color::new(0.5, 0.7, 1.0);
        let p: Point3 = c;
        assert_eq!(p.y, 0.7);
    }
}
