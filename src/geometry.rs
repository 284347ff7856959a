use glam::Vec3;

use crate::scene::Material;

/// A half-line used for picking. `direction` does not have to be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point reached after travelling `t` times `direction`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Discriminant of the primitive a hit came from. Values match the shader side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PrimitiveType {
    Sphere = 0,
    Plane = 1,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub has_hit: bool,
    pub t: f32,
    pub material: Material,
    /// Sphere hits: hit point relative to the sphere center, not normalized.
    /// Plane hits: the plane's stored normal.
    pub surface_normal: Vec3,
    pub primitive_index: usize,
    pub primitive_type: PrimitiveType,
}

impl HitRecord {
    /// Fresh "nothing was hit" record. Its type/index pair is what a failed
    /// pick writes into the selection cursor.
    pub fn miss() -> Self {
        Self {
            has_hit: false,
            t: f32::INFINITY,
            material: Material::null(),
            surface_normal: Vec3::ZERO,
            primitive_index: 0,
            primitive_type: PrimitiveType::Sphere,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_at_scales_unnormalized_direction() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(ray.at(1.5), Vec3::new(1.0, 3.0, 0.0));
        assert_eq!(ray.at(0.0), ray.origin);
    }

    #[test]
    fn miss_is_infinitely_far() {
        let miss = HitRecord::miss();
        assert!(!miss.has_hit);
        assert!(miss.t.is_infinite() && miss.t > 0.0);
        assert_eq!(miss.primitive_type, PrimitiveType::Sphere);
        assert_eq!(miss.primitive_index, 0);
    }
}
