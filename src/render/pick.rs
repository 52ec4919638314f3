//! Ray picking against proxy bounding spheres.

use crate::render::proxy::{ProxyHandle, ProxyRegistry};
use glam::Vec3;

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray starting at `origin` and passing through `target`.
    pub fn through(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along the ray to the nearest intersection in front of the
/// origin, if any.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray.origin - center;
    let b = to_origin.dot(ray.direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if far < 0.0 {
        None
    } else if near >= 0.0 {
        Some(near)
    } else {
        Some(far)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub handle: ProxyHandle,
    pub distance: f32,
    pub point: Vec3,
}

/// Closest proxy hit by `ray`.
pub fn pick_proxy(registry: &ProxyRegistry, ray: &Ray) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;
    for node in registry.iter() {
        let Some(distance) =
            intersect_sphere(ray, node.transform.translation, node.pick_radius())
        else {
            continue;
        };
        if closest.map_or(true, |hit| distance < hit.distance) {
            closest = Some(PickHit {
                handle: node.handle,
                distance,
                point: ray.point_at(distance),
            });
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::render::geometry::{GeometryDescriptor, MaterialDescriptor};
    use crate::scene::GeometryKind;

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let t = intersect_sphere(&ray, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_sphere(&miss, Vec3::ZERO, 1.0).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_sphere(&behind, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_sphere(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn picks_the_closest_proxy() {
        let material = MaterialDescriptor::for_centerpiece(&SceneConfig::default().day);
        let geometry = GeometryDescriptor::for_object(GeometryKind::Sphere);
        let mut registry = ProxyRegistry::new();
        let far = registry.insert_object("far", geometry.clone(), material.clone());
        let near = registry.insert_object("near", geometry, material);
        registry
            .get_mut(far)
            .unwrap()
            .set_position(Vec3::new(0.0, 0.0, -3.0));
        registry
            .get_mut(near)
            .unwrap()
            .set_position(Vec3::new(0.0, 0.0, 1.0));

        let ray = Ray::through(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let hit = pick_proxy(&registry, &ray).unwrap();
        assert_eq!(hit.handle, near);
        assert!((hit.point.z - 1.5).abs() < 1e-4);

        let empty = Ray::through(Vec3::new(5.0, 5.0, 10.0), Vec3::new(5.0, 5.0, 0.0));
        assert!(pick_proxy(&registry, &empty).is_none());
    }
}
