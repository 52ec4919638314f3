use crate::interaction::{InteractionArbiter, InteractionMode};
use crate::render::pick::Ray;
use glam::{Vec2, Vec3};

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 200.0;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Orbit camera around a target point. Navigation input is accepted only
/// while the interaction arbiter grants it.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub sensitivity: f32,
    orbiting: bool,
}

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            target,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov_y_deg: 50.0,
            aspect: 16.0 / 9.0,
            sensitivity: 0.005,
            orbiting: false,
        }
    }

    /// Places the camera looking at `target` from `eye`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let (yaw, pitch) = forward_to_yaw_pitch(target - eye);
        Self::new(target, (target - eye).length(), yaw, pitch)
    }

    pub fn from_bounds(center: Vec3, extent: Vec3) -> Self {
        let radius = extent.max_element();
        let distance = if radius > 0.0 { radius * 3.0 } else { 3.0 };
        let eye = center + Vec3::new(distance, distance * 0.4, distance);
        Self::looking_at(eye, center)
    }

    pub fn with_fov(mut self, fov_y_deg: f32) -> Self {
        self.fov_y_deg = fov_y_deg;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn eye(&self) -> Vec3 {
        let (forward, _, _) = self.basis();
        self.target - forward * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        self.basis().0
    }

    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        camera_basis(self.yaw, self.pitch)
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    /// Starts a navigation gesture. Refused while an object drag holds the
    /// arbiter.
    pub fn begin_orbit(&mut self, arbiter: &mut InteractionArbiter) -> bool {
        if self.orbiting {
            return true;
        }
        self.orbiting = arbiter.try_acquire(InteractionMode::CameraNav);
        self.orbiting
    }

    pub fn orbit(&mut self, delta: Vec2, arbiter: &InteractionArbiter) -> bool {
        if !self.orbiting || !arbiter.navigation_enabled() {
            return false;
        }
        self.yaw += delta.x * self.sensitivity;
        self.pitch += delta.y * self.sensitivity;
        wrap_yaw(&mut self.yaw);
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        true
    }

    pub fn end_orbit(&mut self, arbiter: &mut InteractionArbiter) {
        if self.orbiting {
            arbiter.release(InteractionMode::CameraNav);
            self.orbiting = false;
        }
    }

    pub fn zoom(&mut self, delta: f32, arbiter: &InteractionArbiter) -> bool {
        if !arbiter.navigation_enabled() {
            return false;
        }
        self.distance = (self.distance - delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
        true
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (x right, y up, both in -1..=1).
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let (forward, right, up) = self.basis();
        let tan_half = (self.fov_y_deg.to_radians() * 0.5).tan();
        let direction =
            forward + right * (ndc.x * tan_half * self.aspect) + up * (ndc.y * tan_half);
        Ray::new(self.eye(), direction)
    }

    /// Inverse of `ray_through_ndc`. `None` for points behind the eye.
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec2> {
        let (forward, right, up) = self.basis();
        let offset = point - self.eye();
        let depth = offset.dot(forward);
        if depth <= 1e-6 {
            return None;
        }
        let tan_half = (self.fov_y_deg.to_radians() * 0.5).tan();
        Some(Vec2::new(
            offset.dot(right) / (depth * tan_half * self.aspect),
            offset.dot(up) / (depth * tan_half),
        ))
    }

    /// Camera-space depth of a world point along the view direction.
    pub fn view_depth(&self, point: Vec3) -> f32 {
        (point - self.eye()).dot(self.forward())
    }

    /// Where `ray` crosses the view-aligned plane at `depth`. `None` when the
    /// ray runs parallel to that plane.
    pub fn point_at_depth(&self, ray: &Ray, depth: f32) -> Option<Vec3> {
        let forward = self.forward();
        let denom = ray.direction.dot(forward);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (depth - (ray.origin - self.eye()).dot(forward)) / denom;
        Some(ray.point_at(t))
    }
}

fn forward_to_yaw_pitch(forward: Vec3) -> (f32, f32) {
    let n = forward.try_normalize().unwrap_or(Vec3::NEG_Z);
    let yaw = n.z.atan2(n.x);
    let pitch = n.y.clamp(-1.0, 1.0).asin();
    (yaw, pitch)
}

fn camera_basis(yaw: f32, pitch: f32) -> (Vec3, Vec3, Vec3) {
    let cos_pitch = pitch.cos();
    let forward = Vec3::new(yaw.cos() * cos_pitch, pitch.sin(), yaw.sin() * cos_pitch);
    let right = Vec3::new(-yaw.sin(), 0.0, yaw.cos());
    let up = right.cross(forward).normalize_or_zero();
    (forward, right, up)
}

fn wrap_yaw(yaw: &mut f32) {
    const TWO_PI: f32 = std::f32::consts::PI * 2.0;
    if yaw.is_finite() {
        *yaw = (*yaw + std::f32::consts::PI).rem_euclid(TWO_PI) - std::f32::consts::PI;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::proxy::ProxyHandle;

    fn front_camera() -> OrbitCamera {
        OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
    }

    #[test]
    fn from_bounds_produces_finite_state() {
        let camera = OrbitCamera::from_bounds(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert!(camera.eye().is_finite());
        assert!(camera.yaw.is_finite());
        assert!(camera.pitch.is_finite());
    }

    #[test]
    fn looking_at_recovers_eye() {
        let camera = front_camera();
        assert!((camera.eye() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn view_depth_and_point_at_depth_agree() {
        let camera = front_camera();
        let point = Vec3::new(1.0, -0.5, 2.0);
        let depth = camera.view_depth(point);
        assert!((depth - 8.0).abs() < 1e-4);

        let ray = Ray::through(camera.eye(), point);
        let back = camera.point_at_depth(&ray, depth).unwrap();
        assert!((back - point).length() < 1e-4);
    }

    #[test]
    fn center_ray_points_forward() {
        let camera = front_camera();
        let ray = camera.ray_through_ndc(Vec2::ZERO);
        assert!((ray.direction - camera.forward()).length() < 1e-5);
    }

    #[test]
    fn projection_inverts_ray_through_ndc() {
        let camera = OrbitCamera::from_bounds(Vec3::ZERO, Vec3::splat(2.0));
        let point = Vec3::new(0.5, -0.25, 1.0);
        let ndc = camera.world_to_ndc(point).unwrap();
        let ray = camera.ray_through_ndc(ndc);
        let back = camera.point_at_depth(&ray, camera.view_depth(point)).unwrap();
        assert!((back - point).length() < 1e-4);

        assert!(camera.world_to_ndc(camera.eye() - camera.forward()).is_none());
    }

    #[test]
    fn orbit_requires_navigation_grant() {
        let mut arbiter = InteractionArbiter::default();
        let mut camera = front_camera();
        let yaw = camera.yaw;

        assert!(!camera.orbit(Vec2::new(100.0, 0.0), &arbiter));

        assert!(arbiter.try_acquire(InteractionMode::ObjectDrag(ProxyHandle::test(1))));
        assert!(!camera.begin_orbit(&mut arbiter));
        arbiter.release(InteractionMode::ObjectDrag(ProxyHandle::test(1)));

        assert!(camera.begin_orbit(&mut arbiter));
        assert!(camera.orbit(Vec2::new(100.0, 0.0), &arbiter));
        assert!(camera.yaw != yaw);
        camera.end_orbit(&mut arbiter);
        assert!(!camera.is_orbiting());
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut arbiter = InteractionArbiter::default();
        let mut camera = front_camera();
        camera.begin_orbit(&mut arbiter);
        camera.orbit(Vec2::new(0.0, 1.0e6), &arbiter);
        assert!(camera.pitch <= PITCH_LIMIT);
        assert!(camera.eye().is_finite());
    }
}
