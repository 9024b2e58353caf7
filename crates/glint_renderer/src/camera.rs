//! Pinhole camera for primary ray generation.
//!
//! The camera looks down its local -Z axis. `orientation` maps camera space
//! to world space; its columns are the camera's right, up and back vectors.

use glint_math::{Mat3, Ray, Vec2, Vec3};

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    pub position: Vec3,
    pub orientation: Mat3,

    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            position: Vec3::ZERO,
            orientation: Mat3::IDENTITY,
            vfov: 60.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set camera orientation (camera-to-world rotation).
    pub fn with_orientation(mut self, orientation: Mat3) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Distance from the pinhole to the image plane, in pixels.
    pub fn focal_length(&self) -> f32 {
        let half = (self.vfov.to_radians() / 2.0).tan();
        (self.image_height as f32 / 2.0) / half
    }

    /// World-space unit direction through screen position (x, y).
    ///
    /// `x` and `y` are in pixels with (0, 0) at the top-left corner; integer
    /// pixel `(i, j)` is centred at `(i + 0.5, j + 0.5)`.
    pub fn ray_direction(&self, x: f32, y: f32) -> Vec3 {
        let local = Vec3::new(
            x - self.image_width as f32 / 2.0,
            -(y - self.image_height as f32 / 2.0),
            -self.focal_length(),
        );
        (self.orientation * local).normalize()
    }

    /// Camera ray through screen position (x, y).
    pub fn get_ray(&self, x: f32, y: f32) -> Ray {
        Ray::new(self.position, self.ray_direction(x, y))
    }

    /// Camera ray through the centre of pixel (i, j) shifted by `offset` pixels.
    pub fn pixel_ray(&self, i: u32, j: u32, offset: Vec2) -> Ray {
        self.get_ray(i as f32 + 0.5 + offset.x, j as f32 + 0.5 + offset.y)
    }

    /// Project a world point to screen coordinates, or `None` if it is
    /// behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let local = self.orientation.transpose() * (point - self.position);
        if local.z >= 0.0 {
            return None;
        }
        let scale = self.focal_length() / -local.z;
        Some(Vec2::new(
            local.x * scale + self.image_width as f32 / 2.0,
            -local.y * scale + self.image_height as f32 / 2.0,
        ))
    }

    /// Tilt about the camera's own X axis by `degrees`.
    pub fn rotate_x(&mut self, degrees: f32) {
        self.orientation *= Mat3::from_rotation_x(degrees.to_radians());
    }

    /// Pan about the world Y axis by `degrees`.
    pub fn rotate_y(&mut self, degrees: f32) {
        self.orientation = Mat3::from_rotation_y(degrees.to_radians()) * self.orientation;
    }

    /// Turn the camera to face `target`, keeping world +Y up.
    pub fn look_at(&mut self, target: Vec3) {
        let back = (self.position - target).normalize_or_zero();
        if back == Vec3::ZERO {
            return;
        }
        let mut right = Vec3::Y.cross(back);
        if right.length_squared() < 1e-12 {
            // Looking straight up or down
            right = Vec3::X;
        }
        let right = right.normalize();
        let up = back.cross(right);
        self.orientation = Mat3::from_cols(right, up, back);
    }

    /// Orbit the camera about the world Y axis through `target` by
    /// `degrees`, then look at `target`.
    pub fn orbit(&mut self, target: Vec3, degrees: f32) {
        let rotation = Mat3::from_rotation_y(degrees.to_radians());
        self.position = target + rotation * (self.position - target);
        self.look_at(target);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new().with_resolution(100, 100).with_vfov(90.0)
    }

    #[test]
    fn test_centre_ray_points_down_negative_z() {
        let cam = camera();
        let dir = cam.ray_direction(50.0, 50.0);
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_axes() {
        let cam = camera();
        // Right of centre points +X, below centre points -Y
        assert!(cam.ray_direction(90.0, 50.0).x > 0.0);
        assert!(cam.ray_direction(50.0, 90.0).y < 0.0);
        // 90 degree vfov: top edge is 45 degrees up
        let top = cam.ray_direction(50.0, 0.0);
        assert!((top.y - (-top.z)).abs() < 1e-5);
    }

    #[test]
    fn test_project_inverts_ray() {
        let cam = camera()
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_orientation(Mat3::from_rotation_y(0.3));
        let ray = cam.get_ray(20.0, 70.0);
        let screen = cam.project(ray.at(5.0)).unwrap();
        assert!((screen - Vec2::new(20.0, 70.0)).length() < 1e-3);
        assert!(cam.project(ray.at(-5.0)).is_none());
    }

    #[test]
    fn test_look_at() {
        let mut cam = camera().with_position(Vec3::new(0.0, 0.0, 5.0));
        cam.look_at(Vec3::new(5.0, 0.0, 5.0));
        let dir = cam.ray_direction(50.0, 50.0);
        assert!((dir - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_orbit_keeps_distance_and_target() {
        let mut cam = camera().with_position(Vec3::new(0.0, 1.0, 4.0));
        cam.orbit(Vec3::ZERO, 90.0);
        assert!((cam.position - Vec3::new(4.0, 1.0, 0.0)).length() < 1e-5);
        let dir = cam.ray_direction(50.0, 50.0);
        let to_target = (Vec3::ZERO - cam.position).normalize();
        assert!((dir - to_target).length() < 1e-5);
    }

    #[test]
    fn test_rotate_y() {
        let mut cam = camera();
        cam.rotate_y(90.0);
        // Rotating -Z by +90 degrees about Y gives -X
        let dir = cam.ray_direction(50.0, 50.0);
        assert!((dir - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_rotate_x_tilts_up() {
        let mut cam = camera();
        cam.rotate_x(90.0);
        let dir = cam.ray_direction(50.0, 50.0);
        assert!((dir - Vec3::Y).length() < 1e-5);
    }
}
