/*
 * Camera Module
 *
 * This module defines the PerspectiveCamera that looks down the -z axis at
 * the world origin. It owns the projection state the viewport bounds are
 * derived from and provides the coordinate transformations between world
 * space and screen space used when building a frame.
 */

use nannou::prelude::*;

use crate::bounds::ViewportBounds;
use crate::config::CameraConfig;

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    view_projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            fov_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
            position: vec3(0.0, 0.0, config.distance),
            view_projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    // Rebuild the cached view-projection matrix after a parameter change
    pub fn update_projection(&mut self) {
        let projection = Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        self.view_projection = projection * view;
    }

    // Distance from the camera to the z = 0 plane
    pub fn distance(&self) -> f32 {
        self.position.z.abs()
    }

    pub fn viewport_bounds(&self) -> Option<ViewportBounds> {
        ViewportBounds::from_projection(self.fov_degrees, self.distance(), self.aspect)
    }

    // Convert a world point to screen space (origin at the centre, y up, in points).
    // Points behind the camera have no screen position.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let depth = self.position.z - point.z;
        if depth <= 0.0 {
            return None;
        }
        let ndc = self.view_projection.project_point3(point);
        Some(vec2(ndc.x * viewport.x / 2.0, ndc.y * viewport.y / 2.0))
    }

    // Screen radius of a sphere of the given world radius at the given depth
    pub fn projected_radius(&self, radius: f32, depth: f32, viewport_height: f32) -> f32 {
        let half_height_at_depth = (self.fov_degrees / 2.0).to_radians().tan() * depth;
        radius / half_height_at_depth * viewport_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera(aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraConfig::default(), aspect)
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let camera = camera(800.0 / 600.0);
        let screen = camera.project(Vec3::ZERO, vec2(800.0, 600.0)).unwrap();
        assert_relative_eq!(screen.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(screen.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn bounds_corner_projects_to_viewport_corner() {
        let camera = camera(800.0 / 600.0);
        let bounds = camera.viewport_bounds().unwrap();
        let corner = vec3(bounds.half_width, bounds.half_height, 0.0);

        let screen = camera.project(corner, vec2(800.0, 600.0)).unwrap();
        assert_relative_eq!(screen.x, 400.0, epsilon = 1e-2);
        assert_relative_eq!(screen.y, 300.0, epsilon = 1e-2);
    }

    #[test]
    fn points_behind_camera_are_not_projected() {
        let camera = camera(1.0);
        assert!(camera.project(vec3(0.0, 0.0, 20.0), vec2(100.0, 100.0)).is_none());
    }

    #[test]
    fn projected_radius_scales_with_viewport_height() {
        let camera = camera(1.0);
        let bounds = camera.viewport_bounds().unwrap();
        // A sphere as tall as the visible half height fills half the viewport
        let radius = camera.projected_radius(bounds.half_height, camera.distance(), 600.0);
        assert_relative_eq!(radius, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn aspect_change_needs_projection_update() {
        let mut camera = camera(2.0);
        camera.set_aspect(1.0);
        camera.update_projection();
        let bounds = camera.viewport_bounds().unwrap();
        assert_relative_eq!(bounds.half_width, bounds.half_height, epsilon = 1e-6);
    }
}
