/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation state to be displayed in the debug panel.
 *
 * Includes:
 * - FPS (frames per second) and frame time
 * - Frames rendered by the current mount
 * - Lifecycle state, viewport bounds and surface size
 * - Position and velocity of every body
 */

use std::time::Duration;

use nannou::prelude::*;

use crate::bounds::ViewportBounds;
use crate::lifecycle::{LifecycleState, SpheresController};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDebug {
    pub position: Vec3,
    pub velocity: Vec2,
}

#[derive(Debug)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frames_rendered: u64,
    pub state: Option<LifecycleState>,
    pub bounds: Option<ViewportBounds>,
    pub surface_pixels: (u32, u32),
    pub reflections: usize,
    pub bodies: Vec<BodyDebug>,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            frames_rendered: 0,
            state: None,
            bounds: None,
            surface_pixels: (0, 0),
            reflections: 0,
            bodies: Vec::new(),
        }
    }
}

impl DebugInfo {
    // Copy the controller's current state, or clear it when nothing is mounted
    pub fn capture(&mut self, controller: Option<&SpheresController>) {
        let Some(controller) = controller else {
            self.state = None;
            self.bounds = None;
            self.bodies.clear();
            return;
        };

        self.state = Some(controller.state());
        self.bounds = controller.bounds();
        if let Some(surface) = controller.surface() {
            self.frames_rendered = surface.frames_drawn();
            self.surface_pixels = surface.size().device_pixels();
        }
        self.reflections = controller.reflections();

        self.bodies.clear();
        if let Some(registry) = controller.registry() {
            self.bodies.extend(registry.bodies().iter().map(|body| BodyDebug {
                position: body.position,
                velocity: body.velocity,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::host::HeadlessHost;

    #[test]
    fn capture_reflects_mounted_controller() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut controller = SpheresController::mount(&SceneConfig::default(), &mut host).unwrap();
        let handle = host.take_due_frame().unwrap();
        controller.on_frame(&mut host, handle);

        let mut info = DebugInfo::default();
        info.capture(Some(&controller));

        assert_eq!(info.state, Some(LifecycleState::Running));
        assert_eq!(info.frames_rendered, 1);
        assert_eq!(info.surface_pixels, (800, 600));
        assert_eq!(info.bodies.len(), 3);
        assert!(info.bounds.is_some());

        controller.unmount(&mut host);
        info.capture(Some(&controller));
        assert_eq!(info.state, Some(LifecycleState::Unmounted));
        assert_eq!(info.reflections, controller.reflections());
        assert!(info.bodies.is_empty());

        info.capture(None);
        assert_eq!(info.state, None);
    }

    #[test]
    fn repeated_capture_does_not_recount_reflections() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut controller = SpheresController::mount(&SceneConfig::default(), &mut host).unwrap();

        // Long enough for every body to hit an edge at least once
        for _ in 0..400 {
            let handle = host.take_due_frame().unwrap();
            controller.on_frame(&mut host, handle);
        }
        assert!(controller.reflections() > 0);

        let mut info = DebugInfo::default();
        info.capture(Some(&controller));
        let first = info.reflections;
        info.capture(Some(&controller));
        controller.unmount(&mut host);
        info.capture(Some(&controller));

        assert_eq!(first, controller.reflections());
        assert_eq!(info.reflections, first);
    }
}
