/*
 * Renderer Module
 *
 * This module owns the render surface: the camera, the two lights and the
 * drawing target sized to the host container. Each frame it turns the
 * current body states into a FrameSnapshot, a flat draw list the host can
 * paint, and paint() rasterises such a snapshot with nannou.
 *
 * Building a frame never touches physics state.
 */

use std::collections::HashMap;
use std::f32::consts::TAU;

use log::debug;
use nannou::prelude::*;
use nannou::wgpu;

use crate::body::{Body, WrapMode};
use crate::bounds::ViewportBounds;
use crate::camera::PerspectiveCamera;
use crate::config::{LightingConfig, SceneConfig};
use crate::host::{ContainerMetrics, TextureId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb<u8>,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb<u8>,
    pub intensity: f32,
    pub position: Vec3, // shines from here towards the origin
}

impl DirectionalLight {
    // Unit vector pointing from the origin towards the light
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

// Drawing target size: logical points and the capped device pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub logical: Vec2,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn device_pixels(&self) -> (u32, u32) {
        (
            (self.logical.x * self.pixel_ratio).round() as u32,
            (self.logical.y * self.pixel_ratio).round() as u32,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.logical.x / self.logical.y
    }
}

// Lighting applied uniformly to every sprite in a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLighting {
    pub ambient: f32,
    pub diffuse: f32,
    pub direction: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SphereSprite {
    pub center: Vec2,   // screen points, origin at the centre, y up
    pub radius: f32,    // screen points
    pub rotation: Vec2, // scrolls the texture
    pub texture: Option<TextureId>,
    pub fallback_color: Rgb<u8>,
    pub wrap: (WrapMode, WrapMode),
    pub segments: u32,
    pub roughness: f32,
    pub metalness: f32,
}

// Everything needed to draw one frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub size: SurfaceSize,
    pub background: Rgb<u8>,
    pub lighting: FrameLighting,
    pub sprites: Vec<SphereSprite>,
}

pub struct RenderSurface {
    camera: PerspectiveCamera,
    ambient: AmbientLight,
    directional: DirectionalLight,
    background: Rgb<u8>,
    max_pixel_ratio: f32,
    size: SurfaceSize,
    frames_drawn: u64,
}

impl RenderSurface {
    // Returns None for a container without area: there is no aspect ratio
    // to build a camera from.
    pub fn new(config: &SceneConfig, container: ContainerMetrics) -> Option<Self> {
        if !container.has_area() {
            return None;
        }

        let size = SurfaceSize {
            logical: container.size,
            pixel_ratio: container.pixel_ratio.min(config.max_pixel_ratio),
        };
        let [r, g, b] = config.background;

        Some(Self {
            camera: PerspectiveCamera::new(&config.camera, size.aspect()),
            ambient: ambient_light(&config.lighting),
            directional: directional_light(&config.lighting),
            background: rgb(r, g, b),
            max_pixel_ratio: config.max_pixel_ratio,
            size,
            frames_drawn: 0,
        })
    }

    // Re-read the container size, update the camera and the drawing target.
    // A zero-area container is ignored and the last valid state kept.
    pub fn resize(&mut self, container: ContainerMetrics) -> Option<ViewportBounds> {
        if !container.has_area() {
            debug!("Ignoring resize to {}x{}", container.size.x, container.size.y);
            return None;
        }

        self.size = SurfaceSize {
            logical: container.size,
            pixel_ratio: container.pixel_ratio.min(self.max_pixel_ratio),
        };
        self.camera.set_aspect(self.size.aspect());
        self.camera.update_projection();

        let bounds = self.camera.viewport_bounds();
        if let Some(bounds) = bounds {
            let (w, h) = self.size.device_pixels();
            debug!(
                "Resized to {}x{} px, bounds {:.3} x {:.3}",
                w, h, bounds.half_width, bounds.half_height
            );
        }
        bounds
    }

    // Bounds are derived from the camera, which only ever holds a valid aspect
    pub fn viewport_bounds(&self) -> Option<ViewportBounds> {
        self.camera.viewport_bounds()
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn directional(&self) -> &DirectionalLight {
        &self.directional
    }

    // Build the draw list for the current body states
    pub fn render_frame(&mut self, bodies: &[Body]) -> FrameSnapshot {
        self.frames_drawn += 1;

        let viewport = self.size.logical;
        let sprites = bodies
            .iter()
            .filter_map(|body| {
                let center = self.camera.project(body.position, viewport)?;
                let depth = self.camera.position.z - body.position.z;
                let material = &body.material;
                Some(SphereSprite {
                    center,
                    radius: self.camera.projected_radius(body.radius(), depth, viewport.y),
                    rotation: body.rotation,
                    texture: material.texture,
                    fallback_color: material.fallback_color,
                    wrap: (material.wrap_s, material.wrap_t),
                    segments: body.geometry.width_segments,
                    roughness: material.roughness,
                    metalness: material.metalness,
                })
            })
            .collect();

        FrameSnapshot {
            frame: self.frames_drawn,
            size: self.size,
            background: self.background,
            lighting: FrameLighting {
                ambient: self.ambient.intensity,
                diffuse: self.directional.intensity,
                direction: self.directional.direction(),
            },
            sprites,
        }
    }
}

fn ambient_light(config: &LightingConfig) -> AmbientLight {
    AmbientLight {
        color: rgb(255, 255, 255),
        intensity: config.ambient_intensity,
    }
}

fn directional_light(config: &LightingConfig) -> DirectionalLight {
    let [x, y, z] = config.directional_position;
    DirectionalLight {
        color: rgb(255, 255, 255),
        intensity: config.directional_intensity,
        position: vec3(x, y, z),
    }
}

// Rasterise a snapshot. Textured spheres are drawn as disks whose texture
// coordinates scroll with the body's rotation, then shaded by the lights.
pub fn paint(draw: &Draw, snapshot: &FrameSnapshot, textures: &HashMap<TextureId, wgpu::Texture>) {
    draw.background().color(snapshot.background);

    let repeat = draw.sampler(
        wgpu::SamplerBuilder::new()
            .address_mode(wgpu::AddressMode::Repeat)
            .into_descriptor(),
    );
    let lighting = snapshot.lighting;

    for sprite in &snapshot.sprites {
        let texture = sprite.texture.and_then(|id| textures.get(&id));
        let segments = sprite.segments.max(3);

        match texture {
            Some(texture) => {
                let target = if sprite.wrap == (WrapMode::Repeat, WrapMode::Repeat) { &repeat } else { draw };
                // One full turn of rotation scrolls the texture by its full width
                let offset = sprite.rotation / TAU;
                let points = (0..segments).map(|i| {
                    let angle = i as f32 / segments as f32 * TAU;
                    let unit = vec2(angle.cos(), angle.sin());
                    let point = sprite.center + unit * sprite.radius;
                    let tex_coords = vec2(0.5 + unit.x * 0.5 + offset.y, 0.5 - unit.y * 0.5 + offset.x);
                    (point, tex_coords)
                });
                target.polygon().points_textured(texture, points);
            }
            None => {
                draw.ellipse()
                    .xy(sprite.center)
                    .radius(sprite.radius)
                    .resolution(segments as f32)
                    .color(sprite.fallback_color);
            }
        }

        // Darken the whole disk by how little light reaches it, then add a
        // highlight on the side facing the directional light.
        let facing = lighting.direction.z.max(0.0);
        let lit = (lighting.ambient * 0.5 + lighting.diffuse * facing * 0.5).min(1.0);
        draw.ellipse()
            .xy(sprite.center)
            .radius(sprite.radius)
            .resolution(segments as f32)
            .color(rgba(0.0, 0.0, 0.0, (1.0 - lit) * 0.6));

        let highlight_offset = lighting.direction.truncate() * sprite.radius * 0.4;
        let shine = lighting.diffuse * (1.0 - sprite.roughness) * (1.0 - sprite.metalness * 0.5);
        draw.ellipse()
            .xy(sprite.center + highlight_offset)
            .radius(sprite.radius * 0.35)
            .color(rgba(1.0, 1.0, 1.0, (shine * 0.35).clamp(0.0, 1.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use crate::registry::BodyRegistry;
    use crate::resources::ResourceTracker;
    use approx::assert_relative_eq;

    fn surface(width: f32, height: f32, pixel_ratio: f32) -> RenderSurface {
        RenderSurface::new(&SceneConfig::default(), ContainerMetrics::new(width, height, pixel_ratio)).unwrap()
    }

    #[test]
    fn resize_twice_gives_identical_bounds() {
        let mut surface = surface(800.0, 600.0, 1.0);
        let first = surface.resize(ContainerMetrics::new(640.0, 480.0, 1.0)).unwrap();
        let second = surface.resize(ContainerMetrics::new(640.0, 480.0, 1.0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn halving_width_halves_half_width() {
        let mut surface = surface(800.0, 600.0, 1.0);
        let before = surface.viewport_bounds().unwrap();
        let after = surface.resize(ContainerMetrics::new(400.0, 600.0, 1.0)).unwrap();

        assert_relative_eq!(after.half_width, before.half_width / 2.0, epsilon = 1e-5);
        assert_eq!(after.half_height, before.half_height);
    }

    #[test]
    fn zero_area_resize_keeps_last_valid_state() {
        let mut surface = surface(800.0, 600.0, 1.0);
        let before = surface.viewport_bounds().unwrap();

        assert!(surface.resize(ContainerMetrics::new(0.0, 600.0, 1.0)).is_none());
        assert!(surface.resize(ContainerMetrics::new(800.0, 0.0, 1.0)).is_none());

        assert_eq!(surface.viewport_bounds().unwrap(), before);
        assert_eq!(surface.size().logical, vec2(800.0, 600.0));
    }

    #[test]
    fn zero_area_container_cannot_create_surface() {
        let container = ContainerMetrics::new(0.0, 0.0, 1.0);
        assert!(RenderSurface::new(&SceneConfig::default(), container).is_none());
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let surface = surface(800.0, 600.0, 3.0);
        assert_eq!(surface.size().pixel_ratio, 2.0);
        assert_eq!(surface.size().device_pixels(), (1600, 1200));

        let surface = self::surface(800.0, 600.0, 1.5);
        assert_eq!(surface.size().device_pixels(), (1200, 900));
    }

    #[test]
    fn render_frame_does_not_touch_bodies() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut resources = ResourceTracker::new();
        let registry = BodyRegistry::new(&SceneConfig::default(), &mut host, &mut resources);
        let mut surface = surface(800.0, 600.0, 1.0);

        let before: Vec<(Vec3, Vec2)> = registry.bodies().iter().map(|b| (b.position, b.velocity)).collect();
        let snapshot = surface.render_frame(registry.bodies());
        let after: Vec<(Vec3, Vec2)> = registry.bodies().iter().map(|b| (b.position, b.velocity)).collect();

        assert_eq!(before, after);
        assert_eq!(snapshot.sprites.len(), 3);
        assert_eq!(snapshot.frame, 1);
        assert_eq!(surface.frames_drawn(), 1);
    }

    #[test]
    fn sprites_are_projected_into_screen_space() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut resources = ResourceTracker::new();
        let registry = BodyRegistry::new(&SceneConfig::default(), &mut host, &mut resources);
        let mut surface = surface(800.0, 600.0, 1.0);
        let bounds = surface.viewport_bounds().unwrap();

        let snapshot = surface.render_frame(registry.bodies());

        // The middle body sits at (0, 1.5)
        let middle = &snapshot.sprites[1];
        assert_relative_eq!(middle.center.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(middle.center.y, 1.5 / bounds.half_height * 300.0, epsilon = 1e-2);
        assert_relative_eq!(middle.radius, 0.8 / bounds.half_height * 300.0, epsilon = 1e-2);
        assert_eq!(snapshot.background, rgb(0xfa, 0x80, 0x72));
    }

    #[test]
    fn lights_match_scene_defaults() {
        let surface = surface(800.0, 600.0, 1.0);
        assert_eq!(surface.ambient().intensity, 0.8);
        assert_eq!(surface.directional().intensity, 1.0);
        assert_relative_eq!(surface.directional().direction().length(), 1.0, epsilon = 1e-6);
    }
}
