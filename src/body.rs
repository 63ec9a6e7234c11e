/*
 * Body Module
 *
 * This module defines the Body struct, one textured sphere bouncing inside
 * the viewport, together with the shared sphere geometry and the
 * per-body material describing how its surface is drawn.
 *
 * Each step a body:
 * 1. Moves by its velocity (one unit step per frame)
 * 2. Reflects off the viewport edge it crossed and is clamped back inside
 * 3. Spins by a fixed cosmetic increment
 */

use std::path::PathBuf;
use std::rc::Rc;

use nannou::prelude::*;

use crate::bounds::ViewportBounds;
use crate::host::TextureId;
use crate::resources::ResourceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Repeat,
}

// Sphere shape shared by every body
#[derive(Debug)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub resource: ResourceId,
}

#[derive(Debug)]
pub struct Material {
    pub texture_path: PathBuf,
    pub texture: Option<TextureId>,
    pub texture_resource: Option<ResourceId>,
    pub fallback_color: Rgb<u8>,
    pub roughness: f32,
    pub metalness: f32,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub resource: ResourceId,
}

impl Material {
    // A material whose texture failed to load is drawn in its fallback colour
    pub fn is_fallback(&self) -> bool {
        self.texture.is_none()
    }
}

#[derive(Debug)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec2,
    pub rotation: Vec2, // x and y euler angles, cosmetic only
    pub geometry: Rc<SphereGeometry>,
    pub material: Material,
}

impl Body {
    pub fn radius(&self) -> f32 {
        self.geometry.radius
    }

    // Explicit Euler step, one frame per unit of time
    pub fn integrate(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
    }

    // Reflect off the viewport edges. Returns which axes flipped.
    pub fn reflect(&mut self, bounds: &ViewportBounds) -> (bool, bool) {
        let (max_x, max_y) = bounds.limits_for(self.radius());
        let flipped_x = reflect_axis(&mut self.position.x, &mut self.velocity.x, max_x);
        let flipped_y = reflect_axis(&mut self.position.y, &mut self.velocity.y, max_y);
        (flipped_x, flipped_y)
    }

    pub fn spin(&mut self, increment: Vec2) {
        self.rotation += increment;
    }

    pub fn is_inside(&self, bounds: &ViewportBounds) -> bool {
        let (max_x, max_y) = bounds.limits_for(self.radius());
        self.position.x.abs() <= max_x.max(0.0) && self.position.y.abs() <= max_y.max(0.0)
    }
}

// Flip the velocity component only when the position strictly exceeds the
// limit, then clamp unconditionally. A viewport narrower than the body pins
// it to the centre line.
fn reflect_axis(position: &mut f32, velocity: &mut f32, max: f32) -> bool {
    let max = max.max(0.0);
    if *position > max || *position < -max {
        *velocity = -*velocity;
        *position = position.clamp(-max, max);
        true
    } else {
        false
    }
}
