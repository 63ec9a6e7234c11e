/*
 * Body Registry Module
 *
 * Builds the fixed set of bodies once per mount and releases their
 * resources at teardown. Bodies share one sphere geometry and each owns its
 * material. Nothing is added or removed in between.
 */

use std::rc::Rc;

use log::{debug, warn};
use nannou::prelude::*;

use crate::body::{Body, Material, SphereGeometry, WrapMode};
use crate::config::SceneConfig;
use crate::host::Host;
use crate::resources::{ResourceId, ResourceKind, ResourceTracker};

pub struct BodyRegistry {
    bodies: Vec<Body>,
    geometry: Rc<SphereGeometry>,
    spin: Vec2,
}

impl BodyRegistry {
    // Bodies are spread along x at (index - centre) * spacing, odd ones
    // raised by the stagger, all on the z = 0 plane.
    pub fn new<H: Host>(config: &SceneConfig, host: &mut H, resources: &mut ResourceTracker) -> Self {
        let sphere = &config.sphere;
        let geometry = Rc::new(SphereGeometry {
            radius: sphere.radius,
            width_segments: sphere.width_segments,
            height_segments: sphere.height_segments,
            resource: resources.acquire(ResourceKind::Geometry, "sphere geometry"),
        });

        let center = config.center_index();
        let wrap = (WrapMode::Repeat, WrapMode::Repeat);

        let bodies = config
            .bodies
            .iter()
            .enumerate()
            .map(|(index, body)| {
                let x = (index as f32 - center) * sphere.spacing;
                let y = (index % 2) as f32 * sphere.stagger;

                let (texture, texture_resource) = match host.load_texture(&body.texture, wrap) {
                    Ok(id) => {
                        let label = format!("texture {}", body.texture.display());
                        (Some(id), Some(resources.acquire(ResourceKind::Texture, label)))
                    }
                    Err(err) => {
                        warn!("{}; body {} falls back to a flat colour", err, index);
                        (None, None)
                    }
                };

                let [r, g, b] = body.fallback_color;
                let material = Material {
                    texture_path: body.texture.clone(),
                    texture,
                    texture_resource,
                    fallback_color: rgb(r, g, b),
                    roughness: sphere.roughness,
                    metalness: sphere.metalness,
                    wrap_s: wrap.0,
                    wrap_t: wrap.1,
                    resource: resources.acquire(ResourceKind::Material, format!("material {}", index)),
                };

                Body {
                    position: vec3(x, y, 0.0),
                    velocity: vec2(body.velocity[0], body.velocity[1]),
                    rotation: Vec2::ZERO,
                    geometry: Rc::clone(&geometry),
                    material,
                }
            })
            .collect::<Vec<_>>();

        debug!("Created {} bodies", bodies.len());

        Self {
            bodies,
            geometry,
            spin: vec2(sphere.spin[0], sphere.spin[1]),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn geometry(&self) -> &Rc<SphereGeometry> {
        &self.geometry
    }

    pub fn spin(&self) -> Vec2 {
        self.spin
    }

    // Release every material and texture, then the shared geometry once the
    // last body holding it is gone.
    pub fn dispose<H: Host>(self, host: &mut H, resources: &mut ResourceTracker) {
        let Self { bodies, geometry, .. } = self;

        for body in bodies {
            let material = body.material;
            if let Some(texture) = material.texture {
                host.release_texture(texture);
            }
            if let Some(id) = material.texture_resource {
                release_logged(resources, id);
            }
            release_logged(resources, material.resource);
        }

        match Rc::try_unwrap(geometry) {
            Ok(geometry) => release_logged(resources, geometry.resource),
            Err(shared) => warn!("Sphere geometry still shared by {} holders", Rc::strong_count(&shared) - 1),
        }
    }
}

pub(crate) fn release_logged(resources: &mut ResourceTracker, id: ResourceId) {
    if let Err(err) = resources.release(id) {
        warn!("{}", err);
    }
}
