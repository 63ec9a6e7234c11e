/*
 * Lifecycle Module
 *
 * This module defines the SpheresController that ties the render surface,
 * the body registry and the stepper to a host for the duration of one
 * mount:
 *
 * - mount: allocate the surface, attach its node, build the bodies, listen
 *   for resizes and schedule the first frame
 * - on_frame: one step, one draw, reschedule
 * - on_resize: recompute the surface and bounds before the next frame
 * - unmount: cancel the pending frame and release everything, once
 *
 * A controller never comes back from Unmounted. Mounting again builds a
 * fresh controller.
 */

use log::{debug, info, trace};

use crate::bounds::ViewportBounds;
use crate::config::SceneConfig;
use crate::host::{FrameHandle, Host, ListenerId};
use crate::physics::{self, StepReport};
use crate::registry::{release_logged, BodyRegistry};
use crate::renderer::RenderSurface;
use crate::resources::{ResourceId, ResourceKind, ResourceTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Initializing,
    Running,
    Unmounted,
}

// Resource ids owned by the render surface
struct SurfaceResources {
    render_target: ResourceId,
    output_node: ResourceId,
    camera: ResourceId,
    ambient_light: ResourceId,
    directional_light: ResourceId,
}

// Everything that lives between mount and unmount
struct Session {
    surface: RenderSurface,
    surface_resources: SurfaceResources,
    registry: BodyRegistry,
    bounds: ViewportBounds,
    listener: ListenerId,
    listener_resource: ResourceId,
    pending_frame: Option<FrameHandle>,
}

pub struct SpheresController {
    state: LifecycleState,
    session: Option<Session>,
    resources: ResourceTracker,
    last_step: StepReport,
    reflections: usize,
}

impl SpheresController {
    // Mount into the host. Without a container (or with one that has no
    // area yet) the whole lifecycle is skipped and nothing is allocated.
    pub fn mount<H: Host>(config: &SceneConfig, host: &mut H) -> Option<Self> {
        let Some(container) = host.container() else {
            info!("No container to mount into, skipping");
            return None;
        };
        let Some(surface) = RenderSurface::new(config, container) else {
            info!("Container has no area, skipping");
            return None;
        };
        let Some(bounds) = surface.viewport_bounds() else {
            info!("Camera gives no visible area, skipping");
            return None;
        };

        let mut controller = Self {
            state: LifecycleState::Initializing,
            session: None,
            resources: ResourceTracker::new(),
            last_step: StepReport::default(),
            reflections: 0,
        };
        info!("Lifecycle: {:?}", controller.state);

        let resources = &mut controller.resources;
        let (w, h) = surface.size().device_pixels();
        let surface_resources = SurfaceResources {
            render_target: resources.acquire(ResourceKind::RenderTarget, format!("render target {}x{}", w, h)),
            output_node: resources.acquire(ResourceKind::OutputNode, "output node"),
            camera: resources.acquire(ResourceKind::Camera, "perspective camera"),
            ambient_light: resources.acquire(ResourceKind::AmbientLight, "ambient light"),
            directional_light: resources.acquire(ResourceKind::DirectionalLight, "directional light"),
        };
        host.attach_node(surface_resources.output_node);

        let registry = BodyRegistry::new(config, host, resources);

        let listener = host.add_resize_listener();
        let listener_resource = resources.acquire(ResourceKind::ResizeListener, "resize listener");

        let pending_frame = Some(host.schedule_frame());

        controller.session = Some(Session {
            surface,
            surface_resources,
            registry,
            bounds,
            listener,
            listener_resource,
            pending_frame,
        });
        controller.state = LifecycleState::Running;

        info!(
            "Lifecycle: {:?} with {} bodies, bounds {:.3} x {:.3}",
            controller.state,
            controller.body_count(),
            bounds.half_width,
            bounds.half_height
        );
        Some(controller)
    }

    // Run one frame if the handle is the one we are waiting for. Stale or
    // cancelled handles, and frames after unmount, are no-ops.
    pub fn on_frame<H: Host>(&mut self, host: &mut H, handle: FrameHandle) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.pending_frame != Some(handle) {
            trace!("Ignoring stale frame {:?}", handle);
            return false;
        }
        session.pending_frame = None;

        let spin = session.registry.spin();
        self.last_step = physics::step_bodies(session.registry.bodies_mut(), &session.bounds, spin);
        self.reflections += self.last_step.reflections_x + self.last_step.reflections_y;

        let snapshot = session.surface.render_frame(session.registry.bodies());
        host.present(snapshot);

        session.pending_frame = Some(host.schedule_frame());
        true
    }

    // Resize listener. Bounds are current before the next frame steps.
    pub fn on_resize<H: Host>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(container) = host.container() else {
            return;
        };
        if let Some(bounds) = session.surface.resize(container) {
            session.bounds = bounds;
        }
    }

    // Tear everything down. Safe to call any number of times.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        let Some(session) = self.session.take() else {
            self.state = LifecycleState::Unmounted;
            return;
        };

        let Session {
            surface,
            surface_resources,
            registry,
            listener,
            listener_resource,
            pending_frame,
            ..
        } = session;

        if let Some(handle) = pending_frame {
            host.cancel_frame(handle);
        }

        host.remove_resize_listener(listener);
        release_logged(&mut self.resources, listener_resource);

        if !host.detach_node(surface_resources.output_node) {
            debug!("Output node was already detached");
        }
        release_logged(&mut self.resources, surface_resources.output_node);
        release_logged(&mut self.resources, surface_resources.render_target);
        release_logged(&mut self.resources, surface_resources.directional_light);
        release_logged(&mut self.resources, surface_resources.ambient_light);
        release_logged(&mut self.resources, surface_resources.camera);
        let frames = surface.frames_drawn();
        drop(surface);

        registry.dispose(host, &mut self.resources);

        self.state = LifecycleState::Unmounted;
        info!("Lifecycle: {:?} after {} frames", self.state, frames);
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn resources(&self) -> &ResourceTracker {
        &self.resources
    }

    pub fn bounds(&self) -> Option<ViewportBounds> {
        self.session.as_ref().map(|session| session.bounds)
    }

    pub fn registry(&self) -> Option<&BodyRegistry> {
        self.session.as_ref().map(|session| &session.registry)
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.session.as_ref().map(|session| &session.surface)
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.session.as_ref().and_then(|session| session.pending_frame)
    }

    pub fn body_count(&self) -> usize {
        self.registry().map_or(0, BodyRegistry::len)
    }

    pub fn last_step(&self) -> StepReport {
        self.last_step
    }

    // Edge reflections over every frame of this mount
    pub fn reflections(&self) -> usize {
        self.reflections
    }
}
