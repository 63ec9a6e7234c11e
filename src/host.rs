/*
 * Host Module
 *
 * This module defines the Host trait: everything the spheres need from the
 * environment they are mounted into. A container to attach the draw
 * surface to, a resize notification source, a display-refresh scheduling
 * primitive, texture loading and a place to present finished frames.
 *
 * The nannou window implements it in the app module. HeadlessHost
 * implements it in memory for tests and benchmarks.
 */

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use nannou::prelude::*;

use crate::body::WrapMode;
use crate::error::{Result, SpheresError};
use crate::renderer::FrameSnapshot;
use crate::resources::ResourceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub u64);

// Measured size of the host container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerMetrics {
    pub size: Vec2,       // logical points
    pub pixel_ratio: f32, // device pixels per point
}

impl ContainerMetrics {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self { size: vec2(width, height), pixel_ratio }
    }

    pub fn has_area(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }
}

pub trait Host {
    // None when there is no container to mount into
    fn container(&self) -> Option<ContainerMetrics>;

    fn attach_node(&mut self, node: ResourceId);

    // Returns whether the node was attached to the container
    fn detach_node(&mut self, node: ResourceId) -> bool;

    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, id: ListenerId);

    // Request one callback on the next display refresh
    fn schedule_frame(&mut self) -> FrameHandle;

    // A cancelled handle never fires
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn load_texture(&mut self, path: &Path, wrap: (WrapMode, WrapMode)) -> Result<TextureId>;

    fn release_texture(&mut self, id: TextureId);

    fn present(&mut self, frame: FrameSnapshot);
}

// In-memory host. Frames fire only when the caller takes them with
// take_due_frame, which stands in for the display refresh.
#[derive(Debug)]
pub struct HeadlessHost {
    container: Option<ContainerMetrics>,
    next_id: u64,
    attached: BTreeSet<ResourceId>,
    listeners: BTreeSet<ListenerId>,
    pending_frame: Option<FrameHandle>,
    cancelled_frames: usize,
    textures: BTreeSet<TextureId>,
    failing_textures: Vec<PathBuf>,
    presented: usize,
    last_frame: Option<FrameSnapshot>,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_container(Some(ContainerMetrics::new(width, height, 1.0)))
    }

    // A host with no container to mount into
    pub fn absent() -> Self {
        Self::with_container(None)
    }

    fn with_container(container: Option<ContainerMetrics>) -> Self {
        Self {
            container,
            next_id: 0,
            attached: BTreeSet::new(),
            listeners: BTreeSet::new(),
            pending_frame: None,
            cancelled_frames: 0,
            textures: BTreeSet::new(),
            failing_textures: Vec::new(),
            presented: 0,
            last_frame: None,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        if let Some(container) = self.container.as_mut() {
            container.pixel_ratio = pixel_ratio;
        }
        self
    }

    // Make loading the texture at this path fail
    pub fn fail_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_textures.push(path.into());
        self
    }

    pub fn resize_container(&mut self, width: f32, height: f32) {
        if let Some(container) = self.container.as_mut() {
            container.size = vec2(width, height);
        }
    }

    // Fire the pending frame, if any
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn cancelled_frames(&self) -> usize {
        self.cancelled_frames
    }

    pub fn attached_nodes(&self) -> usize {
        self.attached.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn presented_frames(&self) -> usize {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.last_frame.as_ref()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for HeadlessHost {
    fn container(&self) -> Option<ContainerMetrics> {
        self.container
    }

    fn attach_node(&mut self, node: ResourceId) {
        self.attached.insert(node);
    }

    fn detach_node(&mut self, node: ResourceId) -> bool {
        self.attached.remove(&node)
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next());
        self.pending_frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
            self.cancelled_frames += 1;
        }
    }

    fn load_texture(&mut self, path: &Path, _wrap: (WrapMode, WrapMode)) -> Result<TextureId> {
        if self.failing_textures.iter().any(|failing| failing == path) {
            return Err(SpheresError::TextureLoad {
                path: path.to_path_buf(),
                reason: "no such image".to_string(),
            });
        }
        let id = TextureId(self.next());
        self.textures.insert(id);
        Ok(id)
    }

    fn release_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
    }

    fn present(&mut self, frame: FrameSnapshot) {
        self.presented += 1;
        self.last_frame = Some(frame);
    }
}
