/*
 * Application Module
 *
 * This module defines the nannou application that hosts the spheres. The
 * window plays the container, its resized event is the resize notification
 * source and nannou's per-refresh update is the frame scheduling primitive:
 * a scheduled frame fires on the next update unless it was cancelled.
 *
 * Closing the window or exiting the app unmounts the spheres.
 */

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use log::{debug, error, info, warn};
use nannou::prelude::*;
use nannou::wgpu;
use nannou_egui::Egui;

use crate::body::WrapMode;
use crate::config::SceneConfig;
use crate::debug::DebugInfo;
use crate::error::{Result, SpheresError};
use crate::host::{ContainerMetrics, FrameHandle, Host, ListenerId, TextureId};
use crate::input;
use crate::lifecycle::SpheresController;
use crate::renderer::{self, FrameSnapshot};
use crate::resources::ResourceId;
use crate::ui;

// Scene handed over from main before nannou builds the model
static SCENE: OnceLock<SceneConfig> = OnceLock::new();

// Window-side state behind the Host trait
#[derive(Default)]
pub struct HostState {
    window: Option<WindowId>,
    attached: Option<ResourceId>,
    listener: Option<ListenerId>,
    next_id: u64,
    pending_frame: Option<FrameHandle>,
    textures: HashMap<TextureId, wgpu::Texture>,
    snapshot: Option<FrameSnapshot>,
}

impl HostState {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }
}

// Borrowed view of the app and host state implementing Host
struct NannouHost<'a> {
    app: &'a App,
    state: &'a mut HostState,
}

impl Host for NannouHost<'_> {
    fn container(&self) -> Option<ContainerMetrics> {
        let window = self.app.window(self.state.window?)?;
        let (width, height) = window.inner_size_points();
        Some(ContainerMetrics::new(width, height, window.scale_factor()))
    }

    fn attach_node(&mut self, node: ResourceId) {
        self.state.attached = Some(node);
    }

    fn detach_node(&mut self, node: ResourceId) -> bool {
        if self.state.attached == Some(node) {
            self.state.attached = None;
            self.state.snapshot = None;
            true
        } else {
            false
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.state.next());
        self.state.listener = Some(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        if self.state.listener == Some(id) {
            self.state.listener = None;
        }
    }

    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.state.next());
        self.state.pending_frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.state.pending_frame == Some(handle) {
            self.state.pending_frame = None;
        }
    }

    fn load_texture(&mut self, path: &Path, _wrap: (WrapMode, WrapMode)) -> Result<TextureId> {
        // Wrapping is a sampler setting, applied when the frame is painted
        let texture = wgpu::Texture::from_path(self.app, path).map_err(|err| SpheresError::TextureLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let id = TextureId(self.state.next());
        self.state.textures.insert(id, texture);
        debug!("Loaded texture {}", path.display());
        Ok(id)
    }

    fn release_texture(&mut self, id: TextureId) {
        self.state.textures.remove(&id);
    }

    fn present(&mut self, frame: FrameSnapshot) {
        if self.state.attached.is_some() {
            self.state.snapshot = Some(frame);
        }
    }
}

// Main model for the application
pub struct Model {
    pub host: HostState,
    pub spheres: Option<SpheresController>,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
    pub background: Rgb<u8>,
}

impl Model {
    // Split borrow: the controller and a host view over the rest of the model
    fn with_spheres<F>(&mut self, app: &App, f: F)
    where
        F: FnOnce(&mut SpheresController, &mut NannouHost<'_>),
    {
        if let Some(spheres) = self.spheres.as_mut() {
            let mut host = NannouHost { app, state: &mut self.host };
            f(spheres, &mut host);
        }
    }

    pub fn unmount(&mut self, app: &App) {
        self.with_spheres(app, |spheres, host| spheres.unmount(host));
    }
}

// Run the app with the given scene
pub fn run(scene: SceneConfig) {
    if SCENE.set(scene).is_err() {
        error!("Scene was already set, keeping the first one");
    }
    nannou::app(model).update(update).exit(exit).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let mut scene = SCENE.get_or_init(SceneConfig::default).clone();

    // Whatever is still relative comes from the bundled assets folder
    match app.assets_path() {
        Ok(assets) => scene.resolve_textures(&assets),
        Err(err) => warn!("No assets folder found, loading textures from the working directory: {:?}", err),
    }

    // Create the main window
    let window_id = app
        .new_window()
        .title(&scene.window.title)
        .size(scene.window.width, scene.window.height)
        .view(view)
        .resized(resized)
        .key_pressed(input::key_pressed)
        .closed(closed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    // Get the window
    let window = app.window(window_id).expect("Window was just created");

    // Create the UI
    let egui = Egui::from_window(&window);
    drop(window);

    let mut host = HostState {
        window: Some(window_id),
        ..HostState::default()
    };

    let spheres = SpheresController::mount(&scene, &mut NannouHost { app, state: &mut host });
    if spheres.is_none() {
        info!("Spheres were not mounted");
    }

    let [r, g, b] = scene.background;
    Model {
        host,
        spheres,
        egui,
        debug_info: DebugInfo::default(),
        show_debug: scene.show_debug,
        background: rgb(r, g, b),
    }
}

// Update the model, once per display refresh
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Fire the scheduled frame, if it is still pending
    if let Some(handle) = model.host.take_due_frame() {
        model.with_spheres(app, |spheres, host| {
            spheres.on_frame(host, handle);
        });
        model.debug_info.capture(model.spheres.as_ref());
    }

    model.egui.set_elapsed_time(update.since_start);
    if model.show_debug {
        ui::update_ui(&mut model.egui, &model.debug_info);
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    match &model.host.snapshot {
        Some(snapshot) => renderer::paint(&draw, snapshot, &model.host.textures),
        None => {
            draw.background().color(model.background);
        }
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!("Failed to draw frame: {:?}", err);
    }

    if model.show_debug {
        if let Err(err) = model.egui.draw_to_frame(&frame) {
            error!("Failed to draw debug panel: {:?}", err);
        }
    }
}

// Resize notifications only reach the spheres while they listen
fn resized(app: &App, model: &mut Model, _size: Vec2) {
    if model.host.listener.is_none() {
        return;
    }
    model.with_spheres(app, |spheres, host| spheres.on_resize(host));
}

fn closed(app: &App, model: &mut Model) {
    model.unmount(app);
    model.debug_info.capture(model.spheres.as_ref());
}

fn exit(app: &App, mut model: Model) {
    model.unmount(app);
}
