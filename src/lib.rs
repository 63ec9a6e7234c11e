/*
 * Rolling Spheres - Module Definitions
 *
 * This file defines the module structure for the bouncing sphere animation.
 * The simulation core (bounds, bodies, stepper, render surface, lifecycle)
 * is written against the Host trait. The app module hosts it in a nannou
 * window.
 */

// Re-export key components for easier access
pub use body::Body;
pub use bounds::ViewportBounds;
pub use camera::PerspectiveCamera;
pub use config::SceneConfig;
pub use debug::DebugInfo;
pub use error::{Result, SpheresError};
pub use host::{HeadlessHost, Host};
pub use lifecycle::{LifecycleState, SpheresController};
pub use registry::BodyRegistry;
pub use renderer::{FrameSnapshot, RenderSurface};
pub use resources::{ResourceKind, ResourceTracker};
pub use app::Model;

// Define modules
pub mod body;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod debug;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod physics;
pub mod registry;
pub mod renderer;
pub mod resources;
pub mod app;
pub mod ui;
pub mod input;
