/*
 * Rolling Spheres
 *
 * Textured spheres bouncing inside the visible area of a perspective
 * camera. The visible area follows the window size, so the spheres keep
 * bouncing off the window edges as it is resized.
 *
 * Usage: rolling-spheres [--config scene.yaml] [--debug]
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use rolling_spheres::{app, SceneConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Textured spheres bouncing inside the window")]
struct Args {
    /// YAML scene file; defaults are used for anything it leaves out
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show the debug panel on start (toggle with D)
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut scene = match &args.config {
        Some(path) => SceneConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load scene from {}", path.display()))?,
        None => SceneConfig::default(),
    };
    scene.show_debug |= args.debug;

    info!("Starting with {} spheres", scene.bodies.len());
    app::run(scene);
    Ok(())
}
