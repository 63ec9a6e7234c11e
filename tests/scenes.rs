use std::path::{Path, PathBuf};

use rolling_spheres::host::HeadlessHost;
use rolling_spheres::{SceneConfig, SpheresController};

/// Directory holding the images shipped with the crate
pub fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

// ==================================================================================
// Bundled textures
// ==================================================================================

#[test]
fn built_in_scene_textures_ship_in_assets() {
    let mut scene = SceneConfig::default();
    scene.resolve_textures(&assets_dir());

    for body in &scene.bodies {
        assert!(body.texture.is_file(), "missing texture {}", body.texture.display());
    }
}

#[test]
fn example_scene_textures_resolve_next_to_the_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes").join("default.yaml");
    let scene = SceneConfig::from_yaml_file(&path).unwrap();

    assert_eq!(scene.bodies.len(), 3);
    for body in &scene.bodies {
        assert!(body.texture.is_absolute());
        assert!(body.texture.is_file(), "missing texture {}", body.texture.display());
    }
}

#[test]
fn host_sees_resolved_texture_paths() {
    let mut scene = SceneConfig::default();
    scene.resolve_textures(&assets_dir());

    // Only the resolved path is known to the host, so only it can fail
    let mut host = HeadlessHost::new(800.0, 600.0).fail_texture(assets_dir().join("juniper.png"));
    let controller = SpheresController::mount(&scene, &mut host).unwrap();

    let bodies = controller.registry().unwrap().bodies();
    assert!(!bodies[0].material.is_fallback());
    assert!(bodies[1].material.is_fallback());
    assert!(!bodies[2].material.is_fallback());
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let result = SceneConfig::from_yaml_file("no/such/scene.yaml");
    assert!(matches!(result, Err(rolling_spheres::SpheresError::Io(_))));
}
