/*
 * UI Module
 *
 * This module draws the read-only debug panel using nannou_egui. It shows
 * the performance metrics and simulation state gathered in DebugInfo and
 * never changes the simulation.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;

pub fn update_ui(egui: &mut Egui, debug_info: &DebugInfo) {
    let ctx = egui.begin_frame();

    egui::Window::new("Rolling Spheres")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Frames rendered: {}", debug_info.frames_rendered));

            let state = debug_info
                .state
                .map_or_else(|| "not mounted".to_string(), |state| format!("{:?}", state));
            ui.label(format!("Lifecycle: {}", state));

            ui.separator();

            match debug_info.bounds {
                Some(bounds) => {
                    ui.label(format!("Bounds: {:.3} x {:.3}", bounds.half_width, bounds.half_height));
                }
                None => {
                    ui.label("Bounds: none");
                }
            }
            let (w, h) = debug_info.surface_pixels;
            ui.label(format!("Surface: {}x{} px", w, h));
            ui.label(format!("Reflections: {}", debug_info.reflections));

            ui.collapsing("Bodies", |ui| {
                for (i, body) in debug_info.bodies.iter().enumerate() {
                    ui.label(format!(
                        "#{}  pos ({:.2}, {:.2})  vel ({:.3}, {:.3})",
                        i, body.position.x, body.position.y, body.velocity.x, body.velocity.y
                    ));
                }
            });
        });
}
