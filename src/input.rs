/*
 * Input Module
 *
 * This module handles keyboard and raw window events. The only control is
 * the D key, which shows or hides the debug panel.
 */

use log::debug;
use nannou::prelude::*;

use crate::app::Model;

// Key pressed event handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::D {
        model.show_debug = !model.show_debug;
        debug!("Debug panel {}", if model.show_debug { "shown" } else { "hidden" });
    }
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
