/*
 * Physics Module
 *
 * This module advances the bodies by one frame against the current
 * viewport bounds. Bodies only interact with the viewport edges, never
 * with each other, so each one is stepped independently.
 */

use log::trace;
use nannou::prelude::*;

use crate::body::Body;
use crate::bounds::ViewportBounds;

// Summary of one step, mostly for logging and the debug panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub reflections_x: usize,
    pub reflections_y: usize,
}

// Move, reflect and spin every body once
pub fn step_bodies(bodies: &mut [Body], bounds: &ViewportBounds, spin: Vec2) -> StepReport {
    let mut report = StepReport::default();

    for body in bodies.iter_mut() {
        body.integrate();

        let (flipped_x, flipped_y) = body.reflect(bounds);
        if flipped_x {
            report.reflections_x += 1;
        }
        if flipped_y {
            report.reflections_y += 1;
        }

        body.spin(spin);
    }

    if report.reflections_x + report.reflections_y > 0 {
        trace!("Reflections this frame: x={} y={}", report.reflections_x, report.reflections_y);
    }

    report
}
