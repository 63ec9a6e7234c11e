/*
 * Viewport Bounds Module
 *
 * Derives the world-space rectangle visible at the z = 0 plane from the
 * camera's vertical field of view, its distance to that plane and the
 * drawing surface's aspect ratio. The camera is assumed to look straight
 * at the plane.
 */

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl ViewportBounds {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self { half_width, half_height }
    }

    // halfHeight = tan(fov / 2) * distance, halfWidth = halfHeight * aspect.
    // Returns None when the inputs would not give a positive, finite rectangle.
    pub fn from_projection(fov_degrees: f32, distance: f32, aspect: f32) -> Option<Self> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return None;
        }

        let half_height = (fov_degrees / 2.0).to_radians().tan() * distance.abs();
        let half_width = half_height * aspect;

        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(half_width) && valid(half_height) {
            Some(Self { half_width, half_height })
        } else {
            None
        }
    }

    // Largest |x| and |y| a body of this radius may reach
    pub fn limits_for(&self, radius: f32) -> (f32, f32) {
        (self.half_width - radius, self.half_height - radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_projection_formula() {
        let bounds = ViewportBounds::from_projection(45.0, 15.0, 800.0 / 600.0).unwrap();
        let expected_half_height = (22.5f32).to_radians().tan() * 15.0;

        assert_relative_eq!(bounds.half_height, expected_half_height, epsilon = 1e-5);
        assert_relative_eq!(bounds.half_width, expected_half_height * 4.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn halving_aspect_halves_width_only() {
        let wide = ViewportBounds::from_projection(45.0, 15.0, 800.0 / 600.0).unwrap();
        let narrow = ViewportBounds::from_projection(45.0, 15.0, 400.0 / 600.0).unwrap();

        assert_relative_eq!(narrow.half_width, wide.half_width / 2.0, epsilon = 1e-5);
        assert_eq!(narrow.half_height, wide.half_height);
    }

    #[test]
    fn negative_distance_uses_absolute_value() {
        let front = ViewportBounds::from_projection(45.0, 15.0, 1.0).unwrap();
        let behind = ViewportBounds::from_projection(45.0, -15.0, 1.0).unwrap();
        assert_eq!(front, behind);
    }

    #[test]
    fn degenerate_aspect_gives_none() {
        assert!(ViewportBounds::from_projection(45.0, 15.0, 0.0).is_none());
        assert!(ViewportBounds::from_projection(45.0, 15.0, f32::NAN).is_none());
        assert!(ViewportBounds::from_projection(45.0, 15.0, f32::INFINITY).is_none());
        assert!(ViewportBounds::from_projection(45.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn limits_subtract_radius() {
        let bounds = ViewportBounds::new(4.5, 3.0);
        assert_eq!(bounds.limits_for(0.5), (4.0, 2.5));
    }
}
