//! Board placement math
//!
//! Converts normalized hole positions into canvas pixels and defines the
//! circular hit region of each hole.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Canvas dimensions in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio (client px -> canvas px)
    pub dpr: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1000.0, 1000.0, 1.0)
    }
}

impl Layout {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: dpr.max(1.0),
        }
    }

    /// Hole sprite edge length
    pub fn hole_size(&self) -> f32 {
        self.width.min(self.height) * HOLE_SIZE_FRACTION
    }

    /// Pixel centre of a normalized position
    pub fn hole_center(&self, position: Vec2) -> Vec2 {
        Vec2::new(position.x * self.width, position.y * self.height)
    }

    /// Centre of the hit circle (raised above the visual centre)
    pub fn hit_center(&self, position: Vec2) -> Vec2 {
        self.hole_center(position) - Vec2::new(0.0, self.hole_size() * HIT_OFFSET_FRACTION)
    }

    pub fn hit_radius(&self) -> f32 {
        self.hole_size() * HIT_RADIUS_FRACTION
    }

    /// Where hit particles are emitted for a hole
    pub fn burst_origin(&self, position: Vec2) -> Vec2 {
        self.hole_center(position) - Vec2::new(0.0, self.hole_size() * BURST_OFFSET_FRACTION)
    }

    /// Whether `point` (canvas px) lies inside the hole's hit circle
    pub fn hit_test(&self, position: Vec2, point: Vec2) -> bool {
        crate::circle_contains(self.hit_center(position), self.hit_radius(), point)
    }

    /// Convert a client-space pointer position into canvas pixels
    pub fn client_to_canvas(&self, client: Vec2, canvas_origin: Vec2) -> Vec2 {
        (client - canvas_origin) * self.dpr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_center_is_raised() {
        let layout = Layout::new(1000.0, 800.0, 1.0);
        let pos = Vec2::new(0.5, 0.5);
        assert_eq!(layout.hole_size(), 144.0);
        assert_eq!(layout.hole_center(pos), Vec2::new(500.0, 400.0));
        let hc = layout.hit_center(pos);
        assert!((hc.y - (400.0 - 144.0 * 0.18)).abs() < 1e-3);
        assert!(layout.hit_test(pos, hc));
    }

    #[test]
    fn test_grid_regions_do_not_overlap() {
        for layout in [
            Layout::new(1000.0, 1000.0, 1.0),
            Layout::new(390.0, 844.0, 3.0),
            Layout::new(1920.0, 1080.0, 1.0),
        ] {
            let r = layout.hit_radius();
            for (i, a) in GRID.iter().enumerate() {
                for b in GRID.iter().skip(i + 1) {
                    let ca = layout.hit_center(Vec2::new(a.0, a.1));
                    let cb = layout.hit_center(Vec2::new(b.0, b.1));
                    assert!(ca.distance(cb) > 2.0 * r, "{layout:?} {a:?} {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_client_to_canvas_scales_by_dpr() {
        let layout = Layout::new(800.0, 600.0, 2.0);
        let p = layout.client_to_canvas(Vec2::new(110.0, 60.0), Vec2::new(10.0, 10.0));
        assert_eq!(p, Vec2::new(200.0, 100.0));
    }
}
