//! Render sink
//!
//! Backend-agnostic: produces a `DrawList` of pixel-space commands that the
//! host draws with whatever API it has (canvas 2D on the web).

pub mod scene;

pub use scene::{DrawCmd, DrawList, Hud, Rect, Shadow, TargetSprite, build_scene};

/// Colors for game elements (RGBA, 0-1)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.06, 0.05, 0.09, 1.0];
    pub const HOLE: [f32; 4] = [0.02, 0.02, 0.03, 1.0];
    pub const HOLE_RIM: [f32; 4] = [0.25, 0.22, 0.3, 1.0];
    pub const TARGET_PRIMARY: [f32; 4] = [0.92, 0.92, 0.95, 1.0];
    pub const TARGET_BONUS: [f32; 4] = [1.0, 0.3, 0.77, 1.0];
    pub const BONUS_GLOW: [f32; 4] = [1.0, 0.3, 0.77, 0.95];
    pub const HIT_FLASH: [f32; 4] = [1.0, 0.95, 0.6, 1.0];
    pub const SPARK_HIT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SPARK_BONUS: [f32; 4] = [1.0, 0.41, 0.71, 1.0];
    pub const FRAME: [f32; 4] = [1.0, 1.0, 1.0, 0.22];

    /// CSS `rgba()` string with alpha scaled by `alpha`
    pub fn css(color: [f32; 4], alpha: f32) -> String {
        let [r, g, b, a] = color;
        format!(
            "rgba({},{},{},{:.3})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            (a * alpha).clamp(0.0, 1.0)
        )
    }

}
