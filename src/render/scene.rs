//! Scene building
//!
//! Turns a `GameState` into pixel-space draw commands. Draw order: board,
//! particles, then each hole with its target and hit flash on top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::colors;
use crate::consts::POP_SIZE_FRACTION;
use crate::ease_out_back;
use crate::settings::Settings;
use crate::sim::{GameState, Hole, HoleKind, Layout, Particle, ParticleKind};

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of edge `size` centred on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Sprite kinds for popped targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSprite {
    Primary,
    Bonus,
}

/// Soft offset copy drawn under a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub rect: Rect,
    pub alpha: f32,
    pub blur: f32,
}

/// A single draw command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Radial darkening towards the edges
    Vignette {
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
        edge_alpha: f32,
    },
    /// Translucent border around the board
    Frame {
        rect: Rect,
        line_width: f32,
        alpha: f32,
    },
    Hole {
        rect: Rect,
    },
    Target {
        sprite: TargetSprite,
        rect: Rect,
        shadow: Option<Shadow>,
        /// Glow blur radius, 0 for none
        glow: f32,
    },
    HitFlash {
        rect: Rect,
        alpha: f32,
    },
    Particle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub seconds_left: u32,
    pub score: u64,
    pub multiplier: u32,
    pub best: u64,
}

/// Everything an external drawing layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCmd>,
    pub hud: Hud,
}

/// Build the draw list for the current state
pub fn build_scene<R>(state: &GameState<R>, settings: &Settings, best: u64) -> DrawList {
    let layout = &state.layout;
    let now = state.now_ms;
    let mut commands = Vec::with_capacity(2 + state.particles.len() + state.holes.len() * 3);

    board(layout, settings, &mut commands);

    commands.extend(state.particles.iter().map(particle));

    for hole in &state.holes {
        hole_commands(
            hole,
            layout,
            now,
            (state.tuning.pop_duration_ms, state.tuning.hit_flash_ms),
            settings,
            &mut commands,
        );
    }

    DrawList {
        width: layout.width,
        height: layout.height,
        commands,
        hud: Hud {
            seconds_left: state.round.seconds_left(),
            score: state.round.score(),
            multiplier: state.round.multiplier().value,
            best,
        },
    }
}

fn board(layout: &Layout, settings: &Settings, out: &mut Vec<DrawCmd>) {
    let (w, h, dpr) = (layout.width, layout.height, layout.dpr);
    if settings.quality.vignette_enabled() {
        out.push(DrawCmd::Vignette {
            inner_center: Vec2::new(w * 0.5, h * 0.45),
            inner_radius: w.min(h) * 0.1,
            outer_center: Vec2::new(w * 0.5, h * 0.55),
            outer_radius: w.max(h) * 0.8,
            edge_alpha: 0.35,
        });
    }
    let inset = 12.0 * dpr;
    out.push(DrawCmd::Frame {
        rect: Rect::new(inset, inset, w - 2.0 * inset, h - 2.0 * inset),
        line_width: 18.0 * dpr,
        alpha: 0.30,
    });
}

fn particle(p: &Particle) -> DrawCmd {
    let base = match p.kind {
        ParticleKind::Hit => colors::SPARK_HIT,
        ParticleKind::Bonus => colors::SPARK_BONUS,
    };
    DrawCmd::Particle {
        center: p.position,
        radius: p.draw_radius(),
        color: [base[0], base[1], base[2], p.alpha() * 0.9],
    }
}

fn hole_commands(
    hole: &Hole,
    layout: &Layout,
    now: f64,
    (pop_ms, flash_ms): (f64, f64),
    settings: &Settings,
    out: &mut Vec<DrawCmd>,
) {
    let center = layout.hole_center(hole.position);
    let hole_size = layout.hole_size();
    let pop_size = hole_size * POP_SIZE_FRACTION;
    let dpr = layout.dpr;

    out.push(DrawCmd::Hole {
        rect: Rect::centered(center, hole_size),
    });

    if hole.is_active() {
        let t = if pop_ms > 0.0 {
            ((now - hole.popped_at) / pop_ms).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        let pop = if settings.reduced_motion { 1.0 } else { ease_out_back(t) };

        match hole.kind {
            HoleKind::Primary => {
                // Tall sprite rising out of the hole, with a drop shadow
                let w = pop_size * 1.10 * pop;
                let h = pop_size * 2.05 * pop;
                let y = center.y - h + hole_size * 0.28;
                let rect = Rect::new(center.x - w / 2.0, y, w, h);
                out.push(DrawCmd::Target {
                    sprite: TargetSprite::Primary,
                    rect,
                    shadow: Some(Shadow {
                        rect: Rect::new(rect.x + 10.0 * dpr, rect.y + 14.0 * dpr, w, h),
                        alpha: 0.35,
                        blur: 6.0,
                    }),
                    glow: 0.0,
                });
            }
            HoleKind::Bonus => {
                // Wide sprite with a pink glow
                let w = pop_size * 1.35 * pop;
                let h = pop_size * 0.95 * pop;
                let y = center.y - h + hole_size * 0.20;
                out.push(DrawCmd::Target {
                    sprite: TargetSprite::Bonus,
                    rect: Rect::new(center.x - w / 2.0, y, w, h),
                    shadow: None,
                    glow: if settings.reduced_motion { 0.0 } else { 36.0 * dpr },
                });
            }
            HoleKind::None => {}
        }
    }

    if hole.is_flashing(now) && flash_ms > 0.0 {
        let alpha = ((hole.recently_hit_until - now) / flash_ms).clamp(0.0, 1.0) as f32;
        out.push(DrawCmd::HitFlash {
            rect: Rect::centered(center, pop_size),
            alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hit;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut s = GameState::new(4, Tuning::default(), Layout::new(1000.0, 1000.0, 1.0));
        s.start();
        s
    }

    fn first_target(list: &DrawList) -> Option<&DrawCmd> {
        list.commands
            .iter()
            .find(|c| matches!(c, DrawCmd::Target { .. }))
    }

    #[test]
    fn test_idle_board() {
        let list = build_scene(&state(), &Settings::default(), 120);
        let holes = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Hole { .. }))
            .count();
        assert_eq!(holes, 7);
        assert!(first_target(&list).is_none());
        assert!(matches!(list.commands[0], DrawCmd::Vignette { .. }));
        assert_eq!(list.hud.seconds_left, 30);
        assert_eq!(list.hud.best, 120);
        assert_eq!(list.hud.multiplier, 1);
    }

    #[test]
    fn test_primary_pops_from_zero_to_full() {
        let mut s = state();
        s.activate_hole(1, HoleKind::Primary, 800.0);
        let list = build_scene(&s, &Settings::default(), 0);
        let DrawCmd::Target { rect, shadow, .. } = first_target(&list).expect("target") else {
            panic!("expected target");
        };
        assert!(rect.w.abs() < 1e-3);
        assert!(shadow.is_some());

        s.now_ms += 200.0;
        let list = build_scene(&s, &Settings::default(), 0);
        let DrawCmd::Target { rect, .. } = first_target(&list).expect("target") else {
            panic!("expected target");
        };
        let pop_size = 180.0 * POP_SIZE_FRACTION;
        assert!((rect.w - pop_size * 1.10).abs() < 1e-2);
        assert!((rect.h - pop_size * 2.05).abs() < 1e-2);
    }

    #[test]
    fn test_reduced_motion_skips_pop_and_glow() {
        let mut s = state();
        s.activate_hole(0, HoleKind::Bonus, 800.0);
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let list = build_scene(&s, &settings, 0);
        let DrawCmd::Target { rect, glow, sprite, .. } = first_target(&list).expect("target") else {
            panic!("expected target");
        };
        assert_eq!(*sprite, TargetSprite::Bonus);
        assert_eq!(*glow, 0.0);
        assert!((rect.w - 180.0 * POP_SIZE_FRACTION * 1.35).abs() < 1e-2);
    }

    #[test]
    fn test_hit_adds_flash_and_particles() {
        let mut s = state();
        s.activate_hole(2, HoleKind::Primary, 800.0);
        let p = s.layout.hit_center(s.holes[2].position);
        hit::tap(&mut s, p);

        let list = build_scene(&s, &Settings::default(), 0);
        let flash = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCmd::HitFlash { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .expect("flash");
        assert!((flash - 1.0).abs() < 1e-6);
        let sparks = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Particle { .. }))
            .count();
        assert_eq!(sparks, 10);
        assert_eq!(list.hud.score, 30);
    }

    #[test]
    fn test_low_quality_has_no_vignette() {
        let settings = Settings {
            quality: crate::settings::QualityPreset::Low,
            ..Settings::default()
        };
        let list = build_scene(&state(), &settings, 0);
        assert!(matches!(list.commands[0], DrawCmd::Frame { .. }));
    }
}
