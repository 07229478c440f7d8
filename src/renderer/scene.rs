//! Frame composition
//!
//! Draws one frame of the current game state onto any `DrawSurface`.
//! Reference-space coordinates are multiplied by the display scale on the
//! way out; overlay text centers on the actual canvas.

use super::surface::{DrawSurface, Scale};
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

const SKY: &str = "#87ceeb";
const SKYLINE: &str = "#4f6d7a";
const CLOUD: &str = "rgba(255,255,255,0.85)";
const GROUND: &str = "#5a8f4d";
const PLAYER: &str = "yellow";
const OBSTACLE: &str = "red";
const OBSTACLE_HALO: &str = "rgba(255,0,0,0.5)";
const OVERLAY: &str = "rgba(0,0,0,0.7)";

/// Skyline towers within one background tile: (x, width, height)
const TOWERS: [(f32, f32, f32); 5] = [
    (40.0, 90.0, 70.0),
    (180.0, 60.0, 110.0),
    (300.0, 110.0, 50.0),
    (470.0, 70.0, 90.0),
    (620.0, 100.0, 65.0),
];

/// Cloud altitude in reference units
const CLOUD_Y: f32 = 60.0;

/// Per-frame knobs the driver resolves from settings and side state
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Best historical score, shown on the game-over overlay
    pub best_score: Option<u32>,
    /// Frames per second, shown in the HUD when enabled
    pub fps: Option<u32>,
    /// Draw jump particles
    pub particles: bool,
}

/// Compose one full frame
pub fn draw_frame(
    state: &GameState,
    surface: &mut impl DrawSurface,
    scale: Scale,
    opts: &RenderOptions,
) {
    surface.clear();
    draw_background(state, surface, scale);

    match state.phase {
        GamePhase::Start => draw_start_overlay(surface, scale),
        GamePhase::Playing => {
            draw_entities(state, surface, scale, opts);
            draw_hud(state, surface, scale, opts);
        }
        GamePhase::GameOver => draw_game_over_overlay(state, surface, scale, opts),
    }
}

fn draw_background(state: &GameState, surface: &mut impl DrawSurface, scale: Scale) {
    let (w, h) = surface.size();
    surface.fill_rect(0.0, 0.0, w, h, SKY);

    // Skyline layer: two tile copies, offset wrapping modulo the playfield
    // width so the seam lands exactly on a tile boundary
    for copy in 0..2 {
        let tile_x = -state.bg_offset + copy as f32 * PLAYFIELD_WIDTH;
        for (x, tw, th) in TOWERS {
            surface.fill_rect(
                scale.px(tile_x + x),
                scale.px(GROUND_Y - th),
                scale.px(tw),
                scale.px(th),
                SKYLINE,
            );
        }
    }

    // Cloud layer: narrower tile, slower scroll
    let mut tile_x = -state.cloud_offset;
    while tile_x < PLAYFIELD_WIDTH {
        draw_cloud(surface, scale, tile_x + 80.0, CLOUD_Y);
        tile_x += CLOUD_TILE_WIDTH;
    }

    surface.fill_rect(
        0.0,
        scale.px(GROUND_Y),
        scale.px(PLAYFIELD_WIDTH),
        scale.px(PLAYFIELD_HEIGHT - GROUND_Y),
        GROUND,
    );
}

/// A cloud puff: three overlapping disks
fn draw_cloud(surface: &mut impl DrawSurface, scale: Scale, x: f32, y: f32) {
    surface.fill_circle(scale.px(x), scale.px(y), scale.px(22.0), CLOUD);
    surface.fill_circle(scale.px(x + 28.0), scale.px(y - 8.0), scale.px(28.0), CLOUD);
    surface.fill_circle(scale.px(x + 58.0), scale.px(y), scale.px(22.0), CLOUD);
}

fn draw_entities(
    state: &GameState,
    surface: &mut impl DrawSurface,
    scale: Scale,
    opts: &RenderOptions,
) {
    // Obstacles: translucent halo behind a glowing body
    for obs in &state.obstacles {
        surface.fill_rect(
            scale.px(obs.pos.x - 5.0),
            scale.px(obs.pos.y - 5.0),
            scale.px(OBSTACLE_WIDTH + 10.0),
            scale.px(obs.height + 10.0),
            OBSTACLE_HALO,
        );
        surface.set_glow(OBSTACLE, scale.px(20.0));
        surface.fill_rect(
            scale.px(obs.pos.x),
            scale.px(obs.pos.y),
            scale.px(OBSTACLE_WIDTH),
            scale.px(obs.height),
            OBSTACLE,
        );
        surface.clear_glow();
    }

    surface.fill_rect(
        scale.px(state.player.pos.x),
        scale.px(state.player.pos.y),
        scale.px(PLAYER_SIZE),
        scale.px(PLAYER_SIZE),
        PLAYER,
    );

    if opts.particles {
        for particle in &state.particles {
            let color = format!("hsl({:.0},100%,50%)", particle.hue);
            surface.fill_circle(
                scale.px(particle.pos.x),
                scale.px(particle.pos.y),
                scale.px(particle.size),
                &color,
            );
        }
    }
}

fn draw_hud(
    state: &GameState,
    surface: &mut impl DrawSurface,
    scale: Scale,
    opts: &RenderOptions,
) {
    let score = format!("Score: {}", state.score);
    surface.fill_text(
        &score,
        scale.px(20.0),
        scale.px(40.0),
        scale.px(24.0),
        "white",
        false,
    );

    if let Some(fps) = opts.fps {
        let fps = format!("FPS: {fps}");
        surface.fill_text(
            &fps,
            scale.px(PLAYFIELD_WIDTH - 120.0),
            scale.px(40.0),
            scale.px(18.0),
            "white",
            false,
        );
    }
}

fn draw_start_overlay(surface: &mut impl DrawSurface, scale: Scale) {
    let (w, h) = surface.size();
    let (cx, cy) = (w / 2.0, h / 2.0);

    surface.fill_text(
        "Cloud Hopper",
        cx,
        cy - scale.px(50.0),
        scale.px(48.0),
        "gold",
        true,
    );
    surface.fill_text(
        "Press SPACE to Start",
        cx,
        cy + scale.px(30.0),
        scale.px(32.0),
        "white",
        true,
    );
}

fn draw_game_over_overlay(
    state: &GameState,
    surface: &mut impl DrawSurface,
    scale: Scale,
    opts: &RenderOptions,
) {
    let (w, h) = surface.size();
    surface.fill_rect(0.0, 0.0, w, h, OVERLAY);

    let (cx, cy) = (w / 2.0, h / 2.0);
    surface.fill_text(
        "GAME OVER",
        cx,
        cy - scale.px(50.0),
        scale.px(64.0),
        "red",
        true,
    );

    let score = format!("Score: {}", state.score);
    surface.fill_text(&score, cx, cy + scale.px(10.0), scale.px(32.0), "white", true);

    if let Some(best) = opts.best_score {
        let best = format!("Best: {best}");
        surface.fill_text(&best, cx, cy + scale.px(45.0), scale.px(24.0), "white", true);
    }

    surface.fill_text(
        "Press SPACE to Restart",
        cx,
        cy + scale.px(90.0),
        scale.px(32.0),
        "yellow",
        true,
    );
}
