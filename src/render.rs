//! Frame composition
//!
//! The simulation is turned into a flat list of draw commands here, with no
//! surface types involved, so the same composer backs the wasm canvas
//! driver and any headless test. Colors are CSS color strings throughout.

use crate::sim::{GamePhase, GameState};

/// One primitive for the drawing surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: &'static str,
        stroke: Option<&'static str>,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        fill: &'static str,
    },
}

/// A fully composed frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub cmds: Vec<DrawCmd>,
    /// Status line drawn below the stage
    pub status: String,
    /// Centered overlay text, present only when the phase calls for one
    pub banner: Option<String>,
    /// FPS readout, present when the player enabled the counter
    pub fps_label: Option<String>,
}

/// Bricks are drawn inset from their cell so adjacent bricks read as
/// separate blocks
const BRICK_INSET: f32 = 2.0;

pub fn compose(state: &GameState, fps: Option<u32>) -> Frame {
    let mut cmds = Vec::new();

    for brick in state.field.iter_live() {
        let r = &brick.rect;
        cmds.push(DrawCmd::Rect {
            x: r.x + BRICK_INSET,
            y: r.y + BRICK_INSET,
            w: r.w - 2.0 * BRICK_INSET,
            h: r.h - 2.0 * BRICK_INSET,
            fill: brick.color(),
            stroke: Some("white"),
        });
    }

    let p = &state.paddle.rect;
    cmds.push(DrawCmd::Rect {
        x: p.x,
        y: p.y,
        w: p.w,
        h: p.h,
        fill: "grey",
        stroke: None,
    });

    cmds.push(DrawCmd::Circle {
        cx: state.ball.pos.x,
        cy: state.ball.pos.y,
        radius: state.ball.radius,
        fill: "orange",
    });

    let status = format!(
        "Lives: {} - Score: {} - High Score: {}",
        state.ball.lives, state.score, state.high_score
    );

    let banner = match state.phase {
        GamePhase::Paused if state.ticks == 0 => Some("!Hit [P] To Start Game!".to_string()),
        GamePhase::Paused => Some("!Game Paused, Hit [P] To Unpause!".to_string()),
        GamePhase::GameOver => Some("!Game Over, Hit [P] To Restart!".to_string()),
        GamePhase::Running | GamePhase::NextLevel => None,
    };

    Frame {
        width: state.stage_width(),
        height: state.screen_height(),
        cmds,
        status,
        banner,
        fps_label: fps.map(|f| format!("FPS: {f}")),
    }
}
