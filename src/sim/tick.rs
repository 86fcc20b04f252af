//! Fixed timestep tick resolver
//!
//! One tick advances the paddle and ball once, then repeatedly tests
//! bricks, paddle and walls in strict priority order, applying the matching
//! rebound until the tick produces no further hit. The same-tick loop is
//! what keeps a fast ball from tunneling through a brick row straight into
//! a wall.

use glam::Vec2;

use super::ball::Contact;
use super::geom::Side;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game by one fixed tick
pub fn tick(state: &mut GameState) {
    state.events.clear();
    if state.phase != GamePhase::Running {
        return;
    }
    state.ticks += 1;

    let stage_w = state.stage_width();
    let stage_h = state.stage_height();
    let cell = state.cell;
    let height = state.height_units as f32;

    state.paddle.advance(stage_w);
    state.ball.advance(state.field.accel_factor());

    loop {
        // Bricks first, gated by the coarse band over the brick region
        if state.ball.band_overlaps(0.0, (height - 3.0) * cell) {
            if let Some(hit) = state.field.find_hit(&state.ball) {
                state.score += state.field.score_at(hit.row, hit.col) as u64;

                if state.field.register_impact(hit.row, hit.col) {
                    state.events.push(GameEvent::Break);
                    if state.field.cleared() {
                        log::info!("level {} cleared, score {}", state.level + 1, state.score);
                        state.phase = GamePhase::NextLevel;
                        return;
                    }
                } else {
                    state.events.push(GameEvent::Crack);
                }

                state.ball.resolve_collision(&Contact::at(hit.point), &mut state.rng);
                continue;
            }
        }

        // Then the paddle strip
        if state.ball.band_overlaps(height * cell, (height + 1.0) * cell) {
            let contact = state.paddle.contact_for(state.ball.pos.x, state.ball.pos.y);
            if state.ball.is_struck(contact.point) {
                state.events.push(GameEvent::PaddleBounce);
                state.ball.resolve_collision(&contact, &mut state.rng);
                continue;
            }
        }

        // Finally the stage walls
        match state.ball.boundary_side(stage_w, stage_h) {
            Some(Side::Left) => {
                state.events.push(GameEvent::WallBounce);
                let contact = Contact::at(Vec2::new(0.0, state.ball.pos.y));
                state.ball.resolve_collision(&contact, &mut state.rng);
            }
            Some(Side::Right) => {
                state.events.push(GameEvent::WallBounce);
                let contact = Contact::at(Vec2::new(stage_w, state.ball.pos.y));
                state.ball.resolve_collision(&contact, &mut state.rng);
            }
            Some(Side::Top) => {
                state.events.push(GameEvent::WallBounce);
                let contact = Contact::at(Vec2::new(state.ball.pos.x, 0.0));
                state.ball.resolve_collision(&contact, &mut state.rng);
            }
            Some(Side::Bottom) => {
                state.events.push(GameEvent::Death);
                if state.ball.lose_life(&mut state.rng) {
                    log::info!("game over at score {}", state.score);
                    state.phase = GamePhase::GameOver;
                } else {
                    log::debug!("life lost, {} remaining", state.ball.lives);
                    state.phase = GamePhase::Paused;
                }
                return;
            }
            None => break,
        }
    }
}
