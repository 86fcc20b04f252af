//! The player-controlled paddle
//!
//! Horizontal velocity is an integer ramp: holding a direction accelerates
//! by one unit per tick toward the cap, releasing decays by two units per
//! tick toward zero. The clamp query doubles as the contact producer for
//! the ball's spin transfer.

use super::ball::{Contact, ContactMeta};
use super::geom::Rect;
use crate::consts::PADDLE_STRIDE;

/// Discrete input direction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Idle,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    pub direction: Direction,
    /// Current signed speed in [-max, max]
    cur: i32,
    max: i32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, max_speed: i32) -> Self {
        assert!(max_speed > 0, "paddle max speed must be positive");
        Self {
            rect: Rect::new(x, y, width, height),
            direction: Direction::Idle,
            cur: 0,
            max: max_speed,
        }
    }

    /// Set the held input direction
    pub fn set_direction(&mut self, dir: Direction) {
        self.direction = dir;
    }

    /// Release a direction; only idles if it matches the currently held one,
    /// so a stale key-up never clobbers a newer key-down
    pub fn release(&mut self, dir: Direction) {
        if self.direction == dir {
            self.direction = Direction::Idle;
        }
    }

    /// Current speed normalized to [-1, 1]
    pub fn speed_ratio(&self) -> f32 {
        self.cur as f32 / self.max as f32
    }

    /// Accelerate or decay the speed per the held direction, then move,
    /// clamped so the paddle never leaves `[0, stage_width - width - 1]`
    pub fn advance(&mut self, stage_width: f32) {
        match self.direction {
            Direction::Right => {
                if self.cur < self.max {
                    self.cur += 1;
                }
            }
            Direction::Left => {
                if self.cur > -self.max {
                    self.cur -= 1;
                }
            }
            Direction::Idle => {
                if self.cur != 0 {
                    self.cur += if self.cur > 0 { -2 } else { 2 };
                }
            }
        }

        let dx = (self.speed_ratio() * PADDLE_STRIDE).round();
        self.rect.x = (self.rect.x + dx).clamp(0.0, stage_width - self.rect.w - 1.0);
    }

    /// Nearest point on the paddle to `(x, y)`, carrying the paddle's
    /// motion state for the ball's spin transfer
    pub fn contact_for(&self, x: f32, y: f32) -> Contact {
        Contact::with_meta(
            self.rect.clamp_point(x, y),
            ContactMeta {
                dir: self.direction,
                speed: self.speed_ratio(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle() -> Paddle {
        Paddle::new(100.0, 480.0, 96.0, 24.0, 14)
    }

    #[test]
    fn test_release_only_matching_direction() {
        let mut p = paddle();
        p.set_direction(Direction::Left);
        // Stale key-up for the other direction is ignored
        p.release(Direction::Right);
        assert_eq!(p.direction, Direction::Left);
        p.release(Direction::Left);
        assert_eq!(p.direction, Direction::Idle);
    }

    #[test]
    fn test_acceleration_ramp() {
        let mut p = paddle();
        p.set_direction(Direction::Right);
        for _ in 0..20 {
            p.advance(1000.0);
        }
        // Capped at max
        assert_eq!(p.speed_ratio(), 1.0);

        p.set_direction(Direction::Left);
        p.advance(1000.0);
        assert!(p.speed_ratio() < 1.0);
    }

    #[test]
    fn test_idle_decay_toward_zero() {
        let mut p = paddle();
        p.set_direction(Direction::Right);
        for _ in 0..4 {
            p.advance(1000.0);
        }
        p.release(Direction::Right);
        for _ in 0..2 {
            p.advance(1000.0);
        }
        assert_eq!(p.speed_ratio(), 0.0);
    }

    #[test]
    fn test_odd_speed_decay_oscillates_about_zero() {
        // The decay step is 2, so a released paddle at an odd speed never
        // lands on 0: it flips between +1 and -1 and keeps jittering in
        // place (net displacement rounds to +-1 px alternately).
        let mut p = paddle();
        p.set_direction(Direction::Right);
        for _ in 0..3 {
            p.advance(1000.0);
        }
        p.release(Direction::Right);

        let unit = 1.0 / 14.0;
        let mut observed = Vec::new();
        for _ in 0..6 {
            p.advance(1000.0);
            observed.push(p.speed_ratio());
        }
        assert_eq!(observed, vec![unit, -unit, unit, -unit, unit, -unit]);
    }

    #[test]
    fn test_advance_clamps_to_stage() {
        let mut p = paddle();
        p.set_direction(Direction::Left);
        for _ in 0..200 {
            p.advance(1000.0);
        }
        assert_eq!(p.rect.x, 0.0);

        p.release(Direction::Left);
        p.set_direction(Direction::Right);
        for _ in 0..500 {
            p.advance(1000.0);
        }
        assert_eq!(p.rect.x, 1000.0 - 96.0 - 1.0);
    }

    #[test]
    fn test_contact_stays_on_paddle() {
        let p = paddle();
        for (x, y) in [(0.0, 0.0), (150.0, 490.0), (900.0, 900.0), (-50.0, 485.0)] {
            let c = p.contact_for(x, y);
            assert!(c.point.x >= p.rect.x && c.point.x <= p.rect.x + p.rect.w - 1.0);
            assert!(c.point.y >= p.rect.y && c.point.y <= p.rect.y + p.rect.h - 1.0);
        }
    }

    #[test]
    fn test_contact_carries_motion_meta() {
        let mut p = paddle();
        p.set_direction(Direction::Right);
        for _ in 0..14 {
            p.advance(1000.0);
        }
        let c = p.contact_for(150.0, 490.0);
        let meta = c.meta.expect("paddle contact carries meta");
        assert_eq!(meta.dir, Direction::Right);
        assert_eq!(meta.speed, 1.0);
    }
}
