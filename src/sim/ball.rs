//! The ball and its rebound physics
//!
//! The tricky part of Breakwall: given the nearest point of a struck object
//! to the ball's center, classify which face or corner was hit, reflect the
//! travel angle, and move the ball to a non-penetrating position - all in
//! one step, so the tick resolver can immediately re-test for further
//! impacts in the same tick.

use glam::Vec2;
use rand::Rng;

use super::geom::{self, Side};
use super::paddle::Direction;
use crate::normalize_deg;

/// Auxiliary data carried by a contact with a moving object (the paddle):
/// its input direction and current speed normalized to [-1, 1]
#[derive(Debug, Clone, Copy)]
pub struct ContactMeta {
    pub dir: Direction,
    pub speed: f32,
}

/// The nearest point on a struck object to the ball's center, plus motion
/// metadata when the object itself moves
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub point: Vec2,
    pub meta: Option<ContactMeta>,
}

impl Contact {
    /// Contact with a stationary object (brick or wall)
    pub fn at(point: Vec2) -> Self {
        Self { point, meta: None }
    }

    pub fn with_meta(point: Vec2, meta: ContactMeta) -> Self {
        Self {
            point,
            meta: Some(meta),
        }
    }
}

/// Where the contact point lies relative to the ball's center, named for the
/// face or corner of the struck object.
///
/// Screen coordinates: a contact below the ball's center means the object
/// sits below the ball, so the ball struck the object's top face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    TopLeftCorner,
    TopEdge,
    TopRightCorner,
    LeftEdge,
    RightEdge,
    BottomLeftCorner,
    BottomEdge,
    BottomRightCorner,
    /// Contact point coincides with the center - indicates a defect in the
    /// caller's contact-point computation, never a valid game state
    Center,
}

/// Classify a contact point against the ball's center
pub fn classify(center: Vec2, point: Vec2) -> Zone {
    if point.x > center.x {
        if point.y > center.y {
            Zone::TopLeftCorner
        } else if point.y < center.y {
            Zone::BottomLeftCorner
        } else {
            Zone::LeftEdge
        }
    } else if point.x < center.x {
        if point.y > center.y {
            Zone::TopRightCorner
        } else if point.y < center.y {
            Zone::BottomRightCorner
        } else {
            Zone::RightEdge
        }
    } else if point.y > center.y {
        Zone::TopEdge
    } else if point.y < center.y {
        Zone::BottomEdge
    } else {
        Zone::Center
    }
}

/// Reflection off a vertical face: mirror the horizontal component
#[inline]
fn reflect_horizontal(angle: f32) -> f32 {
    (540.0 - angle).rem_euclid(360.0)
}

/// Reflection off a horizontal face: mirror the vertical component, then
/// clamp into the face's admissible cone
#[inline]
fn reflect_vertical(angle: f32, lo: f32, hi: f32) -> f32 {
    (360.0 - angle).clamp(lo, hi)
}

/// Angle cone for rebounds off an object's top face (ball leaves upward)
const UP_BOUNDS: (f32, f32) = (195.0, 345.0);
/// Angle cone for rebounds off an object's bottom face (ball leaves downward)
const DOWN_BOUNDS: (f32, f32) = (15.0, 165.0);

/// A moving ball: bounding circle, velocity, lives, and respawn point
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub spawn: Vec2,
    pub lives: u32,
    /// Travel angle in degrees, 0 along +x, clockwise on screen, in [0, 360)
    pub angle: f32,
    pub speed: f32,
    pub max_speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, angle: f32, speed: f32, max_speed: f32, lives: u32) -> Self {
        assert!(radius > 0.0, "ball radius must be positive");
        assert!(
            speed > 0.0 && speed <= max_speed,
            "ball speed must be in (0, max_speed]"
        );
        Self {
            pos,
            radius,
            spawn: pos,
            lives,
            angle: normalize_deg(angle),
            speed,
            max_speed,
        }
    }

    /// Move along the travel angle, rounding to the nearest integer pixel.
    ///
    /// `accel` is the fraction of breakable bricks already destroyed; it
    /// scales the effective speed from `speed` toward `max_speed` so the
    /// ball gets faster as the level empties.
    pub fn advance(&mut self, accel: f32) {
        let effective = accel * (self.max_speed - self.speed) + self.speed;
        let rad = self.angle.to_radians();
        self.pos.x = (self.pos.x + effective * rad.cos()).round();
        self.pos.y = (self.pos.y + effective * rad.sin()).round();
    }

    /// Kill the ball and send it back to spawn with a fresh downward-biased
    /// angle. Returns true iff the ball ran out of lives.
    pub fn lose_life(&mut self, rng: &mut impl Rng) -> bool {
        self.lives -= 1;
        self.pos = self.spawn;
        self.angle = rng.random_range(200..=340) as f32;
        self.lives == 0
    }

    /// Correct the ball's angle and position after intersecting an object.
    ///
    /// `contact.point` is the nearest point on the struck object to the
    /// ball's center (the object's clamp query). Displacements are chosen so
    /// the ball ends up mirrored out of the penetration; on corner hits the
    /// axis with the larger correction is dropped, approximating which face
    /// was actually struck first.
    pub fn resolve_collision(&mut self, contact: &Contact, rng: &mut impl Rng) {
        let p = contact.point;
        let mut dis = Vec2::ZERO;

        match classify(self.pos, p) {
            Zone::TopLeftCorner => {
                dis.x = -2.0 * (self.pos.x + self.radius - p.x);
                dis.y = -2.0 * (self.pos.y + self.radius - p.y);
                if dis.x.abs() < dis.y.abs() {
                    dis.y = 0.0;
                    self.angle = reflect_horizontal(self.angle);
                } else {
                    dis.x = 0.0;
                    self.angle = reflect_vertical(self.angle, UP_BOUNDS.0, UP_BOUNDS.1);
                }
            }
            Zone::BottomLeftCorner => {
                dis.x = -2.0 * (self.pos.x + self.radius - p.x);
                dis.y = -2.0 * (self.pos.y - self.radius - p.y);
                if dis.x.abs() < dis.y.abs() {
                    dis.y = 0.0;
                    self.angle = reflect_horizontal(self.angle);
                } else {
                    dis.x = 0.0;
                    self.angle = reflect_vertical(self.angle, DOWN_BOUNDS.0, DOWN_BOUNDS.1);
                }
            }
            Zone::LeftEdge => {
                dis.x = -2.0 * (self.pos.x + self.radius - p.x);
                self.angle = reflect_horizontal(self.angle);
            }
            Zone::TopRightCorner => {
                dis.x = -2.0 * (self.pos.x - self.radius - p.x);
                dis.y = -2.0 * (self.pos.y + self.radius - p.y);
                if dis.x.abs() < dis.y.abs() {
                    dis.y = 0.0;
                    self.angle = reflect_horizontal(self.angle);
                } else {
                    dis.x = 0.0;
                    self.angle = reflect_vertical(self.angle, UP_BOUNDS.0, UP_BOUNDS.1);
                }
            }
            Zone::BottomRightCorner => {
                dis.x = -2.0 * (self.pos.x - self.radius - p.x);
                dis.y = -2.0 * (self.pos.y - self.radius - p.y);
                if dis.x.abs() < dis.y.abs() {
                    dis.y = 0.0;
                    self.angle = reflect_horizontal(self.angle);
                } else {
                    dis.x = 0.0;
                    self.angle = reflect_vertical(self.angle, DOWN_BOUNDS.0, DOWN_BOUNDS.1);
                }
            }
            Zone::RightEdge => {
                dis.x = -2.0 * (self.pos.x - self.radius - p.x);
                self.angle = reflect_horizontal(self.angle);
            }
            Zone::TopEdge => {
                dis.y = -2.0 * (self.pos.y + self.radius - p.y);

                // A moving paddle transfers spin: steer the rebound further
                // in the paddle's travel direction, proportionally to its
                // normalized speed.
                let alt = match contact.meta {
                    Some(meta) if meta.dir == Direction::Left => {
                        let base = (360.0 - self.angle).clamp(195.0, 315.0);
                        (-meta.speed * (315.0 - base)).round()
                    }
                    Some(meta) if meta.dir == Direction::Right => {
                        let base = (360.0 - self.angle).clamp(225.0, 345.0);
                        (-meta.speed * (base - 225.0)).round()
                    }
                    _ => 0.0,
                };

                self.angle = reflect_vertical(self.angle, UP_BOUNDS.0, UP_BOUNDS.1) + alt;
            }
            Zone::BottomEdge => {
                dis.y = -2.0 * (self.pos.y - self.radius - p.y);
                self.angle = reflect_vertical(self.angle, DOWN_BOUNDS.0, DOWN_BOUNDS.1);
            }
            // A no-op here would hang the resolver loop, since the contact
            // would keep testing as a hit.
            Zone::Center => unreachable!("contact point coincides with ball center"),
        }

        // A near-vertical trajectory risks infinite ping-ponging against a
        // flat surface; perturb it.
        if self.angle > 255.0 && self.angle < 285.0 {
            self.angle += rng.random_range(-15..=15) as f32;
        }

        self.angle = normalize_deg(self.angle);
        self.pos += dis;
    }

    /// True iff the ball's vertical extent overlaps the band `[low, high)`
    pub fn band_overlaps(&self, low: f32, high: f32) -> bool {
        geom::band_overlaps(self.pos.y, self.radius, low, high)
    }

    /// True iff `point` qualifies as a hit on the ball
    pub fn is_struck(&self, point: Vec2) -> bool {
        geom::circle_contains(self.pos, self.radius, point)
    }

    /// Which stage boundary the ball currently penetrates, if any
    pub fn boundary_side(&self, width: f32, height: f32) -> Option<Side> {
        geom::bounds_side(self.pos, self.radius, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_ball(x: f32, y: f32, angle: f32) -> Ball {
        Ball::new(Vec2::new(x, y), 10.0, angle, 5.0, 9.0, 3)
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_classify_all_zones() {
        let c = Vec2::new(100.0, 100.0);
        assert_eq!(classify(c, Vec2::new(105.0, 105.0)), Zone::TopLeftCorner);
        assert_eq!(classify(c, Vec2::new(105.0, 95.0)), Zone::BottomLeftCorner);
        assert_eq!(classify(c, Vec2::new(105.0, 100.0)), Zone::LeftEdge);
        assert_eq!(classify(c, Vec2::new(95.0, 105.0)), Zone::TopRightCorner);
        assert_eq!(classify(c, Vec2::new(95.0, 95.0)), Zone::BottomRightCorner);
        assert_eq!(classify(c, Vec2::new(95.0, 100.0)), Zone::RightEdge);
        assert_eq!(classify(c, Vec2::new(100.0, 105.0)), Zone::TopEdge);
        assert_eq!(classify(c, Vec2::new(100.0, 95.0)), Zone::BottomEdge);
        assert_eq!(classify(c, c), Zone::Center);
    }

    #[test]
    fn test_advance_rounds_to_pixels() {
        let mut ball = test_ball(100.0, 100.0, 0.0);
        ball.advance(0.0);
        assert_eq!(ball.pos, Vec2::new(105.0, 100.0));

        // Full acceleration uses max_speed
        let mut ball = test_ball(100.0, 100.0, 90.0);
        ball.advance(1.0);
        assert_eq!(ball.pos, Vec2::new(100.0, 109.0));
    }

    #[test]
    fn test_side_hit_reflects_horizontally() {
        // Moving down-right at 30 deg into an object on the right
        let mut ball = test_ball(100.0, 100.0, 30.0);
        ball.resolve_collision(&Contact::at(Vec2::new(105.0, 100.0)), &mut rng());
        assert_eq!(ball.angle, 150.0);
        // Displacement mirrors the penetration: right edge was 110, contact
        // at 105, so the ball backs off by 10
        assert_eq!(ball.pos, Vec2::new(90.0, 100.0));
    }

    #[test]
    fn test_top_edge_hit_idle_paddle_exact() {
        // 60 deg (down-right) off a flat top face reflects to 300 deg
        let mut ball = test_ball(100.0, 100.0, 60.0);
        ball.resolve_collision(&Contact::at(Vec2::new(100.0, 105.0)), &mut rng());
        assert_eq!(ball.angle, 300.0);
        // dy = -2 * (110 - 105)
        assert_eq!(ball.pos, Vec2::new(100.0, 90.0));
    }

    #[test]
    fn test_straight_down_reflects_into_jitter_cone() {
        // 90 deg is straight down on screen; the pure reflection (270, i.e.
        // straight up) falls inside the anti-vertical band and gets
        // perturbed by up to 15 deg either way.
        let mut ball = test_ball(100.0, 100.0, 90.0);
        ball.resolve_collision(&Contact::at(Vec2::new(100.0, 105.0)), &mut rng());
        assert!(ball.angle >= 255.0 - 15.0 && ball.angle <= 285.0 + 15.0);
        assert!(ball.angle >= 195.0 && ball.angle <= 345.0 + 15.0);
    }

    #[test]
    fn test_paddle_spin_left() {
        // Left-moving paddle at full speed steers the rebound toward 315
        let mut ball = test_ball(100.0, 100.0, 60.0);
        let meta = ContactMeta {
            dir: Direction::Left,
            speed: -1.0,
        };
        ball.resolve_collision(
            &Contact::with_meta(Vec2::new(100.0, 105.0), meta),
            &mut rng(),
        );
        // base 300, alt = +15
        assert_eq!(ball.angle, 315.0);
    }

    #[test]
    fn test_paddle_spin_right() {
        let mut ball = test_ball(100.0, 100.0, 60.0);
        let meta = ContactMeta {
            dir: Direction::Right,
            speed: 1.0,
        };
        ball.resolve_collision(
            &Contact::with_meta(Vec2::new(100.0, 105.0), meta),
            &mut rng(),
        );
        // base 300, alt = -(300 - 225) = -75
        assert_eq!(ball.angle, 225.0);
    }

    #[test]
    fn test_corner_tie_break_prefers_smaller_displacement() {
        // Top-left corner of an object down-right of the ball. Horizontal
        // penetration (4) is shallower than vertical (10), so the vertical
        // correction is dropped and the hit is treated as a side hit.
        let mut ball = test_ball(100.0, 100.0, 30.0);
        ball.resolve_collision(&Contact::at(Vec2::new(108.0, 105.0)), &mut rng());
        assert_eq!(ball.angle, 150.0);
        assert_eq!(ball.pos, Vec2::new(96.0, 100.0));

        // Mirror case: vertical penetration shallower, treated as top hit
        let mut ball = test_ball(100.0, 100.0, 30.0);
        ball.resolve_collision(&Contact::at(Vec2::new(105.0, 108.0)), &mut rng());
        assert_eq!(ball.angle, 330.0);
        assert_eq!(ball.pos, Vec2::new(100.0, 96.0));
    }

    #[test]
    fn test_left_wall_depenetration() {
        // Ball overlapping the left wall by 5 px; wall contact is at x = 0
        let mut ball = test_ball(5.0, 200.0, 190.0);
        assert!(ball.pos.x - ball.radius < 0.0);
        ball.resolve_collision(&Contact::at(Vec2::new(0.0, 200.0)), &mut rng());
        assert!(ball.pos.x - ball.radius >= 0.0);
    }

    #[test]
    fn test_lose_life() {
        let mut rng = rng();
        let mut ball = test_ball(100.0, 100.0, 90.0);
        ball.pos = Vec2::new(50.0, 400.0);
        assert!(!ball.lose_life(&mut rng));
        assert_eq!(ball.lives, 2);
        assert_eq!(ball.pos, ball.spawn);
        assert!(ball.angle >= 200.0 && ball.angle <= 340.0);

        ball.lives = 1;
        assert!(ball.lose_life(&mut rng));
        assert_eq!(ball.lives, 0);
    }

    #[test]
    #[should_panic]
    fn test_center_contact_panics() {
        let mut ball = test_ball(100.0, 100.0, 90.0);
        let p = ball.pos;
        ball.resolve_collision(&Contact::at(p), &mut rng());
    }

    #[test]
    #[should_panic]
    fn test_zero_radius_rejected() {
        Ball::new(Vec2::ZERO, 0.0, 0.0, 5.0, 9.0, 3);
    }

    #[test]
    #[should_panic]
    fn test_zero_speed_rejected() {
        Ball::new(Vec2::ZERO, 10.0, 0.0, 0.0, 9.0, 3);
    }

    proptest! {
        /// Rebounds off an object's top face always leave the ball moving
        /// upward (negative y component on screen), for every entry angle.
        #[test]
        fn prop_top_edge_rebound_points_up(angle in 0.0f32..360.0, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = test_ball(100.0, 100.0, angle);
            ball.resolve_collision(&Contact::at(Vec2::new(100.0, 105.0)), &mut rng);
            prop_assert!(ball.angle.to_radians().sin() < 0.0, "angle {} not upward", ball.angle);
        }

        /// Rebounds off an object's bottom face always leave the ball moving
        /// downward.
        #[test]
        fn prop_bottom_edge_rebound_points_down(angle in 0.0f32..360.0, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = test_ball(100.0, 100.0, angle);
            ball.resolve_collision(&Contact::at(Vec2::new(100.0, 95.0)), &mut rng);
            prop_assert!(ball.angle.to_radians().sin() > 0.0, "angle {} not downward", ball.angle);
        }

        /// A ball approaching a vertical face (moving toward it with a real
        /// horizontal component) always leaves moving away from it. The
        /// generic `(540 - a) mod 360` formula relies on the caller only
        /// reporting contacts on the approached side, so the property is
        /// stated over approaching angles.
        #[test]
        fn prop_left_face_rebound_points_away(angle in prop::sample::select(
            (0..360i32).filter(|a| {
                let c = (*a as f32).to_radians().cos();
                c > 0.01
            }).collect::<Vec<_>>()
        ), seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = test_ball(100.0, 100.0, angle as f32);
            ball.resolve_collision(&Contact::at(Vec2::new(105.0, 100.0)), &mut rng);
            prop_assert!(ball.angle.to_radians().cos() < 0.0, "angle {} still rightward", ball.angle);
        }

        #[test]
        fn prop_right_face_rebound_points_away(angle in prop::sample::select(
            (0..360i32).filter(|a| {
                let c = (*a as f32).to_radians().cos();
                c < -0.01
            }).collect::<Vec<_>>()
        ), seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = test_ball(100.0, 100.0, angle as f32);
            ball.resolve_collision(&Contact::at(Vec2::new(95.0, 100.0)), &mut rng);
            prop_assert!(ball.angle.to_radians().cos() > 0.0, "angle {} still leftward", ball.angle);
        }

        /// The travel angle invariant holds after any rebound.
        #[test]
        fn prop_angle_stays_normalized(angle in 0.0f32..360.0, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = test_ball(100.0, 100.0, angle);
            ball.resolve_collision(&Contact::at(Vec2::new(104.0, 107.0)), &mut rng);
            prop_assert!((0.0..360.0).contains(&ball.angle));
        }
    }
}
