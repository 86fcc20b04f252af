//! Destructible bricks and the brick field
//!
//! Score and display color both come from the same health-fraction bucket,
//! so a brick pays out more the closer it is to breaking. The field keeps
//! destroyed bricks as tombstones so (row, col) keys stay stable while the
//! resolver loops within a tick.

use glam::Vec2;

use super::ball::Ball;
use super::geom::Rect;
use super::level::Layout;

/// CSS color name, consumed by the drawing surface
pub type Color = &'static str;

#[derive(Debug, Clone)]
pub struct Brick {
    pub rect: Rect,
    pub can_break: bool,
    curr_life: u32,
    max_life: u32,
    /// Point values per health bucket, lowest health first
    worth: Vec<u32>,
    /// Display colors per health bucket, lowest health first
    colors: Vec<Color>,
}

impl Brick {
    pub fn new(
        rect: Rect,
        can_break: bool,
        max_life: u32,
        worth: Vec<u32>,
        colors: Vec<Color>,
    ) -> Self {
        assert!(max_life >= 1, "brick life must be at least 1");
        assert!(!worth.is_empty() && !colors.is_empty(), "brick tables must be non-empty");
        Self {
            rect,
            can_break,
            curr_life: max_life,
            max_life,
            worth,
            colors,
        }
    }

    /// Index into a health-bucket table for the current life value
    fn bucket(&self, len: usize) -> usize {
        let raw = (self.curr_life as f32 / self.max_life as f32) * len as f32 - 1.0;
        (raw.round().max(0.0) as usize).min(len - 1)
    }

    /// Score for hitting the brick at its current life; unbreakable bricks
    /// are worth nothing
    pub fn score_value(&self) -> u32 {
        if self.can_break {
            self.worth[self.bucket(self.worth.len())]
        } else {
            0
        }
    }

    /// Display color for the current life value
    pub fn color(&self) -> Color {
        if self.can_break {
            self.colors[self.bucket(self.colors.len())]
        } else {
            "grey"
        }
    }

    /// Nearest point on the brick to `(x, y)`
    pub fn clamp(&self, x: f32, y: f32) -> Vec2 {
        self.rect.clamp_point(x, y)
    }

    /// Take one hit. Returns true iff the brick just broke; unbreakable
    /// bricks are a permanent no-op.
    pub fn register_impact(&mut self) -> bool {
        if self.can_break {
            self.curr_life -= 1;
            return self.curr_life == 0;
        }
        false
    }

    pub fn curr_life(&self) -> u32 {
        self.curr_life
    }
}

/// A brick located by the resolver, with the contact point that struck it
#[derive(Debug, Clone, Copy)]
pub struct BrickHit {
    pub row: usize,
    pub col: usize,
    pub point: Vec2,
}

struct Slot {
    brick: Brick,
    /// Destroyed bricks are tombstoned rather than spliced out, keeping
    /// (row, col) stable for hits found earlier in the same tick
    removed: bool,
}

/// Row-major field of bricks; rows are positioned top-to-bottom on the
/// cell grid
pub struct BrickField {
    rows: Vec<Vec<Slot>>,
    cell: f32,
    breakables: u32,
    max_breakables: u32,
}

impl BrickField {
    /// Instantiate the field from a validated layout
    pub fn from_layout(layout: &Layout, cell: f32) -> Self {
        let mut rows = Vec::with_capacity(layout.rows().len());
        let mut breakables = 0;

        for (r, row) in layout.rows().iter().enumerate() {
            let mut slots = Vec::new();
            let mut next_loc = 0u32;

            for template in row {
                if template.is_brick {
                    let rect = Rect::new(
                        next_loc as f32 * cell,
                        r as f32 * cell,
                        template.size as f32 * cell,
                        cell,
                    );
                    slots.push(Slot {
                        brick: Brick::new(
                            rect,
                            template.can_break,
                            template.life,
                            template.worth.clone(),
                            template.colors.clone(),
                        ),
                        removed: false,
                    });
                    if template.can_break {
                        breakables += 1;
                    }
                }
                next_loc += template.size;
            }
            rows.push(slots);
        }

        Self {
            rows,
            cell,
            breakables,
            max_breakables: breakables,
        }
    }

    /// Breakable bricks still standing
    pub fn breakables(&self) -> u32 {
        self.breakables
    }

    /// True once every breakable brick is gone
    pub fn cleared(&self) -> bool {
        self.breakables == 0
    }

    /// Fraction of breakable bricks destroyed, the ball's difficulty ramp
    pub fn accel_factor(&self) -> f32 {
        if self.max_breakables == 0 {
            return 0.0;
        }
        (self.max_breakables - self.breakables) as f32 / self.max_breakables as f32
    }

    /// First brick the ball intersects, walking rows top to bottom gated by
    /// each row's vertical band
    pub fn find_hit(&self, ball: &Ball) -> Option<BrickHit> {
        for (r, row) in self.rows.iter().enumerate() {
            if !ball.band_overlaps(r as f32 * self.cell, (r + 1) as f32 * self.cell) {
                continue;
            }
            for (c, slot) in row.iter().enumerate() {
                if slot.removed {
                    continue;
                }
                let point = slot.brick.clamp(ball.pos.x, ball.pos.y);
                if ball.is_struck(point) {
                    return Some(BrickHit { row: r, col: c, point });
                }
            }
        }
        None
    }

    /// Score payout for hitting the brick at (row, col) right now
    pub fn score_at(&self, row: usize, col: usize) -> u32 {
        self.rows[row][col].brick.score_value()
    }

    /// Apply one impact to the brick at (row, col); tombstones it and
    /// decrements the breakable counter on destruction. Returns true iff
    /// the brick broke.
    pub fn register_impact(&mut self, row: usize, col: usize) -> bool {
        let slot = &mut self.rows[row][col];
        debug_assert!(!slot.removed, "impact on a tombstoned brick");
        if slot.brick.register_impact() {
            slot.removed = true;
            self.breakables -= 1;
            return true;
        }
        false
    }

    /// Live bricks, for rendering
    pub fn iter_live(&self) -> impl Iterator<Item = &Brick> {
        self.rows
            .iter()
            .flatten()
            .filter(|s| !s.removed)
            .map(|s| &s.brick)
    }
}
