//! Deterministic game simulation
//!
//! Everything in here is pure logic over a seeded RNG: same seed and same
//! command sequence means the same game, on native and wasm alike. The
//! platform layers feed commands in and read the state back out for
//! drawing and audio.

pub mod ball;
pub mod brick;
pub mod geom;
pub mod level;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Ball, Contact, ContactMeta, Zone};
pub use brick::{Brick, BrickField};
pub use geom::{Rect, Side};
pub use level::{CellTemplate, Layout, LayoutError, standard_levels};
pub use paddle::{Direction, Paddle};
pub use state::{Command, GameEvent, GamePhase, GameState};
pub use tick::tick;
