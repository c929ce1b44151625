//! All game entity types — pure data, no logic.

use crate::consts::{ENEMY_SIZE, FRUIT_SIZE, PLAYER_SIZE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

/// Axis-aligned square: top-left corner plus edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Square {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }
}

/// Anything that occupies a square on the arena.
pub trait Bounded {
    fn bounds(&self) -> Square;
}

// ── Player, fruit & enemy ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fruit {
    pub x: i32,
    pub y: i32,
}

/// A bouncing square. Spawned on whole pixels; fractional velocities move it
/// off the grid afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity added each frame (positive = rightward).
    pub vx: f64,
    /// Vertical velocity added each frame (positive = downward).
    pub vy: f64,
}

impl Bounded for Player {
    fn bounds(&self) -> Square {
        Square::new(self.x as f64, self.y as f64, PLAYER_SIZE as f64)
    }
}

impl Bounded for Fruit {
    fn bounds(&self) -> Square {
        Square::new(self.x as f64, self.y as f64, FRUIT_SIZE as f64)
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Square {
        Square::new(self.x, self.y, ENEMY_SIZE as f64)
    }
}

// ── Per-frame input & outcomes ────────────────────────────────────────────────

/// Directional keys held during this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Something the caller may want to react to (persist, log, ...).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Fruit eaten; carries the new score and enemy count.
    FruitCollected { score: u32, enemies: usize },
    /// Player touched an enemy. `new_high_score` is set when `score` beat
    /// the previous best and `high_score` was raised to it.
    GameOver { score: u32, new_high_score: bool },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One play-through plus the best score seen so far.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub fruit: Fruit,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    /// Frames simulated since the last reset.
    pub frame: u64,
}
