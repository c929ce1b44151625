//! Don't Let It Touch U: dodge the bouncing squares, grab the fruit.
//!
//! Core modules:
//! - `entities`: pure data (player, fruit, enemies, session)
//! - `compute`: collision, movement, difficulty and the per-frame tick
//! - `highscore`: the single persisted integer

pub mod compute;
pub mod entities;
pub mod highscore;

/// Fixed game constants. Everything is in arena pixel units.
pub mod consts {
    /// Arena dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;
    /// Simulation frames per second
    pub const FPS: u32 = 60;

    pub const PLAYER_SIZE: i32 = 30;
    /// Pixels moved per frame per held direction
    pub const PLAYER_SPEED: i32 = 5;

    pub const FRUIT_SIZE: i32 = 20;

    pub const ENEMY_SIZE: i32 = 30;
    /// Enemy speed per axis at score 0
    pub const BASE_ENEMY_SPEED: f64 = 2.0;
    /// Speed added per speed tier
    pub const SPEED_STEP: f64 = 0.5;
    /// Points per speed tier
    pub const SCORE_PER_SPEED_TIER: u32 = 5;
    /// Points per additional enemy
    pub const SCORE_PER_EXTRA_ENEMY: u32 = 3;
    pub const MAX_ENEMIES: usize = 5;

    /// High score file, relative to the working directory
    pub const HIGH_SCORE_FILE: &str = "highscore.txt";
}
