//! Game-logic functions.
//!
//! Every public function works on plain entity data (or the whole
//! `GameSession`) passed in by reference.  No terminal or file I/O happens
//! here; randomness comes through an injected RNG so tests can seed it.

use rand::Rng;

use crate::consts::{
    BASE_ENEMY_SPEED, ENEMY_SIZE, FRUIT_SIZE, MAX_ENEMIES, PLAYER_SIZE, PLAYER_SPEED,
    SCORE_PER_EXTRA_ENEMY, SCORE_PER_SPEED_TIER, SCREEN_HEIGHT, SCREEN_WIDTH, SPEED_STEP,
};
use crate::entities::{
    Bounded, Enemy, Fruit, GameEvent, GameSession, GameStatus, Player, Square, TickInput,
};

// ── Collision ────────────────────────────────────────────────────────────────

/// True when the two squares overlap.  Edges that merely touch do not count.
pub fn collides(a: Square, b: Square) -> bool {
    a.x < b.x + b.size && a.x + a.size > b.x && a.y < b.y + b.size && a.y + a.size > b.y
}

// ── Difficulty tiers ─────────────────────────────────────────────────────────

/// Enemies that should be on the field at `score`.
pub fn target_enemy_count(score: u32) -> usize {
    (1 + (score / SCORE_PER_EXTRA_ENEMY) as usize).min(MAX_ENEMIES)
}

/// Per-axis enemy speed at `score`.  The tier is an integer division, only
/// the step multiply is done in floating point.
pub fn enemy_speed_for(score: u32) -> f64 {
    BASE_ENEMY_SPEED + (score / SCORE_PER_SPEED_TIER) as f64 * SPEED_STEP
}

/// Grow the enemy list up to the target for `score`.  Never removes enemies.
pub fn sync_enemy_count(enemies: &mut Vec<Enemy>, score: u32, rng: &mut impl Rng) {
    let target = target_enemy_count(score);
    while enemies.len() < target {
        enemies.push(spawn_enemy(score, rng));
    }
}

/// Overwrite every enemy's speed with the magnitude for `score`, keeping the
/// direction of travel on each axis.  A zero component counts as negative.
pub fn sync_enemy_speeds(enemies: &mut [Enemy], score: u32) {
    let speed = enemy_speed_for(score);
    for enemy in enemies.iter_mut() {
        enemy.vx = if enemy.vx > 0.0 { speed } else { -speed };
        enemy.vy = if enemy.vy > 0.0 { speed } else { -speed };
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// New enemy somewhere on the arena, heading in a random diagonal direction.
pub fn spawn_enemy(score: u32, rng: &mut impl Rng) -> Enemy {
    let speed = enemy_speed_for(score);
    let x = rng.gen_range(0..=SCREEN_WIDTH - ENEMY_SIZE);
    let y = rng.gen_range(0..=SCREEN_HEIGHT - ENEMY_SIZE);
    let vx = if rng.gen_bool(0.5) { speed } else { -speed };
    let vy = if rng.gen_bool(0.5) { speed } else { -speed };
    Enemy {
        x: x as f64,
        y: y as f64,
        vx,
        vy,
    }
}

pub fn spawn_fruit(rng: &mut impl Rng) -> Fruit {
    Fruit {
        x: rng.gen_range(0..=SCREEN_WIDTH - FRUIT_SIZE),
        y: rng.gen_range(0..=SCREEN_HEIGHT - FRUIT_SIZE),
    }
}

fn centered_player() -> Player {
    Player {
        x: SCREEN_WIDTH / 2,
        y: SCREEN_HEIGHT / 2,
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Apply one frame of held directions, keeping the player on the arena.
pub fn move_player(player: &mut Player, input: &TickInput) {
    if input.left {
        player.x = (player.x - PLAYER_SPEED).max(0);
    }
    if input.right {
        player.x = (player.x + PLAYER_SPEED).min(SCREEN_WIDTH - PLAYER_SIZE);
    }
    if input.up {
        player.y = (player.y - PLAYER_SPEED).max(0);
    }
    if input.down {
        player.y = (player.y + PLAYER_SPEED).min(SCREEN_HEIGHT - PLAYER_SIZE);
    }
}

/// Advance every enemy by its velocity and bounce off the arena edges.
///
/// Position is never clamped: an enemy that is still at or past an edge on
/// the next frame has that axis flipped again.
pub fn move_enemies(enemies: &mut [Enemy]) {
    let max_x = (SCREEN_WIDTH - ENEMY_SIZE) as f64;
    let max_y = (SCREEN_HEIGHT - ENEMY_SIZE) as f64;
    for enemy in enemies.iter_mut() {
        enemy.x += enemy.vx;
        enemy.y += enemy.vy;

        if enemy.x <= 0.0 || enemy.x >= max_x {
            enemy.vx = -enemy.vx;
        }
        if enemy.y <= 0.0 || enemy.y >= max_y {
            enemy.vy = -enemy.vy;
        }
    }
}

// ── Session lifecycle ────────────────────────────────────────────────────────

/// Fresh session with one enemy on the field.
pub fn new_session(high_score: u32, rng: &mut impl Rng) -> GameSession {
    let mut session = GameSession {
        player: centered_player(),
        fruit: spawn_fruit(rng),
        enemies: Vec::with_capacity(MAX_ENEMIES),
        score: 0,
        high_score,
        status: GameStatus::Playing,
        frame: 0,
    };
    session.enemies.push(spawn_enemy(0, rng));
    session
}

/// Start over after a game over.  The high score survives.
pub fn reset(session: &mut GameSession, rng: &mut impl Rng) {
    session.player = centered_player();
    session.fruit = spawn_fruit(rng);
    session.score = 0;
    session.status = GameStatus::Playing;
    session.frame = 0;
    session.enemies.clear();
    session.enemies.push(spawn_enemy(0, rng));
    log::info!("Session reset (high score {})", session.high_score);
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session by one frame.  Does nothing once the game is over.
///
/// Order: player movement, enemy movement, fruit pickup (which also runs the
/// difficulty controller), then the enemy hit check.
pub fn tick(session: &mut GameSession, input: &TickInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.status != GameStatus::Playing {
        return events;
    }
    session.frame += 1;

    move_player(&mut session.player, input);
    move_enemies(&mut session.enemies);

    if collides(session.player.bounds(), session.fruit.bounds()) {
        session.score += 1;
        session.fruit = spawn_fruit(rng);
        sync_enemy_count(&mut session.enemies, session.score, rng);
        sync_enemy_speeds(&mut session.enemies, session.score);
        log::debug!(
            "Fruit collected: score {} enemies {} speed {}",
            session.score,
            session.enemies.len(),
            enemy_speed_for(session.score)
        );
        events.push(GameEvent::FruitCollected {
            score: session.score,
            enemies: session.enemies.len(),
        });
    }

    let player = session.player.bounds();
    if session.enemies.iter().any(|e| collides(player, e.bounds())) {
        session.status = GameStatus::GameOver;
        let new_high_score = session.score > session.high_score;
        if new_high_score {
            session.high_score = session.score;
        }
        log::info!(
            "Game over at frame {}: score {} (high score {})",
            session.frame,
            session.score,
            session.high_score
        );
        events.push(GameEvent::GameOver {
            score: session.score,
            new_high_score,
        });
    }

    events
}
