use dont_touch::consts::*;
use dont_touch::entities::*;

#[test]
fn status_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
}

#[test]
fn bounds_use_each_entity_size() {
    let p = Player { x: 10, y: 20 };
    assert_eq!(p.bounds(), Square::new(10.0, 20.0, PLAYER_SIZE as f64));

    let f = Fruit { x: 5, y: 6 };
    assert_eq!(f.bounds(), Square::new(5.0, 6.0, FRUIT_SIZE as f64));

    let e = Enemy { x: 1.5, y: -2.5, vx: 2.0, vy: -2.0 };
    assert_eq!(e.bounds(), Square::new(1.5, -2.5, ENEMY_SIZE as f64));
}

#[test]
fn default_input_holds_nothing() {
    let input = TickInput::default();
    assert!(!input.left && !input.right && !input.up && !input.down);
}

#[test]
fn session_clone_is_independent() {
    let original = GameSession {
        player: Player { x: 400, y: 300 },
        fruit: Fruit { x: 50, y: 60 },
        enemies: Vec::new(),
        score: 0,
        high_score: 4,
        status: GameStatus::Playing,
        frame: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy { x: 5.0, y: 5.0, vx: 2.0, vy: 2.0 });

    assert_eq!(original.player.x, 400);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
