mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use dont_touch::compute::{new_session, reset, tick};
use dont_touch::consts::FPS;
use dont_touch::entities::{GameEvent, GameSession, GameStatus, TickInput};
use dont_touch::highscore::{high_score_path, load_high_score, save_high_score};

const LOG_FILE: &str = "dont_touch.log";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Without release events a key counts as held while press/repeat events keep
/// arriving within this many frames (8 frames @ 60 FPS ≈ 133 ms, longer than
/// the gap between two OS auto-repeats).
const HOLD_WINDOW: u64 = 8;

/// Without release events, the gap between the first press and the first
/// auto-repeat is the OS initial repeat delay (up to ~660 ms).  A key with
/// no repeat yet stays held this long: 40 frames @ 60 FPS ≈ 667 ms.
const FIRST_REPEAT_WINDOW: u64 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
enum KeyAction {
    Quit,
    Restart,
}

/// Frames of the press that started a hold and of its latest refresh.
#[derive(Clone, Copy, Debug)]
struct HeldKey {
    pressed: u64,
    last_seen: u64,
}

/// Turns the raw key event stream into held directions and one-shot actions.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): keys stay held until
///   their `Release` event arrives, and a bare Ctrl tap is reported.
/// * **Classic terminals**: only `Press` events, OS auto-repeat shows up as
///   repeated presses.  Keys expire after `FIRST_REPEAT_WINDOW` frames until
///   the first repeat, then after `HOLD_WINDOW` frames of silence.
struct KeyTracker {
    releases_reported: bool,
    keys: HashMap<KeyCode, HeldKey>,
    /// Another key went down while Ctrl was held, so releasing Ctrl is part
    /// of a chord (Ctrl+C) rather than a restart tap.
    ctrl_chorded: bool,
}

fn is_ctrl(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Modifier(ModifierKeyCode::LeftControl)
            | KeyCode::Modifier(ModifierKeyCode::RightControl)
    )
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl KeyTracker {
    fn new(releases_reported: bool) -> Self {
        Self {
            releases_reported,
            keys: HashMap::new(),
            ctrl_chorded: false,
        }
    }

    fn fresh(&self, held: &HeldKey, frame: u64) -> bool {
        if self.releases_reported {
            return true;
        }
        let window = if held.last_seen == held.pressed {
            FIRST_REPEAT_WINDOW
        } else {
            HOLD_WINDOW
        };
        frame.saturating_sub(held.last_seen) <= window
    }

    fn is_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter()
            .any(|key| self.keys.get(key).map_or(false, |h| self.fresh(h, frame)))
    }

    /// Start a hold, or extend the current one if it hasn't expired.
    fn refresh(&mut self, code: KeyCode, frame: u64) {
        let ongoing = self
            .keys
            .get(&code)
            .filter(|h| self.fresh(h, frame))
            .copied();
        let held = match ongoing {
            Some(h) => HeldKey { last_seen: frame, ..h },
            None => HeldKey { pressed: frame, last_seen: frame },
        };
        self.keys.insert(code, held);
    }

    /// Ctrl restarts when tapped on its own and released; `R` restarts on
    /// press.  Ctrl alone is only reported by enhancement-capable terminals.
    fn handle(&mut self, key: KeyEvent, frame: u64) -> Option<KeyAction> {
        let KeyEvent { code, kind, modifiers, .. } = key;
        match kind {
            KeyEventKind::Press => {
                if is_ctrl(code) {
                    self.ctrl_chorded = false;
                } else if self.keys.keys().any(|k| is_ctrl(*k))
                    || modifiers.contains(KeyModifiers::CONTROL)
                {
                    self.ctrl_chorded = true;
                }
                self.refresh(code, frame);

                if is_quit(code, modifiers) {
                    Some(KeyAction::Quit)
                } else if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    Some(KeyAction::Restart)
                } else {
                    None
                }
            }
            KeyEventKind::Repeat => {
                self.refresh(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.keys.remove(&code);
                if is_ctrl(code) && !self.ctrl_chorded {
                    Some(KeyAction::Restart)
                } else {
                    None
                }
            }
        }
    }

    fn input(&self, frame: u64) -> TickInput {
        TickInput {
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            up: self.is_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.is_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key is pressed.  The frame in which quit arrives is
/// still simulated and drawn; a restart arriving in that frame is dropped.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    score_file: &Path,
    releases_reported: bool,
) -> std::io::Result<()> {
    let frame_time = Duration::from_secs(1) / FPS;
    let mut rng = thread_rng();
    let mut size = terminal::size()?;
    let mut tracker = KeyTracker::new(releases_reported);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut quit = false;
        let mut restart = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match tracker.handle(key, frame) {
                    Some(KeyAction::Quit) => quit = true,
                    Some(KeyAction::Restart) => restart = true,
                    None => {}
                },
                Event::Resize(width, height) => size = (width, height),
                _ => {}
            }
        }

        if restart && !quit && session.status == GameStatus::GameOver {
            reset(session, &mut rng);
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let input = tracker.input(frame);
        for event in tick(session, &input, &mut rng) {
            if let GameEvent::GameOver { score, new_high_score: true } = event {
                if let Err(e) = save_high_score(score_file, score) {
                    log::warn!("Could not save high score to {}: {}", score_file.display(), e);
                }
            }
        }

        display::render(out, session, size)?;

        if quit {
            log::info!("Quit requested");
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// The terminal is owned by the game, so logs go to a file in the temp dir.
/// `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let path = std::env::temp_dir().join(LOG_FILE);
    if let Ok(file) = File::create(&path) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn main() -> std::io::Result<()> {
    init_logging();
    log::info!("Don't Let It Touch U starting...");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events and bare modifier presses (for Ctrl restart).
    // Only kitty-protocol terminals support this; ask before the event thread
    // starts reading, since the query consumes the terminal's reply.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
            ))
            .is_ok();
    log::info!("Keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, keyboard_enhanced);
    if let Err(e) = &result {
        log::error!("Game loop failed: {}", e);
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    releases_reported: bool,
) -> std::io::Result<()> {
    let score_file = high_score_path();
    let high_score = load_high_score(&score_file);
    log::info!("Loaded high score {} from {}", high_score, score_file.display());

    let mut session = new_session(high_score, &mut thread_rng());
    game_loop(out, &mut session, rx, &score_file, releases_reported)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    const CTRL: KeyCode = KeyCode::Modifier(ModifierKeyCode::LeftControl);

    #[test]
    fn classic_hold_survives_initial_repeat_delay() {
        let mut keys = KeyTracker::new(false);
        keys.handle(press(KeyCode::Right), 1);
        // First OS repeat arrives ~500 ms later, at frame 31
        let dropped: Vec<u64> = (1..31).filter(|&f| !keys.input(f).right).collect();
        assert!(dropped.is_empty(), "held key reported released at {:?}", dropped);

        keys.handle(press(KeyCode::Right), 31);
        assert!(keys.input(31 + HOLD_WINDOW).right);
    }

    #[test]
    fn classic_hold_expires_after_repeats_stop() {
        let mut keys = KeyTracker::new(false);
        keys.handle(press(KeyCode::Left), 1);
        keys.handle(press(KeyCode::Left), 31);
        keys.handle(press(KeyCode::Left), 33);
        assert!(keys.input(33 + HOLD_WINDOW).left);
        assert!(!keys.input(34 + HOLD_WINDOW).left);
    }

    #[test]
    fn classic_single_tap_expires_after_first_repeat_window() {
        let mut keys = KeyTracker::new(false);
        keys.handle(press(KeyCode::Up), 1);
        assert!(keys.input(1 + FIRST_REPEAT_WINDOW).up);
        assert!(!keys.input(2 + FIRST_REPEAT_WINDOW).up);
    }

    #[test]
    fn enhanced_hold_lasts_until_release() {
        let mut keys = KeyTracker::new(true);
        keys.handle(press(KeyCode::Char('s')), 1);
        assert!(keys.input(1_000).down);
        keys.handle(release(KeyCode::Char('s')), 1_001);
        assert!(!keys.input(1_001).down);
    }

    #[test]
    fn r_restarts_on_press() {
        let mut keys = KeyTracker::new(false);
        assert_eq!(keys.handle(press(KeyCode::Char('r')), 1), Some(KeyAction::Restart));
    }

    #[test]
    fn ctrl_tap_restarts_on_release() {
        let mut keys = KeyTracker::new(true);
        assert_eq!(keys.handle(press(CTRL), 1), None);
        assert_eq!(keys.handle(release(CTRL), 2), Some(KeyAction::Restart));
    }

    #[test]
    fn ctrl_c_quits_without_restarting() {
        let mut keys = KeyTracker::new(true);
        assert_eq!(keys.handle(press(CTRL), 1), None);
        let c = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(keys.handle(c, 1), Some(KeyAction::Quit));
        assert_eq!(keys.handle(release(CTRL), 2), None);
    }

    #[test]
    fn quit_keys() {
        let mut keys = KeyTracker::new(false);
        assert_eq!(keys.handle(press(KeyCode::Char('q')), 1), Some(KeyAction::Quit));
        assert_eq!(keys.handle(press(KeyCode::Esc), 1), Some(KeyAction::Quit));
        assert_eq!(keys.handle(press(KeyCode::Char('x')), 1), None);
    }
}
