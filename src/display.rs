//! Rendering layer — all terminal output lives here.
//!
//! The arena is simulated in pixels; this module scales it onto whatever
//! terminal size is current.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dont_touch::consts::{ENEMY_SIZE, FRUIT_SIZE, PLAYER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use dont_touch::entities::{GameSession, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TEXT: Color = Color::White;
const C_HIGH_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::Red;
const C_FRUIT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const TITLE: &str = "Don't Let It Touch U";

// ── Arena → terminal mapping ─────────────────────────────────────────────────

/// The block of terminal cells the arena is drawn into.
///
/// Row 0 is the HUD, row 1 and `height - 2` are the border, the last row is
/// the controls hint.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Viewport {
    col: u16,
    row: u16,
    width: u16,
    height: u16,
}

impl Viewport {
    fn for_terminal(width: u16, height: u16) -> Self {
        Self {
            col: 1,
            row: 2,
            width: width.saturating_sub(2).max(1),
            height: height.saturating_sub(4).max(1),
        }
    }
}

/// Map the pixel span `[pos, pos + size)` on an axis of length `arena` onto
/// `cells` terminal cells.  Returns `(first_cell, cell_count)`; every visible
/// entity covers at least one cell.
fn scale_span(pos: f64, size: f64, arena: f64, cells: u16) -> (u16, u16) {
    let cells_f = cells as f64;
    let start = (pos.max(0.0) * cells_f / arena).floor().min(cells_f - 1.0);
    let end = ((pos + size) * cells_f / arena).ceil().min(cells_f);
    let len = (end - start).max(1.0);
    (start as u16, len as u16)
}

/// Cell containing the pixel coordinate `pos`.
fn scale_point(pos: f64, arena: f64, cells: u16) -> u16 {
    let cells_f = cells as f64;
    (pos.max(0.0) * cells_f / arena).floor().min(cells_f - 1.0) as u16
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width` × `height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    session: &GameSession,
    (width, height): (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::for_terminal(width, height);
    draw_border(out, width, height)?;

    match session.status {
        GameStatus::Playing => {
            draw_square(
                out,
                &view,
                session.player.x as f64,
                session.player.y as f64,
                PLAYER_SIZE as f64,
                C_PLAYER,
            )?;
            draw_fruit(out, &view, session)?;
            for enemy in &session.enemies {
                draw_square(out, &view, enemy.x, enemy.y, ENEMY_SIZE as f64, C_ENEMY)?;
            }
        }
        GameStatus::GameOver => draw_game_over(out, session, width, height)?,
    }

    draw_hud(out, session, width)?;
    draw_controls_hint(out, height)?;

    out.queue(style::ResetColor)?;
    out.flush()
}

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    let bottom = height.saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession, width: u16) -> std::io::Result<()> {
    // Score — left, always shown
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(format!("Score: {}", session.score)))?;

    // Title — centre
    let tx = (width / 2).saturating_sub(TITLE.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(Print(TITLE))?;

    // Best — right
    let best = format!("Best: {}", session.high_score);
    let bx = width.saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(C_HIGH_SCORE))?;
    out.queue(Print(&best))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_square<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f64,
    y: f64,
    size: f64,
    color: Color,
) -> std::io::Result<()> {
    let (col, cols) = scale_span(x, size, SCREEN_WIDTH as f64, view.width);
    let (row, rows) = scale_span(y, size, SCREEN_HEIGHT as f64, view.height);
    let block = "█".repeat(cols as usize);

    out.queue(style::SetForegroundColor(color))?;
    for r in row..row + rows {
        out.queue(cursor::MoveTo(view.col + col, view.row + r))?;
        out.queue(Print(&block))?;
    }
    Ok(())
}

fn draw_fruit<W: Write>(out: &mut W, view: &Viewport, session: &GameSession) -> std::io::Result<()> {
    let half = (FRUIT_SIZE / 2) as f64;
    let col = scale_point(session.fruit.x as f64 + half, SCREEN_WIDTH as f64, view.width);
    let row = scale_point(session.fruit.y as f64 + half, SCREEN_HEIGHT as f64, view.height);

    out.queue(cursor::MoveTo(view.col + col, view.row + row))?;
    out.queue(style::SetForegroundColor(C_FRUIT))?;
    out.queue(Print("●"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / W A S D : Move   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Score: {}", session.score);
    let high_line = format!("High Score: {}", session.high_score);
    let lines: &[(&str, Color)] = &[
        ("GAME OVER!", C_TEXT),
        (&score_line, C_TEXT),
        (&high_line, C_HIGH_SCORE),
        ("", C_TEXT),
        ("Press Ctrl (or R) to restart", C_TEXT),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_at_origin_starts_at_first_cell() {
        assert_eq!(scale_span(0.0, 30.0, 800.0, 80), (0, 3));
    }

    #[test]
    fn span_at_far_edge_stays_inside() {
        // 770..800 px on 80 cells → cells 77, 78, 79
        assert_eq!(scale_span(770.0, 30.0, 800.0, 80), (77, 3));
    }

    #[test]
    fn span_covers_at_least_one_cell() {
        // 30 px on a 10-cell axis of 800 px is well under a cell
        let (_, len) = scale_span(400.0, 30.0, 800.0, 10);
        assert_eq!(len, 1);
    }

    #[test]
    fn span_clamps_enemy_past_left_edge() {
        let (start, len) = scale_span(-1.5, 30.0, 800.0, 80);
        assert_eq!(start, 0);
        assert!(len >= 1);
    }

    #[test]
    fn span_clamps_enemy_past_right_edge() {
        let (start, len) = scale_span(801.0, 30.0, 800.0, 80);
        assert_eq!(start, 79);
        assert_eq!(len, 1);
    }

    #[test]
    fn point_maps_centre_to_middle_cell() {
        assert_eq!(scale_point(400.0, 800.0, 80), 40);
        assert_eq!(scale_point(799.0, 800.0, 80), 79);
    }

    #[test]
    fn viewport_leaves_room_for_hud_border_and_hint() {
        let v = Viewport::for_terminal(80, 24);
        assert_eq!(v, Viewport { col: 1, row: 2, width: 78, height: 20 });
    }
}
