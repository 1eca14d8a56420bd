/// Rendering layer — all terminal drawing lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// round.  No game logic is performed; this module only translates world
/// coordinates into cells and state into terminal commands.

use std::f32::consts::FRAC_PI_4;
use std::io::Write;
use std::time::Instant;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use money_shooter::entities::{Enemy, RoundState};
use money_shooter::input::{new_round_button, world_to_cell, Rect, CELL_HEIGHT, CELL_WIDTH};
use money_shooter::popups::PopupBoard;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_COIN: Color = Color::DarkYellow;
const C_NOTE: Color = Color::Green;
const C_PROJECTILE: Color = Color::Cyan;
const C_POPUP_PLUS: Color = Color::Green;
const C_POPUP_MINUS: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_BUTTON: Color = Color::Green;

/// Notes are drawn wider than coins; anything at least this wide is a note.
const NOTE_WIDTH: f32 = 100.0;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &RoundState,
    popups: &PopupBoard,
    now: Instant,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for enemy in &state.enemies {
        draw_enemy(out, state, enemy)?;
    }
    for p in &state.projectiles {
        draw_at(out, state, p.x, p.y, "•", C_PROJECTILE)?;
    }
    draw_player(out, state)?;

    for popup in popups.iter() {
        let (x, y) = popup.position_at(now);
        let color = if popup.is_positive() { C_POPUP_PLUS } else { C_POPUP_MINUS };
        draw_at(out, state, x, y, &popup.label(), color)?;
    }

    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    if state.is_over() {
        draw_summary(out, state)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows(state).saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

fn columns(state: &RoundState) -> u16 {
    (state.width / CELL_WIDTH) as u16
}

fn rows(state: &RoundState) -> u16 {
    (state.height / CELL_HEIGHT) as u16
}

/// Print `text` centred on the cell holding world point `(x, y)`.
/// Off-screen points are skipped.
fn draw_at<W: Write>(
    out: &mut W,
    state: &RoundState,
    x: f32,
    y: f32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = world_to_cell(x, y, columns(state), rows(state)) else {
        return Ok(());
    };
    let col = col.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &RoundState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Balance: {} kr", state.score)))?;
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(format!("Best:    {} kr", state.high_score)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Arrow for the nearest of eight directions.  Screen y grows downward,
/// so a positive angle points down.
fn aim_glyph(angle: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = (angle / FRAC_PI_4).round() as i32;
    ARROWS[octant.rem_euclid(8) as usize]
}

fn draw_player<W: Write>(out: &mut W, state: &RoundState) -> std::io::Result<()> {
    // Sprite: a hub with the barrel one cell out along the aim.
    //   ◉→
    let p = &state.player;
    draw_at(out, state, p.x, p.y, "◉", C_PLAYER)?;
    let (sin, cos) = p.angle.sin_cos();
    draw_at(
        out,
        state,
        p.x + cos * CELL_WIDTH * 1.5,
        p.y + sin * CELL_HEIGHT * 1.5,
        aim_glyph(p.angle),
        C_PLAYER,
    )
}

fn draw_enemy<W: Write>(out: &mut W, state: &RoundState, enemy: &Enemy) -> std::io::Result<()> {
    // Coins are round, notes are square:  (5)  [100]
    let (label, color) = if enemy.width >= NOTE_WIDTH {
        (format!("[{}]", enemy.value), C_NOTE)
    } else {
        (format!("({})", enemy.value), C_COIN)
    };
    draw_at(out, state, enemy.x, enemy.y, &label, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &RoundState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows(state).saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("MOUSE : Aim   CLICK / SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Round summary overlay ─────────────────────────────────────────────────────

fn draw_summary<W: Write>(out: &mut W, state: &RoundState) -> std::io::Result<()> {
    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║     GAME  OVER     ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Balance this round: {} kr", state.score), Color::Yellow),
        (format!("Best: {} kr", state.high_score), Color::Yellow),
        ("Hits per denomination:".to_string(), Color::White),
    ];
    for (value, hits) in state.hit_stats.iter() {
        lines.push((format!("{:>4} kr: {:>3} hits", value, hits), Color::DarkGrey));
    }
    lines.push((
        format!("Total earned: {} kr", state.hit_stats.total_earned()),
        Color::White,
    ));

    let cx = columns(state) / 2;
    let start_row = (rows(state) / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    draw_button(out, &new_round_button(state.width, state.height))
}

fn draw_button<W: Write>(out: &mut W, rect: &Rect) -> std::io::Result<()> {
    let left = (rect.x / CELL_WIDTH).ceil().max(0.0) as u16;
    let top = (rect.y / CELL_HEIGHT).ceil().max(0.0) as u16;
    let width = ((rect.x + rect.width) / CELL_WIDTH) as u16;
    let width = width.saturating_sub(left).max(1) as usize;
    let bottom = ((rect.y + rect.height) / CELL_HEIGHT) as u16;

    out.queue(style::SetBackgroundColor(C_BUTTON))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    for row in top..bottom.max(top + 1) {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(" ".repeat(width)))?;
    }
    let label = "New round";
    let label_col = left + (width as u16).saturating_sub(label.len() as u16) / 2;
    out.queue(cursor::MoveTo(label_col, top))?;
    out.queue(Print(label))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}
