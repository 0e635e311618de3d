//! Frame drawing
//!
//! Each function queues terminal commands for one part of the game; `render`
//! flushes once per frame.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::{Viewport, colors};
use crate::sim::game::{Game, GamePhase};
use crate::sim::rect::Rect;

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, vp: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, game, vp)?;
    draw_edges(out, game, vp)?;
    draw_bricks(out, game, vp)?;

    let paddle = &game.field.paddle;
    if paddle.visible {
        fill(out, vp, &paddle.rect, colors::PADDLE, '▀')?;
    }
    if game.ball.visible {
        let span = vp.span(&game.ball.rect());
        out.queue(cursor::MoveTo(span.col, span.row))?;
        out.queue(style::SetForegroundColor(colors::BALL))?;
        out.queue(Print('●'))?;
    }

    draw_captions(out, game, vp)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.row(game.context().screen.bottom())))?;
    out.flush()?;
    Ok(())
}

fn fill<W: Write>(out: &mut W, vp: &Viewport, rect: &Rect, color: Color, ch: char) -> std::io::Result<()> {
    let span = vp.span(rect);
    out.queue(style::SetForegroundColor(color))?;
    for row in vp.rows(rect) {
        out.queue(cursor::MoveTo(span.col, row))?;
        out.queue(Print(ch.to_string().repeat(span.len as usize)))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, game: &Game, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(colors::HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}", game.score())))?;

    let round = game.round().caption();
    let width = vp.col(game.context().screen.width());
    out.queue(cursor::MoveTo((width / 2).saturating_sub(round.len() as u16 / 2), 0))?;
    out.queue(style::SetForegroundColor(colors::backdrop(game.round().backdrop())))?;
    out.queue(Print(&round))?;

    // One paddle-life sprite per spare life; the ball in play is not shown
    let life = game.context().sprites.paddle_life;
    let life_cells = vp.span(&Rect::new(0.0, 0.0, life.width, life.height)).len as usize;
    let lives = format!(
        "Lives:{}",
        vec!["▬".repeat(life_cells); spare_lives(game) as usize].join(" ")
    );
    out.queue(cursor::MoveTo(width.saturating_sub(lives.chars().count() as u16 + 1), 0))?;
    out.queue(style::SetForegroundColor(colors::HUD_LIVES))?;
    out.queue(Print(&lives))?;

    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(colors::HINT))?;
    out.queue(Print("←/→ or A/D move   Q quit"))?;
    Ok(())
}

fn spare_lives(game: &Game) -> u32 {
    game.lives().saturating_sub(1)
}

fn draw_edges<W: Write>(out: &mut W, game: &Game, vp: &Viewport) -> std::io::Result<()> {
    let edges = &game.round().edges;
    fill(out, vp, &edges.top.rect, colors::EDGE, '▄')?;
    fill(out, vp, &edges.left.rect, colors::EDGE, '█')?;
    fill(out, vp, &edges.right.rect, colors::EDGE, '█')?;
    Ok(())
}

fn draw_bricks<W: Write>(out: &mut W, game: &Game, vp: &Viewport) -> std::io::Result<()> {
    for brick in game.round().bricks.iter().filter(|b| b.visible()) {
        let span = vp.span(&brick.rect);
        out.queue(cursor::MoveTo(span.col, span.row))?;
        // Shimmer frames alternate between bright and dim
        let color = match brick.anim_frame() {
            Some(frame) if frame % 2 == 0 => Color::White,
            _ => colors::brick(brick.colour),
        };
        out.queue(style::SetForegroundColor(color))?;
        let body = if span.len > 2 {
            format!("[{}]", "■".repeat(span.len as usize - 2))
        } else {
            "■".repeat(span.len as usize)
        };
        out.queue(Print(body))?;
    }
    Ok(())
}

fn draw_captions<W: Write>(out: &mut W, game: &Game, vp: &Viewport) -> std::io::Result<()> {
    let screen = game.context().screen;
    let centre_col = vp.col(screen.center().x);
    let centre_row = vp.row(screen.center().y);

    let mut lines: Vec<String> = Vec::new();
    match game.phase() {
        GamePhase::GameOver => lines.push("GAME OVER".to_string()),
        GamePhase::Won => lines.push("YOU WIN!".to_string()),
        _ => {
            if let Some(sequence) = game.sequence() {
                if sequence.caption_visible() {
                    lines.push(game.round().caption());
                }
                if sequence.ready_visible() {
                    lines.push("Ready".to_string());
                }
            }
        }
    }
    if game.is_over() {
        lines.push(format!("Final score: {}", game.score()));
    }

    out.queue(style::SetForegroundColor(colors::CAPTION))?;
    for (i, line) in lines.iter().enumerate() {
        let col = centre_col.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, centre_row + 2 * i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
