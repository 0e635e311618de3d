//! Arkanoid entry point
//!
//! Loads settings and sprite geometry, then runs the game loop in the
//! terminal. Logs go to stderr; set `RUST_LOG=info` and redirect stderr to
//! a file to keep them off the playfield.

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};

use arkanoid::platform::{FrameLimiter, GameClock, KeyTracker};
use arkanoid::renderer::{Viewport, render};
use arkanoid::sim::{Game, GameEvent};
use arkanoid::{GameContext, Settings};

const DEFAULT_SETTINGS_PATH: &str = "arkanoid.json";
const DEFAULT_ASSETS_PATH: &str = "assets/graphics";

/// How long the final screen stays up before the loop exits
const GAME_OVER_LINGER: Duration = Duration::from_secs(3);

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Arkanoid starting...");

    let settings = match Settings::load(&env_path("ARKANOID_SETTINGS", DEFAULT_SETTINGS_PATH)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            eprintln!("arkanoid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match GameContext::load(&settings, &env_path("ARKANOID_ASSETS", DEFAULT_ASSETS_PATH)) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Failed to load sprites: {}", e);
            eprintln!("arkanoid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match play(&settings, &ctx) {
        Ok(score) => {
            println!("Final score: {}", score);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("arkanoid: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Set up the terminal, run the game, and always restore the terminal
fn play(settings: &Settings, ctx: &GameContext) -> std::io::Result<u64> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = game_loop(&mut out, settings, ctx);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn game_loop<W: Write>(out: &mut W, settings: &Settings, ctx: &GameContext) -> std::io::Result<u64> {
    let clock = GameClock::new();
    let limiter = FrameLimiter::new(settings.game_speed);
    let mut keys = KeyTracker::new();
    let mut game = Game::new(ctx, settings, clock.now_ms());
    let (cols, rows) = terminal::size()?;
    let viewport = Viewport::fit(&ctx.screen, cols, rows);
    let mut over_since: Option<Instant> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain pending input without blocking
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                keys.record(&key, frame);
            }
        }
        if keys.quit_requested() {
            log::info!("Quit requested");
            break;
        }

        let input = keys.transitions(frame);
        game.update(clock.now_ms(), &input);

        for event in game.drain_events() {
            match event {
                GameEvent::BrickDestroyed { powerup: Some(kind), .. } => {
                    log::debug!("Power-up released: {:?}", kind);
                }
                GameEvent::GameOver { won } => {
                    log::info!("Game over (won: {}), score {}", won, game.score());
                }
                _ => {}
            }
        }

        render(out, &game, &viewport)?;

        if game.is_over() {
            let since = *over_since.get_or_insert(frame_start);
            if since.elapsed() >= GAME_OVER_LINGER {
                break;
            }
        }

        limiter.wait(frame_start);
    }

    Ok(game.score())
}
