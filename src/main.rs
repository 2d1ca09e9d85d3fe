//! Terminal runner (default binary).
//!
//! Owns the frame loop and the monotonic clock: crossterm events are fed
//! into the core as key-down/key-up messages, and the core is ticked once
//! per frame with a millisecond timestamp. Rendering reads core state only.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::Game;
use blockfall::input::{key_message, should_quit, KeyMessage};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Frame interval (~60 FPS). Timers are wall-clock based, so this only
/// bounds render latency.
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let clock = Instant::now();
    let seed = 0x5eed ^ clock.elapsed().subsec_nanos();

    let mut game = Game::new(seed);
    game.start();

    let view = GameView;
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS);
    let mut next_frame = Instant::now() + frame;

    loop {
        // Input until the next frame boundary.
        let timeout = next_frame
            .saturating_duration_since(Instant::now());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if should_quit(key) {
                    return Ok(());
                }
                let now_ms = clock.elapsed().as_millis() as u64;
                match key_message(key) {
                    Some(KeyMessage::Down(game_key, is_repeat)) => {
                        game.key_down(game_key, is_repeat, now_ms);
                    }
                    Some(KeyMessage::Up(game_key)) => game.key_up(game_key),
                    None => {}
                }
            }
        }

        // Tick and render once per frame.
        if Instant::now() >= next_frame {
            next_frame += frame;
            game.tick(clock.elapsed().as_millis() as u64);

            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&game, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
        }
    }
}
