//! Terminal rendering for the game.
//!
//! The view layer is split in two: [`GameView`] maps core state into a
//! [`FrameBuffer`] (pure, unit-testable), and [`TerminalRenderer`] flushes a
//! framebuffer to the real terminal with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
