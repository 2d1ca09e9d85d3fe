//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and timing
//! logic. It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: same seed and same timestamps produce identical games
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: runs in any environment (terminal, GUI, headless)
//!
//! # Module structure
//!
//! - [`field`]: 10x20 playfield with placement validation and line clearing
//! - [`pieces`]: shape matrices, wall-kick tables, and the active piece
//! - [`bag`]: 7-bag randomizer feeding the next-piece queue
//! - [`scoring`]: score calculation with T-spins, combos, and back-to-back
//! - [`game`]: the complete session state machine (gravity, DAS/ARR,
//!   soft drop, lock delay, hold, spawn, game over)
//!
//! # Game rules
//!
//! - **7-bag randomizer**: each kind appears exactly once per 7 spawns
//! - **Wall kicks**: standard rotation offsets, I piece with its own table
//! - **Lock delay**: 500ms once grounded, with a 15-reset budget that bounds
//!   infinity-spin stalling
//! - **Hold**: one slot, usable once per piece lifetime
//! - **T-spin detection**: mini/full from corner occupancy after a rotation
//! - **Scoring**: guideline-style tables with combo, back-to-back, and
//!   perfect-clear bonuses
//!
//! # Timing
//!
//! The session is driven by `Game::tick(now_ms)` once per display frame with
//! a monotonically increasing wall-clock timestamp. Key events arrive through
//! `Game::key_down` / `Game::key_up` between ticks; discrete actions are
//! buffered and drained in arrival order at the start of the next tick, so
//! every timer is frame-rate independent.
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::GameKey;
//!
//! let mut game = Game::new(12345);
//! game.start();
//!
//! // Feed input, then advance one frame.
//! game.key_down(GameKey::Left, false, 0);
//! game.key_down(GameKey::HardDrop, false, 0);
//! game.tick(16);
//!
//! assert!(game.score() > 0); // hard drop awards points
//! ```

pub mod bag;
pub mod field;
pub mod game;
pub mod pieces;
pub mod scoring;

pub use bag::PieceFeed;
pub use field::Field;
pub use game::{ActivePiece, Game};
pub use pieces::Shape;
