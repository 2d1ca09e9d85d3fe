//! Terminal input mapping.
//!
//! Translates `crossterm` key events into the core's input contract:
//! `KeyDown(key, is_repeat)` / `KeyUp(key)` over `GameKey`. The core owns
//! all repeat timing (DAS/ARR), so OS auto-repeat is passed through only as
//! the `is_repeat` flag for the core to discard. Unrecognized keys map to
//! nothing and are dropped here.

pub mod map;

pub use blockfall_types as types;

pub use map::{game_key, key_message, should_quit, KeyMessage};
