//! Key mapping from terminal events to game keys.

use blockfall_types::GameKey;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A translated key event, ready to feed into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMessage {
    /// Key pressed; the flag marks OS auto-repeat.
    Down(GameKey, bool),
    /// Key released. Terminals that support release events report them with
    /// the keyboard enhancement flags enabled.
    Up(GameKey),
}

/// Map a key code to a game key.
pub fn game_key(code: KeyCode) -> Option<GameKey> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameKey::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameKey::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameKey::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameKey::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameKey::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameKey::Hold),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Restart),

        _ => None,
    }
}

/// Translate a full key event into a core message, if the key is mapped.
pub fn key_message(event: KeyEvent) -> Option<KeyMessage> {
    let key = game_key(event.code)?;
    match event.kind {
        KeyEventKind::Press => Some(KeyMessage::Down(key, false)),
        KeyEventKind::Repeat => Some(KeyMessage::Down(key, true)),
        KeyEventKind::Release => Some(KeyMessage::Up(key)),
    }
}

/// Whether the key should quit the program.
pub fn should_quit(event: KeyEvent) -> bool {
    matches!(event.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL))
}
