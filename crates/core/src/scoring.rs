//! Scoring module - clear scoring, bonuses, and the level/gravity curves
//!
//! Pure functions over the score tables in `blockfall-types`:
//!
//! - Line clears use distinct base tables for ordinary, full-T-spin, and
//!   mini-T-spin clears.
//! - A clear is "difficult" when it is a T-spin of any kind or a 4-line
//!   clear; back-to-back difficult clears multiply the base by 3/2 (floored)
//!   before the level multiplier.
//! - Combo bonus is `50 * combo * level`, where `combo` counts the
//!   consecutive clearing locks before this one (0 on the first clear of a
//!   streak).
//! - The perfect-clear bonus is added on top, without a level multiplier.

use blockfall_types::{
    SpinKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BONUS_BASE, GRAVITY_BASE_MS, GRAVITY_FLOOR_MS,
    GRAVITY_STEP_MS, HARD_DROP_POINTS, LINE_SCORES, PERFECT_CLEAR_BONUS, TSPIN_LINE_SCORES,
    TSPIN_MINI_LINE_SCORES, TSPIN_MINI_NO_CLEAR_BONUS, TSPIN_NO_CLEAR_BONUS,
};

/// Outcome of scoring one line clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    /// Base points after the back-to-back multiplier, before the level
    /// multiplier.
    pub base: u32,
    /// Combo bonus added on top of `base * level`.
    pub combo_bonus: u32,
    /// `base * level + combo_bonus`.
    pub total: u32,
    /// Whether this clear was difficult (T-spin or 4 lines).
    pub difficult: bool,
    /// Whether the back-to-back multiplier was applied.
    pub b2b_applied: bool,
}

/// Base points for a clear before any multiplier.
pub fn base_points(lines: usize, spin: SpinKind) -> u32 {
    match spin {
        SpinKind::Full => TSPIN_LINE_SCORES.get(lines).copied().unwrap_or(0),
        SpinKind::Mini => TSPIN_MINI_LINE_SCORES.get(lines).copied().unwrap_or(0),
        SpinKind::None => LINE_SCORES.get(lines).copied().unwrap_or(0),
    }
}

/// A difficult clear is any T-spin clear, or a 4-line clear.
pub fn is_difficult_clear(lines: usize, spin: SpinKind) -> bool {
    spin != SpinKind::None || lines == 4
}

/// Apply the 3/2 back-to-back multiplier, floored.
pub fn apply_b2b(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Combo bonus for a clear; `combo` is the pre-increment streak counter.
pub fn combo_bonus(combo: u32, level: u32) -> u32 {
    COMBO_BONUS_BASE.saturating_mul(combo).saturating_mul(level)
}

/// Score one clear of `lines > 0` rows.
pub fn score_clear(
    lines: usize,
    level: u32,
    spin: SpinKind,
    combo: u32,
    previous_b2b: bool,
) -> ClearScore {
    let difficult = is_difficult_clear(lines, spin);
    let b2b_applied = difficult && previous_b2b;

    let mut base = base_points(lines, spin);
    if b2b_applied {
        base = apply_b2b(base);
    }

    let combo_bonus = combo_bonus(combo, level);
    let total = base.saturating_mul(level).saturating_add(combo_bonus);

    ClearScore {
        base,
        combo_bonus,
        total,
        difficult,
        b2b_applied,
    }
}

/// Bonus for a lock that clears no lines but was a T-spin.
pub fn no_clear_spin_bonus(spin: SpinKind, level: u32) -> u32 {
    match spin {
        SpinKind::Full => TSPIN_NO_CLEAR_BONUS * level,
        SpinKind::Mini => TSPIN_MINI_NO_CLEAR_BONUS * level,
        SpinKind::None => 0,
    }
}

/// Bonus for emptying the entire field with this clear.
pub fn perfect_clear_bonus(lines: usize) -> u32 {
    PERFECT_CLEAR_BONUS.get(lines).copied().unwrap_or(0)
}

/// Level derived from total lines cleared (starts at 1, +1 every 10 lines).
pub fn level_for_lines(lines: u32) -> u32 {
    lines / 10 + 1
}

/// Gravity interval for a level: `max(100, 1000 - (level-1) * 50)` ms.
pub fn gravity_interval_ms(level: u32) -> u64 {
    let step = GRAVITY_STEP_MS.saturating_mul(level.saturating_sub(1) as u64);
    GRAVITY_BASE_MS.saturating_sub(step).max(GRAVITY_FLOOR_MS)
}

/// Points for a hard drop of `rows` rows.
pub fn hard_drop_points(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS)
}
