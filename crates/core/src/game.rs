//! Game module - the complete session state machine
//!
//! Ties the field, pieces, bag, and scoring together and owns every timer:
//! gravity, DAS/ARR auto-shift, soft drop, and lock delay with its bounded
//! reset budget. One `Game` value is the whole session; there are no globals.
//!
//! The collaborator drives it with `key_down`/`key_up` events and one
//! `tick(now_ms)` per display frame. Discrete actions (rotate, hold, hard
//! drop) are buffered on key-down and drained in arrival order at the start
//! of the next tick; the continuous axes (horizontal shift, soft drop) act
//! immediately on key-down and then repeat on their own DAS/ARR clocks, so
//! OS key auto-repeat is ignored wholesale.

use arrayvec::ArrayVec;

use crate::bag::PieceFeed;
use crate::field::Field;
use crate::pieces::{kick_sequence, Shape};
use crate::scoring;
use blockfall_types::{
    CellColor, GameKey, Phase, PieceKind, Rotation, Spin, SpinKind, ARR_INTERVAL_MS, DAS_DELAY_MS,
    FIELD_COLS, FIELD_ROWS, LOCK_DELAY_MS, MAX_LOCK_DELAY_RESETS, SOFT_DROP_ARR_MS,
    SOFT_DROP_POINTS, SPAWN_X, SPAWN_Y,
};

/// The currently falling piece.
///
/// Holds its own post-rotation shape matrix; replaced wholesale on spawn and
/// hold swaps. `Copy`, so nothing aliases the hold slot or the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Top-left of the shape bounding box in field coordinates. `y` may be
    /// negative while the piece is above the visible field.
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    /// Whether the last successful action was a rotation (feeds T-spin
    /// detection).
    pub last_move_was_rotation: bool,
}

impl ActivePiece {
    fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::spawn(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
            rotation: Rotation::North,
            last_move_was_rotation: false,
        }
    }

    pub fn color(&self) -> CellColor {
        self.kind.color()
    }
}

/// Horizontal auto-shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftDir {
    Left,
    Right,
}

impl ShiftDir {
    fn dx(self) -> i8 {
        match self {
            ShiftDir::Left => -1,
            ShiftDir::Right => 1,
        }
    }
}

/// DAS/ARR state for the horizontal axis.
#[derive(Debug, Clone, Copy)]
struct AutoShift {
    direction: Option<ShiftDir>,
    das_started_at: u64,
    arr_reference: u64,
    repeating: bool,
}

impl AutoShift {
    fn idle() -> Self {
        Self {
            direction: None,
            das_started_at: 0,
            arr_reference: 0,
            repeating: false,
        }
    }
}

/// Repeat state for the soft-drop axis (no DAS, only ARR).
#[derive(Debug, Clone, Copy)]
struct SoftDrop {
    active: bool,
    arr_reference: u64,
}

/// Discrete actions buffered between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiscreteAction {
    RotateCw,
    RotateCcw,
    Hold,
    HardDrop,
}

/// Complete game session state.
#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    feed: PieceFeed,

    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    back_to_back: bool,
    phase: Phase,
    started: bool,

    gravity_reference: Option<u64>,
    lock_delay_started: Option<u64>,
    lock_delay_resets: u8,
    auto_shift: AutoShift,
    soft_drop: SoftDrop,
    pending: ArrayVec<DiscreteAction, 16>,
}

impl Game {
    /// Create an idle session with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self {
            field: Field::new(),
            active: None,
            hold: None,
            can_hold: true,
            feed: PieceFeed::new(seed),
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            back_to_back: false,
            phase: Phase::Playing,
            started: false,
            gravity_reference: None,
            lock_delay_started: None,
            lock_delay_resets: 0,
            auto_shift: AutoShift::idle(),
            soft_drop: SoftDrop {
                active: false,
                arr_reference: 0,
            },
            pending: ArrayVec::new(),
        }
    }

    /// Spawn the first piece. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Atomically discard all in-progress state and begin a fresh session.
    ///
    /// The RNG stream continues from where it was rather than replaying the
    /// same piece sequence.
    pub fn reset(&mut self) {
        let seed = self.feed.rng_state();
        *self = Self::new(seed);
        self.start();
    }

    // --- Render query surface ---

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        self.feed.preview()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// The row the active piece would land on if dropped straight down.
    pub fn ghost_row(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while self.field.allows(&active.shape, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    // --- Input feed ---

    /// Feed a key-down event.
    ///
    /// `is_repeat` marks OS auto-repeat, which is ignored outright: the
    /// continuous axes implement their own repeat timing and discrete actions
    /// must not double-fire. `now_ms` anchors the DAS/ARR clocks.
    pub fn key_down(&mut self, key: GameKey, is_repeat: bool, now_ms: u64) {
        if is_repeat {
            return;
        }
        if key == GameKey::Restart {
            self.reset();
            return;
        }
        if !self.started || self.phase != Phase::Playing {
            return;
        }

        match key {
            GameKey::Left => self.press_shift(ShiftDir::Left, now_ms),
            GameKey::Right => self.press_shift(ShiftDir::Right, now_ms),
            GameKey::SoftDrop => {
                if !self.soft_drop.active {
                    self.soft_drop.active = true;
                    self.soft_drop.arr_reference = now_ms;
                    self.move_down();
                }
            }
            GameKey::RotateCw => self.push_pending(DiscreteAction::RotateCw),
            GameKey::RotateCcw => self.push_pending(DiscreteAction::RotateCcw),
            GameKey::Hold => self.push_pending(DiscreteAction::Hold),
            GameKey::HardDrop => self.push_pending(DiscreteAction::HardDrop),
            GameKey::Restart => unreachable!("handled above"),
        }
    }

    /// Feed a key-up event.
    pub fn key_up(&mut self, key: GameKey) {
        match key {
            GameKey::Left => self.release_shift(ShiftDir::Left),
            GameKey::Right => self.release_shift(ShiftDir::Right),
            GameKey::SoftDrop => self.soft_drop.active = false,
            _ => {}
        }
    }

    fn press_shift(&mut self, dir: ShiftDir, now_ms: u64) {
        if self.auto_shift.direction == Some(dir) {
            return;
        }
        self.move_horizontal(dir, now_ms);
        self.auto_shift = AutoShift {
            direction: Some(dir),
            das_started_at: now_ms,
            arr_reference: now_ms,
            repeating: false,
        };
    }

    fn release_shift(&mut self, dir: ShiftDir) {
        if self.auto_shift.direction == Some(dir) {
            self.auto_shift = AutoShift::idle();
        }
    }

    fn push_pending(&mut self, action: DiscreteAction) {
        // A full buffer only happens when no tick has run for 16 presses;
        // dropping the extras is harmless.
        let _ = self.pending.try_push(action);
    }

    // --- Per-frame update ---

    /// Advance the session to `now_ms`.
    ///
    /// Order within one tick: buffered discrete actions in arrival order,
    /// then gravity, soft drop, auto-shift, and finally the grounded/lock
    /// check.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.started || self.phase != Phase::Playing {
            return;
        }

        let pending = std::mem::take(&mut self.pending);
        for action in pending {
            if self.phase != Phase::Playing {
                break;
            }
            match action {
                DiscreteAction::RotateCw => {
                    self.rotate(Spin::Cw, now_ms);
                }
                DiscreteAction::RotateCcw => {
                    self.rotate(Spin::Ccw, now_ms);
                }
                DiscreteAction::Hold => {
                    self.hold();
                }
                DiscreteAction::HardDrop => self.hard_drop(),
            }
        }
        if self.phase != Phase::Playing {
            return;
        }

        // Gravity: one automatic row per elapsed interval, single-stepped.
        let gravity_interval = scoring::gravity_interval_ms(self.level);
        match self.gravity_reference {
            None => self.gravity_reference = Some(now_ms),
            Some(reference) => {
                if now_ms.saturating_sub(reference) > gravity_interval {
                    self.move_down();
                    self.gravity_reference = Some(now_ms);
                }
            }
        }

        // Soft drop: catch up across frame hitches.
        if self.soft_drop.active {
            while now_ms.saturating_sub(self.soft_drop.arr_reference) > SOFT_DROP_ARR_MS {
                self.move_down();
                self.soft_drop.arr_reference += SOFT_DROP_ARR_MS;
            }
        }

        // Horizontal auto-shift: DAS delay, then ARR catch-up.
        if let Some(dir) = self.auto_shift.direction {
            if !self.auto_shift.repeating
                && now_ms.saturating_sub(self.auto_shift.das_started_at) > DAS_DELAY_MS
            {
                self.auto_shift.repeating = true;
                self.auto_shift.arr_reference = now_ms;
            }
            if self.auto_shift.repeating {
                while now_ms.saturating_sub(self.auto_shift.arr_reference) > ARR_INTERVAL_MS {
                    self.move_horizontal(dir, now_ms);
                    self.auto_shift.arr_reference += ARR_INTERVAL_MS;
                }
            }
        }

        // Grounded / lock delay.
        if let Some(active) = self.active {
            let grounded = !self.field.allows(&active.shape, active.x, active.y + 1);
            if grounded {
                let started = *self.lock_delay_started.get_or_insert(now_ms);
                let since_grounded = now_ms.saturating_sub(started);
                if since_grounded > LOCK_DELAY_MS
                    || self.lock_delay_resets >= MAX_LOCK_DELAY_RESETS
                {
                    self.lock_active();
                }
            } else {
                self.lock_delay_started = None;
                self.lock_delay_resets = 0;
            }
        }
    }

    // --- Piece movement ---

    /// Restart the lock-delay window if the piece is grounded, spending one
    /// reset from the budget.
    fn refresh_lock_delay_if_grounded(&mut self, now_ms: u64) {
        if let Some(active) = self.active {
            if !self.field.allows(&active.shape, active.x, active.y + 1) {
                self.lock_delay_started = Some(now_ms);
                self.lock_delay_resets = self.lock_delay_resets.saturating_add(1);
            }
        }
    }

    fn move_horizontal(&mut self, dir: ShiftDir, now_ms: u64) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        if !self.field.allows(&active.shape, active.x + dir.dx(), active.y) {
            return false;
        }
        active.x += dir.dx();
        active.last_move_was_rotation = false;
        self.active = Some(active);
        self.refresh_lock_delay_if_grounded(now_ms);
        true
    }

    /// One downward step. A successful step is genuine progress: it clears
    /// the rotation flag, restores the full lock-delay reset budget, and
    /// scores one point (gravity and soft drop alike).
    fn move_down(&mut self) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        if !self.field.allows(&active.shape, active.x, active.y + 1) {
            return false;
        }
        active.y += 1;
        active.last_move_was_rotation = false;
        self.active = Some(active);
        self.lock_delay_resets = 0;
        self.score = self.score.saturating_add(SOFT_DROP_POINTS);
        true
    }

    /// Rotate with wall kicks.
    ///
    /// Kicks are tried in table order and the first fit is applied atomically
    /// (shape, origin, and rotation state together); the stored kick y is
    /// subtracted because the tables are encoded visually Y-up. A grounded
    /// rotation refreshes the lock delay and spends a reset, except when the
    /// kick pushed the piece's lowest occupied row further down, which
    /// restores the whole budget instead.
    fn rotate(&mut self, spin: Spin, now_ms: u64) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };

        let old_lowest = active.shape.lowest_row(active.y);
        let candidate = active.shape.rotated(spin);
        let to = match spin {
            Spin::Cw => active.rotation.cw(),
            Spin::Ccw => active.rotation.ccw(),
        };

        for &(kick_x, kick_y) in kick_sequence(active.kind, active.rotation, to, spin) {
            let nx = active.x + kick_x;
            let ny = active.y - kick_y;
            if !self.field.allows(&candidate, nx, ny) {
                continue;
            }

            active.shape = candidate;
            active.x = nx;
            active.y = ny;
            active.rotation = to;
            active.last_move_was_rotation = true;
            self.active = Some(active);

            if !self.field.allows(&candidate, nx, ny + 1) {
                self.refresh_lock_delay_if_grounded(now_ms);
                if candidate.lowest_row(ny) > old_lowest {
                    self.lock_delay_resets = 0;
                }
            }
            return true;
        }

        false
    }

    /// Drop straight down and lock immediately. Rows fall without the
    /// per-step point; 2 points per row are awarded instead. The rotation
    /// flag survives, so a rotated-in T still counts as a spin.
    fn hard_drop(&mut self) {
        let Some(mut active) = self.active else {
            return;
        };
        let mut distance: u32 = 0;
        while self.field.allows(&active.shape, active.x, active.y + 1) {
            active.y += 1;
            distance += 1;
        }
        self.active = Some(active);
        if distance > 0 {
            self.score = self.score.saturating_add(scoring::hard_drop_points(distance));
        }
        self.lock_active();
    }

    /// Swap the active piece with the hold slot, at most once per piece
    /// lifetime. The swapped-in piece is re-normalized to spawn position and
    /// rotation; an empty slot stores the current piece and spawns from the
    /// queue instead.
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let current = active.kind;
        match self.hold.take() {
            Some(held) => {
                self.active = Some(ActivePiece::spawn(held));
                self.hold = Some(current);
            }
            None => {
                self.hold = Some(current);
                self.spawn_piece();
            }
        }
        self.can_hold = false;
        true
    }

    // --- Lock / spawn ---

    /// Lock the active piece: classify the spin against the pre-lock
    /// position, write the piece into the field, clear lines, score, and
    /// spawn the next piece.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let spin = self.classify_spin(&active);
        self.field.lock(&active.shape, active.x, active.y, active.color());
        self.can_hold = true;

        let cleared = self.field.clear_full_lines();
        if cleared > 0 {
            let outcome =
                scoring::score_clear(cleared, self.level, spin, self.combo, self.back_to_back);
            self.score = self.score.saturating_add(outcome.total);
            self.back_to_back = outcome.difficult;
            self.combo += 1;
            self.lines += cleared as u32;
            self.level = scoring::level_for_lines(self.lines);
            if self.field.is_empty() {
                self.score = self
                    .score
                    .saturating_add(scoring::perfect_clear_bonus(cleared));
            }
        } else {
            self.combo = 0;
            let bonus = scoring::no_clear_spin_bonus(spin, self.level);
            if bonus > 0 {
                self.score = self.score.saturating_add(bonus);
                // A spin that clears nothing still keeps the chain alive; a
                // plain empty lock leaves the flag untouched.
                self.back_to_back = true;
            }
        }

        self.lock_delay_started = None;
        self.lock_delay_resets = 0;
        self.spawn_piece();
    }

    /// Pop the queue head as the new active piece.
    ///
    /// A spawn that is immediately invalid ends the session; the field is
    /// left untouched and the overlapping piece stays visible for the
    /// frontend to display.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.feed.next();
        let piece = ActivePiece::spawn(kind);
        let valid = self.field.allows(&piece.shape, piece.x, piece.y);
        self.active = Some(piece);
        if !valid {
            self.phase = Phase::GameOver;
        }
        valid
    }

    /// T-spin classification of the piece at its pre-lock position.
    ///
    /// Only a T whose last successful action was a rotation qualifies. The
    /// four bounding-box corners count as filled when out of horizontal
    /// bounds, below the floor, or occupied; with at least 3 filled, both
    /// front corners (selected by rotation state) filled makes it a full
    /// spin, anything less a mini.
    fn classify_spin(&self, piece: &ActivePiece) -> SpinKind {
        if piece.kind != PieceKind::T || !piece.last_move_was_rotation {
            return SpinKind::None;
        }

        let blocked = |dx: i8, dy: i8| {
            let x = piece.x + dx;
            let y = piece.y + dy;
            if x < 0 || x >= FIELD_COLS as i8 || y >= FIELD_ROWS as i8 {
                return true;
            }
            y >= 0 && matches!(self.field.get(x, y), Some(Some(_)))
        };

        const CORNERS: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];
        let filled = CORNERS.iter().filter(|&&(dx, dy)| blocked(dx, dy)).count();
        if filled < 3 {
            return SpinKind::None;
        }

        let front: [(i8, i8); 2] = match piece.rotation {
            Rotation::North => [(0, 0), (2, 0)],
            Rotation::East => [(2, 0), (2, 2)],
            Rotation::South => [(2, 2), (0, 2)],
            Rotation::West => [(0, 0), (0, 2)],
        };
        let front_filled = front.iter().filter(|&&(dx, dy)| blocked(dx, dy)).count();

        if front_filled == 2 {
            SpinKind::Full
        } else {
            SpinKind::Mini
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
