//! Shared data types and constants
//!
//! Pure data with no external dependencies, usable from the core rules
//! engine, the input mapping layer, and the terminal renderer alike.
//!
//! # Field dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: (3, -1) — pieces enter partially above the visible
//!   field; negative rows are legal for the active piece only.
//!
//! # Timing constants
//!
//! All timing is wall-clock milliseconds, measured from caller-provided
//! timestamps rather than counted ticks:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_MS` | 500 | Grace period after grounding before forced lock |
//! | `MAX_LOCK_DELAY_RESETS` | 15 | Move/rotate resets allowed per piece |
//! | `DAS_DELAY_MS` | 133 | Hold time before horizontal auto-repeat starts |
//! | `ARR_INTERVAL_MS` | 1 | Interval between auto-repeated shifts |
//! | `SOFT_DROP_ARR_MS` | 30 | Interval between soft-drop rows |
//!
//! Gravity is derived from the level: `max(100, 1000 - (level - 1) * 50)` ms
//! per row (see [`GRAVITY_BASE_MS`], [`GRAVITY_STEP_MS`], [`GRAVITY_FLOOR_MS`]).

/// Field dimensions.
pub const FIELD_COLS: usize = 10;
pub const FIELD_ROWS: usize = 20;

/// Next-piece lookahead maintained by the piece feed.
pub const NEXT_QUEUE_SIZE: usize = 5;

/// Spawn origin for new pieces (top-left of the shape bounding box).
/// The y coordinate is above the visible field.
pub const SPAWN_X: i8 = 3;
pub const SPAWN_Y: i8 = -1;

/// Lock delay (milliseconds) and the cap on its reset budget.
pub const LOCK_DELAY_MS: u64 = 500;
pub const MAX_LOCK_DELAY_RESETS: u8 = 15;

/// DAS/ARR timing (milliseconds).
pub const DAS_DELAY_MS: u64 = 133;
pub const ARR_INTERVAL_MS: u64 = 1;
pub const SOFT_DROP_ARR_MS: u64 = 30;

/// Gravity curve: `max(GRAVITY_FLOOR_MS, GRAVITY_BASE_MS - (level-1) * GRAVITY_STEP_MS)`.
pub const GRAVITY_BASE_MS: u64 = 1000;
pub const GRAVITY_STEP_MS: u64 = 50;
pub const GRAVITY_FLOOR_MS: u64 = 100;

/// Base points per cleared-line count for ordinary clears.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Base points per cleared-line count for full T-spin clears.
pub const TSPIN_LINE_SCORES: [u32; 4] = [0, 800, 1200, 1600];

/// Base points per cleared-line count for mini T-spin clears.
pub const TSPIN_MINI_LINE_SCORES: [u32; 3] = [0, 200, 400];

/// Bonus for emptying the entire field, indexed by cleared-line count.
pub const PERFECT_CLEAR_BONUS: [u32; 5] = [0, 800, 1200, 1800, 2000];

/// Combo bonus is `COMBO_BONUS_BASE * combo * level`.
pub const COMBO_BONUS_BASE: u32 = 50;

/// Spin bonuses for locks that clear no lines (multiplied by level).
pub const TSPIN_NO_CLEAR_BONUS: u32 = 400;
pub const TSPIN_MINI_NO_CLEAR_BONUS: u32 = 100;

/// Back-to-back multiplier 3/2, floored to an integer.
pub const B2B_NUMERATOR: u32 = 3;
pub const B2B_DENOMINATOR: u32 = 2;

/// Drop points per row.
pub const SOFT_DROP_POINTS: u32 = 1;
pub const HARD_DROP_POINTS: u32 = 2;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    S,
    Z,
    L,
    J,
    O,
    I,
}

impl PieceKind {
    /// All seven kinds, in bag-refill order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Side length of the shape bounding box (I is 4x4, everything else 3x3).
    pub fn side(self) -> usize {
        match self {
            PieceKind::I => 4,
            _ => 3,
        }
    }

    /// Display color. This is the only identity a cell keeps after locking.
    pub fn color(self) -> CellColor {
        match self {
            PieceKind::T => CellColor::Purple,
            PieceKind::S => CellColor::Green,
            PieceKind::Z => CellColor::Red,
            PieceKind::L => CellColor::Orange,
            PieceKind::J => CellColor::Blue,
            PieceKind::O => CellColor::Yellow,
            PieceKind::I => CellColor::Cyan,
        }
    }
}

/// Color tag stored in locked field cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Purple,
    Green,
    Red,
    Orange,
    Blue,
    Yellow,
    Cyan,
}

/// Cell on the field (None = empty).
pub type Cell = Option<CellColor>;

/// Rotation states (North = spawn orientation, clockwise order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Stable index in 0..4 (North=0), used for kick-table and
    /// front-corner selection.
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Cw,
    Ccw,
}

/// Keys the core understands. The input layer maps device events onto these;
/// anything else is ignored before it reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Hold,
    HardDrop,
    Restart,
}

/// T-spin classification of a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinKind {
    None,
    Mini,
    Full,
}

/// Session phase. The core refuses gameplay mutations in `GameOver`;
/// only a restart leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}
