//! Pieces module - shape matrices and the wall-kick system
//!
//! Shapes are square bool matrices stored at their native side length (3x3,
//! or 4x4 for I), so 90-degree transforms are lossless and need no
//! re-centering. Wall kicks follow the standard rotation system: one shared
//! table for J/L/S/T/Z (O included) and a separate table for I.
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;
use blockfall_types::{PieceKind, Rotation, Spin};

/// Maximum shape side length (the I piece).
const MAX_SIDE: usize = 4;

/// A piece shape: a `side x side` bool matrix, rotated in place by the
/// 90-degree transforms. `Copy`, so hold slot, queue entries, and the active
/// piece never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    side: usize,
    cells: [[bool; MAX_SIDE]; MAX_SIDE],
}

impl Shape {
    /// The spawn-orientation shape for a piece kind.
    ///
    /// Matrices are written padded to 4x4; only the top-left `side x side`
    /// block is meaningful.
    pub fn spawn(kind: PieceKind) -> Self {
        #[rustfmt::skip]
        let (side, rows): (usize, [[u8; MAX_SIDE]; MAX_SIDE]) = match kind {
            PieceKind::T => (3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::S => (3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::Z => (3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::L => (3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::J => (3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::O => (3, [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::I => (4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        };

        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        for y in 0..side {
            for x in 0..side {
                cells[y][x] = rows[y][x] != 0;
            }
        }
        Self { side, cells }
    }

    /// Side length of the bounding box (3 or 4).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the cell at (x, y) inside the bounding box is filled.
    pub fn filled(&self, x: usize, y: usize) -> bool {
        x < self.side && y < self.side && self.cells[y][x]
    }

    /// The four filled offsets (dx, dy) from the bounding-box origin.
    pub fn minos(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for y in 0..self.side {
            for x in 0..self.side {
                if self.cells[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// The candidate shape after one 90-degree rotation.
    ///
    /// Clockwise maps cell (y, x) to (x, N-1-y); counter-clockwise maps
    /// (y, x) to (N-1-x, y). Rotating one way and then the other restores the
    /// original matrix bit for bit.
    pub fn rotated(&self, spin: Spin) -> Self {
        let n = self.side;
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        for y in 0..n {
            for x in 0..n {
                if self.cells[y][x] {
                    match spin {
                        Spin::Cw => cells[x][n - 1 - y] = true,
                        Spin::Ccw => cells[n - 1 - x][y] = true,
                    }
                }
            }
        }
        Self { side: n, cells }
    }

    /// The lowest field row any filled cell occupies when the shape's origin
    /// sits at `origin_y`. Feeds the rule that a kick which pushes the piece
    /// further down restores the lock-delay reset budget.
    pub fn lowest_row(&self, origin_y: i8) -> i8 {
        let mut lowest = -1;
        for y in 0..self.side {
            if self.cells[y].iter().any(|&c| c) {
                lowest = origin_y + y as i8;
            }
        }
        lowest
    }
}

/// One ordered kick sequence: the first entry is always (0, 0), i.e. the
/// un-kicked rotation is tried first. Order decides which kick wins.
pub type KickSequence = [(i8, i8); 5];

/// Kick table shared by every piece except I.
///
/// Offsets are (dx, dy) in the conventional visually-Y-up encoding; the
/// rotation handler subtracts dy when applying them to the row-increases-
/// downward field.
const JLSTZ_KICKS: [KickSequence; 8] = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I-piece kick table.
const I_KICKS: [KickSequence; 8] = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Table row for a rotation transition.
///
/// Clockwise rows are indexed by the source state, counter-clockwise rows by
/// the target state; the table interleaves them as written above.
fn kick_row(from: Rotation, to: Rotation, spin: Spin) -> usize {
    match spin {
        Spin::Cw => match from {
            Rotation::North => 0, // 0->1
            Rotation::East => 2,  // 1->2
            Rotation::South => 4, // 2->3
            Rotation::West => 6,  // 3->0
        },
        Spin::Ccw => match to {
            Rotation::North => 1, // 1->0
            Rotation::East => 3,  // 2->1
            Rotation::South => 5, // 3->2
            Rotation::West => 7,  // 0->3
        },
    }
}

/// The ordered kick offsets to try for a rotation of `kind` from `from` to
/// `to`.
pub fn kick_sequence(kind: PieceKind, from: Rotation, to: Rotation, spin: Spin) -> &'static KickSequence {
    let table = match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    &table[kick_row(from, to, spin)]
}
