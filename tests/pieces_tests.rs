//! Pieces tests - shape matrices, rotation transforms, and kick tables.

use blockfall::core::pieces::kick_sequence;
use blockfall::core::Shape;
use blockfall::types::{PieceKind, Rotation, Spin};

#[test]
fn every_kind_spawns_with_four_minos() {
    for kind in PieceKind::ALL {
        let shape = Shape::spawn(kind);
        assert_eq!(shape.minos().len(), 4, "{:?}", kind);
        assert_eq!(shape.side(), kind.side());
    }
}

#[test]
fn spawn_matrices_match_the_piece_definitions() {
    let cases: [(PieceKind, [(i8, i8); 4]); 7] = [
        (PieceKind::T, [(1, 0), (0, 1), (1, 1), (2, 1)]),
        (PieceKind::S, [(1, 0), (2, 0), (0, 1), (1, 1)]),
        (PieceKind::Z, [(0, 0), (1, 0), (1, 1), (2, 1)]),
        (PieceKind::L, [(2, 0), (0, 1), (1, 1), (2, 1)]),
        (PieceKind::J, [(0, 0), (0, 1), (1, 1), (2, 1)]),
        (PieceKind::O, [(1, 0), (2, 0), (1, 1), (2, 1)]),
        (PieceKind::I, [(0, 1), (1, 1), (2, 1), (3, 1)]),
    ];
    for (kind, expected) in cases {
        let minos: Vec<_> = Shape::spawn(kind).minos().into_iter().collect();
        assert_eq!(minos, expected, "{:?}", kind);
    }
}

#[test]
fn opposite_rotations_cancel_bitwise() {
    for kind in PieceKind::ALL {
        let shape = Shape::spawn(kind);
        assert_eq!(shape.rotated(Spin::Cw).rotated(Spin::Ccw), shape);
        assert_eq!(shape.rotated(Spin::Ccw).rotated(Spin::Cw), shape);
    }
}

#[test]
fn rotation_preserves_mino_count() {
    for kind in PieceKind::ALL {
        let mut shape = Shape::spawn(kind);
        for _ in 0..4 {
            shape = shape.rotated(Spin::Cw);
            assert_eq!(shape.minos().len(), 4);
        }
    }
}

#[test]
fn kick_sequences_have_five_offsets_starting_unkicked() {
    for kind in PieceKind::ALL {
        for from in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            for spin in [Spin::Cw, Spin::Ccw] {
                let to = match spin {
                    Spin::Cw => from.cw(),
                    Spin::Ccw => from.ccw(),
                };
                let kicks = kick_sequence(kind, from, to, spin);
                assert_eq!(kicks.len(), 5);
                assert_eq!(kicks[0], (0, 0));
            }
        }
    }
}

#[test]
fn jlstz_kick_rows_match_the_standard_tables() {
    // 0->1 and its reverse 1->0 are sign mirrors of each other.
    let cw = kick_sequence(PieceKind::T, Rotation::North, Rotation::East, Spin::Cw);
    let ccw = kick_sequence(PieceKind::T, Rotation::East, Rotation::North, Spin::Ccw);
    assert_eq!(cw, &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]);
    assert_eq!(ccw, &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]);
}

#[test]
fn i_kick_rows_match_the_standard_tables() {
    let cw = kick_sequence(PieceKind::I, Rotation::North, Rotation::East, Spin::Cw);
    assert_eq!(cw, &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]);
    let ccw = kick_sequence(PieceKind::I, Rotation::North, Rotation::West, Spin::Ccw);
    assert_eq!(ccw, &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]);
}
