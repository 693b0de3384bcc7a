//! Piece shape and spawn tests

use updown_tetris::core::{get_shape, Grid, Piece, PieceFactory};
use updown_tetris::types::PieceKind;

#[test]
fn test_shape_sizes() {
    assert_eq!(get_shape(PieceKind::I).size(), 4);
    assert_eq!(get_shape(PieceKind::O).size(), 2);
    for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(get_shape(kind).size(), 3);
    }
}

#[test]
fn test_every_shape_has_four_cells_in_its_colour() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        assert_eq!(shape.occupied().count(), 4, "{kind:?}");
        for (row, col) in shape.occupied() {
            assert_eq!(shape.get(row as usize, col as usize), kind.color());
        }
    }
}

#[test]
fn test_every_kind_spawns_validly_on_empty_grid() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!(piece.y, 19);
        assert!(piece.is_valid(&grid), "{kind:?}");
        // Spawn cells hug the spawn edge.
        assert!(piece.cells().all(|(_, y)| (17..=19).contains(&y)));
    }
}

#[test]
fn test_rotation_has_order_four() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let back = shape.rotated().rotated().rotated().rotated();
        assert_eq!(back, shape, "{kind:?}");
    }
}

#[test]
fn test_i_rotation_becomes_vertical() {
    let vertical = get_shape(PieceKind::I).rotated();
    let cols: Vec<u8> = vertical.occupied().map(|(_, col)| col).collect();
    assert_eq!(cols, vec![2, 2, 2, 2]);
}

#[test]
fn test_factory_is_deterministic_and_covers_all_kinds() {
    let mut a = PieceFactory::new(2024);
    let mut b = PieceFactory::new(2024);
    let mut seen = [false; 7];
    for _ in 0..500 {
        let ka = a.next_kind();
        assert_eq!(ka, b.next_kind());
        seen[(ka.color() - 1) as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
