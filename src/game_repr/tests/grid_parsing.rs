use super::*;
use crate::error::InvalidPositionError;

// ==================== GRID BOUNDARY TESTS ====================

fn start_grid() -> Grid {
    grid_from_rows([
        "rnbqkbnr",
        "pppppppp",
        "........",
        "........",
        "........",
        "........",
        "PPPPPPPP",
        "RNBQKBNR",
    ])
    .unwrap()
}

#[test]
fn test_start_grid_is_starting_position() {
    let pos = Position::from_grid(&start_grid(), true).unwrap();
    assert_eq!(pos, Position::starting());
    assert_eq!(pos.hash(), compute_hash(&pos));
}

#[test]
fn test_grid_round_trip() {
    let pos = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let grid = pos.to_grid();
    assert_eq!(grid[0], ['r', '.', '.', '.', 'k', '.', '.', 'r']);
    assert_eq!(grid[3][3], 'P', "d5 sits on row 3");

    let back = Position::from_grid(&grid, true).unwrap();
    assert_eq!(back.to_grid(), grid);
    assert_eq!(back.bitboards(), pos.bitboards());
    assert_eq!(back.castling_rights(), CastlingRights::ALL);
}

#[test]
fn test_unknown_symbol_reports_location() {
    let mut grid = start_grid();
    grid[4][2] = 'x';
    assert_eq!(
        Position::from_grid(&grid, true),
        Err(InvalidPositionError::UnknownSymbol { symbol: 'x', row: 4, col: 2 })
    );
}

#[test]
fn test_missing_king_is_rejected() {
    let mut grid = start_grid();
    grid[0][4] = '.';
    assert_eq!(
        Position::from_grid(&grid, true),
        Err(InvalidPositionError::KingCount { color: Color::Black, count: 0 })
    );
}

#[test]
fn test_set_position_keeps_old_state_on_error() {
    let mut pos = Position::starting();
    let mut bad = start_grid();
    bad[7][4] = '.';
    assert!(pos.set_position(&bad, false).is_err());
    assert_eq!(pos, Position::starting());

    let grid = grid_from_rows([
        "....k...",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "R...K..R",
    ])
    .unwrap();
    pos.set_position(&grid, false).unwrap();
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(
        pos.castling_rights().bits(),
        CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE
    );
    assert_eq!(pos.en_passant(), None);
}

#[test]
fn test_displaced_king_grants_no_castling() {
    let grid = grid_from_rows([
        "r..k...r",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "R...K..R",
    ])
    .unwrap();
    let pos = Position::from_grid(&grid, true).unwrap();
    assert!(!pos.castling_rights().has(CastlingRights::BLACK_KINGSIDE));
    assert!(!pos.castling_rights().has(CastlingRights::BLACK_QUEENSIDE));
    assert!(pos.castling_rights().has(CastlingRights::WHITE_KINGSIDE));
}

#[test]
fn test_short_grid_row_is_rejected() {
    let rows = ["rnbqkbnr", "pppppppp", "", "", "", "", "PPPPPPPP", "RNBQKBNR"];
    assert_eq!(grid_from_rows(rows), Err(InvalidPositionError::MalformedGrid { row: 2, len: 0 }));

    let rows = ["rnbqkbnr", "pppppppp", "........", "........", ".........", "........", "PPPPPPPP", "RNBQKBNR"];
    assert_eq!(grid_from_rows(rows), Err(InvalidPositionError::MalformedGrid { row: 4, len: 9 }));
}
