//! Legal move generation cross-checked against the `chess` crate
//!
//! Fixed positions compare the full legal move sets; random playouts
//! (seeded, so failures reproduce) walk both generators through the same
//! games and compare at every step.

use std::collections::BTreeSet;
use std::str::FromStr;

use chess_search::game_repr::{compute_hash, Move, Position, Type};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const POSITIONS: [&str; 8] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    // En passant available, and one that would expose the king
    "8/8/8/KPp4r/8/8/8/6k1 w - c6 0 2",
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
];

fn ours(pos: &Position) -> BTreeSet<String> {
    pos.legal_moves().iter().map(|m| m.to_string()).collect()
}

fn reference(board: &chess::Board) -> BTreeSet<String> {
    chess::MoveGen::new_legal(board).map(|m| m.to_string()).collect()
}

fn to_reference_move(mv: Move) -> chess::ChessMove {
    let square = |sq: usize| chess::Square::make_square(chess::Rank::from_index(sq / 8), chess::File::from_index(sq % 8));
    let promotion = mv.promoted_to().map(|t| match t {
        Type::Queen => chess::Piece::Queen,
        Type::Rook => chess::Piece::Rook,
        Type::Bishop => chess::Piece::Bishop,
        _ => chess::Piece::Knight,
    });
    chess::ChessMove::new(square(mv.from()), square(mv.to()), promotion)
}

#[test]
fn test_fixed_positions_match_reference() {
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        let board = chess::Board::from_str(fen).unwrap();
        assert_eq!(ours(&pos), reference(&board), "move sets differ for {}", fen);
        assert_eq!(pos.legal_moves().len(), chess::MoveGen::new_legal(&board).len());
    }
}

#[test]
fn test_random_playouts_match_reference() {
    let mut rng = StdRng::seed_from_u64(0x00C0FFEE);

    for fen in POSITIONS {
        for _ in 0..4 {
            let mut pos = Position::from_fen(fen).unwrap();
            let mut board = chess::Board::from_str(fen).unwrap();

            for ply in 0..80 {
                let moves = pos.legal_moves();
                assert_eq!(
                    ours(&pos),
                    reference(&board),
                    "move sets differ after {} plies from {} at {}",
                    ply,
                    fen,
                    pos.to_fen()
                );
                assert_eq!(pos.hash(), compute_hash(&pos), "hash drifted at {}", pos.to_fen());

                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };
                pos.make_move(mv);
                board = board.make_move_new(to_reference_move(mv));
            }
        }
    }
}

#[test]
fn test_game_status_matches_reference() {
    let cases = [
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "7k/8/5KQ1/8/8/8/8/8 b - - 0 1",
        "3R2k1/5ppp/8/8/8/8/5PPP/4K3 b - - 0 1",
        "3Rk3/5ppp/8/8/8/8/5PPP/4K3 b - - 0 1",
    ];
    for fen in cases {
        let pos = Position::from_fen(fen).unwrap();
        let board = chess::Board::from_str(fen).unwrap();
        let us = pos.side_to_move();

        let expected_mate = board.status() == chess::BoardStatus::Checkmate;
        let expected_stalemate = board.status() == chess::BoardStatus::Stalemate;
        assert_eq!(pos.is_checkmate(us), expected_mate, "{}", fen);
        assert_eq!(pos.is_stalemate(us), expected_stalemate, "{}", fen);
    }
}
