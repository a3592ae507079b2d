use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Parse a FEN that the test author knows to be valid
pub fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("bad test FEN {:?}: {}", fen, e))
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], from: usize, to: usize) -> bool {
    moves.iter().any(|m| m.from() == from && m.to() == to)
}

/// Helper function to count moves of a specific type
pub fn count_move_type(moves: &[Move], move_type: MoveType) -> usize {
    moves.iter().filter(|m| m.move_type() == move_type).count()
}

/// Legal moves of the piece standing on `from`
pub fn moves_from(pos: &Position, from: usize) -> Vec<Move> {
    pos.legal_moves().into_iter().filter(|m| m.from() == from).collect()
}

/// Play a sequence of long algebraic moves, panicking on the first illegal one
pub fn play_line(pos: &mut Position, line: &[&str]) {
    for text in line {
        let mv = pos
            .parse_move(text)
            .unwrap_or_else(|| panic!("{} is not legal in {}", text, pos.to_fen()));
        pos.make_move(mv);
    }
}

// ==================== TEST MODULES ====================

mod king_movement;
mod pawn_movement;
mod check_detection;
mod grid_parsing;
mod perft;
