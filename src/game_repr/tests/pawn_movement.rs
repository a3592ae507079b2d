use super::*;

// ==================== PAWN MOVEMENT TESTS ====================

#[test]
fn test_pawn_single_and_double_push() {
    let pos = Position::starting();
    let moves = moves_from(&pos, 12); // e2

    assert_eq!(moves.len(), 2);
    assert!(has_move(&moves, 12, 20));
    assert!(has_move(&moves, 12, 28));
    assert_eq!(count_move_type(&moves, MoveType::DoublePush), 1);
}

#[test]
fn test_blocked_pawn_has_no_pushes() {
    let pos = pos("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    assert!(moves_from(&pos, 12).is_empty());
}

#[test]
fn test_double_push_needs_both_squares_empty() {
    let pos = pos("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
    let moves = moves_from(&pos, 12);
    assert!(has_move(&moves, 12, 20));
    assert!(!has_move(&moves, 12, 28));
}

#[test]
fn test_pawn_captures_diagonally_only() {
    let pos = pos("4k3/8/8/3ppp2/4P3/8/8/4K3 w - - 0 1");
    let moves = moves_from(&pos, 28); // e4

    assert_eq!(moves.len(), 2);
    assert!(has_move(&moves, 28, 35), "exd5");
    assert!(has_move(&moves, 28, 37), "exf5");
    assert!(moves.iter().all(|m| m.captured() == Some(Type::Pawn)));
}

#[test]
fn test_black_pawns_move_down_the_board() {
    let pos = pos("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1");
    let moves = moves_from(&pos, 52); // e7
    assert!(has_move(&moves, 52, 44));
    assert!(has_move(&moves, 52, 36));
    assert_eq!(moves.len(), 2);
}

#[test]
fn test_edge_pawn_captures_do_not_wrap() {
    // Pawn on h4 must not "capture" onto the a-file
    let pos = pos("4k3/8/8/p7/7P/8/8/4K3 w - - 0 1");
    let moves = moves_from(&pos, 31);
    assert_eq!(moves.len(), 1);
    assert!(has_move(&moves, 31, 39));
}
