use super::*;

// ==================== KING MOVEMENT TESTS ====================

#[test]
fn test_king_center_moves() {
    let pos = pos("7k/8/8/8/4K3/8/8/8 w - - 0 1");
    let moves = moves_from(&pos, 28); // e4
    assert_eq!(moves.len(), 8, "King in the center should have 8 moves");
}

#[test]
fn test_king_corner_moves() {
    let pos = pos("7k/8/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(moves_from(&pos, 0).len(), 3, "Corner king should have 3 moves");
}

#[test]
fn test_king_cannot_step_into_rook_file() {
    // Black rook d8 covers the whole d-file
    let pos = pos("3r3k/8/8/8/8/8/8/4K3 w - - 0 1");
    let moves = moves_from(&pos, 4);

    assert!(!has_move(&moves, 4, 3), "d1 is attacked");
    assert!(!has_move(&moves, 4, 11), "d2 is attacked");
    assert!(has_move(&moves, 4, 12));
    assert!(has_move(&moves, 4, 5));
    assert!(has_move(&moves, 4, 13));
    assert_eq!(moves.len(), 3);
}

#[test]
fn test_king_cannot_capture_defended_piece() {
    // Knight d2 defended by rook d8
    let pos = pos("3r3k/8/8/8/8/8/3n4/4K3 w - - 0 1");
    let moves = moves_from(&pos, 4);
    assert!(!has_move(&moves, 4, 11), "Capturing a defended knight walks into the rook");
    assert!(!has_move(&moves, 4, 5), "f1 is covered by the knight");
}

#[test]
fn test_king_captures_undefended_piece() {
    let pos = pos("7k/8/8/8/8/8/3n4/4K3 w - - 0 1");
    let moves = moves_from(&pos, 4);
    let capture = moves.iter().find(|m| m.to() == 11).copied();
    assert_eq!(capture.and_then(|m| m.captured()), Some(Type::Knight));
}

#[test]
fn test_kings_never_touch() {
    let pos = pos("8/8/4k3/8/4K3/8/8/8 w - - 0 1");
    let moves = moves_from(&pos, 28);
    for sq in [35, 36, 37] {
        assert!(!has_move(&moves, 28, sq), "square {} touches the black king", sq);
    }
    assert_eq!(moves.len(), 5);
}
