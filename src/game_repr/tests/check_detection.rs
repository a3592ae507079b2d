use super::*;

// ==================== CHECK DETECTION TESTS ====================

#[test]
fn test_starting_position_no_check() {
    let pos = Position::starting();
    assert!(!pos.is_king_in_check(Color::White));
    assert!(!pos.is_king_in_check(Color::Black));
}

#[test]
fn test_rook_check_and_block() {
    let open = pos("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
    assert!(open.is_king_in_check(Color::White));

    let blocked = pos("4k3/8/8/8/8/8/8/4KB1r w - - 0 1");
    assert!(!blocked.is_king_in_check(Color::White));
}

#[test]
fn test_knight_check() {
    let pos = pos("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1");
    assert!(pos.is_king_in_check(Color::White));
}

#[test]
fn test_pawn_checks_diagonally_only() {
    let diagonal = pos("4k3/8/8/3p4/4K3/8/8/8 w - - 0 1");
    assert!(diagonal.is_king_in_check(Color::White));

    let in_front = pos("4k3/8/8/4p3/4K3/8/8/8 w - - 0 1");
    assert!(!in_front.is_king_in_check(Color::White));
}

#[test]
fn test_bishop_check_along_diagonal() {
    let pos = pos("4k3/8/8/b7/8/8/8/4K3 w - - 0 1");
    assert!(pos.is_king_in_check(Color::White));
    assert!(!pos.is_king_in_check(Color::Black));
}

#[test]
fn test_attackers_to_lists_every_attacker() {
    // e4 hit by knight f6, bishop b7 and rook e8
    let pos = pos("4r2k/1b6/5n2/8/4P3/8/8/K7 w - - 0 1");
    let occupied = pos.bitboards().all_occupied();
    let attackers = pos.attackers_to(28, Color::Black, occupied);
    assert_eq!(attackers.count_ones(), 3);
    assert!(pos.is_square_attacked(28, Color::Black));
    assert!(!pos.is_square_attacked(28, Color::White));
}

#[test]
fn test_every_legal_reply_resolves_check() {
    let pos = pos("4k3/8/8/8/1b6/8/8/R3K2N w - - 0 1");
    assert!(pos.in_check());
    let moves = pos.legal_moves();
    assert!(!moves.is_empty());

    let mut scratch = pos.clone();
    for mv in moves {
        let undo = scratch.make_move(mv);
        assert!(!scratch.is_king_in_check(Color::White), "{} leaves the king in check", mv);
        scratch.unmake_move(undo);
    }
}
