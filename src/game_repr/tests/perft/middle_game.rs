use super::*;

// ==================== MIDDLE GAME PERFT TESTS ====================
// Position 4: promotions with capture, checks and castling rights for black only

const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

#[test]
fn test_perft_middle_game_depth_1() {
    assert_eq!(pos(POSITION_4).perft(1), 6);
}

#[test]
fn test_perft_middle_game_depth_2() {
    assert_eq!(pos(POSITION_4).perft(2), 264);
}

#[test]
fn test_perft_middle_game_depth_3() {
    assert_eq!(pos(POSITION_4).perft(3), 9467);
}
