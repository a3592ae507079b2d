use super::*;

// ==================== STARTING POSITION PERFT TESTS ====================

#[test]
fn test_perft_starting_depth_1() {
    assert_eq!(Position::starting().perft(1), 20);
}

#[test]
fn test_perft_starting_depth_2() {
    assert_eq!(Position::starting().perft(2), 400);
}

#[test]
fn test_perft_starting_depth_3() {
    assert_eq!(Position::starting().perft(3), 8902);
}

#[test]
fn test_perft_starting_depth_4() {
    assert_eq!(Position::starting().perft(4), 197281);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_starting_depth_5() {
    assert_eq!(Position::starting().perft(5), 4865609);
}

#[test]
fn test_divide_sums_to_perft() {
    let pos = Position::starting();
    let split = pos.divide(3);
    assert_eq!(split.len(), 20);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    let e2e4 = split.iter().find(|(mv, _)| mv.to_string() == "e2e4").map(|(_, n)| *n);
    assert_eq!(e2e4, Some(600));
}
