//! Tests for the AI move heuristic.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_grid::{
    BoardState, Decision, EngineConfig, Piece, blocking_cell, choose_move, winning_cell,
};

const X: Piece = Piece::new('X');
const O: Piece = Piece::new('O');
const TILDE: Piece = Piece::new('~');

fn board_with(side: usize, moves: &[(usize, Piece)]) -> BoardState {
    let mut board = BoardState::new(side, &EngineConfig::default()).unwrap();
    for &(index, piece) in moves {
        board.place(index, piece).unwrap();
    }
    board
}

#[test]
fn test_takes_win_in_row_zero() {
    // X X .
    // O O .
    // . . .
    // Both a win and a block exist; the win comes first.
    for seed in 0..20 {
        let board = board_with(3, &[(0, X), (1, X), (3, O), (4, O)]);
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(choose_move(&board, X, &mut rng), Some(Decision::Win(2)));
    }
}

#[test]
fn test_takes_win_whichever_cell_of_row_zero_is_empty() {
    for empty in 0..3 {
        let moves: Vec<(usize, Piece)> = (0..3).filter(|&c| c != empty).map(|c| (c, X)).collect();
        let board = board_with(3, &moves);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(choose_move(&board, X, &mut rng), Some(Decision::Win(empty)));
    }
}

#[test]
fn test_blocks_opponent_column() {
    // . O .
    // X O .
    // . . .
    let board = board_with(3, &[(1, O), (3, X), (4, O)]);
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(choose_move(&board, X, &mut rng), Some(Decision::Block(7)));
}

#[test]
fn test_first_threat_in_scan_order_is_blocked() {
    // O threatens row 1, column 0 and the diagonal; rows are scanned first.
    // O . .
    // O O .
    // . . .
    let board = board_with(3, &[(0, O), (3, O), (4, O)]);
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(choose_move(&board, X, &mut rng), Some(Decision::Block(5)));
}

#[test]
fn test_column_is_scanned_before_diagonal() {
    // O O ~
    // . O .
    // . . .
    // Column 1 needs cell 7, the diagonal needs cell 8.
    let board = board_with(3, &[(0, O), (1, O), (2, TILDE), (4, O)]);
    let mut rng = StdRng::seed_from_u64(4);
    assert_eq!(choose_move(&board, X, &mut rng), Some(Decision::Block(7)));
    assert_eq!(blocking_cell(&board, X), Some(7));
    assert_eq!(winning_cell(&board, O), Some(7));
}

#[test]
fn test_diagonal_is_scanned_before_anti_diagonal() {
    // O ~ O
    // ~ O ~
    // . ~ .
    // The diagonal needs cell 8, the anti-diagonal needs cell 6.
    let board = board_with(
        3,
        &[
            (0, O),
            (2, O),
            (4, O),
            (1, TILDE),
            (3, TILDE),
            (5, TILDE),
            (7, TILDE),
        ],
    );
    let mut rng = StdRng::seed_from_u64(8);
    assert_eq!(choose_move(&board, X, &mut rng), Some(Decision::Block(8)));
    assert_eq!(blocking_cell(&board, X), Some(8));
    assert_eq!(winning_cell(&board, O), Some(8));
    assert_eq!(choose_move(&board, O, &mut rng), Some(Decision::Win(8)));
}

#[test]
fn test_random_move_is_reproducible_with_seed() {
    let board = board_with(4, &[(5, X)]);
    let first = choose_move(&board, O, &mut StdRng::seed_from_u64(77));
    let second = choose_move(&board, O, &mut StdRng::seed_from_u64(77));
    assert_eq!(first, second);
    assert!(matches!(first, Some(Decision::Random(cell)) if board.is_empty(cell)));
}
