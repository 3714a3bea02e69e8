//! End-to-end series driven by scripted console input.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use strictly_grid::{EngineConfig, GameLoop, LinePrompter, Piece};

type ScriptedLoop = GameLoop<LinePrompter<Cursor<String>, Vec<u8>>, StdRng>;

fn game(script: String, threshold: u32, seed: u64) -> ScriptedLoop {
    let config = EngineConfig::default()
        .with_win_threshold(threshold)
        .expect("valid threshold");
    let io = LinePrompter::new(Cursor::new(script), Vec::new());
    GameLoop::new(config, io, StdRng::seed_from_u64(seed))
}

fn transcript(game: ScriptedLoop) -> String {
    String::from_utf8(game.into_prompter().into_writer()).expect("utf8 output")
}

/// Two AIs on a 2x2 board: the match leader always wins on its second move,
/// so a threshold of two takes exactly three matches (A, B, A).
#[test]
fn test_two_ai_series_on_smallest_board() {
    for seed in 0..5 {
        let mut script = String::from("2\n0\nai\n0\n");
        script.push_str(&"x\n".repeat(30));
        script.push_str("n\n");

        let mut game = game(script, 2, seed);
        let reports = game.run().expect("series completes");
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(*report.matches_played(), 3);
        assert_eq!(report.winners().len(), 1);
        assert_eq!(report.winners()[0].name(), "AI 0");
        assert_eq!(*report.winners()[0].score(), 2);

        let text = transcript(game);
        assert_eq!(text.matches("won the match!").count(), 3);
        assert_eq!(text.matches("player AI 0 won the series!").count(), 1);
        assert_eq!(text.matches("Enter anything to start the next match").count(), 2);
        assert_eq!(text.matches("is moving...").count(), 9);
        assert!(text.contains("Thanks for playing! Goodbye!"));
    }
}

/// One human against one AI on a 2x2 board, human first. The AI can only
/// block one of the three lines through the human's first piece.
#[test]
fn test_human_moves_reach_the_board() {
    let mut script = String::from("2\n1\no\nhuman\n");
    // column 0, row 0
    script.push_str("0\n0\n");
    // AI blocks row 0 at cell 1
    script.push_str("x\n");
    // column 1, then row 0 is full and re-prompted, then row 1
    script.push_str("1\n0\n1\n");
    script.push_str("n\n");

    let mut game = game(script, 1, 11);
    let reports = game.run().expect("series completes");
    let winners = reports[0].winners();
    assert_eq!(winners.len(), 1);
    assert_eq!(*winners[0].piece(), Piece::new('O'));
    assert_eq!(winners[0].name(), "human 0");

    let text = transcript(game);
    assert!(text.contains("(O) player human 0"));
    assert!(text.contains("player human 0 won the match!"));
    assert_eq!(text.matches("not a valid choice").count(), 1);
}

#[test]
fn test_play_again_runs_a_fresh_series() {
    let series = format!("2\n0\nr\n{}", "x\n".repeat(3));
    let script = format!("{}y\n{}n\n", series, series);

    let mut game = game(script, 1, 3);
    let reports = game.run().expect("series complete");
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(*report.matches_played(), 1);
        assert_eq!(*report.winners()[0].score(), 1);
    }
    let text = transcript(game);
    assert_eq!(text.matches("Let's play again!").count(), 1);
}

#[test]
fn test_final_screen_shows_the_winning_point() {
    let mut script = String::from("2\n0\nai\n0\n");
    script.push_str(&"x\n".repeat(3));
    script.push_str("n\n");

    let mut game = game(script, 1, 5);
    game.run().expect("series completes");
    let text = transcript(game);

    let last_table = text.rfind("| score 1").expect("winning point rendered");
    let series_won = text.find("won the series!").expect("series announced");
    assert!(last_table < series_won);
}

#[test]
fn test_closed_input_surfaces_as_error() {
    let mut game = game("2\n0\nai\n".to_string(), 1, 0);
    assert!(game.run().is_err());
}
