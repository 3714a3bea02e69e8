//! Text rendering of the board and the score table.
//!
//! Pure functions from state to strings; nothing here mutates the game.

use crate::config::{EngineConfig, Messages};
use crate::games::grid::{BoardState, Cell, Coord, Player, PlayerKind, PlayerRoster};

const VERTICAL: char = '|';
const HORIZONTAL: char = '_';
const PAD: char = ' ';

/// Joins items as `a, b, c or d`; two items read `a or b`.
pub fn join_or<T: ToString>(items: &[T], last: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} {} {}", first.to_string(), last, second.to_string()),
        [init @ .., tail] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} {} {}", head.join(", "), last, tail.to_string())
        }
    }
}

/// Centers `text` in a slot of `width` characters, extra space going right.
fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let front = width.saturating_sub(len) / 2;
    let back = width.saturating_sub(front + len);
    format!(
        "{}{}{}",
        PAD.to_string().repeat(front),
        text,
        PAD.to_string().repeat(back)
    )
}

fn blank_row(side: usize, width: usize) -> String {
    format!("{}{}", PAD.to_string().repeat(width), VERTICAL).repeat(side - 1)
}

fn separator_row(side: usize, width: usize) -> String {
    let square = HORIZONTAL.to_string().repeat(width);
    format!("{}{}", format!("{}{}", square, VERTICAL).repeat(side - 1), square)
}

fn piece_row(board: &BoardState, row: usize, width: usize) -> String {
    let side = board.side();
    let mut line = String::new();
    for col in 0..side {
        let symbol = match board.at(Coord::new(row, col)) {
            Some(Cell::Occupied(piece)) => piece.symbol(),
            _ => PAD,
        };
        line.push_str(&centered(&symbol.to_string(), width));
        if col + 1 < side {
            line.push(VERTICAL);
        }
    }
    line.push_str(&row.to_string());
    line
}

/// Draws the board: column numbers on top, row numbers at the right edge.
pub fn render_board(board: &BoardState, config: &EngineConfig) -> String {
    let side = board.side();
    let width = *config.square_width();
    let mut lines = Vec::with_capacity(side * 3 + 2);

    let header: String = (0..side)
        .map(|col| format!("{} ", centered(&col.to_string(), width)))
        .collect();
    lines.push(header);

    for row in 0..side {
        lines.push(blank_row(side, width));
        lines.push(piece_row(board, row, width));
        if row + 1 < side {
            lines.push(separator_row(side, width));
        } else {
            lines.push(blank_row(side, width));
            lines.push(String::new());
        }
    }
    lines.join("\n")
}

/// Label for a player kind, from the message table.
pub fn kind_label(kind: PlayerKind, messages: &Messages) -> &str {
    match kind {
        PlayerKind::Human => messages.human().as_str(),
        PlayerKind::Ai => messages.ai().as_str(),
    }
}

/// `player <kind> <number>`, as used in announcements.
pub fn player_label(player: &Player, messages: &Messages) -> String {
    format!(
        "{} {} {}",
        messages.player(),
        kind_label(*player.kind(), messages),
        player.number()
    )
}

/// Score table in seating order, marking the player to move with `<=`.
pub fn render_scores(roster: &PlayerRoster, config: &EngineConfig) -> String {
    let messages = config.messages();
    let current = roster.current();
    let mut lines: Vec<String> = roster
        .seating()
        .iter()
        .map(|player| {
            let label = format!("({}) {}", player.piece(), player_label(player, messages));
            let mut line = format!(
                "{:<20}| {} {} ",
                label,
                messages.score(),
                player.score()
            );
            if player.piece() == current.piece() {
                line.push_str("<=");
            }
            line
        })
        .collect();
    lines.push("-".repeat(*config.screen_width()));
    lines.join("\n")
}
