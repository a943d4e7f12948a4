//! Plain-text board rendering

use hexflip_core::{Board, GameResult, GameState, Hex, Player, Status, BOARD_RADIUS};

const EMPTY: char = '.';
const LEGAL: char = '*';

pub fn symbol(player: Player) -> char {
    match player {
        Player::Black => 'B',
        Player::White => 'W',
    }
}

/// One text row per `r`, offset so neighbouring rows interleave like a hex grid.
/// Each row is labelled with its `r` and the `q` of its first cell.
pub fn render_board(board: &Board, legal: &[Hex]) -> String {
    let radius = BOARD_RADIUS as i8;
    let mut out = String::new();

    for r in -radius..=radius {
        let q_min = (-radius).max(-r - radius);
        let q_max = radius.min(-r + radius);

        out.push_str(&format!("r={:>2} q={:>2}  ", r, q_min));
        out.push_str(&" ".repeat(r.unsigned_abs() as usize));

        for q in q_min..=q_max {
            let hex = Hex::new(q, r);
            let cell = match board.get(hex) {
                Some(player) => symbol(player),
                None if legal.contains(&hex) => LEGAL,
                None => EMPTY,
            };
            out.push(cell);
            out.push(' ');
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    out
}

pub fn render_status(game: &GameState) -> String {
    let score = game.score();
    let counts = format!("black {} - white {}", score.black, score.white);
    match game.status() {
        Status::AwaitingMove(player) => format!("{counts} | {player} to move"),
        Status::Finished { result, .. } => format!("{counts} | {}", describe_result(result)),
    }
}

pub fn describe_result(result: GameResult) -> String {
    match result.winner() {
        Some(player) => format!("{player} wins"),
        None => "draw".to_string(),
    }
}
