//! Play command - hot-seat game on the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_rules(), play_game()
//! - Level 3: play_turn()
//! - Level 4: rendering utilities

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use checkers_core::{render_row, Color, Grid, Move, RuleSet, BOARD_SIZE};
use checkers_session::{GameId, GameRegistry, GameResult};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Rule options JSON file
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Require a capture whenever any piece of the mover can capture
    #[arg(long)]
    pub global_forced_capture: bool,

    /// Name of the Red player
    #[arg(long, default_value = "Red")]
    pub red: String,

    /// Name of the White player
    #[arg(long, default_value = "White")]
    pub white: String,
}

/// How a terminal game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    Finished(GameResult),
    Quit,
    InputClosed,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let rules = load_rules(&args)?;
    tracing::info!("Starting game under '{}' rules", rules.name);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let end = play_game(stdin.lock(), stdout.lock(), rules, &args.red, &args.white)?;
    tracing::info!("Game ended: {:?}", end);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Resolve rule options from file and flags
fn load_rules(args: &PlayArgs) -> Result<RuleSet> {
    let mut rules = match &args.rules {
        Some(path) => RuleSet::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RuleSet::default(),
    };
    if args.global_forced_capture {
        rules.global_forced_capture = true;
    }
    Ok(rules)
}

/// Play one game reading moves from `input` until it ends
pub fn play_game<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    rules: RuleSet,
    red: &str,
    white: &str,
) -> Result<GameEnd> {
    let registry = GameRegistry::with_rules(rules);
    let id = registry.new_game(red, white)?;

    loop {
        let (turn, result) = {
            let game = registry.get(id)?;
            let game = game
                .lock()
                .map_err(|_| anyhow::anyhow!("game {} lock poisoned", id))?;
            (game.turn(), game.result())
        };
        if result != GameResult::Ongoing {
            return Ok(GameEnd::Finished(result));
        }

        let grid = registry.view_for(id, turn)?;
        write!(output, "{}", render_labelled(&grid, turn))?;
        write!(output, "{} to move (row cell row cell, or 'quit'): ", color_name(turn))?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(GameEnd::InputClosed);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            return Ok(GameEnd::Quit);
        }

        let reply = play_turn(&registry, id, turn, line)?;
        writeln!(output, "{}", reply)?;
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Parse and submit one line of input, returning the text to show the player
fn play_turn(registry: &GameRegistry, id: GameId, turn: Color, line: &str) -> Result<String> {
    let mv: Move = match line.parse() {
        Ok(mv) => mv,
        Err(err) => return Ok(format!("ERROR: {}", err)),
    };
    let message = registry.submit_move(id, turn, mv)?;
    Ok(message.to_string())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Render a grid oriented for `viewer`, labelled with board coordinates
pub fn render_labelled(grid: &Grid, viewer: Color) -> String {
    let label = |i: usize| -> i8 {
        match viewer {
            Color::Red => i as i8,
            Color::White => BOARD_SIZE - 1 - i as i8,
        }
    };

    let mut out = String::from("  ");
    for cell in 0..grid.len() {
        out.push_str(&format!(" {} ", label(cell)));
    }
    out.push('\n');
    for (row, cells) in grid.iter().enumerate() {
        out.push_str(&format!("{} {}\n", label(row), render_row(cells)));
    }
    out
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Red => "Red",
        Color::White => "White",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::Board;

    fn run_script(script: &str) -> (GameEnd, String) {
        let mut output = Vec::new();
        let end = play_game(script.as_bytes(), &mut output, RuleSet::default(), "a", "b").unwrap();
        (end, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_quit() {
        let (end, output) = run_script("quit\n");
        assert_eq!(end, GameEnd::Quit);
        assert!(output.contains("Red to move"));
    }

    #[test]
    fn test_moves_alternate() {
        let (end, output) = run_script("5 0 4 1\n2 1 3 0\n");
        assert_eq!(end, GameEnd::InputClosed);
        assert!(output.contains("INFO: Move accepted. White to move."));
        assert!(output.contains("INFO: Move accepted. Red to move."));
    }

    #[test]
    fn test_bad_input_keeps_turn() {
        let (_, output) = run_script("hello\n2 1 3 0\n");
        assert!(output.contains("ERROR: expected four numbers"));
        let (_, after) = output
            .split_once("ERROR: That is not your piece!")
            .expect("rejection shown");
        assert!(after.contains("Red to move"));
        assert!(!output.contains("White to move"));
    }

    #[test]
    fn test_render_labels_follow_orientation() {
        let board = Board::initial();
        let red = render_labelled(&board.view_for(Color::Red), Color::Red);
        let white = render_labelled(&board.view_for(Color::White), Color::White);
        assert!(red.starts_with("   0  1  2"));
        assert!(white.starts_with("   7  6  5"));
        assert!(red.lines().nth(1).unwrap().starts_with("0 [ ][w]"));
        assert!(white.lines().nth(1).unwrap().starts_with("7 [ ][r]"));
    }

    #[test]
    fn test_labelled_rows_match_plain_rendering() {
        let board = Board::initial();
        let plain = board.to_string();
        let labelled = render_labelled(&board.view_for(Color::Red), Color::Red);
        for (row, (plain, labelled)) in plain.lines().zip(labelled.lines().skip(1)).enumerate() {
            assert_eq!(labelled, format!("{} {}", row, plain));
        }
        assert_eq!(labelled.lines().count(), plain.lines().count() + 1);
    }

    #[test]
    fn test_load_rules_flag_overrides_default() {
        let args = PlayArgs {
            rules: None,
            global_forced_capture: true,
            red: "a".to_string(),
            white: "b".to_string(),
        };
        let rules = load_rules(&args).unwrap();
        assert!(rules.global_forced_capture);
    }
}
