//! Board command - print the opening layout

use anyhow::Result;
use clap::Args;

use checkers_core::{Board, Color};

use crate::play::render_labelled;

#[derive(Args)]
pub struct BoardArgs {
    /// Show the board from White's side
    #[arg(long)]
    pub flip: bool,
}

/// Run board command
pub fn run(args: BoardArgs) -> Result<()> {
    print!("{}", render(&args));
    Ok(())
}

fn render(args: &BoardArgs) -> String {
    let viewer = if args.flip { Color::White } else { Color::Red };
    render_labelled(&Board::initial().view_for(viewer), viewer)
}
