//! Records command - Show best-attempt leaderboards

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::TextRecordRepository,
    cli::{config::CommonArgs, output::print_section},
    game::Difficulty,
    ports::RecordRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Show best-attempt records")]
pub struct RecordsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only show this difficulty
    #[arg(long, short = 'd')]
    pub difficulty: Option<Difficulty>,
}

pub fn execute(args: RecordsArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let repo = TextRecordRepository::new(&config.records_path);
    let records = repo.load()?;

    let difficulties = match args.difficulty {
        Some(difficulty) => vec![difficulty],
        None => Difficulty::ALL.to_vec(),
    };

    for difficulty in difficulties {
        print_section(&format!(
            "{} (1-{})",
            difficulty.label().to_uppercase(),
            difficulty.range_max()
        ));
        let board = records.leaderboard(difficulty);
        if board.is_empty() {
            println!("  no records yet");
        }
        for (rank, (name, attempts)) in board.into_iter().enumerate() {
            println!("  {:>3}. {:20} {}", rank + 1, name, attempts);
        }
    }

    Ok(())
}
