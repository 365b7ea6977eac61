//! Train command - Self-play training for the learning opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        build_rng,
        config::CommonArgs,
        output::{create_training_progress, print_kv, print_section},
    },
    game::Difficulty,
    q_learning::LearningOpponent,
    training::{TrainingConfig, self_play},
};

#[derive(Parser, Debug)]
#[command(about = "Train the AI opponent by self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of self-play games
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Difficulty the secrets are drawn from
    #[arg(long, short = 'd', default_value = "medium")]
    pub difficulty: Difficulty,

    /// Show progress bar
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let mut rng = build_rng(config.seed);

    let opponent_config = config.opponent_config(args.difficulty);
    let mut opponent = LearningOpponent::new(opponent_config)?;
    if let Some(seed) = config.seed {
        opponent = opponent.with_seed(seed.wrapping_add(1));
    }

    let training = TrainingConfig {
        num_games: args.games,
        difficulty: args.difficulty,
    };

    println!(
        "Training AI opponent: {} games on {} (1-{})",
        training.num_games,
        training.difficulty,
        training.difficulty.range_max()
    );

    let pb = if args.progress {
        Some(create_training_progress(training.num_games as u64)?)
    } else {
        None
    };
    let result = self_play(&mut opponent, &training, &mut rng, |game_num, guesses| {
        if let Some(pb) = &pb {
            pb.set_position(game_num as u64);
            pb.set_message(format!("last: {guesses} guesses"));
        }
    })?;
    if let Some(pb) = &pb {
        pb.finish_with_message(format!("mean: {:.2} guesses", result.mean_guesses));
    }

    print_section("Training Summary");
    print_kv("Games", &result.total_games.to_string());
    print_kv("Mean guesses", &format!("{:.2}", result.mean_guesses));
    if let (Some(best), Some(worst)) = (result.best_guesses, result.worst_guesses) {
        print_kv("Best / worst", &format!("{best} / {worst}"));
    }
    print_kv(
        "Final epsilon",
        &format!("{:.6}", result.final_exploration_rate),
    );
    print_kv("Visited entries", &result.visited_entries.to_string());

    opponent.save()?;
    println!(
        "\nQ-table saved to {}",
        opponent.config().table_path.display()
    );

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
