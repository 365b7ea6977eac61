//! Output formatting and progress bars for CLI

use std::{io::Write, thread, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    game::{Difficulty, Records},
};

/// Create a progress bar for training
pub fn create_training_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .map_err(|e| crate::Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Write `text` one character at a time, flushing after each.
pub fn typewrite<W: Write>(out: &mut W, text: &str, delay: Duration) -> std::io::Result<()> {
    for c in text.chars() {
        write!(out, "{c}")?;
        out.flush()?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(())
}

/// Write the leaderboard of one difficulty.
pub fn write_leaderboard<W: Write>(
    out: &mut W,
    records: &Records,
    difficulty: Difficulty,
) -> std::io::Result<()> {
    for (name, attempts) in records.leaderboard(difficulty) {
        writeln!(out, "{name}: {attempts}")?;
    }
    Ok(())
}
