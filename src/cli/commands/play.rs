//! Play command - Interactive guessing game, optionally against the AI

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::Rng;

use crate::{
    adapters::TextRecordRepository,
    cli::{
        build_rng,
        config::{CommonArgs, GameConfig},
        output::{typewrite, write_leaderboard},
    },
    error::Error,
    game::{Difficulty, GameSession, GuessOutcome, validate_name},
    ports::RecordRepository,
    q_learning::LearningOpponent,
};

/// Player name that wins instantly without playing.
const CHEAT_CODE: &str = "terminal";
/// Guess input that triggers the easter egg.
const EASTER_EGG: &str = "python";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Single player
    Solo,
    /// Race the learning AI to the secret
    Versus,
}

#[derive(Parser, Debug, Default)]
#[command(about = "Play the guessing game")]
pub struct PlayArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Difficulty: easy (1-50), medium (1-100) or hard (1-200); skips the menu
    #[arg(long, short = 'd')]
    pub difficulty: Option<Difficulty>,

    /// Game mode; skips the menu
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<Mode>,

    /// Player name; skips the prompt
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

/// How a game of `play` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayEnd {
    /// The cheat code was entered as the player name
    CheatCode,
    PlayerWon { attempts: u32, new_record: bool },
    OpponentWon { attempts: u32 },
    /// Input ran out before the game finished
    InputClosed,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let repo = TextRecordRepository::new(&config.records_path);
    let mut rng = build_rng(config.seed);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let end = run(&mut input, &mut out, &config, &args, &repo, &mut rng)?;
    tracing::debug!(?end, "game finished");
    Ok(())
}

/// Drive one game over arbitrary input/output streams.
pub fn run<R, W, P, G>(
    input: &mut R,
    out: &mut W,
    config: &GameConfig,
    args: &PlayArgs,
    repo: &P,
    rng: &mut G,
) -> Result<PlayEnd>
where
    R: BufRead,
    W: Write,
    P: RecordRepository,
    G: Rng,
{
    let difficulty = match args.difficulty {
        Some(difficulty) => difficulty,
        None => match choose_difficulty(input, out)? {
            Some(difficulty) => difficulty,
            None => return Ok(PlayEnd::InputClosed),
        },
    };
    let versus = match args.mode {
        Some(mode) => mode == Mode::Versus,
        None => match choose_mode(input, out)? {
            Some(mode) => mode == Mode::Versus,
            None => return Ok(PlayEnd::InputClosed),
        },
    };
    let name = match &args.name {
        Some(name) => validate_name(name)?,
        None => match ask_name(input, out)? {
            Some(name) => name,
            None => return Ok(PlayEnd::InputClosed),
        },
    };

    if name.eq_ignore_ascii_case(CHEAT_CODE) {
        writeln!(
            out,
            "**Congratulations! You've used the cheat code and won instantly!**"
        )?;
        return Ok(PlayEnd::CheatCode);
    }

    let mut opponent = if versus {
        let opponent = LearningOpponent::new(config.opponent_config(difficulty))?;
        if opponent.table_loaded() {
            writeln!(
                out,
                "Q-table loaded from {}",
                opponent.config().table_path.display()
            )?;
        }
        Some(match config.seed {
            Some(seed) => opponent.with_seed(seed.wrapping_add(1)),
            None => opponent,
        })
    } else {
        None
    };

    let mut session = GameSession::new(difficulty, versus, rng);
    let max = difficulty.range_max();
    tracing::debug!(%difficulty, versus, "game started");

    loop {
        let line = prompt(
            input,
            out,
            &format!(
                "Attempt {}: Enter your guess (1 - {max}): ",
                session.attempts() + 1
            ),
        )?;
        let Some(line) = line else {
            save_table(out, opponent.as_ref())?;
            return Ok(PlayEnd::InputClosed);
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case(EASTER_EGG) {
            for c in EASTER_EGG.to_ascii_uppercase().chars() {
                typewrite(out, &format!("{c} "), config.easter_egg_delay())?;
            }
            writeln!(out, "\nYou've discovered an Easter Egg! Try guessing again!")?;
            continue;
        }

        let Ok(guess) = line.parse::<i64>() else {
            writeln!(out, "Please enter a whole number between 1 and {max}.")?;
            continue;
        };

        match session.submit_guess(guess) {
            Ok(GuessOutcome::Correct { attempts }) => {
                typewrite(
                    out,
                    &format!(
                        "**Congratulations {name}! You've guessed the secret number in {attempts} attempts!** "
                    ),
                    config.typewriter_delay(),
                )?;
                writeln!(out)?;
                // Before the records, which can fail on their own
                save_table(out, opponent.as_ref())?;

                let mut records = repo.load()?;
                let new_record = records.submit(difficulty, &name, attempts);
                if new_record {
                    repo.save(&records)?;
                }

                writeln!(out, "\n--- Records ---")?;
                write_leaderboard(out, &records, difficulty)?;
                return Ok(PlayEnd::PlayerWon {
                    attempts,
                    new_record,
                });
            }
            Ok(GuessOutcome::TooLow) => {
                writeln!(out, "Your guess is lower than the secret number.")?;
            }
            Ok(GuessOutcome::TooHigh) => {
                writeln!(out, "Your guess is higher than the secret number.")?;
            }
            Err(Error::GuessOutOfRange { .. }) => {
                writeln!(out, "Please enter a whole number between 1 and {max}.")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if let Some(opponent) = opponent.as_mut() {
            let turn = session.opponent_turn(opponent)?;
            writeln!(out, "AI's attempt {}: AI guesses {}", turn.attempt, turn.guess)?;
            match turn.outcome {
                GuessOutcome::Correct { attempts } => {
                    writeln!(
                        out,
                        "**AI guessed the secret number in {attempts} attempts! You lost the game.**"
                    )?;
                    save_table(out, Some(&*opponent))?;
                    return Ok(PlayEnd::OpponentWon { attempts });
                }
                GuessOutcome::TooLow => {
                    writeln!(out, "AI's guess is lower than the secret number.")?;
                }
                GuessOutcome::TooHigh => {
                    writeln!(out, "AI's guess is higher than the secret number.")?;
                }
            }
        }

        for hint in session.hints() {
            writeln!(out, "{hint}")?;
        }
    }
}

fn choose_difficulty<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<Difficulty>> {
    writeln!(out, "Choose difficulty:")?;
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        writeln!(
            out,
            "{}. {} (1-{})",
            i + 1,
            capitalize(difficulty.label()),
            difficulty.range_max()
        )?;
    }
    let Some(choice) = prompt(input, out, "Enter your choice (1, 2, or 3): ")? else {
        return Ok(None);
    };
    match choice.parse::<Difficulty>() {
        Ok(difficulty) => Ok(Some(difficulty)),
        Err(_) => {
            writeln!(out, "Invalid choice, defaulting to medium difficulty.")?;
            Ok(Some(Difficulty::Medium))
        }
    }
}

fn choose_mode<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Mode>> {
    writeln!(out, "Choose game mode:")?;
    writeln!(out, "1. Single player")?;
    writeln!(out, "2. Versus AI")?;
    let Some(choice) = prompt(input, out, "Enter your choice (1 or 2): ")? else {
        return Ok(None);
    };
    match choice.trim() {
        "1" => Ok(Some(Mode::Solo)),
        "2" => Ok(Some(Mode::Versus)),
        _ => {
            writeln!(out, "Invalid choice, defaulting to single player.")?;
            Ok(Some(Mode::Solo))
        }
    }
}

fn ask_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>> {
    loop {
        let Some(name) = prompt(input, out, "Enter player name: ")? else {
            return Ok(None);
        };
        match validate_name(&name) {
            Ok(name) => return Ok(Some(name)),
            Err(Error::InvalidPlayerName { reason, .. }) => {
                writeln!(out, "Player name {reason}.")?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Write `text`, then read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn save_table<W: Write>(out: &mut W, opponent: Option<&LearningOpponent>) -> Result<()> {
    if let Some(opponent) = opponent {
        opponent.save()?;
        writeln!(
            out,
            "Q-table saved to {}",
            opponent.config().table_path.display()
        )?;
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_prompt_strips_line_endings() {
        let mut input = Cursor::new("42\r\nrest");
        let mut out = Vec::new();
        let line = prompt(&mut input, &mut out, "> ").unwrap();
        assert_eq!(line.as_deref(), Some("42"));
        assert_eq!(String::from_utf8(out).unwrap(), "> ");
    }

    #[test]
    fn test_prompt_reports_end_of_input() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(prompt(&mut input, &mut out, "> ").unwrap(), None);
    }

    #[test]
    fn test_invalid_menu_choices_fall_back() {
        let mut input = Cursor::new("9\nx\n");
        let mut out = Vec::new();
        assert_eq!(
            choose_difficulty(&mut input, &mut out).unwrap(),
            Some(Difficulty::Medium)
        );
        assert_eq!(choose_mode(&mut input, &mut out).unwrap(), Some(Mode::Solo));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1. Easy (1-50)"));
        assert!(text.contains("3. Hard (1-200)"));
        assert!(text.contains("Invalid choice, defaulting to medium difficulty."));
        assert!(text.contains("Invalid choice, defaulting to single player."));
    }

    #[test]
    fn test_name_prompt_rejects_separator() {
        let mut input = Cursor::new("\nbad: name\n  ada \n");
        let mut out = Vec::new();
        assert_eq!(
            ask_name(&mut input, &mut out).unwrap().as_deref(),
            Some("ada")
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("medium"), "Medium");
        assert_eq!(capitalize(""), "");
    }
}
