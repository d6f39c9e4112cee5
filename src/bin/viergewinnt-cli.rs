#![deny(
    clippy::all,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from
)]
#![deny(missing_debug_implementations)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use viergewinnt_engine::{
    Difficulty, Game, GameConfig, GameMode, GameState, Gameboard, Move, Outcome, Player,
    Scoreboard,
};

#[derive(Parser, Debug)]
#[command(about = "Play Vier gewinnt (Connect Four) in the terminal")]
struct Args {
    /// Two humans (`hvh`) or human against the computer (`hva`)
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Strength of the computer player
    #[arg(long, short = 'd', value_enum)]
    difficulty: Option<Difficulty>,

    /// Which player the computer controls (`1` or `2`)
    #[arg(long, value_parser = parse_player)]
    ai_player: Option<Player>,

    /// Random seed for reproducible computer moves
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    think_delay_ms: Option<u64>,

    /// Search the computer's candidate moves in parallel
    #[arg(long)]
    parallel: bool,

    /// JSON file with a game config; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file the win/draw tallies are kept in
    #[arg(long, default_value = "viergewinnt-stats.json")]
    stats: PathBuf,
}

fn parse_player(value: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "x" | "player1" => Ok(Player::Player1),
        "2" | "o" | "player2" => Ok(Player::Player2),
        other => bail!("invalid player '{other}' (expected '1' or '2')"),
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(player) = args.ai_player {
        config.ai_player = player;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = args.think_delay_ms {
        config.think_delay_ms = delay;
    }
    config.parallel_search |= args.parallel;

    config.validate()?;
    Ok(config)
}

/// A line typed in at the prompt.
enum Command {
    Play(usize),
    Undo,
    NewGame,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "u" => Some(Command::Undo),
        "n" => Some(Command::NewGame),
        "q" => Some(Command::Quit),
        number => number
            .parse::<usize>()
            .ok()
            .and_then(|col| col.checked_sub(1))
            .map(Command::Play),
    }
}

fn read_line(stdin: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn print_board(board: &Gameboard) {
    println!("{board}");
    println!();
}

/// The board as the human left it, without the computer's `reply`.
fn board_before_reply(game: &Game, reply: Move) -> Gameboard {
    let mut board = game.board_snapshot();
    board.remove_chip(reply.row, reply.column);
    board
}

fn print_scoreboard(scoreboard: &Scoreboard) {
    println!(
        "{} games: Player 1 won {}, Player 2 won {}, {} draws",
        scoreboard.games(),
        scoreboard.player1_wins,
        scoreboard.player2_wins,
        scoreboard.draws
    );
}

fn announce(game: &Game, outcome: Outcome) {
    match outcome {
        Outcome::Win(player) if game.config().is_ai(player) => println!("Computer won!"),
        Outcome::Win(player) => println!("{player} won!"),
        Outcome::Draw => println!("Gameover: draw"),
        Outcome::InProgress => {}
    }
    if let Some(line) = game.winning_line() {
        let cells = line
            .cells
            .iter()
            .map(|(row, col)| format!("({}, {})", col + 1, row + 1))
            .collect::<Vec<_>>()
            .join(" ");
        println!("Winning line (column, row): {cells}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut scoreboard = Scoreboard::load(&args.stats)?;
    let mut game = Game::<7, 6>::new(config.clone());
    let mut stdin = io::stdin().lock();

    match config.mode {
        GameMode::HumanVsAi => println!("Let's play viergewinnt against the computer."),
        GameMode::HumanVsHuman => println!("Let's play viergewinnt."),
    }
    println!("Enter a column number, `u` to undo, `n` for a new game, `q` to quit.");

    loop {
        println!("----------------");
        print_board(game.board());

        let player = match game.state() {
            GameState::GameOver(outcome) => {
                announce(&game, outcome);
                scoreboard.record(outcome);
                scoreboard.save(&args.stats)?;
                print_scoreboard(&scoreboard);

                println!("New game? (n = yes, anything else quits)");
                match read_line(&mut stdin)?.as_deref().map(str::trim) {
                    Some("n" | "N") => {
                        game.reset();
                        continue;
                    }
                    _ => break,
                }
            }
            GameState::AwaitingMove(player) => player,
        };

        // Computer player
        if config.is_ai(player) {
            thread::sleep(config.think_delay());
            let mv = game.play_ai_move()?;
            println!("Computer chose column {}", mv.column + 1);
            continue;
        }

        // Human player
        {
            print!("{player}, choose your move (column): ");
            for col in game.board().available_columns_iter().map(|x| x + 1) {
                print!("{col},");
            }
            println!();
            io::stdout().flush()?;
        }

        let Some(line) = read_line(&mut stdin)? else {
            break;
        };

        match parse_command(&line) {
            Some(Command::Play(col)) => match game.play_move(col) {
                Ok(result) => {
                    if let Some(mv) = result.ai_move {
                        println!("----------------");
                        print_board(&board_before_reply(&game, mv));
                        thread::sleep(config.think_delay());
                        println!("Computer chose column {}", mv.column + 1);
                    }
                }
                Err(err) => println!("Invalid move: {err}"),
            },
            Some(Command::Undo) => match game.undo() {
                Ok(undo) => println!("Took back {} move(s)", undo.undone.len()),
                Err(err) => println!("Can't undo: {err}"),
            },
            Some(Command::NewGame) => game.reset(),
            Some(Command::Quit) => break,
            None => println!("Unknown input: {}", line.trim()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_before_reply_hides_only_the_computer_chip() {
        let config = GameConfig::against_ai(Difficulty::Medium).with_seed(4);
        let mut game = Game::<7, 6>::new(config);

        let result = game.play_move(3).unwrap();
        let reply = result.ai_move.unwrap();
        let board = board_before_reply(&game, reply);

        assert_eq!(board.chip_count(), 1);
        assert_eq!(board.cell(0, 3), Some(Player::Player1));
        assert_eq!(game.board().chip_count(), 2);
    }

    #[test]
    fn commands_are_one_based() {
        assert!(matches!(parse_command("1"), Some(Command::Play(0))));
        assert!(matches!(parse_command(" 7\n"), Some(Command::Play(6))));
        assert!(parse_command("0").is_none());
        assert!(matches!(parse_command("U"), Some(Command::Undo)));
    }
}
