//! Command-line front-end for the gobang engine
//!
//! ```text
//! gobang check --board "XX./.O./..X" --at 0,0
//! gobang best --board "X../.O./..."
//! gobang --preset gobang selfplay --max-moves 20
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use gobang::rules::outcome_after_move;
use gobang::{Engine, GameConfig, GameSession, Outcome, Piece, Seat};

#[derive(Parser, Debug)]
#[command(name = "gobang")]
#[command(about = "K-in-a-row win detection and move search")]
struct Cli {
    /// Built-in game variant (tic-tac-toe, gobang)
    #[arg(long, default_value = "tic-tac-toe")]
    preset: String,

    /// TOML game config; overrides --preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report win / draw / continue for a move already on the board
    Check {
        /// Board rows separated by '/', '.' for empty cells
        #[arg(long)]
        board: String,
        /// Cell of the last move as "row,col"
        #[arg(long)]
        at: String,
        /// Piece that made the move; defaults to the piece on that cell
        #[arg(long, value_enum)]
        piece: Option<Side>,
    },
    /// Recommend a move
    Best {
        #[arg(long)]
        board: String,
        /// Side to move; inferred from piece counts by default
        #[arg(long, value_enum)]
        to_move: Option<Side>,
    },
    /// Let the engine play both sides from an empty board
    Selfplay {
        /// Stop after this many moves
        #[arg(long)]
        max_moves: Option<usize>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    First,
    Second,
}

impl From<Side> for Piece {
    fn from(side: Side) -> Self {
        match side {
            Side::First => Piece::First,
            Side::Second => Piece::Second,
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    match &cli.config {
        Some(path) => GameConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display())),
        None => match GameConfig::preset(&cli.preset) {
            Some(config) => Ok(config),
            None => bail!("unknown preset {:?}; expected tic-tac-toe or gobang", cli.preset),
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config(&cli)?;
    info!(game = %config.name, board_size = config.board_size, win_length = config.win_length, "config loaded");

    match &cli.command {
        Command::Check { board, at, piece } => check(&config, board, at, *piece),
        Command::Best { board, to_move } => best(&config, board, *to_move),
        Command::Selfplay { max_moves } => selfplay(config, *max_moves),
    }
}

fn check(config: &GameConfig, board: &str, at: &str, piece: Option<Side>) -> Result<()> {
    let board = config.parse_board(board)?;
    let pos = config.parse_pos(at)?;
    let piece = match piece {
        Some(side) => Piece::from(side),
        None => board
            .get(pos)
            .with_context(|| format!("cell {} is empty; pass --piece", pos))?,
    };

    let verdict = match outcome_after_move(&board, pos, piece, config.win_length)? {
        Outcome::Win(_) => "win",
        Outcome::Draw => "draw",
        Outcome::InProgress => "continue",
    };
    println!("{}", verdict);
    Ok(())
}

fn best(config: &GameConfig, board: &str, to_move: Option<Side>) -> Result<()> {
    let board = config.parse_board(board)?;
    let to_move = to_move.map_or_else(|| board.side_to_move(), Piece::from);

    let engine = Engine::new(config.clone())?;
    let result = engine.best_move(&board, to_move)?;

    match result.best_move {
        Some(pos) => println!("{} {},{} score {}", config.pieces.symbol(to_move), pos.row, pos.col, result.score),
        None => println!("no legal move, score {}", result.score),
    }
    Ok(())
}

fn selfplay(config: GameConfig, max_moves: Option<usize>) -> Result<()> {
    let mut session = GameSession::new(config)?.with_seats(Seat::Computer, Seat::Computer);
    let limit = max_moves.unwrap_or(usize::MAX);

    while session.step() < limit {
        let Some((pos, outcome)) = session.play_computer()? else {
            break;
        };
        let piece = session.board().get(pos).context("engine move missing from board")?;
        println!("{:>3}. {} {}", session.step(), session.config().pieces.symbol(piece), pos);
        if outcome.is_terminal() {
            break;
        }
    }

    println!("{}", session.config().pieces.format_board(session.board()));
    match session.outcome() {
        Outcome::Win(winner) => println!("{} wins", session.config().pieces.symbol(winner)),
        Outcome::Draw => println!("draw"),
        Outcome::InProgress => println!("stopped after {} moves", session.step()),
    }
    Ok(())
}
