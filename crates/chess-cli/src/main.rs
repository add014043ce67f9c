//! Terminal front end for the chess rules engine.
//!
//! Plays games over stdin, inspects FEN positions, lists legal moves and runs
//! perft. Set `RUST_LOG=chess_engine=debug` to trace applied moves.

mod config;
mod history;
mod output;
mod render;

use anyhow::{bail, Context};
use chess_core::{Piece, Square};
use chess_engine::movegen::perft::{perft, perft_divide};
use chess_engine::{Board, GameState, MoveOutcome, RuleOptions};
use clap::{Parser, Subcommand};
use config::CliConfig;
use history::FenLog;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess rules engine: play, inspect positions, count moves")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = CliConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Use the lenient rule set regardless of the configuration
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game by entering moves such as e2e4 or e7e8q
    Play {
        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Continue from the last position in a FEN log
        #[arg(long, conflicts_with = "fen")]
        resume: Option<PathBuf>,
        /// Append every reached position to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Show a position and its state
    Show {
        /// Position to show
        fen: Option<String>,
        /// Print JSON instead of a diagram
        #[arg(long)]
        json: bool,
    },
    /// List legal moves
    Moves {
        /// Only moves of the piece on this square
        square: Option<String>,
        /// Position to examine
        #[arg(long)]
        fen: Option<String>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth
        depth: u32,
        /// Position to search
        #[arg(long)]
        fen: Option<String>,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut config = CliConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if cli.lenient {
        config.rules = RuleOptions::lenient();
    }
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Play { fen, resume, log } => {
            let start = match resume {
                Some(path) => Some(last_logged(&path)?),
                None => fen,
            };
            let board = board_from(start.as_deref(), config.rules)?;
            let log_path = log.or_else(|| config.history_log.clone());
            play(board, log_path, &config)
        }
        Commands::Show { fen, json } => {
            let board = board_from(fen.as_deref(), config.rules)?;
            if json {
                println!("{}", output::to_json(&board)?);
            } else {
                print_board(&board, &[]);
            }
            Ok(())
        }
        Commands::Moves { square, fen } => {
            let board = board_from(fen.as_deref(), config.rules)?;
            match square {
                Some(name) => {
                    let sq: Square = name.parse()?;
                    let moves = board.legal_moves(sq);
                    print_board(&board, moves);
                    let names: Vec<String> = moves.iter().map(|s| s.to_algebraic()).collect();
                    println!("{}: {}", sq, names.join(" "));
                }
                None => {
                    let moves: Vec<String> =
                        board.all_legal_moves().iter().map(|m| m.to_uci()).collect();
                    println!("{} legal moves: {}", moves.len(), moves.join(" "));
                }
            }
            Ok(())
        }
        Commands::Perft { depth, fen, divide } => {
            let board = board_from(fen.as_deref(), config.rules)?;
            let started = Instant::now();
            let nodes = if divide {
                let results = perft_divide(board.position(), depth, board.options());
                for (uci, count) in &results {
                    println!("{uci}: {count}");
                }
                results.iter().map(|(_, n)| n).sum()
            } else {
                perft(board.position(), depth, board.options())
            };
            println!("Nodes: {nodes}");
            tracing::info!(depth, nodes, elapsed = ?started.elapsed(), "perft finished");
            Ok(())
        }
    }
}

fn board_from(fen: Option<&str>, rules: RuleOptions) -> anyhow::Result<Board> {
    let board = match fen {
        Some(text) => Board::from_fen(text).with_context(|| format!("reading FEN {text:?}"))?,
        None => Board::new(),
    };
    Ok(board.with_options(rules))
}

fn last_logged(path: &Path) -> anyhow::Result<String> {
    let fens = FenLog::read(path).with_context(|| format!("reading {}", path.display()))?;
    match fens.last() {
        Some(fen) => Ok(fen.clone()),
        None => bail!("{} holds no positions", path.display()),
    }
}

fn print_board(board: &Board, marks: &[Square]) {
    print!("{}", render::render(board, marks));
    println!("{}", board.fen());
}

fn describe(board: &Board) -> String {
    match board.state() {
        GameState::Checkmate => format!("Checkmate, {} wins", board.side_to_move().opposite()),
        GameState::Stalemate => "Stalemate".to_string(),
        GameState::Active if board.is_check() => format!("{} to move, in check", board.side_to_move()),
        GameState::Active => format!("{} to move", board.side_to_move()),
    }
}

const HELP: &str = "\
Commands:
  e2e4 / e7e8q    play a move
  moves <square>  show legal destinations of a piece
  fen             print the current FEN
  load <fen>      replace the position
  board           print the board
  quit            leave";

fn play(mut board: Board, log_path: Option<PathBuf>, config: &CliConfig) -> anyhow::Result<()> {
    let mut log = match log_path {
        Some(path) => {
            let mut log =
                FenLog::open(&path).with_context(|| format!("opening {}", path.display()))?;
            log.append(board.fen())?;
            tracing::info!(path = %log.path().display(), "logging positions");
            Some(log)
        }
        None => None,
    };

    println!("{HELP}");
    print_board(&board, &[]);
    println!("{}", describe(&board));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "fen" => println!("{}", board.fen()),
            "board" => print_board(&board, &[]),
            "moves" => match words.next().map(str::parse::<Square>) {
                Some(Ok(sq)) => print_board(&board, board.legal_moves(sq)),
                Some(Err(e)) => println!("{e}"),
                None => println!("usage: moves <square>"),
            },
            "load" => {
                let text = words.collect::<Vec<_>>().join(" ");
                match board.load_fen(&text) {
                    Ok(()) => {
                        if let Some(log) = log.as_mut() {
                            log.append(board.fen())?;
                        }
                        print_board(&board, &[]);
                        println!("{}", describe(&board));
                    }
                    Err(e) => println!("{e}"),
                }
            }
            text => {
                let outcome = match board.apply_uci(text) {
                    Ok(MoveOutcome::PromotionRequired) => {
                        let (from, to) = board
                            .pending_promotion()
                            .context("promotion outcome without a pending move")?;
                        match ask_promotion(&mut lines)? {
                            Some(piece) => board.apply_promotion(from, to, piece),
                            None => {
                                board.cancel_promotion();
                                println!("promotion cancelled");
                                continue;
                            }
                        }
                    }
                    Ok(MoveOutcome::Played(state)) => Ok(state),
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(state) => {
                        if let Some(log) = log.as_mut() {
                            log.append(board.fen())?;
                        }
                        if config.show_board {
                            print_board(&board, &[]);
                        }
                        println!("{}", describe(&board));
                        if board.fifty_move_claimable() {
                            println!("A draw may be claimed under the fifty-move rule");
                        }
                        if state.is_terminal() {
                            break;
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    Ok(())
}

/// Prompts until a promotion piece letter is entered. `None` on end of input
/// or an empty line.
fn ask_promotion<B: BufRead>(lines: &mut io::Lines<B>) -> anyhow::Result<Option<Piece>> {
    loop {
        print!("promote to (q/r/b/n): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let mut chars = line.trim().chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Ok(None),
            (Some(c), None) => match Piece::from_letter(c) {
                Some(piece) if piece.is_promotion_choice() => return Ok(Some(piece)),
                _ => println!("{c} is not a promotion piece"),
            },
            _ => println!("enter a single letter"),
        }
    }
}
