use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chessboard_client::core::settings_persistence::{load_settings_from, save_settings, settings_path};
use chessboard_client::game::{BoardEvent, EventBus, GameSession, MoveOutcome, SelectionChange, Square};
use chessboard_client::networking::HttpMoveAuthority;
use chessboard_client::ui::{render_board, render_history};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Terminal chess client backed by a remote move authority
#[derive(Parser, Debug)]
#[command(name = "chessboard-client", version, about)]
struct Args {
    /// Move authority base URL (overrides settings and MOVE_AUTHORITY_URL)
    #[arg(long)]
    authority: Option<String>,

    /// Request timeout in seconds, 0 waits forever
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Settings file to use instead of the platform config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Start from this position string instead of the standard one
    #[arg(long)]
    fen: Option<String>,

    /// Draw pieces as letters instead of chess glyphs
    #[arg(long)]
    ascii: bool,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Click(Square),
    ClickAt(f32, f32),
    Move(Square, Square),
    NewGame(Option<String>),
    Board,
    History,
    Fen,
    Help,
    Quit,
}

fn parse_square(text: Option<&str>) -> Result<Square, String> {
    let text = text.ok_or("missing square")?;
    text.parse().map_err(|e| format!("{}", e))
}

fn parse_coordinate(text: Option<&str>) -> Result<f32, String> {
    let text = text.ok_or("missing coordinate")?;
    text.parse().map_err(|_| format!("invalid coordinate: {}", text))
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };

    let command = match first {
        "click" => Command::Click(parse_square(words.next())?),
        "at" => Command::ClickAt(parse_coordinate(words.next())?, parse_coordinate(words.next())?),
        "move" => Command::Move(parse_square(words.next())?, parse_square(words.next())?),
        "new" => {
            let fen: Vec<&str> = words.collect();
            Command::NewGame((!fen.is_empty()).then(|| fen.join(" ")))
        }
        "board" => Command::Board,
        "history" => Command::History,
        "fen" => Command::Fen,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match other.parse::<Square>() {
            Ok(square) => Command::Click(square),
            Err(_) => return Err(format!("unknown command: {}", other)),
        },
    };
    Ok(Some(command))
}

const HELP: &str = "\
commands:
  e2 | click e2      click a square
  at X Y             click at canvas pixel (X, Y)
  move e2 e4         submit a move directly
  new [FEN]          start a new game
  board | history | fen
  quit";

fn print_board(session: &GameSession, glyphs: bool) {
    let last = session.last_move();
    println!(
        "{}",
        render_board(&session.position(), session.selected(), last.as_ref(), glyphs)
    );
}

fn report_move(outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Busy => println!("still thinking, move ignored"),
        MoveOutcome::GameFinished(result) => println!("game is over: {}", result),
        MoveOutcome::Rejected => println!("move rejected"),
        MoveOutcome::Failed(e) => println!("move failed: {}", e),
        MoveOutcome::Played { user, reply, result } => {
            match reply {
                Some(reply) => println!("played {}, reply {}", user, reply),
                None => println!("played {}", user),
            }
            if result.is_terminal() {
                println!("{}", result);
            }
        }
    }
}

/// Submit the move a click produced, if any
///
/// Selection has already been applied in input order; only the network
/// exchange runs in the background.
fn spawn_attempt(session: &GameSession, change: SelectionChange) {
    if let SelectionChange::MoveAttempt { from, to } = change {
        let session = session.clone();
        tokio::spawn(async move { report_move(session.attempt_move(from, to).await) });
    }
}

/// Redraw on board and selection changes, the way the canvas view does
fn spawn_renderer(session: GameSession, bus: &EventBus, glyphs: bool) {
    let (tx, mut rx) = mpsc::unbounded_channel::<BoardEvent>();
    bus.subscribe(move |event| {
        let _ = tx.send(event.clone());
    });

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                BoardEvent::BoardUpdated | BoardEvent::SquareSelected(_) | BoardEvent::SquareDeselected => {
                    print_board(&session, glyphs)
                }
                BoardEvent::MoveAdded { from, to, half_move } => {
                    let number = half_move.div_ceil(2);
                    if half_move % 2 == 1 {
                        println!("{}. {}-{}", number, from, to);
                    } else {
                        println!("{}... {}-{}", number, from, to);
                    }
                }
                BoardEvent::HistoryCleared => println!("history cleared"),
                BoardEvent::ThinkingStarted => println!("thinking..."),
                BoardEvent::ThinkingFinished => {}
                BoardEvent::GameOver(result) => println!("game over: {}", result),
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let path = args.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings_from(&path);
    settings.apply_env().context("applying environment overrides")?;
    if let Some(url) = args.authority {
        settings.authority_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    if args.save_settings {
        save_settings(&settings, &path).context("saving settings")?;
    }

    let authority = HttpMoveAuthority::from_settings(&settings).context("configuring move authority")?;
    let bus = EventBus::new();
    let session = GameSession::new(Arc::new(authority), bus.clone()).with_geometry(settings.geometry());
    let glyphs = !args.ascii;

    spawn_renderer(session.clone(), &bus, glyphs);

    match args.fen.as_deref() {
        Some(fen) => session.new_game_from_fen(fen).context("loading starting position")?,
        None => print_board(&session, glyphs),
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Click(square) => spawn_attempt(&session, session.select(square)),
            Command::ClickAt(x, y) => spawn_attempt(&session, session.select_at(x, y)),
            Command::Move(from, to) => {
                let session = session.clone();
                tokio::spawn(async move { report_move(session.attempt_move(from, to).await) });
            }
            Command::NewGame(fen) => {
                let reset = match fen {
                    Some(fen) => session.new_game_from_fen(&fen),
                    None => session.new_game(),
                };
                if let Err(e) = reset {
                    warn!("[SESSION] New game refused: {}", e);
                    println!("{}", e);
                }
            }
            Command::Board => print_board(&session, glyphs),
            Command::History => print!("{}", render_history(&session.history())),
            Command::Fen => println!("{}", session.fen()),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    info!("[SESSION] Bye");
    Ok(())
}
