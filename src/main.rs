use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tapchess::core::{load_settings, load_settings_or_default, settings_path};
use tapchess::game::resources::PromotionPolicy;
use tapchess::ui::{render_board, Console};
use tapchess::ChessSession;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play chess by tapping squares in the terminal
#[derive(Parser, Debug)]
#[command(name = "tapchess", version, about)]
struct Args {
    /// Settings file to load and save (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from this position instead of the standard setup
    #[arg(long)]
    fen: Option<String>,

    /// Start with the board rotated 180 degrees
    #[arg(long)]
    flip: bool,

    /// Ask for the promotion piece instead of promoting to a queen
    #[arg(long)]
    ask_promotion: bool,

    /// Edge length of one square for `click` coordinates
    #[arg(long)]
    tile_size: Option<f32>,

    /// Log filter, e.g. `tapchess=debug` (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match &args.log {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter {directive:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tapchess=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (path, mut settings) = match args.config {
        Some(path) => {
            let settings = load_settings_or_default(&path);
            (path, settings)
        }
        None => (settings_path(), load_settings()),
    };
    if let Some(fen) = args.fen {
        settings.start_fen = Some(fen);
    }
    if args.flip {
        settings.board.flipped = true;
    }
    if args.ask_promotion {
        settings.promotion = PromotionPolicy::Ask;
    }
    if let Some(tile_size) = args.tile_size {
        settings.board.tile_size = tile_size;
    }

    let session = ChessSession::new(&settings).context("failed to set up the starting position")?;
    info!("[GAME] Session started");
    let mut console = Console::new(session, settings, path);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render_board(console.session()))?;
    writeln!(out, "Type `help` for commands.")?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if console.handle_line(&line, &mut out)? {
            break;
        }
        out.flush()?;
    }

    info!("[GAME] Session ended");
    Ok(())
}
