//! Command line options.

use crate::tui::Strategy;
use clap::Parser;
use std::path::PathBuf;

/// Terminal client for a quantum chess engine.
#[derive(Debug, Parser)]
#[command(name = "qchess-tui", version, about)]
pub struct Cli {
    /// Base url of the engine server.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub server: String,
    /// Strategy driving the white slot.
    #[arg(long, value_enum, default_value_t = Strategy::Human)]
    pub white: Strategy,
    /// Strategy driving the black slot.
    #[arg(long, value_enum, default_value_t = Strategy::AlphaBeta)]
    pub black: Strategy,
    /// Minimum visible milliseconds per automated move.
    #[arg(long, default_value_t = 600)]
    pub pace_ms: u64,
    /// Render pieces as letters instead of unicode glyphs.
    #[arg(long)]
    pub ascii: bool,
    /// Saved position id to load into the placement editor at startup.
    #[arg(long)]
    pub load: Option<i64>,
    /// Where to write the session log. Raw mode owns the terminal, so logs
    /// go to a file.
    #[arg(long, default_value = "qchess_tui.log")]
    pub log_file: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
