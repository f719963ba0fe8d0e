//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a board from an optional JSON config (the sample board when none
//!   is given) and print its column summary.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `cardboard_cli [config.json]`. Set `CARDBOARD_LOG_DIR` to an
//! absolute path to enable file logging.

use cardboard_core::{default_log_level, init_logging, BoardConfig, BoardCoordinator, MemoryKvStore};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(dir) = std::env::var("CARDBOARD_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match std::env::args().nth(1) {
        Some(path) => match BoardConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => BoardConfig::default().with_sample_cards(),
    };

    let board = match BoardCoordinator::open(config, MemoryKvStore::new()) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let snapshot = board.snapshot();
    info!(
        "event=cli_summary module=cli status=ok columns={} themes={}",
        snapshot.columns.len(),
        snapshot.themes.len()
    );

    println!("cardboard_core version={}", cardboard_core::core_version());
    println!("board={}", snapshot.title);
    for column in &snapshot.columns {
        println!("column={} title={:?} cards={}", column.id, column.title, column.count);
    }
    let themes: Vec<&str> = snapshot.themes.iter().map(|theme| theme.name.as_str()).collect();
    println!("themes={}", themes.join(","));
    println!("members={} role={}", snapshot.members.len(), snapshot.role);

    ExitCode::SUCCESS
}
