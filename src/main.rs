use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Parser};

use inkboard::Config;
use inkboard::Whiteboard;
use inkboard::draw::ContainerBox;
use inkboard::input::ScriptSource;
use inkboard::notification::{DesktopNotifier, LogNotifier, Notifier};
use inkboard::storage::RecordStore;
use inkboard::ui::{ConfirmPrompt, FixedAnswer, TerminalPrompt};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("INKBOARD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "inkboard")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Freehand whiteboard engine with snapshot undo/redo"
)]
struct Cli {
    /// Replay a JSON event script against a fresh board
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Size of the host container the surface is fitted into
    #[arg(long, value_name = "WxH", default_value = "1280x800", value_parser = parse_container)]
    container: ContainerBox,

    /// Answer yes to the clear-board confirmation instead of prompting
    #[arg(long, short = 'y', action = ArgAction::SetTrue)]
    yes: bool,

    /// Directory exports are written to (overrides the config file)
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Directory saved records are written to (overrides the config file)
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Configuration file to load instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List saved board records and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_saved: bool,

    /// Also report errors as desktop notifications
    #[arg(long, action = ArgAction::SetTrue)]
    notify: bool,
}

fn parse_container(value: &str) -> Result<ContainerBox, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid container width '{width}'"))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid container height '{height}'"))?;
    Ok(ContainerBox::sized(width, height))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.storage_dir {
        config.storage.directory = Some(dir.to_string_lossy().into_owned());
    }
    if let Some(dir) = &cli.export_dir {
        config.export.directory = Some(dir.to_string_lossy().into_owned());
    }

    if cli.list_saved {
        list_saved(&config)?;
    } else if let Some(script) = &cli.script {
        replay(&cli, config, script)?;
    } else {
        // No flags: show usage
        println!("inkboard: Freehand whiteboard engine with snapshot undo/redo");
        println!();
        println!("Usage:");
        println!("  inkboard --script <FILE>   Replay a recorded event script");
        println!("  inkboard --list-saved      List saved board records");
        println!("  inkboard --help            Show help");
        println!();
        println!("Event scripts are JSON arrays of events, for example:");
        println!(r#"  [{{"type": "pointer-down", "x": 30, "y": 30}},"#);
        println!(r#"   {{"type": "pointer-move", "x": 120, "y": 30}},"#);
        println!(r#"   {{"type": "pointer-up"}}, {{"type": "save"}}]"#);
    }

    Ok(())
}

fn list_saved(config: &Config) -> anyhow::Result<()> {
    let store = RecordStore::new(config.storage_directory(), config.storage.key_prefix.clone());
    let records = store.list()?;
    if records.is_empty() {
        println!("No saved boards in {}", store.directory().display());
        return Ok(());
    }
    for record in records {
        println!(
            "{}\t{}\t{}\t{} bytes",
            record.key, record.name, record.timestamp, record.data_len
        );
    }
    Ok(())
}

fn replay(cli: &Cli, config: Config, script: &std::path::Path) -> anyhow::Result<()> {
    let mut source = ScriptSource::from_file(script)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    let prompt: Box<dyn ConfirmPrompt> = if cli.yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(TerminalPrompt::stdio())
    };
    let notifier: Box<dyn Notifier> = if cli.notify {
        Box::new(DesktopNotifier::new(runtime.handle().clone()))
    } else {
        Box::new(LogNotifier)
    };

    let mut board = Whiteboard::new(config, cli.container, runtime.handle())?
        .with_prompt(prompt)
        .with_notifier(notifier);

    log::info!("Replaying {} events from {}", source.remaining(), script.display());
    let handled = board.run(&mut source)?;

    println!("Replayed {} events", handled);
    println!(
        "Surface: {}x{}",
        board.surface().width(),
        board.surface().height()
    );
    println!(
        "History: entry {} of {}",
        board.history_cursor() + 1,
        board.history_len()
    );
    println!("Tool: {}", board.tools().tool().id());
    println!("Zoom: {}", board.viewport().label());
    println!("Board: {}", board.effective_board_name());
    println!("Status: {}", board.status_text(Instant::now()));

    Ok(())
}
