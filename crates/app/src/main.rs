mod args;
mod terminal;

use std::io;
use std::path::Path;
use std::sync::Arc;

use services::{EventLog, GameConfig, GameEvent, GameService};
use storage::builtin_bank;
use storage::json::load_from_path;
use storage::repository::{InMemoryQuestionBank, QuestionBank};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trivia_core::model::CategoryCatalog;

use args::{Args, Command, ProcessEnv, print_usage};
use terminal::Terminal;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_bank(
    path: Option<&Path>,
    catalog: &CategoryCatalog,
) -> Result<InMemoryQuestionBank, Box<dyn std::error::Error>> {
    let bank = match path {
        Some(path) => load_from_path(path, catalog)?,
        None => builtin_bank(catalog)?,
    };
    Ok(bank)
}

fn check(path: &Path, catalog: &CategoryCatalog) -> Result<(), Box<dyn std::error::Error>> {
    let bank = load_from_path(path, catalog)?;
    println!("{}: {} questions", path.display(), bank.len());
    for (index, category) in catalog.iter() {
        println!("  {index} {:<20} {}", category.name(), bank.count(index));
    }

    let missing = bank.missing_categories();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|c| catalog.get(*c).name()).collect();
        println!("missing: {}", names.join(", "));
        return Err(format!("{} categories have no questions", missing.len()).into());
    }
    Ok(())
}

fn play(args: &Args, catalog: CategoryCatalog) -> Result<(), Box<dyn std::error::Error>> {
    let bank = load_bank(args.bank.as_deref(), &catalog)?;
    let missing = bank.missing_categories();
    if !missing.is_empty() {
        // Playable, but rolling one of these shows a notice instead of a question.
        info!(missing = missing.len(), "bank does not cover every category");
    }

    let config = match args.seed {
        Some(seed) => GameConfig::default().with_seed(seed),
        None => GameConfig::default(),
    };
    let mut game = GameService::new(catalog, Arc::new(bank), config);

    let log = EventLog::new();
    game.subscribe(log.clone());
    game.subscribe(|event: &GameEvent| debug!(?event, "game event"));

    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());
    terminal.run(&mut game, &log)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), &ProcessEnv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = CategoryCatalog::classic();
    match parsed.command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Check => match parsed.bank.as_deref() {
            Some(path) => check(path, &catalog),
            None => Err(args::ArgsError::BankRequired.into()),
        },
        Command::Play => play(&parsed, catalog),
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
