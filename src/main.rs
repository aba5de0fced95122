use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use log::info;
use study_termtrack::{App, AppResult, FileStore, NavigationMode, Settings};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding accounts, session and scores
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Study document to load on start
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// How the quiz moves between questions
    #[arg(short, long, value_enum)]
    navigation: Option<NavigationMode>,

    /// Where to write the log (defaults to <data-dir>/study-termtrack.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> AppResult<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(navigation) = args.navigation {
        settings.navigation = navigation;
    }

    let store = Arc::new(FileStore::open(&settings.data_dir)?);
    let log_file = args
        .log_file
        .unwrap_or_else(|| settings.default_log_file());
    init_logging(&log_file)?;
    info!(
        "Starting with data dir {} in {:?} mode",
        settings.data_dir.display(),
        settings.navigation
    );

    let mut app = App::new(settings, store)?;
    if let Some(path) = args.file {
        app.select_document(&path);
    }

    study_termtrack::run(app).await
}

/// The terminal belongs to the UI, so log records go to a file.
fn init_logging(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
