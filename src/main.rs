use clap::Parser;
use duospace::config::AppConfig;
use duospace::error::AppError;
use duospace::net::UreqTransport;
use duospace::runtime::Runtime;
use duospace::session::{FileSessionStore, MemorySessionStore, SessionStore, USER_ID_KEY};
use duospace::state::{AppState, Screen};
use duospace::task::{Capabilities, TaskExecutor};
use duospace::terminal::Terminal;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "duospace", version, about = "Duospace sign-up and preferences in the terminal")]
struct Args {
    /// YAML config file.
    #[arg(long, env = "DUOSPACE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "DUOSPACE_API_BASE_URL")]
    api_base_url: Option<String>,

    /// YAML or JSON map holding the signed-in `user_id`.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Use this user id instead of reading the session file.
    #[arg(long)]
    user_id: Option<String>,

    /// Screen to open: welcome, register or preferences.
    #[arg(long, default_value_t = Screen::Welcome)]
    screen: Screen,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = match args.config.as_deref() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(url) = args.api_base_url {
        config.api_base_url = url;
    }
    if let Some(path) = args.session_file {
        config.session_file = Some(path);
    }
    if let Some(path) = args.log_file {
        config.log_file = Some(path);
    }

    if let Some(path) = config.log_file.as_deref() {
        init_logging(path)?;
    }
    info!(api = %config.api_base_url, screen = %args.screen, "starting duospace");

    let session: Arc<dyn SessionStore> = match (args.user_id, config.session_file.as_deref()) {
        (Some(user_id), _) => Arc::new(MemorySessionStore::new().with(USER_ID_KEY, user_id)),
        (None, Some(path)) => Arc::new(FileSessionStore::load(path)?),
        (None, None) => Arc::new(MemorySessionStore::new()),
    };

    let timeout = config.request_timeout();
    let capabilities = Capabilities::new(
        Arc::new(UreqTransport::new(config.api_base_url.as_str(), timeout)),
        config.geolocation.build(timeout)?,
    );

    let state = AppState::new(session).with_screen(args.screen);
    let terminal = Terminal::new()?;
    let mut runtime = Runtime::new(state, terminal, TaskExecutor::new(capabilities));
    runtime.run()?;
    Ok(())
}

/// The terminal owns stdout, so logs only go to a file.
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::Log {
            path: path.to_path_buf(),
            source,
        })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duospace=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
