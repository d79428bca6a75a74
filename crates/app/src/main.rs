use std::fmt;
use std::sync::Arc;

use bounce_core::model::{ApiSettingsDraft, TrackId};
use bounce_core::registry::resolve_track_id;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::api::{AuthClient, CommentClient};
use services::{AppServices, Clock, IdentityService, ReviewBoard, SessionDeps};
use tracing::info;
use ui::{App, StartRoute, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidApiUrl { raw: String },
    InvalidTrack { raw: String },
    MissingTrack,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidTrack { raw } => write!(f, "unknown track: {raw}"),
            ArgsError::MissingTrack => write!(f, "reset requires --track <slug>"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session_deps(&self) -> SessionDeps {
        self.services.session_deps()
    }

    fn identity(&self) -> IdentityService {
        self.services.identity()
    }

    fn reviews(&self) -> ReviewBoard {
        self.services.reviews()
    }

    fn comments(&self) -> Arc<CommentClient> {
        self.services.comments()
    }

    fn auth(&self) -> Arc<AuthClient> {
        self.services.auth()
    }
}

struct Args {
    db_url: String,
    api_url: Option<String>,
    track: Option<TrackId>,
    open: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--db <sqlite_url>] [--api-url <url>] [--open <path>]");
    eprintln!("  cargo run -p app -- progress [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- reset    [--db <sqlite_url>] --track <slug>");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:bounce.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  BOUNCE_DB_URL, BOUNCE_API_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("BOUNCE_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://bounce.sqlite3".into(), normalize_sqlite_url);
        let mut api_url = std::env::var("BOUNCE_API_URL").ok();
        let mut track = None;
        let mut open = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-url" => api_url = Some(require_value(args, "--api-url")?),
                "--open" => open = Some(require_value(args, "--open")?),
                "--track" => {
                    let value = require_value(args, "--track")?;
                    track = Some(
                        resolve_track_id(Some(&value))
                            .ok_or(ArgsError::InvalidTrack { raw: value })?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            api_url,
            track,
            open,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let api = ApiSettingsDraft {
        base_url: parsed.api_url.clone(),
    }
    .validate()
    .map_err(|_| ArgsError::InvalidApiUrl {
        raw: parsed.api_url.clone().unwrap_or_default(),
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), api).await?;
    info!(db = %parsed.db_url, "storage ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);
            let start = parsed.open.as_deref().map(StartRoute::new).unwrap_or_default();

            // Some dev setups default tao windows to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Bounce")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .with_context(start)
                .launch(App);
            Ok(())
        }
        Command::Progress => {
            print_progress(&services).await;
            Ok(())
        }
        Command::Reset => {
            let track = parsed.track.ok_or(ArgsError::MissingTrack)?;
            services.progress().full_reset_track(track).await?;
            println!("reset {track}");
            Ok(())
        }
    }
}

async fn print_progress(services: &AppServices) {
    let progress = services.progress();
    let catalog = services.catalog();
    match progress.load_stored_progress().await {
        Some(record) => println!(
            "current: {} / {} ({})",
            record.track(),
            record.level(),
            catalog.title(record.level())
        ),
        None => println!("current: none"),
    }

    let completed = progress.read_completed_levels().await;
    for track in TrackId::ALL {
        let levels = progress.registry().track_levels(track);
        let done = levels.iter().filter(|level| completed.contains(**level)).count();
        println!("{:<18} {done}/{}", track.label(), levels.len());
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
