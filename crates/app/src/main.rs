use std::fmt;
use std::net::TcpListener;

use env_logger::Env;
use services::{AppServices, Clock, ServiceDeps};

const DEFAULT_DB_URL: &str = "sqlite://courses.sqlite3";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPort { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid port: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid database url: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--host <addr>] [--port <port>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --host {DEFAULT_HOST}");
    eprintln!("  --port {DEFAULT_PORT}");
    eprintln!();
    eprintln!("Environment (a .env file is read first):");
    eprintln!("  DATABASE_URL, HOST, PORT, JWT_SECRET, RUST_LOG, CORS_ALLOWED_ORIGINS");
    eprintln!("  AI_API_KEY, AI_BASE_URL, AI_MODEL, AI_LANGUAGE");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    host: String,
    port: u16,
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(raw)?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self {
            db_url: std::env::var("DATABASE_URL")
                .ok()
                .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url),
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.into()),
            port,
        })
    }

    /// Apply command-line flags on top of `self`. Returns `None` for `--help`.
    fn with_flags(
        mut self,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    self.db_url = normalize_sqlite_url(value);
                }
                "--host" => self.host = require_value(args, "--host")?,
                "--port" => self.port = parse_port(require_value(args, "--port")?)?,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Some(self))
    }
}

fn parse_port(raw: String) -> Result<u16, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidPort { raw })
}

fn is_memory_url(db_url: &str) -> bool {
    db_url == "sqlite::memory:" || db_url.contains("mode=memory")
}

fn normalize_sqlite_url(raw: String) -> String {
    if is_memory_url(&raw) || raw.starts_with("sqlite://") {
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if is_memory_url(db_url) {
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
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::from_env()
        .and_then(|defaults| defaults.with_flags(&mut argv))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let Some(args) = parsed else {
        print_usage();
        return Ok(());
    };

    // Open + migrate SQLite at startup so a bad database fails before binding.
    prepare_sqlite_file(&args.db_url)?;
    let services =
        AppServices::new_sqlite(&args.db_url, Clock::default_clock(), ServiceDeps::from_env())
            .await?;

    let listener = TcpListener::bind((args.host.as_str(), args.port))?;
    log::info!(
        "listening on http://{} (db: {})",
        listener.local_addr()?,
        args.db_url
    );
    let cors = api::CorsConfig::from_env();
    if cors.allowed_origins().is_empty() {
        log::info!("CORS: any origin allowed");
    } else {
        log::info!("CORS: allowed origins {:?}", cors.allowed_origins());
    }
    api::run(listener, services, cors)?.await?;
    Ok(())
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("{err}");
        std::process::exit(2);
    }
}
