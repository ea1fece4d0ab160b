use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Log levels representing increasing verbosity.
///
/// Setting a level enables that level and every less verbose one:
///
/// - **Silent (0)**: No logging output
/// - **Error (1)**: Only error messages
/// - **Warn (2)**: Warning and error messages (default, keeps report output clean)
/// - **Info (3)**: Informational, warning, and error messages
/// - **Debug (4)**: Everything, including per-file and per-label detail
///
/// The level is read from the `LOG_LEVEL` environment variable. `RUST_LOG`,
/// when set, takes precedence since it is handed straight to tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    /// Parse a log level from a string (case insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "silent" => Some(Level::Silent),
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Silent => "Silent",
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Info => "Info",
            Level::Debug => "Debug",
        }
    }

    /// The equivalent tracing filter directive.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Level::Silent => "off",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Level requested through `LOG_LEVEL`, or `Warn`.
pub fn level_from_env() -> Level {
    std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|v| Level::from_str(&v))
        .unwrap_or(Level::Warn)
}

/// Installs the global tracing subscriber. Logs go to stderr so that the
/// report on stdout can be piped.
pub fn init_tracing(level: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Initialize tracing once, globally. Later calls are no-ops, as is a call
/// made after some other subscriber was installed.
pub fn init_once(level: Level) {
    TRACING_INITIALIZED.get_or_init(|| {
        if let Err(e) = init_tracing(level) {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

fn ensure_init() {
    if TRACING_INITIALIZED.get().is_none() {
        init_once(level_from_env());
    }
}

pub fn debug(msg: &str) {
    ensure_init();
    tracing::debug!("{}", msg);
}

pub fn info(msg: &str) {
    ensure_init();
    tracing::info!("{}", msg);
}

pub fn warn(msg: &str) {
    ensure_init();
    tracing::warn!("{}", msg);
}

pub fn error(msg: &str) {
    ensure_init();
    tracing::error!("{}", msg);
}
