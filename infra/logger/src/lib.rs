//! # Logger
//!
//! Installs the global `tracing` subscriber for the `moitt` binary.
//!
//! Console output goes to stderr so it interleaves with the output of the
//! cluster tools, which inherit stdout. Colors are used only when stderr is a
//! terminal, which keeps CI logs free of escape codes. With a log directory each
//! run is also appended to a rolling file through a non-blocking writer, so an
//! hour-long cluster install leaves a record after the terminal is gone.
//!
//! `RUST_LOG` wins over the programmatic level unless explicit directives are
//! given with [`LoggerBuilder::env_filter`].
//!
//! ## Example
//!
//! ```rust
//! # use moitt_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("moitt")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::io::IsTerminal;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Two weeks of daily files.
const KEEP_FILES: usize = 14;
const FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
struct Settings {
    console: bool,
    ansi: Option<bool>,
    level: LevelFilter,
    directives: Option<String>,
    file: Option<FileSettings>,
}

#[derive(Debug)]
struct FileSettings {
    dir: PathBuf,
    rotation: Rotation,
    keep: usize,
    json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { console: true, ansi: None, level: LevelFilter::INFO, directives: None, file: None }
    }
}

/// Typestate: no name set yet.
#[derive(Debug)]
pub struct Unnamed;
/// Typestate: named, [`LoggerBuilder::init`] is available.
#[derive(Debug)]
pub struct Named(String);
/// Typestate: console only.
#[derive(Debug)]
pub struct ConsoleOnly;
/// Typestate: a log directory is set.
#[derive(Debug)]
pub struct FileBacked;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for FileBacked {}

/// Configures the global subscriber. A name is required before [`LoggerBuilder::init`]
/// is available; file-only knobs appear once [`LoggerBuilder::path`] is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    settings: Settings,
    name: N,
    output: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Sets the logger name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), output: PhantomData }
    }
}

impl LoggerBuilder<Named, FileBacked> {
    /// Number of rotated files kept in the log directory.
    #[must_use]
    pub fn max_files(mut self, keep: usize) -> Self {
        if let Some(file) = &mut self.settings.file {
            file.keep = keep;
        }
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = &mut self.settings.file {
            file.rotation = rotation;
        }
        self
    }

    /// Writes the file output as JSON lines.
    #[must_use]
    pub fn json(mut self) -> Self {
        if let Some(file) = &mut self.settings.file {
            file.json = true;
        }
        self
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Filter directives such as `moitt_istio=debug`. They replace `RUST_LOG`, and
    /// invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Forces console colors on or off instead of detecting a terminal.
    #[must_use]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.settings.ansi = Some(enabled);
        self
    }

    /// Directory for rolling log files, created on init.
    pub fn path(self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, FileBacked> {
        let mut settings = self.settings;
        settings.file =
            Some(FileSettings { dir: dir.into(), rotation: Rotation::DAILY, keep: KEEP_FILES, json: false });
        LoggerBuilder { settings, name: self.name, output: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until exit: it owns the file writer guard.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for a blank name, no outputs, zero kept
    /// files or bad directives. [`LoggerError::Internal`] or [`LoggerError::Appender`]
    /// when the log directory is unusable, and [`LoggerError::Subscriber`] when a
    /// global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name), .. } = self;
        settings.validate(&name)?;

        let filter = settings.filter()?;
        let mut layers: Vec<BoxedLayer> = Vec::new();
        if settings.console {
            layers.push(console_layer(settings.ansi.unwrap_or_else(|| std::io::stderr().is_terminal())));
        }

        let guard = match &settings.file {
            Some(file) => {
                let (layer, guard) = file_layer(file, &name)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;
        Ok(Logger { guard })
    }
}

impl Settings {
    fn validate(&self, name: &str) -> Result<(), LoggerError> {
        let problem = if name.trim().is_empty() {
            "Logger name cannot be empty"
        } else if !self.console && self.file.is_none() {
            "No logging output enabled. Enable the console or set a log directory."
        } else if self.file.as_ref().is_some_and(|f| f.keep == 0) {
            "max_files must be greater than zero"
        } else {
            return Ok(());
        };
        Err(LoggerError::InvalidConfiguration { message: problem.into(), context: None })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{directives}': {e}").into(),
                context: None,
            }),
        }
    }
}

fn console_layer(ansi: bool) -> BoxedLayer {
    layer().compact().with_target(false).with_ansi(ansi).with_writer(std::io::stderr).boxed()
}

fn file_layer(file: &FileSettings, prefix: &str) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    create_dir(&file.dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(file.rotation.clone())
        .filename_prefix(prefix)
        .filename_suffix(FILE_SUFFIX)
        .max_log_files(file.keep)
        .build(&file.dir)
        .context(format!("Log directory {}", file.dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = layer().with_writer(writer).with_ansi(false);
    let layer = if file.json { layer.json().boxed() } else { layer.boxed() };
    Ok((layer, guard))
}

fn create_dir(dir: &Path) -> Result<(), LoggerError> {
    fs::create_dir_all(dir).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create log directory {}", dir.display()).into()),
    })
}

/// Handle to the installed subscriber; dropping it flushes the file writer.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: Unnamed, output: PhantomData }
    }

    /// Returns `true` when a file writer is attached.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}
