//! YAML-driven logging bootstrap and logger factory.
//!
//! A logging configuration is a YAML document in the dictionary form:
//! `version`, `formatters`, `handlers`, `loggers`, and `root`. The document
//! is loaded with a loader restricted to plain scalars, sequences, and
//! mappings (tagged values are rejected during deserialization), validated
//! against the schema, and applied exactly once per process as the global
//! [`tracing`] subscriber configuration.
//!
//! Initialization is an explicit setup call guarded by a one-time
//! primitive: the first successful [`init`] (or [`init_from_file`] /
//! [`init_default`]) wins, and later attempts do not reapply or replace the
//! active configuration. After initialization, [`get_logger`] hands out
//! named [`Logger`] handles whose effective level is resolved from the
//! applied document; [`root_logger`] is the shared root handle, constructed
//! once and returned by reference thereafter.
//!
//! A handle snapshots its effective level at creation, so handles should be
//! obtained after initialization.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};
use tracing_subscriber::EnvFilter;

use crate::constants::ROOT_LOGGER;
use crate::core::PkgmetaError;

/// The bundled default configuration document.
const DEFAULT_CONFIG: &str = include_str!("default.yml");

static INIT: Once = Once::new();
static APPLIED: OnceLock<LogConfig> = OnceLock::new();
static ROOT: OnceLock<Logger> = OnceLock::new();

/// Severity levels accepted by configuration documents.
///
/// Both the dictionary-configuration spellings (`DEBUG`, `WARNING`,
/// `CRITICAL`) and the lowercase forms are accepted. `CRITICAL` maps onto
/// the error level when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum LevelName {
    /// Finest-grained tracing output.
    #[serde(alias = "TRACE", alias = "trace")]
    Trace,
    /// Diagnostic output.
    #[serde(alias = "DEBUG", alias = "debug")]
    Debug,
    /// Informational output.
    #[serde(alias = "INFO", alias = "info")]
    Info,
    /// Conditions worth surfacing without failing.
    #[serde(alias = "WARNING", alias = "warning", alias = "WARN", alias = "warn")]
    Warning,
    /// Failures.
    #[serde(alias = "ERROR", alias = "error")]
    Error,
    /// Fatal failures; applied as the error level.
    #[serde(alias = "CRITICAL", alias = "critical")]
    Critical,
}

impl LevelName {
    fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

/// Output shape produced by a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// One event per line with full field output.
    Full,
    /// Abbreviated single-line output.
    Compact,
}

/// A named formatter declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formatter {
    /// The output shape this formatter produces.
    pub format: FormatStyle,
}

/// Destination class of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerClass {
    /// Write to a standard stream.
    Console,
    /// Append to a file.
    File,
}

/// Standard stream selection for console handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTarget {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// A named handler declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Handler {
    /// Destination class.
    pub class: HandlerClass,
    /// Minimum level this handler emits; combined with the root level.
    #[serde(default)]
    pub level: Option<LevelName>,
    /// Name of a declared formatter.
    #[serde(default)]
    pub formatter: Option<String>,
    /// Stream for console handlers; defaults to stderr.
    #[serde(default)]
    pub stream: Option<StreamTarget>,
    /// Target file for file handlers.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// A named logger declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Effective level for this logger and its dotted descendants.
    pub level: LevelName,
    /// Names of declared handlers.
    #[serde(default)]
    pub handlers: Vec<String>,
}

/// The root logger declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootConfig {
    /// Default level for every logger without a more specific declaration.
    pub level: LevelName,
    /// Names of declared handlers; the first one selects the output sink.
    #[serde(default)]
    pub handlers: Vec<String>,
}

/// A complete logging configuration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Schema version; must be `1`.
    pub version: u32,
    /// Declared formatters by name.
    #[serde(default)]
    pub formatters: BTreeMap<String, Formatter>,
    /// Declared handlers by name.
    #[serde(default)]
    pub handlers: BTreeMap<String, Handler>,
    /// Declared loggers by dotted name.
    #[serde(default)]
    pub loggers: BTreeMap<String, LoggerConfig>,
    /// The root declaration.
    pub root: RootConfig,
}

impl LogConfig {
    /// Validate the document against the schema.
    ///
    /// `origin` names the document in errors. Checks the version, that
    /// handlers reference declared formatters, that file handlers carry a
    /// path (and console handlers do not), and that every logger and the
    /// root reference declared handlers.
    pub fn validate(&self, origin: &str) -> Result<()> {
        let invalid = |reason: String| {
            anyhow::Error::from(PkgmetaError::LogConfigError {
                file: origin.to_string(),
                reason,
            })
        };

        if self.version != 1 {
            return Err(invalid(format!("unsupported version {}", self.version)));
        }

        for (name, handler) in &self.handlers {
            if let Some(formatter) = &handler.formatter
                && !self.formatters.contains_key(formatter)
            {
                return Err(invalid(format!(
                    "handler '{name}' references undeclared formatter '{formatter}'"
                )));
            }
            match handler.class {
                HandlerClass::File if handler.path.is_none() => {
                    return Err(invalid(format!("file handler '{name}' requires a path")));
                }
                HandlerClass::Console if handler.path.is_some() => {
                    return Err(invalid(format!("console handler '{name}' does not take a path")));
                }
                _ => {}
            }
        }

        let handler_refs = self
            .loggers
            .iter()
            .flat_map(|(name, logger)| logger.handlers.iter().map(move |h| (name.as_str(), h)))
            .chain(self.root.handlers.iter().map(|h| ("root", h)));
        for (logger, handler) in handler_refs {
            if !self.handlers.contains_key(handler) {
                return Err(invalid(format!(
                    "logger '{logger}' references undeclared handler '{handler}'"
                )));
            }
        }

        Ok(())
    }

    /// Effective level for `name`, walking the dotted hierarchy from most
    /// to least specific and falling back to the root level.
    #[must_use]
    pub fn level_for(&self, name: &str) -> LevelName {
        let mut candidate = name;
        loop {
            if let Some(logger) = self.loggers.get(candidate) {
                return logger.level;
            }
            match candidate.rfind('.') {
                Some(i) => candidate = &candidate[..i],
                None => break,
            }
        }
        self.root.level
    }

    /// The default filter directive applied to the global subscriber.
    ///
    /// The root handler's own level can only restrict further, so the more
    /// severe of the two thresholds wins.
    fn root_directive(&self) -> &'static str {
        let handler_level = self
            .root
            .handlers
            .first()
            .and_then(|name| self.handlers.get(name))
            .and_then(|handler| handler.level);
        let effective = match handler_level {
            Some(level) => self.root.level.max(level),
            None => self.root.level,
        };
        effective.as_directive()
    }

    /// Resolve the output sink from the first root handler.
    fn root_sink(&self, origin: &str) -> Result<Sink> {
        let Some(handler) = self.root.handlers.first().and_then(|n| self.handlers.get(n)) else {
            return Ok(Sink::Stderr { style: FormatStyle::Full });
        };

        let style = handler
            .formatter
            .as_ref()
            .and_then(|name| self.formatters.get(name))
            .map_or(FormatStyle::Full, |f| f.format);

        match handler.class {
            HandlerClass::Console => Ok(match handler.stream {
                Some(StreamTarget::Stdout) => Sink::Stdout { style },
                _ => Sink::Stderr { style },
            }),
            HandlerClass::File => {
                // validate() guarantees the path is present.
                let path = handler.path.clone().ok_or_else(|| PkgmetaError::LogConfigError {
                    file: origin.to_string(),
                    reason: "file handler requires a path".to_string(),
                })?;
                let file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|e| PkgmetaError::LogConfigError {
                        file: origin.to_string(),
                        reason: format!("cannot open log file {}: {e}", path.display()),
                    })?;
                Ok(Sink::File { file, style })
            }
        }
    }
}

enum Sink {
    Stdout { style: FormatStyle },
    Stderr { style: FormatStyle },
    File { file: fs::File, style: FormatStyle },
}

/// Load and validate a configuration document from `path`.
///
/// # Errors
///
/// Fails when the file is missing, is not parseable YAML, or does not
/// conform to the schema. Tagged YAML values are rejected by
/// deserialization, so a document cannot describe anything beyond plain
/// data.
pub fn load_config(path: &Path) -> Result<LogConfig> {
    let origin = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| PkgmetaError::LogConfigError {
        file: origin.clone(),
        reason: format!("cannot read: {e}"),
    })?;
    parse_config(&content, &origin)
}

/// The bundled default configuration: console output on stderr at the info
/// level.
pub fn default_config() -> Result<LogConfig> {
    parse_config(DEFAULT_CONFIG, "bundled default")
}

fn parse_config(content: &str, origin: &str) -> Result<LogConfig> {
    let config: LogConfig =
        serde_yaml::from_str(content).map_err(|e| PkgmetaError::LogConfigError {
            file: origin.to_string(),
            reason: e.to_string(),
        })?;
    config.validate(origin)?;
    Ok(config)
}

/// Apply `config` as the process-wide logging configuration.
///
/// The first successful call installs the global subscriber; later calls
/// validate their document and return without reapplying - only one
/// configuration is ever active per process. `origin` names the document
/// in errors.
pub fn init(config: LogConfig, origin: &str) -> Result<()> {
    config.validate(origin)?;
    let filter = EnvFilter::new(config.root_directive());
    let sink = config.root_sink(origin)?;

    INIT.call_once(|| {
        apply(filter, sink);
        let _ = APPLIED.set(config);
    });
    Ok(())
}

/// Load the document at `path` and apply it. See [`init`].
pub fn init_from_file(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    init(config, &path.display().to_string())
}

/// Apply the bundled default configuration, optionally overriding the root
/// level. See [`init`].
pub fn init_default(level: Option<LevelName>) -> Result<()> {
    let mut config = default_config()?;
    if let Some(level) = level {
        config.root.level = level;
    }
    init(config, "bundled default")
}

/// True once a configuration has been applied.
#[must_use]
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

fn apply(filter: EnvFilter, sink: Sink) {
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    // A subscriber installed earlier by the host process wins; the result
    // is intentionally discarded.
    let _ = match sink {
        Sink::Stderr { style: FormatStyle::Full } => {
            builder.with_writer(std::io::stderr).try_init()
        }
        Sink::Stderr { style: FormatStyle::Compact } => {
            builder.with_writer(std::io::stderr).compact().try_init()
        }
        Sink::Stdout { style: FormatStyle::Full } => {
            builder.with_writer(std::io::stdout).try_init()
        }
        Sink::Stdout { style: FormatStyle::Compact } => {
            builder.with_writer(std::io::stdout).compact().try_init()
        }
        Sink::File { file, style: FormatStyle::Full } => {
            builder.with_writer(std::sync::Arc::new(file)).with_ansi(false).try_init()
        }
        Sink::File { file, style: FormatStyle::Compact } => {
            builder.with_writer(std::sync::Arc::new(file)).with_ansi(false).compact().try_init()
        }
    };
}

/// A named logger handle.
///
/// Handles are cheap and carry the dotted name plus the effective level
/// resolved from the applied configuration at creation time. Events are
/// emitted through the global subscriber with the handle's name attached
/// as the `logger` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    name: String,
    level: LevelName,
}

impl Logger {
    /// The handle's dotted name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when `level` would be emitted by this handle.
    #[must_use]
    pub fn enabled(&self, level: LevelName) -> bool {
        level >= self.level
    }

    /// Emit a debug event.
    pub fn debug(&self, message: impl std::fmt::Display) {
        if self.enabled(LevelName::Debug) {
            tracing::debug!(logger = %self.name, "{message}");
        }
    }

    /// Emit an info event.
    pub fn info(&self, message: impl std::fmt::Display) {
        if self.enabled(LevelName::Info) {
            tracing::info!(logger = %self.name, "{message}");
        }
    }

    /// Emit a warning event.
    pub fn warn(&self, message: impl std::fmt::Display) {
        if self.enabled(LevelName::Warning) {
            tracing::warn!(logger = %self.name, "{message}");
        }
    }

    /// Emit an error event.
    pub fn error(&self, message: impl std::fmt::Display) {
        if self.enabled(LevelName::Error) {
            tracing::error!(logger = %self.name, "{message}");
        }
    }
}

/// Obtain a logger handle for `name`, or the root handle when absent.
///
/// The effective level comes from the applied configuration (dotted
/// hierarchy, falling back to the root level); before initialization the
/// info level is assumed.
#[must_use]
pub fn get_logger(name: Option<&str>) -> Logger {
    let name = name.unwrap_or(ROOT_LOGGER);
    let level = APPLIED.get().map_or(LevelName::Info, |config| config.level_for(name));
    Logger {
        name: name.to_string(),
        level,
    }
}

/// The shared root logger handle.
///
/// Constructed once on first access and returned by reference thereafter;
/// repeated references observe the same object.
#[must_use]
pub fn root_logger() -> &'static Logger {
    ROOT.get_or_init(|| get_logger(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_and_validates() {
        let config = default_config().unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.root.level, LevelName::Info);
        assert_eq!(config.root.handlers, vec!["console"]);
    }

    #[test]
    fn test_missing_version_is_rejected() {
        let doc = "root:\n  level: INFO\n";
        let err = parse_config(doc, "test").unwrap_err();
        let err = err.downcast_ref::<PkgmetaError>().unwrap();
        assert!(matches!(err, PkgmetaError::LogConfigError { .. }));
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let doc = "version: 2\nroot:\n  level: INFO\n";
        let err = parse_config(doc, "test").unwrap_err();
        assert!(err.to_string().contains("unsupported version 2"));
    }

    #[test]
    fn test_undeclared_formatter_is_rejected() {
        let doc = r"
version: 1
handlers:
  console:
    class: console
    formatter: missing
root:
  level: INFO
  handlers: [console]
";
        let err = parse_config(doc, "test").unwrap_err();
        assert!(err.to_string().contains("undeclared formatter 'missing'"));
    }

    #[test]
    fn test_undeclared_handler_is_rejected() {
        let doc = "version: 1\nroot:\n  level: INFO\n  handlers: [nowhere]\n";
        let err = parse_config(doc, "test").unwrap_err();
        assert!(err.to_string().contains("undeclared handler 'nowhere'"));
    }

    #[test]
    fn test_file_handler_requires_path() {
        let doc = r"
version: 1
handlers:
  logfile:
    class: file
root:
  level: INFO
  handlers: [logfile]
";
        let err = parse_config(doc, "test").unwrap_err();
        assert!(err.to_string().contains("requires a path"));
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let doc = "version: 1\nincremental: true\nroot:\n  level: INFO\n";
        let err = parse_config(doc, "test").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PkgmetaError>().unwrap(),
            PkgmetaError::LogConfigError { .. }
        ));
    }

    #[test]
    fn test_tagged_document_is_rejected() {
        let doc = "version: 1\nroot: !make_root\n  level: INFO\n";
        assert!(parse_config(doc, "test").is_err());
    }

    #[test]
    fn test_level_aliases() {
        let doc = r"
version: 1
loggers:
  scanner:
    level: warn
  scanner.literal:
    level: CRITICAL
root:
  level: debug
";
        let config = parse_config(doc, "test").unwrap();
        assert_eq!(config.root.level, LevelName::Debug);
        assert_eq!(config.loggers["scanner"].level, LevelName::Warning);
        assert_eq!(config.loggers["scanner.literal"].level, LevelName::Critical);
    }

    #[test]
    fn test_level_for_walks_dotted_hierarchy() {
        let doc = r"
version: 1
loggers:
  scanner:
    level: DEBUG
root:
  level: WARNING
";
        let config = parse_config(doc, "test").unwrap();
        assert_eq!(config.level_for("scanner"), LevelName::Debug);
        assert_eq!(config.level_for("scanner.literal"), LevelName::Debug);
        assert_eq!(config.level_for("other"), LevelName::Warning);
        assert_eq!(config.level_for("root"), LevelName::Warning);
    }

    #[test]
    fn test_root_directive_combines_handler_level() {
        let doc = r"
version: 1
handlers:
  console:
    class: console
    level: WARNING
root:
  level: DEBUG
  handlers: [console]
";
        let config = parse_config(doc, "test").unwrap();
        assert_eq!(config.root_directive(), "warn");
    }

    #[test]
    fn test_get_logger_names() {
        assert_eq!(get_logger(None).name(), "root");
        assert_eq!(get_logger(Some("foo")).name(), "foo");
    }

    #[test]
    fn test_root_logger_is_a_singleton() {
        let first = root_logger();
        let second = root_logger();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_init_applies_once() {
        init_default(Some(LevelName::Debug)).unwrap();
        assert!(is_initialized());

        // A second initialization validates but does not reapply.
        init_default(Some(LevelName::Error)).unwrap();
        assert!(is_initialized());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/logging.yml")).unwrap_err();
        let err = err.downcast_ref::<PkgmetaError>().unwrap();
        assert!(matches!(err, PkgmetaError::LogConfigError { .. }));
    }
}
