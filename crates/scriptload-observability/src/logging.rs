//! Log window: renders load telemetry as structured entries.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use scriptload_core::{progress_percent, LoadEvent, LoadObserver};
use serde::Serialize;

/// Log level for window entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-resource progress.
    Debug,
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Event that produced this entry.
    pub event: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Wall-clock time the entry was recorded.
    pub at: DateTime<Utc>,
    /// Microseconds since the window was created.
    pub elapsed_us: u64,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.level, self.message);

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Output format for rendered lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON, one object per line.
    Json,
    /// Human-readable.
    #[default]
    Human,
}

/// A `LoadObserver` that keeps a bounded, renderable log of load events.
///
/// This is the presentation side of the loader: it only sees events and
/// never touches the document.
#[derive(Debug)]
pub struct LogWindow {
    title: String,
    format: LogFormat,
    echo: bool,
    min_level: LogLevel,
    capacity: Option<usize>,
    start: Instant,
    entries: Mutex<Vec<LogEntry>>,
}

impl LogWindow {
    /// Create an empty log window.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            format: LogFormat::default(),
            echo: false,
            min_level: LogLevel::Debug,
            capacity: None,
            start: Instant::now(),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Also forward every rendered line to `tracing`.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Drop entries below `level`. Everything is kept by default.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Keep at most `capacity` entries, dropping the oldest.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Snapshot of the current entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries rendered in the configured format.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|e| self.format_entry(e)).collect()
    }

    /// Title followed by every rendered line.
    pub fn render(&self) -> String {
        let mut out = self.title.clone();
        for line in self.lines() {
            out.push('\n');
            out.push_str(&line);
        }
        out
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        }
    }

    fn record(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        if self.echo {
            let line = self.format_entry(&entry);
            match entry.level {
                LogLevel::Error => tracing::error!(target: "scriptload::window", "{}", line),
                LogLevel::Info => tracing::info!(target: "scriptload::window", "{}", line),
                LogLevel::Debug => tracing::debug!(target: "scriptload::window", "{}", line),
            }
        }

        let mut entries = self.lock();
        entries.push(entry);
        if let Some(capacity) = self.capacity {
            let overflow = entries.len().saturating_sub(capacity);
            entries.drain(..overflow);
        }
    }

    fn entry(&self, level: LogLevel, event: &'static str, message: String) -> LogEntry {
        LogEntry {
            level,
            event,
            message,
            at: Utc::now(),
            elapsed_us: self.start.elapsed().as_micros() as u64,
            fields: BTreeMap::new(),
        }
    }
}

impl LoadObserver for LogWindow {
    fn on_event(&self, event: &LoadEvent<'_>) {
        let entry = match *event {
            LoadEvent::Init { request } => {
                let mut entry = self.entry(
                    LogLevel::Info,
                    event.name(),
                    format!("Loading {} resources", request.total_resources()),
                );
                entry
                    .fields
                    .insert("statics".into(), serde_json::json!(request.statics));
                entry
                    .fields
                    .insert("dynamics".into(), serde_json::json!(request.dynamics));
                if let Some(main) = request.main() {
                    entry.fields.insert("main".into(), serde_json::json!(main));
                }
                entry
            }
            LoadEvent::Progress {
                kind,
                identifier,
                completed,
                total,
            } => {
                let percent = progress_percent(completed, total);
                let mut entry = self.entry(
                    LogLevel::Debug,
                    event.name(),
                    format!("{} {}/{} ({}%) {}", kind, completed, total, percent, identifier),
                );
                entry.fields.insert("kind".into(), serde_json::json!(kind));
                entry.fields.insert("percent".into(), serde_json::json!(percent));
                entry
            }
            LoadEvent::Finish { elapsed } => {
                let mut entry = self.entry(
                    LogLevel::Info,
                    event.name(),
                    format!("Finished in {:.3}s", elapsed.as_secs_f64()),
                );
                entry
                    .fields
                    .insert("elapsed_ms".into(), serde_json::json!(elapsed.as_millis() as u64));
                entry
            }
            LoadEvent::Failed { error } => {
                let mut entry =
                    self.entry(LogLevel::Error, event.name(), format!("Load failed: {}", error));
                entry
                    .fields
                    .insert("identifier".into(), serde_json::json!(error.identifier()));
                let cause = error.resource_error().source.to_string();
                entry.fields.insert("cause".into(), serde_json::json!(cause));
                entry
            }
        };

        self.record(entry);
    }
}
