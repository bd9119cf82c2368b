//! Output formatting for the CLI.

use std::sync::Mutex;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use scriptload_core::{LoadEvent, LoadObserver};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Create a progress bar.
    pub fn progress(&self, len: u64, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(template) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(template.progress_chars("#>-"));
        }
        pb.set_message(msg.to_string());
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Drives a progress bar from loader events.
///
/// The bar is sized on `Init` to cover both groups; main is reported in
/// the finishing message.
pub struct ProgressObserver {
    bar: ProgressBar,
    last: Mutex<Option<String>>,
}

impl ProgressObserver {
    /// Wrap a progress bar.
    pub fn new(bar: ProgressBar) -> Self {
        Self {
            bar,
            last: Mutex::new(None),
        }
    }

    /// Identifier of the most recent progress event.
    pub fn last_loaded(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl LoadObserver for ProgressObserver {
    fn on_event(&self, event: &LoadEvent<'_>) {
        match event {
            LoadEvent::Init { request } => {
                self.bar
                    .set_length((request.statics.len() + request.dynamics.len()) as u64);
            }
            LoadEvent::Progress {
                kind, identifier, ..
            } => {
                self.bar.inc(1);
                self.bar.set_message(format!("{} {}", kind, identifier));
                if let Ok(mut last) = self.last.lock() {
                    *last = Some(identifier.to_string());
                }
            }
            LoadEvent::Finish { elapsed } => {
                self.bar
                    .finish_with_message(format!("done in {}", format_duration(*elapsed)));
            }
            LoadEvent::Failed { error } => {
                self.bar
                    .abandon_with_message(format!("failed at {}", error.identifier()));
            }
        }
    }
}

/// Format a duration as a human-readable string.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", elapsed.as_millis())
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let whole = elapsed.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}
