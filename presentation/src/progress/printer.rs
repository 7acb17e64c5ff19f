//! Incremental console printer for streamed replies.
//!
//! Implements the [`ReplyObserver`] port: each snapshot is diffed against
//! the previous one and only the new suffix is printed, so tokens appear
//! as they arrive. An authoritative `full_response` rewrite that is not a
//! pure extension reprints the reply on a fresh line. Until the first
//! snapshot arrives a spinner shows that the assistant is thinking.

use indicatif::{ProgressBar, ProgressStyle};
use ragchat_application::ReplyObserver;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Prints streamed reply snapshots to stdout.
pub struct StreamPrinter {
    last: Mutex<String>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl StreamPrinter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner()
            .with_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("static template"),
            )
            .with_message("Assistant is thinking...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        Self {
            last: Mutex::new(String::new()),
            spinner: Mutex::new(Some(spinner)),
        }
    }

    /// Silent printer for quiet mode (no spinner).
    pub fn without_spinner() -> Self {
        Self {
            last: Mutex::new(String::new()),
            spinner: Mutex::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().unwrap().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StreamPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyObserver for StreamPrinter {
    fn on_snapshot(&self, text: &str, is_final: bool) {
        self.clear_spinner();

        let mut last = self.last.lock().unwrap();
        let mut stdout = std::io::stdout().lock();
        match text.strip_prefix(last.as_str()) {
            Some(suffix) => {
                let _ = write!(stdout, "{suffix}");
            }
            None => {
                // Server-side post-processing rewrote the reply.
                let _ = writeln!(stdout);
                let _ = write!(stdout, "{text}");
            }
        }
        if is_final {
            let _ = writeln!(stdout);
        }
        let _ = stdout.flush();
        *last = text.to_string();
    }
}
