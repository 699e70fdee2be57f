//! Console rendering of purge run progress.

use std::io::{self, Write};

use crate::client::coordinator::{ProgressSink, ProgressUpdate};

const BAR_WIDTH: usize = 40;

/// Renders a single-line progress bar to stdout, overwritten in place.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    rendered: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_bar(percentage: i64) -> String {
        let clamped = percentage.clamp(0, 100) as usize;
        let filled = clamped * BAR_WIDTH / 100;
        format!(
            "[{}{}] {clamped:>3}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled)
        )
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_start(&mut self) {
        print!("\r{} ", Self::render_bar(0));
        let _ = io::stdout().flush();
        self.rendered = true;
    }

    fn on_progress(&mut self, update: &ProgressUpdate) {
        print!(
            "\r{} ({})",
            Self::render_bar(update.percentage),
            update.message
        );
        let _ = io::stdout().flush();
        self.rendered = true;
    }

    fn on_terminal(&mut self, message: &str) {
        if self.rendered {
            println!();
        }
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_empty_full_and_clamped() {
        assert!(ConsoleProgress::render_bar(0).starts_with(&format!("[{}]", "-".repeat(BAR_WIDTH))));
        assert!(ConsoleProgress::render_bar(100)
            .starts_with(&format!("[{}]", "#".repeat(BAR_WIDTH))));
        assert_eq!(
            ConsoleProgress::render_bar(150),
            ConsoleProgress::render_bar(100)
        );
    }
}
