use colored::Colorize;
use std::io::{self, Write};
use std::time::Instant;

/// Progress indicator for batch restore runs
pub struct ProgressBar {
    total: usize,
    current: usize,
    message: String,
    start_time: Instant,
    width: usize,
}

impl ProgressBar {
    /// Create a new progress bar
    pub fn new(total: usize, message: &str) -> Self {
        Self {
            total,
            current: 0,
            message: message.to_string(),
            start_time: Instant::now(),
            width: 40,
        }
    }

    /// Increment the progress by 1
    pub fn inc(&mut self) {
        if self.current < self.total {
            self.current += 1;
            self.draw();
        }
    }

    /// Set the current progress
    pub fn set(&mut self, value: usize) {
        self.current = value.min(self.total);
        self.draw();
    }

    /// Finish the progress bar
    pub fn finish(self) {
        self.draw();
        println!();
    }

    /// Draw the progress bar
    fn draw(&self) {
        let percent = if self.total > 0 {
            (self.current * 100) / self.total
        } else {
            100
        };

        let filled = if self.total > 0 {
            (self.current * self.width) / self.total
        } else {
            self.width
        };

        let bar = "█".repeat(filled);
        let empty = "░".repeat(self.width.saturating_sub(filled));

        let elapsed = self.start_time.elapsed().as_secs();

        // Use carriage return to overwrite the line
        print!(
            "\r{} {} {} {}/{} {}% {}s",
            "▸".dimmed(),
            self.message.cyan(),
            format!("[{}{}]", bar.green(), empty.dimmed()),
            self.current.to_string().bold(),
            self.total.to_string().dimmed(),
            percent.to_string().bold(),
            elapsed.to_string().dimmed()
        );

        io::stdout().flush().unwrap_or(());
    }
}
