//! CLI output: colored status lines, a progress bar across authors, and the
//! final summary.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Mutex;

use crate::models::YearRange;
use crate::pipeline::{PipelineEvent, Reporter, RunSummary};

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// Format a message with a colored status icon.
pub fn status_line(status: Status, msg: &str) -> String {
    let icon = status_icon(status);
    match status {
        Status::Success => format!("{} {}", icon.green().bold(), msg),
        Status::Error => format!("{} {}", icon.red().bold(), msg),
        Status::Warning => format!("{} {}", icon.yellow().bold(), msg),
        Status::Info => format!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Welcome banner for the application.
pub fn print_banner() {
    println!();
    println!("{}", "=".repeat(60));
    println!("{}", "DBLP Publications Fetcher".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{}", title.bold());
    println!("{}", "=".repeat(60));
}

/// Print what is about to be fetched.
pub fn print_run_header(authors: usize, range: &YearRange) {
    println!("Authors to fetch: {}", authors.to_string().bold());
    if !range.is_unbounded() {
        println!("Year filter: {}", range.to_string().yellow());
    }
    println!();
}

/// Print the end-of-run summary.
pub fn print_summary(summary: &RunSummary, range: &YearRange, output: &Path) {
    print_section("SUMMARY");
    println!(
        "Authors processed: {}/{}",
        summary.authors_processed, summary.authors_requested
    );
    println!("Total entries collected: {}", summary.total_collected());
    if summary.duplicates_removed() > 0 {
        println!("Duplicates removed: {}", summary.duplicates_removed());
        println!("Unique publications: {}", summary.unique().to_string().green());
    } else {
        println!("Total publications: {}", summary.unique().to_string().green());
    }
    if !range.is_unbounded() {
        println!("Year range: {}", range);
    }
    println!("Output file: {}", output.display());
    println!("{}", "=".repeat(60));
    println!();

    if summary.duplicates_removed() > 0 {
        println!(
            "{}",
            status_line(
                Status::Info,
                &format!(
                    "Note: {} duplicate(s) removed (co-authored papers)",
                    summary.duplicates_removed()
                )
            )
        );
    }
    println!(
        "{}",
        status_line(
            Status::Success,
            &format!("Done! Publications saved to: {}", output.display())
        )
    );
    println!();
}

/// Reporter that prints per-author progress to the terminal.
///
/// Lines are printed above an `indicatif` bar tracking authors; the bar hides
/// itself when stderr is not a terminal.
#[derive(Default)]
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the progress bar, if one is showing
    pub fn finish(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }

    fn line(&self, text: String) {
        let mut printed = false;
        self.with_bar(|bar| {
            bar.suspend(|| println!("{}", text));
            printed = true;
        });
        if !printed {
            println!("{}", text);
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Started { authors, .. } => {
                let bar = ProgressBar::new(*authors as u64);
                if let Ok(style) =
                    ProgressStyle::with_template("{spinner:.cyan} {bar:30.cyan/blue} {pos}/{len} {msg}")
                {
                    bar.set_style(style.progress_chars("█▓░"));
                }
                if let Ok(mut guard) = self.bar.lock() {
                    *guard = Some(bar);
                }
            }
            PipelineEvent::AuthorStarted { index, total, name } => {
                self.with_bar(|bar| {
                    bar.set_position(index.saturating_sub(1) as u64);
                    bar.set_message(name.clone());
                });
                self.line(format!(
                    "{} Processing: {}",
                    format!("[{}/{}]", index, total).dimmed(),
                    name.bold()
                ));
            }
            PipelineEvent::AuthorSkipped { reason, .. } => {
                self.line(format!("  {}\n", status_line(Status::Error, &format!("Skipped ({})", reason))));
            }
            PipelineEvent::AuthorFetched { count, pid, .. } => {
                self.line(format!(
                    "  {}",
                    status_line(
                        Status::Success,
                        &format!("Retrieved {} publications (PID: {})", count, pid)
                    )
                ));
            }
            PipelineEvent::AuthorFiltered { kept, total, .. } => {
                self.line(format!(
                    "  {}",
                    status_line(
                        Status::Info,
                        &format!("Filtered: {}/{} publications in range", kept, total)
                    )
                ));
            }
            PipelineEvent::Merging { .. } => {
                self.finish();
                println!();
                println!("Combining publications...");
            }
        }
    }
}

// A run that fetches nothing never reaches `Merging`
impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Error), "✗");
        assert_eq!(status_icon(Status::Info), "ℹ");
    }

    #[test]
    fn test_status_line_contains_message() {
        let line = status_line(Status::Warning, "rate limited");
        assert!(line.contains("rate limited"));
        assert!(line.contains("⚠"));
    }

    #[test]
    fn test_console_reporter_handles_full_run() {
        let reporter = ConsoleReporter::new();
        reporter.report(&PipelineEvent::Started {
            authors: 1,
            range: YearRange::unbounded(),
        });
        reporter.report(&PipelineEvent::AuthorStarted {
            index: 1,
            total: 1,
            name: "Jane Doe".to_string(),
        });
        reporter.report(&PipelineEvent::AuthorFetched {
            name: "Jane Doe".to_string(),
            pid: "12/1".to_string(),
            count: 3,
        });
        reporter.report(&PipelineEvent::Merging { batches: 1 });

        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_console_reporter_clears_bar_when_every_author_fails() {
        let reporter = ConsoleReporter::new();
        reporter.report(&PipelineEvent::Started {
            authors: 1,
            range: YearRange::unbounded(),
        });
        reporter.report(&PipelineEvent::AuthorSkipped {
            name: "Jane Doe".to_string(),
            reason: crate::pipeline::SkipReason::NotFound,
        });
        assert!(reporter.bar.lock().unwrap().is_some());

        reporter.finish();
        assert!(reporter.bar.lock().unwrap().is_none());

        // Safe to call again, and on drop
        reporter.finish();
    }
}
