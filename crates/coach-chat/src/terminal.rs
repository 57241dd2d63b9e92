//! A transcript surface that prints to a terminal.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use coach_chat_widget::{RenderedEntry, SendControl, Speaker, TranscriptSurface};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// Prints entries as colored lines, with a spinner while the send control
/// is busy.
pub struct TerminalSurface<W = Stdout> {
    out: W,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
}

impl TerminalSurface<Stdout> {
    /// Creates a surface printing to stdout with a spinner.
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            spinner: None,
            show_spinner: true,
        }
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Creates a surface printing to `out`, without a spinner.
    pub fn new(out: W) -> Self {
        Self {
            out,
            spinner: None,
            show_spinner: false,
        }
    }

    /// Returns the underlying writer.
    #[inline]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn start_spinner(&mut self) {
        if !self.show_spinner || self.spinner.is_some() {
            return;
        }
        let style = ProgressStyle::with_template("{spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(format!("🤔 {}", SendControl::Busy.label()));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        // Finish the spinner before printing anything else.
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl<W: Write> TranscriptSurface for TerminalSurface<W> {
    fn append_entry(&mut self, entry: &RenderedEntry<'_>) {
        let Self { out, spinner, .. } = self;
        let result = match spinner {
            Some(spinner) => spinner.suspend(|| write_entry(out, entry)),
            None => write_entry(out, entry),
        };
        if let Err(err) = result {
            error!("error writing transcript entry: {err}");
        }
    }

    fn scroll_to_latest(&mut self) {
        if let Err(err) = self.out.flush() {
            error!("error flushing output: {err}");
        }
    }

    fn update_send_control(&mut self, control: SendControl) {
        match control {
            SendControl::Busy => self.start_spinner(),
            SendControl::Ready => self.stop_spinner(),
        }
    }
}

fn write_entry(out: &mut impl Write, entry: &RenderedEntry<'_>) -> io::Result<()> {
    let bar = match entry.entry().speaker() {
        Speaker::User => BAR_CHAR.bright_green().to_string(),
        Speaker::Bot => BAR_CHAR.bright_cyan().to_string(),
    };
    match entry.entry().speaker() {
        Speaker::User => writeln!(out, "{bar}{}", entry.text())?,
        Speaker::Bot => writeln!(out, "{bar}{}", entry.text().bright_white())?,
    }
    if let Some(line) = entry.summary_line() {
        writeln!(out, "{bar}{}", line.dimmed())?;
    }
    if let Some(line) = entry.sources_line() {
        writeln!(out, "{bar}{}", line.dimmed())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use coach_chat_widget::{ReplyMetadata, TranscriptEntry};

    use super::*;

    fn printed(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.writer().clone()).unwrap()
    }

    #[test]
    fn test_bot_entry_with_metadata() {
        let mut surface = TerminalSurface::new(Vec::new());
        let entry = TranscriptEntry::bot_with_metadata(
            "Keep your knees bent.",
            ReplyMetadata {
                model: Some("x".to_owned()),
                context_count: Some(2),
                total_tokens: None,
                sources: vec!["Pumping".to_owned(), "Jumps".to_owned()],
            },
        );
        surface.append_entry(&RenderedEntry::new(&entry));

        let output = printed(&surface);
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("Keep your knees bent."));
        assert!(output.contains("Model: x | Sources: 2 | "));
        assert!(output.contains("Sources: Pumping, Jumps"));
    }

    #[test]
    fn test_user_entry_is_a_single_line() {
        let mut surface = TerminalSurface::new(Vec::new());
        let entry = TranscriptEntry::user("hello");
        surface.append_entry(&RenderedEntry::new(&entry));

        let output = printed(&surface);
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("hello"));
    }

    #[test]
    fn test_send_control_without_spinner() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.update_send_control(SendControl::Busy);
        assert!(surface.spinner.is_none());
        surface.update_send_control(SendControl::Ready);
        assert!(printed(&surface).is_empty());
    }
}
