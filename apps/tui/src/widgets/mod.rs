//! Reusable TUI widgets.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom status bar. Rejected edits and failures are shown in red.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    let bg = if is_warning(msg) {
        Color::Red
    } else {
        Color::DarkGray
    };
    Paragraph::new(format!(" {msg}")).style(Style::default().bg(bg).fg(Color::White))
}

fn is_warning(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.starts_with("nothing changed") || lower.contains("failed") || lower.starts_with("cannot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_detected() {
        assert!(is_warning("Nothing changed: skill already added"));
        assert!(is_warning("Publish failed to start: boom"));
        assert!(!is_warning("Project added"));
    }
}
