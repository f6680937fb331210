//! "Publish" screen: pick a target and run the publish pipeline.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap};

use portfoliobuilder_core::{PipelineStatus, PublishResult};
use portfoliobuilder_shared::{PublishTarget, TargetKind};

use super::{Action, ScreenId};
use crate::app::{Session, TerminalClipboard};

pub(crate) struct PublishScreen {
    selected: usize,
}

impl PublishScreen {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    fn selected_kind(&self) -> TargetKind {
        TargetKind::ALL[self.selected.min(TargetKind::ALL.len() - 1)]
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, session: &Session) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Length(30), // Target list
                Constraint::Min(1),     // Details + run
            ])
            .split(area);

        // Target list
        let items: Vec<ListItem> = TargetKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let label = session.catalogs.target(*kind).map_or(kind.id(), |t| t.label);
                let popular = session
                    .catalogs
                    .target(*kind)
                    .is_some_and(|t| t.popular);
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                let badge = if popular { " ★" } else { "" };
                ListItem::new(format!("{prefix}{label}{badge}")).style(style)
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Publish Targets "),
        );
        f.render_widget(list, cols[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9), // Target details
                Constraint::Length(3), // Progress
                Constraint::Min(1),    // Result
            ])
            .split(cols[1]);

        let details = session
            .catalogs
            .target(self.selected_kind())
            .map(target_details)
            .unwrap_or_default();
        let details_p = Paragraph::new(details)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(details_p, right[0]);

        let status = session.pipeline.status();
        let (ratio, label) = match &status {
            PipelineStatus::Idle => (0.0, "Idle".to_string()),
            PipelineStatus::Running { progress, stage } => {
                (f64::from(*progress) / 100.0, format!("{stage}… {progress}%"))
            }
            PipelineStatus::Succeeded(_) => (1.0, "Done".to_string()),
            PipelineStatus::Failed { .. } => (0.0, "Failed".to_string()),
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(label);
        f.render_widget(gauge, right[1]);

        let result_p = Paragraph::new(result_lines(&status, session.finished.is_some()))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Result "));
        f.render_widget(result_p, right[2]);
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        session: &mut Session,
    ) -> Option<Action> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < TargetKind::ALL.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter => {
                let Some(document) = session.finished.clone() else {
                    return Some(Action::Status(
                        "Generate the portfolio on the Builder's last step first".to_string(),
                    ));
                };
                let kind = self.selected_kind();
                let msg = match session.pipeline.start(document, kind) {
                    Ok(run_id) => format!("Publishing to {kind} (run {run_id})"),
                    Err(e) => format!("Publish failed to start: {e}"),
                };
                Some(Action::Status(msg))
            }
            KeyCode::Char('c') => {
                let msg = if session.pipeline.copy_url(&TerminalClipboard) {
                    "URL copied to clipboard"
                } else {
                    "No hosted URL to copy"
                };
                Some(Action::Status(msg.to_string()))
            }
            KeyCode::Char('r') => {
                session.pipeline.reset();
                Some(Action::Status("Publish reset".to_string()))
            }
            KeyCode::Char('e') => {
                session.back_to_edit();
                Some(Action::SwitchTo(
                    ScreenId::Builder,
                    "Back to editing".to_string(),
                ))
            }
            _ => None,
        }
    }
}

fn target_details(target: &PublishTarget) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::styled(target.label, bold),
        Line::from(target.description),
        Line::from(""),
        Line::from(vec![
            Span::styled("Difficulty: ", bold),
            Span::raw(target.difficulty.to_string()),
            Span::styled("   Time: ", bold),
            Span::raw(target.time_estimate),
        ]),
    ];
    if !target.features.is_empty() {
        lines.push(Line::from(format!("✓ {}", target.features.join("  ✓ "))));
    }
    lines
}

fn result_lines(status: &PipelineStatus, generated: bool) -> Vec<Line<'static>> {
    let hint = Style::default().fg(Color::DarkGray);
    match status {
        PipelineStatus::Idle if !generated => vec![Line::styled(
            "Nothing to publish yet. Finish the Builder and press g.",
            hint,
        )],
        PipelineStatus::Idle => vec![Line::styled(
            "Enter to publish · e back to edit",
            hint,
        )],
        PipelineStatus::Running { .. } => vec![Line::styled("Working…", hint)],
        PipelineStatus::Succeeded(PublishResult::Artifact { manifest, location }) => {
            let mut lines = vec![Line::styled(
                "Package ready",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )];
            if let Some(dir) = location {
                lines.push(Line::from(format!("Written to {}", dir.display())));
            }
            lines.push(Line::from(""));
            lines.extend(
                manifest
                    .parts
                    .iter()
                    .map(|p| Line::from(format!("  {:<12} {}", p.name, p.description))),
            );
            lines
        }
        PipelineStatus::Succeeded(PublishResult::Hosted { url }) => vec![
            Line::styled(
                "Your portfolio is live!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                url.to_string(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
            Line::styled("c copy URL · r publish again", hint),
        ],
        PipelineStatus::Failed { reason } => vec![
            Line::styled(
                "Publish failed",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::from(reason.clone()),
            Line::styled("r reset · e back to edit", hint),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use portfoliobuilder_artifacts::ArtifactManifest;
    use url::Url;

    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_hint_depends_on_generation() {
        assert!(text(&result_lines(&PipelineStatus::Idle, false)).contains("press g"));
        assert!(text(&result_lines(&PipelineStatus::Idle, true)).contains("Enter to publish"));
    }

    #[test]
    fn artifact_result_lists_manifest() {
        let status = PipelineStatus::Succeeded(PublishResult::Artifact {
            manifest: ArtifactManifest::package(),
            location: Some(PathBuf::from("/tmp/ada-portfolio")),
        });
        let out = text(&result_lines(&status, true));
        assert!(out.contains("/tmp/ada-portfolio"));
        for name in ArtifactManifest::package().names() {
            assert!(out.contains(name), "missing {name}");
        }
    }

    #[test]
    fn hosted_result_shows_url() {
        let url = Url::parse("https://k3x9q2m1a.vercel.app").unwrap();
        let status = PipelineStatus::Succeeded(PublishResult::Hosted { url });
        assert!(text(&result_lines(&status, true)).contains("k3x9q2m1a.vercel.app"));
    }

    #[test]
    fn selection_is_clamped() {
        let mut screen = PublishScreen::new();
        screen.selected = 99;
        assert_eq!(screen.selected_kind(), *TargetKind::ALL.last().unwrap());
    }
}
