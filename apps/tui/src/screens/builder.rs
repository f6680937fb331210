//! "Builder" screen: the four-step wizard form beside the live preview.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use portfoliobuilder_core::{PreviewDevice, StepStatus, WizardCommand};
use portfoliobuilder_shared::{
    Document, Outcome, PreviewView, ProjectUpdate, STEP_COUNT, ScalarField, SectionKind,
    SocialLinkUpdate,
};

use super::{Action, ScreenId, field_style};
use crate::app::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectField {
    Title,
    Description,
    Technologies,
    LiveUrl,
    GithubUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkField {
    Platform,
    Url,
}

/// One focusable row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Scalar(ScalarField),
    NewSkill,
    Skills,
    Project(ProjectField),
    Link(LinkField),
}

impl FormField {
    fn label(&self) -> &'static str {
        match self {
            Self::Scalar(f) => f.label(),
            Self::NewSkill => "Add Skill",
            Self::Skills => "Skills",
            Self::Project(ProjectField::Title) => "Project Title",
            Self::Project(ProjectField::Description) => "Description",
            Self::Project(ProjectField::Technologies) => "Technologies (comma separated)",
            Self::Project(ProjectField::LiveUrl) => "Live Demo URL",
            Self::Project(ProjectField::GithubUrl) => "GitHub URL",
            Self::Link(LinkField::Platform) => "Platform",
            Self::Link(LinkField::Url) => "URL",
        }
    }

    fn is_required(&self) -> bool {
        matches!(self, Self::Scalar(f) if f.is_required())
    }

    /// Live fields push every keystroke to the wizard; the rest commit on Enter.
    fn is_live(&self) -> bool {
        !matches!(
            self,
            Self::NewSkill | Self::Skills | Self::Project(ProjectField::Technologies)
        )
    }
}

fn fields_for_step(step: u8) -> Vec<FormField> {
    use FormField::*;
    match step {
        1 => vec![
            Scalar(ScalarField::FullName),
            Scalar(ScalarField::Title),
            Scalar(ScalarField::Email),
            Scalar(ScalarField::Phone),
            Scalar(ScalarField::Location),
        ],
        2 => vec![Scalar(ScalarField::Bio), NewSkill, Skills],
        3 => vec![
            Project(ProjectField::Title),
            Project(ProjectField::Description),
            Project(ProjectField::Technologies),
            Project(ProjectField::LiveUrl),
            Project(ProjectField::GithubUrl),
        ],
        _ => vec![Link(LinkField::Platform), Link(LinkField::Url)],
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Run a wizard command. An applied edit after "Generate" drops the
/// generated snapshot and any publish run.
fn apply(session: &mut Session, command: WizardCommand) -> Outcome {
    let outcome = session.wizard.apply(command);
    if outcome.is_applied() && session.finished.is_some() {
        session.back_to_edit();
    }
    outcome
}

fn report(outcome: Outcome, applied: impl Into<String>) -> Option<Action> {
    let msg = match outcome {
        Outcome::Applied => applied.into(),
        Outcome::NoOp(reason) => format!("Nothing changed: {reason}"),
    };
    Some(Action::Status(msg))
}

pub(crate) struct BuilderScreen {
    focus: usize,
    editing: bool,
    buffer: String,
    project: usize,
    link: usize,
    skill: usize,
    show_preview: bool,
    device: PreviewDevice,
}

impl BuilderScreen {
    pub(crate) fn new() -> Self {
        Self {
            focus: 0,
            editing: false,
            buffer: String::new(),
            project: 0,
            link: 0,
            skill: 0,
            show_preview: true,
            device: PreviewDevice::default(),
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    fn focused_field(&self, step: u8) -> Option<FormField> {
        fields_for_step(step).get(self.focus).copied()
    }

    fn value_of(&self, field: FormField, doc: &Document) -> String {
        match field {
            FormField::Scalar(f) => doc.field(f).to_string(),
            FormField::NewSkill => String::new(),
            FormField::Skills => doc.skills().join(", "),
            FormField::Project(pf) => doc
                .projects()
                .get(self.project)
                .map(|p| match pf {
                    ProjectField::Title => p.title.clone(),
                    ProjectField::Description => p.description.clone(),
                    ProjectField::Technologies => p.technologies.join(", "),
                    ProjectField::LiveUrl => p.live_url.clone(),
                    ProjectField::GithubUrl => p.github_url.clone(),
                })
                .unwrap_or_default(),
            FormField::Link(lf) => doc
                .social_links()
                .get(self.link)
                .map(|l| match lf {
                    LinkField::Platform => l.platform.clone(),
                    LinkField::Url => l.url.clone(),
                })
                .unwrap_or_default(),
        }
    }

    fn command_for(&self, field: FormField, value: &str) -> Option<WizardCommand> {
        let value = value.to_string();
        match field {
            FormField::Scalar(field) => Some(WizardCommand::SetField { field, value }),
            FormField::NewSkill => Some(WizardCommand::AddSkill { value }),
            FormField::Skills => None,
            FormField::Project(pf) => {
                let update = match pf {
                    ProjectField::Title => ProjectUpdate::Title(value),
                    ProjectField::Description => ProjectUpdate::Description(value),
                    ProjectField::Technologies => ProjectUpdate::Technologies(split_list(&value)),
                    ProjectField::LiveUrl => ProjectUpdate::LiveUrl(value),
                    ProjectField::GithubUrl => ProjectUpdate::GithubUrl(value),
                };
                Some(WizardCommand::UpdateProject {
                    index: self.project,
                    update,
                })
            }
            FormField::Link(lf) => {
                let update = match lf {
                    LinkField::Platform => SocialLinkUpdate::Platform(value),
                    LinkField::Url => SocialLinkUpdate::Url(value),
                };
                Some(WizardCommand::UpdateSocialLink {
                    index: self.link,
                    update,
                })
            }
        }
    }

    // --- Drawing ---

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, session: &Session) {
        if self.show_preview {
            let preview_width = self.device.max_width().min(area.width / 2);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(36), Constraint::Length(preview_width)])
                .split(area);
            self.draw_form(f, cols[0], session);
            draw_preview(f, cols[1], &session.wizard.preview(), self.device);
        } else {
            self.draw_form(f, area, session);
        }
    }

    fn draw_form(&self, f: &mut Frame, area: Rect, session: &Session) {
        let wizard = &session.wizard;
        let step = wizard.current_step();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Step chips
                Constraint::Length(3), // Progress
                Constraint::Min(1),    // Fields
                Constraint::Length(1), // Hint
            ])
            .split(area);

        // Step chips
        let chips: Vec<Span> = session
            .catalogs
            .steps
            .iter()
            .flat_map(|s| {
                let (marker, style) = match wizard.step_status(s.id) {
                    StepStatus::Completed => ("✓", Style::default().fg(Color::Green)),
                    StepStatus::Active => (
                        "●",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    StepStatus::Upcoming => ("○", Style::default().fg(Color::DarkGray)),
                };
                [
                    Span::styled(format!("{marker} {}", s.title), style),
                    Span::raw("   "),
                ]
            })
            .collect();
        let description = wizard.current_step_meta().map_or("", |m| m.description);
        let chips_p = Paragraph::new(Line::from(chips)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Step {step} of {STEP_COUNT} · {description} ")),
        );
        f.render_widget(chips_p, chunks[0]);

        // Progress
        let fraction = wizard.progress_fraction();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(fraction)
            .label(format!("{:.0}% complete", fraction * 100.0));
        f.render_widget(gauge, chunks[1]);

        // Fields
        self.draw_fields(f, chunks[2], session);

        // Hint
        let hint = if self.editing {
            "Type to edit · Enter to confirm · Esc to stop editing".to_string()
        } else if wizard.is_last_step() {
            let missing = wizard.readiness();
            if missing.is_empty() {
                "b Back · g Generate Portfolio".to_string()
            } else {
                let labels: Vec<_> = missing.iter().map(|m| m.label()).collect();
                format!("b Back · g Generate Portfolio · empty: {}", labels.join(", "))
            }
        } else {
            "↑/↓ Select · Enter Edit · n Next · b Back · p Preview · m Device".to_string()
        };
        let hint_p = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint_p, chunks[3]);
    }

    fn draw_fields(&self, f: &mut Frame, area: Rect, session: &Session) {
        let doc = session.wizard.document();
        let step = session.wizard.current_step();
        let fields = fields_for_step(step);

        let selector = match step {
            3 => Some(format!(
                "Project {} of {}  ·  [ ] select · a add · x remove",
                self.project + 1,
                doc.projects().len()
            )),
            4 => Some(format!(
                "Link {} of {}  ·  [ ] select · a add · x remove",
                self.link + 1,
                doc.social_links().len()
            )),
            _ => None,
        };

        let mut constraints = Vec::new();
        if selector.is_some() {
            constraints.push(Constraint::Length(1));
        }
        constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut row = 0;
        if let Some(text) = selector {
            f.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::Magenta)),
                rows[row],
            );
            row += 1;
        }

        for (i, field) in fields.iter().enumerate() {
            let focused = i == self.focus;
            let editing = focused && self.editing;
            let title = if field.is_required() {
                format!(" {} * ", field.label())
            } else {
                format!(" {} ", field.label())
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(field_style(focused, editing));

            let content = if *field == FormField::Skills {
                self.skill_line(doc, focused)
            } else if editing {
                Line::from(format!("{}▏", self.buffer))
            } else {
                Line::from(self.value_of(*field, doc))
            };
            f.render_widget(Paragraph::new(content).block(block), rows[row + i]);
        }
    }

    fn skill_line(&self, doc: &Document, focused: bool) -> Line<'static> {
        if doc.skills().is_empty() {
            return Line::from(Span::styled(
                "No skills yet",
                Style::default().fg(Color::DarkGray),
            ));
        }
        let spans: Vec<Span> = doc
            .skills()
            .iter()
            .enumerate()
            .flat_map(|(i, skill)| {
                let style = if focused && i == self.skill {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                [Span::styled(format!(" {skill} "), style), Span::raw(" ")]
            })
            .collect();
        Line::from(spans)
    }

    // --- Input ---

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        session: &mut Session,
    ) -> Option<Action> {
        if self.editing {
            return self.handle_editing(code, session);
        }

        let step = session.wizard.current_step();
        let field_count = fields_for_step(step).len();
        let field = self.focused_field(step);

        match code {
            KeyCode::Up => {
                self.focus = (self.focus + field_count - 1) % field_count;
                None
            }
            KeyCode::Down => {
                self.focus = (self.focus + 1) % field_count;
                None
            }
            KeyCode::Enter => match field {
                Some(FormField::Skills) | None => None,
                Some(field) => {
                    self.buffer = self.value_of(field, session.wizard.document());
                    self.editing = true;
                    Some(Action::Status(format!("Editing {}", field.label())))
                }
            },
            KeyCode::Char('n') | KeyCode::PageDown => {
                let outcome = apply(session, WizardCommand::GoNext);
                self.focus = 0;
                report(outcome, self.step_message(session))
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                let outcome = apply(session, WizardCommand::GoPrevious);
                self.focus = 0;
                report(outcome, self.step_message(session))
            }
            KeyCode::Char('p') => {
                self.show_preview = !self.show_preview;
                let state = if self.show_preview { "shown" } else { "hidden" };
                Some(Action::Status(format!("Preview {state}")))
            }
            KeyCode::Char('m') => {
                self.device = self.device.toggle();
                Some(Action::Status(format!("{} preview", self.device.label())))
            }
            KeyCode::Char('[') => {
                self.select_entry(step, -1, session.wizard.document());
                None
            }
            KeyCode::Char(']') => {
                self.select_entry(step, 1, session.wizard.document());
                None
            }
            KeyCode::Left if field == Some(FormField::Skills) => {
                self.skill = self.skill.saturating_sub(1);
                None
            }
            KeyCode::Right if field == Some(FormField::Skills) => {
                let last = session.wizard.document().skills().len().saturating_sub(1);
                self.skill = (self.skill + 1).min(last);
                None
            }
            KeyCode::Char('a') => self.add_entry(step, session),
            KeyCode::Char('x') => self.remove_entry(step, field, session),
            KeyCode::Char('g') => match session.wizard.finish() {
                Some(document) => {
                    session.pipeline.reset();
                    session.finished = Some(document);
                    Some(Action::SwitchTo(
                        ScreenId::Publish,
                        "Portfolio generated · choose a publish target".to_string(),
                    ))
                }
                None => Some(Action::Status(
                    "Generate is available on the last step".to_string(),
                )),
            },
            _ => None,
        }
    }

    fn handle_editing(&mut self, code: KeyCode, session: &mut Session) -> Option<Action> {
        let Some(field) = self.focused_field(session.wizard.current_step()) else {
            self.editing = false;
            return None;
        };

        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.buffer.clear();
                None
            }
            KeyCode::Enter | KeyCode::Tab => {
                let action = if field.is_live() {
                    None
                } else {
                    self.commit(field, session)
                };
                // Keep the skill input open for quick entry.
                self.editing = field == FormField::NewSkill && code == KeyCode::Enter;
                if code == KeyCode::Tab {
                    let count = fields_for_step(session.wizard.current_step()).len();
                    self.focus = (self.focus + 1) % count;
                }
                action
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                self.live_update(field, session);
                None
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                self.live_update(field, session);
                None
            }
            _ => None,
        }
    }

    fn live_update(&self, field: FormField, session: &mut Session) {
        if field.is_live() {
            if let Some(command) = self.command_for(field, &self.buffer) {
                apply(session, command);
            }
        }
    }

    fn commit(&mut self, field: FormField, session: &mut Session) -> Option<Action> {
        let command = self.command_for(field, &self.buffer)?;
        let outcome = apply(session, command);
        let msg = match field {
            FormField::NewSkill => format!("Added skill {}", self.buffer.trim()),
            _ => format!("Updated {}", field.label()),
        };
        self.buffer.clear();
        report(outcome, msg)
    }

    fn step_message(&self, session: &Session) -> String {
        session
            .wizard
            .current_step_meta()
            .map(|m| format!("Step {}: {}", m.id, m.title))
            .unwrap_or_default()
    }

    fn select_entry(&mut self, step: u8, delta: isize, doc: &Document) {
        let (index, len) = match step {
            3 => (&mut self.project, doc.projects().len()),
            4 => (&mut self.link, doc.social_links().len()),
            _ => return,
        };
        *index = index.saturating_add_signed(delta).min(len.saturating_sub(1));
    }

    fn add_entry(&mut self, step: u8, session: &mut Session) -> Option<Action> {
        match step {
            3 => {
                let outcome = apply(session, WizardCommand::AddProject);
                self.project = session.wizard.document().projects().len() - 1;
                report(outcome, "Project added")
            }
            4 => {
                let outcome = apply(session, WizardCommand::AddSocialLink);
                self.link = session.wizard.document().social_links().len() - 1;
                report(outcome, "Link added")
            }
            _ => None,
        }
    }

    fn remove_entry(
        &mut self,
        step: u8,
        field: Option<FormField>,
        session: &mut Session,
    ) -> Option<Action> {
        match (step, field) {
            (2, Some(FormField::Skills)) => {
                let skill = session.wizard.document().skills().get(self.skill)?.clone();
                let outcome = apply(session, WizardCommand::RemoveSkill { value: skill.clone() });
                let len = session.wizard.document().skills().len();
                self.skill = self.skill.min(len.saturating_sub(1));
                report(outcome, format!("Removed skill {skill}"))
            }
            (3, _) => {
                let outcome = apply(session, WizardCommand::RemoveProject { index: self.project });
                let len = session.wizard.document().projects().len();
                self.project = self.project.min(len - 1);
                report(outcome, "Project removed")
            }
            (4, _) => {
                let outcome = apply(session, WizardCommand::RemoveSocialLink { index: self.link });
                let len = session.wizard.document().social_links().len();
                self.link = self.link.min(len - 1);
                report(outcome, "Link removed")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Preview pane
// ---------------------------------------------------------------------------

fn draw_preview(f: &mut Frame, area: Rect, view: &PreviewView, device: PreviewDevice) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Live Preview · {} ", device.label()))
        .border_style(Style::default().fg(Color::Blue));
    let preview = Paragraph::new(preview_lines(view))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(preview, area);
}

fn preview_lines(view: &PreviewView) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);
    let link = Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for section in view.sections() {
        if let Some(title) = section.heading() {
            lines.push(Line::from(""));
            lines.push(Line::styled(title, heading));
        }
        match section {
            SectionKind::Identity => {
                lines.push(
                    Line::styled(
                        view.identity.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                    .centered(),
                );
                lines.push(Line::styled(view.identity.title.clone(), muted).centered());
                if let Some(location) = &view.identity.location {
                    lines.push(Line::styled(format!("⌖ {location}"), muted).centered());
                }
            }
            SectionKind::About => {
                if let Some(about) = &view.about {
                    lines.push(Line::from(about.clone()));
                }
            }
            SectionKind::Skills => {
                if let Some(skills) = &view.skills {
                    let spans: Vec<Span> = skills
                        .iter()
                        .flat_map(|s| {
                            [
                                Span::styled(format!("[{s}]"), Style::default().fg(Color::Cyan)),
                                Span::raw(" "),
                            ]
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
            }
            SectionKind::Projects => {
                for card in view.projects.iter().flatten() {
                    lines.push(Line::styled(
                        format!("▸ {}", card.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                    if let Some(description) = &card.description {
                        lines.push(Line::styled(format!("  {description}"), muted));
                    }
                    if let Some(url) = &card.live_demo {
                        lines.push(Line::styled(format!("  Live Demo ↗ {url}"), link));
                    }
                    if let Some(url) = &card.source {
                        lines.push(Line::styled(format!("  GitHub ↗ {url}"), link));
                    }
                }
            }
            SectionKind::Contact => {
                if let Some(email) = &view.contact.email {
                    lines.push(Line::from(format!("✉ {email}")));
                }
                if let Some(phone) = &view.contact.phone {
                    lines.push(Line::from(format!("☎ {phone}")));
                }
            }
            SectionKind::Connect => {
                for badge in view.connect.iter().flatten() {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}: ", badge.platform), heading),
                        Span::styled(badge.url.clone(), link),
                    ]));
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portfoliobuilder_shared::{AppConfig, Catalogs, NoOpReason};

    use super::*;

    fn session() -> Session {
        let mut config = AppConfig::default();
        config.defaults.output_dir = std::env::temp_dir()
            .join("pb-tui-test")
            .to_string_lossy()
            .to_string();
        Session::new(Arc::new(Catalogs::builtin()), config).unwrap()
    }

    fn press(screen: &mut BuilderScreen, session: &mut Session, codes: &[KeyCode]) -> Option<Action> {
        let mut last = None;
        for code in codes {
            last = screen.handle_key(*code, KeyModifiers::NONE, session);
        }
        last
    }

    fn type_text(screen: &mut BuilderScreen, session: &mut Session, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c), KeyModifiers::NONE, session);
        }
    }

    #[test]
    fn typing_updates_document_live() {
        let mut s = session();
        let mut screen = BuilderScreen::new();
        press(&mut screen, &mut s, &[KeyCode::Enter]);
        assert!(screen.is_editing());
        type_text(&mut screen, &mut s, "Ada");
        assert_eq!(s.wizard.document().full_name(), "Ada");
        assert_eq!(s.wizard.preview().identity.name, "Ada");

        press(&mut screen, &mut s, &[KeyCode::Backspace, KeyCode::Esc]);
        assert!(!screen.is_editing());
        assert_eq!(s.wizard.document().full_name(), "Ad");
    }

    #[test]
    fn skills_are_added_on_enter() {
        let mut s = session();
        let mut screen = BuilderScreen::new();
        press(&mut screen, &mut s, &[KeyCode::Char('n'), KeyCode::Down, KeyCode::Enter]);
        type_text(&mut screen, &mut s, "Rust");
        assert!(s.wizard.document().skills().is_empty());

        press(&mut screen, &mut s, &[KeyCode::Enter]);
        assert_eq!(s.wizard.document().skills(), ["Rust"]);
        assert!(screen.is_editing());

        type_text(&mut screen, &mut s, "Rust");
        let action = press(&mut screen, &mut s, &[KeyCode::Enter]);
        assert_eq!(
            action,
            Some(Action::Status(format!(
                "Nothing changed: {}",
                NoOpReason::DuplicateSkill
            )))
        );
    }

    #[test]
    fn last_project_cannot_be_removed() {
        let mut s = session();
        let mut screen = BuilderScreen::new();
        let action = press(
            &mut screen,
            &mut s,
            &[KeyCode::Char('n'), KeyCode::Char('n'), KeyCode::Char('x')],
        );
        assert_eq!(
            action,
            Some(Action::Status(format!("Nothing changed: {}", NoOpReason::LastEntry)))
        );

        press(&mut screen, &mut s, &[KeyCode::Char('a')]);
        assert_eq!(screen.project, 1);
        press(&mut screen, &mut s, &[KeyCode::Char('x')]);
        assert_eq!(s.wizard.document().projects().len(), 1);
        assert_eq!(screen.project, 0);
    }

    #[test]
    fn generate_only_on_last_step() {
        let mut s = session();
        let mut screen = BuilderScreen::new();
        let action = press(&mut screen, &mut s, &[KeyCode::Char('g')]);
        assert!(matches!(action, Some(Action::Status(_))));
        assert!(s.finished.is_none());

        let action = press(
            &mut screen,
            &mut s,
            &[
                KeyCode::Char('n'),
                KeyCode::Char('n'),
                KeyCode::Char('n'),
                KeyCode::Char('g'),
            ],
        );
        assert!(matches!(action, Some(Action::SwitchTo(ScreenId::Publish, _))));
        assert!(s.finished.is_some());
    }

    #[test]
    fn editing_after_generate_drops_snapshot() {
        let mut s = session();
        let mut screen = BuilderScreen::new();
        press(
            &mut screen,
            &mut s,
            &[
                KeyCode::Char('n'),
                KeyCode::Char('n'),
                KeyCode::Char('n'),
                KeyCode::Char('g'),
            ],
        );
        assert!(s.finished.is_some());

        press(&mut screen, &mut s, &[KeyCode::Enter]);
        type_text(&mut screen, &mut s, "GitHub");
        assert!(s.finished.is_none());
    }

    #[test]
    fn technologies_commit_as_list() {
        let mut s = session();
        let mut screen = BuilderScreen::new();
        press(
            &mut screen,
            &mut s,
            &[
                KeyCode::Char('n'),
                KeyCode::Char('n'),
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Enter,
            ],
        );
        type_text(&mut screen, &mut s, "Rust, tokio,, ");
        press(&mut screen, &mut s, &[KeyCode::Enter]);
        assert_eq!(
            s.wizard.document().projects()[0].technologies,
            vec!["Rust".to_string(), "tokio".to_string()]
        );
    }

    #[test]
    fn preview_lines_hide_empty_sections() {
        let view = portfoliobuilder_core::project(&Document::new());
        let text: Vec<String> = preview_lines(&view).iter().map(|l| l.to_string()).collect();
        assert!(text.contains(&"Your Name".to_string()));
        assert!(text.contains(&"Contact".to_string()));
        assert!(!text.contains(&"Skills".to_string()));
    }
}
