//! "Templates" screen: browse the template catalog and pick a package style.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use portfoliobuilder_shared::{ColorScheme, Template, TemplateCategory};

use super::Action;
use crate::app::Session;

pub(crate) struct TemplatesScreen {
    /// `None` shows every category.
    category: Option<TemplateCategory>,
    selected: usize,
}

impl TemplatesScreen {
    pub(crate) fn new() -> Self {
        Self {
            category: None,
            selected: 0,
        }
    }

    fn visible<'a>(&self, session: &'a Session) -> Vec<&'a Template> {
        session.catalogs.templates_in(self.category)
    }

    fn cycle_category(&mut self, forward: bool) {
        // None, Minimal, Creative, Professional, Developer, back to None.
        let count = TemplateCategory::ALL.len() + 1;
        let pos = self
            .category
            .and_then(|c| TemplateCategory::ALL.iter().position(|x| *x == c))
            .map_or(0, |p| p + 1);
        let next = if forward {
            (pos + 1) % count
        } else {
            (pos + count - 1) % count
        };
        self.category = next.checked_sub(1).map(|i| TemplateCategory::ALL[i]);
        self.selected = 0;
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, session: &Session) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Category filter
                Constraint::Min(1),    // List + details
                Constraint::Length(1), // Hint
            ])
            .split(area);

        let filter: Vec<Span> = std::iter::once(None)
            .chain(TemplateCategory::ALL.iter().copied().map(Some))
            .flat_map(|c| {
                let name = c.map_or("all", |c| c.id());
                let style = if c == self.category {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                [Span::styled(format!(" {name} "), style), Span::raw(" ")]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(filter)), rows[0]);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(1)])
            .split(rows[1]);

        let templates = self.visible(session);
        let items: Vec<ListItem> = templates
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if t.id == session.template_id { "● " } else { "  " };
                let badge = if t.popular { " ★" } else { "" };
                ListItem::new(format!("{prefix}{}{badge}", t.name)).style(style)
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Templates ({}) ", templates.len())),
        );
        f.render_widget(list, cols[0]);

        let details = templates
            .get(self.selected)
            .map(|t| template_details(t, session))
            .unwrap_or_else(|| vec![Line::from("No templates in this category.")]);
        let details_p = Paragraph::new(details)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(details_p, cols[1]);

        let hint = Paragraph::new("←/→ Category · ↑/↓ Select · Enter Use template · s Next scheme")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, rows[2]);
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        session: &mut Session,
    ) -> Option<Action> {
        let count = self.visible(session).len();
        match code {
            KeyCode::Left => {
                self.cycle_category(false);
                None
            }
            KeyCode::Right => {
                self.cycle_category(true);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter => {
                let template = *self.visible(session).get(self.selected)?;
                let (id, scheme) = (template.id, template.color_schemes.first()?.name);
                Some(select(session, id, scheme))
            }
            KeyCode::Char('s') => {
                let template = *self.visible(session).get(self.selected)?;
                if template.id != session.template_id {
                    return Some(Action::Status(
                        "Press Enter to use this template first".to_string(),
                    ));
                }
                let schemes = &template.color_schemes;
                let current = schemes
                    .iter()
                    .position(|s| s.name.eq_ignore_ascii_case(&session.scheme_name))
                    .unwrap_or(0);
                let (id, next) = (template.id, schemes.get((current + 1) % schemes.len())?.name);
                Some(select(session, id, next))
            }
            _ => None,
        }
    }
}

fn select(session: &mut Session, template_id: &str, scheme: &str) -> Action {
    let msg = match session.select_template(template_id, scheme) {
        Ok(()) => format!("Using {template_id} · {scheme}"),
        Err(e) => format!("Cannot use template: {e}"),
    };
    Action::Status(msg)
}

fn template_details(template: &Template, session: &Session) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::styled(template.name, bold),
        Line::from(template.description),
        Line::from(""),
        Line::from(vec![
            Span::styled("Category: ", bold),
            Span::raw(template.category.id()),
            Span::styled("   Level: ", bold),
            Span::raw(format!("{:?}", template.level)),
            Span::styled("   Layout: ", bold),
            Span::raw(format!("{:?}", template.layout)),
        ]),
        Line::from(vec![Span::styled("Hero: ", bold), Span::raw(template.hero)]),
        Line::from(vec![
            Span::styled("Sections: ", bold),
            Span::raw(template.sections.join(" · ")),
        ]),
        Line::from(format!("✓ {}", template.features.join("  ✓ "))),
        Line::from(""),
        Line::styled("Color schemes", bold),
    ];
    let in_use = template.id == session.template_id;
    lines.extend(template.color_schemes.iter().map(|scheme| {
        let active = in_use && scheme.name.eq_ignore_ascii_case(&session.scheme_name);
        scheme_line(scheme, active)
    }));
    lines
}

fn scheme_line(scheme: &ColorScheme, active: bool) -> Line<'static> {
    let mut spans: Vec<Span> = [scheme.primary, scheme.secondary, scheme.accent]
        .into_iter()
        .map(|hex| {
            let color = Color::from_str(hex).unwrap_or(Color::Reset);
            Span::styled("██", Style::default().fg(color))
        })
        .collect();
    let marker = if active { " ● " } else { "   " };
    spans.insert(0, Span::raw(marker));
    spans.push(Span::raw(format!(" {}", scheme.name)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_cycle_wraps_through_all() {
        let mut screen = TemplatesScreen::new();
        let mut seen = Vec::new();
        for _ in 0..=TemplateCategory::ALL.len() {
            screen.cycle_category(true);
            seen.push(screen.category);
        }
        assert_eq!(seen.last(), Some(&None));
        assert_eq!(seen[0], Some(TemplateCategory::ALL[0]));

        screen.cycle_category(false);
        assert_eq!(screen.category, TemplateCategory::ALL.last().copied());
    }

    #[test]
    fn scheme_line_parses_hex_colors() {
        let scheme = ColorScheme {
            name: "Ocean",
            primary: "#0ea5e9",
            secondary: "#0369a1",
            accent: "#22d3ee",
        };
        let line = scheme_line(&scheme, true);
        assert_eq!(line.spans[1].style.fg, Some(Color::Rgb(0x0e, 0xa5, 0xe9)));
        assert!(line.to_string().ends_with("Ocean"));
    }
}
