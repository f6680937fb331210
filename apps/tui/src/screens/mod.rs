//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic. Shared data lives in [`Session`].

mod builder;
mod publish;
mod templates;

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;

use crate::app::Session;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Builder,
    Publish,
    Templates,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builder => write!(f, "Builder"),
            Self::Publish => write!(f, "Publish"),
            Self::Templates => write!(f, "Templates"),
        }
    }
}

/// What a screen asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    /// Show a message in the status bar.
    Status(String),
    /// Activate another tab and show a message.
    SwitchTo(ScreenId, String),
}

/// Per-screen state and behaviour.
pub(crate) struct Screens {
    builder: builder::BuilderScreen,
    publish: publish::PublishScreen,
    templates: templates::TemplatesScreen,
}

impl Screens {
    pub(crate) fn new() -> Self {
        Self {
            builder: builder::BuilderScreen::new(),
            publish: publish::PublishScreen::new(),
            templates: templates::TemplatesScreen::new(),
        }
    }

    /// Whether the screen has an active text input field.
    pub(crate) fn is_editing(&self, id: ScreenId) -> bool {
        match id {
            ScreenId::Builder => self.builder.is_editing(),
            _ => false,
        }
    }

    pub(crate) fn draw(&self, id: ScreenId, f: &mut Frame, area: Rect, session: &Session) {
        match id {
            ScreenId::Builder => self.builder.draw(f, area, session),
            ScreenId::Publish => self.publish.draw(f, area, session),
            ScreenId::Templates => self.templates.draw(f, area, session),
        }
    }

    pub(crate) fn handle_key(
        &mut self,
        id: ScreenId,
        code: KeyCode,
        modifiers: KeyModifiers,
        session: &mut Session,
    ) -> Option<Action> {
        match id {
            ScreenId::Builder => self.builder.handle_key(code, modifiers, session),
            ScreenId::Publish => self.publish.handle_key(code, modifiers, session),
            ScreenId::Templates => self.templates.handle_key(code, modifiers, session),
        }
    }
}

/// Border style for a form field: yellow while editing, cyan when focused.
pub(crate) fn field_style(focused: bool, editing: bool) -> Style {
    match (focused, editing) {
        (true, true) => Style::default().fg(Color::Yellow),
        (true, false) => Style::default().fg(Color::Cyan),
        _ => Style::default(),
    }
}
