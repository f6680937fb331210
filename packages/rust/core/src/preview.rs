//! Live preview projection: `Document` → `PreviewView`.
//!
//! Only what is filled in gets shown, so a half-finished document still
//! renders sensibly. Recomputed on every edit; documents are small.

use portfoliobuilder_shared::{
    ContactBlock, Document, IdentityBlock, PreviewView, ProjectCard, SocialBadge,
};

/// Shown in place of an empty full name.
pub const PLACEHOLDER_NAME: &str = "Your Name";
/// Shown in place of an empty professional title.
pub const PLACEHOLDER_TITLE: &str = "Your Professional Title";

/// Width the preview is rendered at. Content is identical on both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewDevice {
    #[default]
    Desktop,
    Mobile,
}

impl PreviewDevice {
    pub fn toggle(self) -> Self {
        match self {
            Self::Desktop => Self::Mobile,
            Self::Mobile => Self::Desktop,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
        }
    }

    /// Maximum render width in terminal columns.
    pub fn max_width(&self) -> u16 {
        match self {
            Self::Desktop => 96,
            Self::Mobile => 40,
        }
    }
}

/// Project a document into its render-ready preview. Pure.
pub fn project(doc: &Document) -> PreviewView {
    let identity = IdentityBlock {
        name: or_placeholder(doc.full_name(), PLACEHOLDER_NAME),
        title: or_placeholder(doc.title(), PLACEHOLDER_TITLE),
        location: non_empty(doc.location()),
    };

    let skills = (!doc.skills().is_empty()).then(|| doc.skills().to_vec());

    let cards: Vec<ProjectCard> = doc
        .projects()
        .iter()
        .filter(|p| p.is_previewable())
        .map(|p| ProjectCard {
            title: p.title.clone(),
            description: non_empty(&p.description),
            live_demo: non_empty(&p.live_url),
            source: non_empty(&p.github_url),
        })
        .collect();

    let badges: Vec<SocialBadge> = doc
        .social_links()
        .iter()
        .filter(|l| l.is_previewable())
        .map(|l| SocialBadge {
            platform: l.platform.clone(),
            url: l.url.clone(),
        })
        .collect();

    PreviewView {
        identity,
        about: non_empty(doc.bio()),
        skills,
        projects: (!cards.is_empty()).then_some(cards),
        contact: ContactBlock {
            email: non_empty(doc.email()),
            phone: non_empty(doc.phone()),
        },
        connect: (!badges.is_empty()).then_some(badges),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfoliobuilder_shared::{
        ProjectUpdate, ScalarField, SectionKind, SocialLinkUpdate,
    };

    #[test]
    fn empty_document_shows_identity_and_contact_only() {
        let view = project(&Document::new());
        assert_eq!(view.sections(), vec![SectionKind::Identity, SectionKind::Contact]);
        assert_eq!(view.identity.name, PLACEHOLDER_NAME);
        assert_eq!(view.identity.title, PLACEHOLDER_TITLE);
        assert!(view.identity.location.is_none());
        assert_eq!(view.contact, ContactBlock::default());
    }

    #[test]
    fn device_toggles() {
        assert_eq!(PreviewDevice::default(), PreviewDevice::Desktop);
        assert_eq!(PreviewDevice::Desktop.toggle(), PreviewDevice::Mobile);
        assert!(PreviewDevice::Mobile.max_width() < PreviewDevice::Desktop.max_width());
    }

    #[test]
    fn projection_is_pure() {
        let mut doc = Document::new();
        doc.set_field(ScalarField::FullName, "Ada");
        doc.add_skill("Rust");
        assert_eq!(project(&doc), project(&doc));
    }

    #[test]
    fn scalar_fields_appear_when_filled() {
        let mut doc = Document::new();
        doc.set_field(ScalarField::FullName, "Ada Lovelace");
        doc.set_field(ScalarField::Location, "London");
        doc.set_field(ScalarField::Bio, "First programmer.");
        doc.set_field(ScalarField::Phone, "+44 20");

        let view = project(&doc);
        assert_eq!(view.identity.name, "Ada Lovelace");
        assert_eq!(view.identity.title, PLACEHOLDER_TITLE);
        assert_eq!(view.identity.location.as_deref(), Some("London"));
        assert_eq!(view.about.as_deref(), Some("First programmer."));
        assert!(view.contact.email.is_none());
        assert_eq!(view.contact.phone.as_deref(), Some("+44 20"));
    }

    #[test]
    fn skills_keep_insertion_order() {
        let mut doc = Document::new();
        for s in ["Rust", "Go", "Zig"] {
            doc.add_skill(s);
        }
        let view = project(&doc);
        assert_eq!(
            view.skills,
            Some(vec!["Rust".to_string(), "Go".to_string(), "Zig".to_string()])
        );
    }

    #[test]
    fn untitled_projects_are_filtered_in_order() {
        let mut doc = Document::new();
        doc.add_project();
        doc.add_project();
        doc.update_project(0, ProjectUpdate::Title("First".into()));
        doc.update_project(1, ProjectUpdate::Description("no title".into()));
        doc.update_project(2, ProjectUpdate::Title("Third".into()));
        doc.update_project(2, ProjectUpdate::GithubUrl("https://github.com/x/y".into()));

        let cards = project(&doc).projects.expect("projects block");
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third"]);
        assert!(cards[0].description.is_none());
        assert!(cards[1].live_demo.is_none());
        assert_eq!(cards[1].source.as_deref(), Some("https://github.com/x/y"));
    }

    #[test]
    fn projects_block_hidden_without_titles() {
        let mut doc = Document::new();
        doc.update_project(0, ProjectUpdate::Description("only a description".into()));
        assert!(project(&doc).projects.is_none());
    }

    #[test]
    fn social_links_need_both_fields() {
        let mut doc = Document::new();
        doc.update_social_link(0, SocialLinkUpdate::Platform("GitHub".into()));
        assert!(project(&doc).connect.is_none());

        doc.update_social_link(0, SocialLinkUpdate::Url("https://github.com/ada".into()));
        doc.add_social_link();
        doc.update_social_link(1, SocialLinkUpdate::Url("https://orphan.dev".into()));

        let badges = project(&doc).connect.expect("connect block");
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].platform, "GitHub");
    }
}
