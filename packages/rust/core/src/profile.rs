//! TOML profile files, replayed through the wizard for headless runs.
//!
//! ```toml
//! full_name = "Ada Lovelace"
//! title = "Analyst"
//! skills = ["Mathematics", "Notes"]
//!
//! [[projects]]
//! title = "Bernoulli numbers"
//! github_url = "https://github.com/ada/notes"
//!
//! [[social_links]]
//! platform = "GitHub"
//! url = "https://github.com/ada"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use portfoliobuilder_shared::{
    NoOpReason, Outcome, PortfolioBuilderError, Project, ProjectUpdate, Result, ScalarField,
    SocialLink, SocialLinkUpdate,
};

use crate::wizard::{Wizard, WizardCommand};

/// A document description as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
}

/// What happened when a profile was replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    /// Commands the wizard absorbed, with the reason.
    pub ignored: Vec<(WizardCommand, NoOpReason)>,
}

/// Parse a profile from TOML text.
pub fn parse_profile(content: &str) -> Result<Profile> {
    toml::from_str(content).map_err(|e| PortfolioBuilderError::profile(e.to_string()))
}

/// Read and parse a profile file.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PortfolioBuilderError::io(path, e))?;
    let profile = parse_profile(&content)?;
    debug!(path = %path.display(), "loaded profile");
    Ok(profile)
}

impl Profile {
    /// The wizard commands that rebuild this profile on a fresh session.
    ///
    /// The first project and link fill the entries a new document starts
    /// with; later ones are appended first.
    pub fn commands(&self) -> Vec<WizardCommand> {
        let mut out = Vec::new();

        let scalars = [
            (ScalarField::FullName, &self.full_name),
            (ScalarField::Title, &self.title),
            (ScalarField::Email, &self.email),
            (ScalarField::Phone, &self.phone),
            (ScalarField::Location, &self.location),
            (ScalarField::Bio, &self.bio),
        ];
        for (field, value) in scalars {
            if !value.is_empty() {
                out.push(WizardCommand::SetField {
                    field,
                    value: value.clone(),
                });
            }
        }

        for skill in &self.skills {
            out.push(WizardCommand::AddSkill {
                value: skill.clone(),
            });
        }

        for (index, project) in self.projects.iter().enumerate() {
            if index > 0 {
                out.push(WizardCommand::AddProject);
            }
            for update in project_updates(project) {
                out.push(WizardCommand::UpdateProject { index, update });
            }
        }

        for (index, link) in self.social_links.iter().enumerate() {
            if index > 0 {
                out.push(WizardCommand::AddSocialLink);
            }
            let updates = [
                SocialLinkUpdate::Platform(link.platform.clone()),
                SocialLinkUpdate::Url(link.url.clone()),
            ];
            for update in updates {
                out.push(WizardCommand::UpdateSocialLink { index, update });
            }
        }

        out
    }

    /// Apply [`Profile::commands`] to `wizard`.
    pub fn replay(&self, wizard: &mut Wizard) -> ReplayReport {
        let mut report = ReplayReport::default();
        for command in self.commands() {
            match wizard.apply(command.clone()) {
                Outcome::Applied => report.applied += 1,
                Outcome::NoOp(reason) => report.ignored.push((command, reason)),
            }
        }
        info!(
            applied = report.applied,
            ignored = report.ignored.len(),
            "profile replayed"
        );
        report
    }
}

fn project_updates(project: &Project) -> Vec<ProjectUpdate> {
    let mut updates = Vec::new();
    if !project.title.is_empty() {
        updates.push(ProjectUpdate::Title(project.title.clone()));
    }
    if !project.description.is_empty() {
        updates.push(ProjectUpdate::Description(project.description.clone()));
    }
    if !project.technologies.is_empty() {
        updates.push(ProjectUpdate::Technologies(project.technologies.clone()));
    }
    if !project.live_url.is_empty() {
        updates.push(ProjectUpdate::LiveUrl(project.live_url.clone()));
    }
    if !project.github_url.is_empty() {
        updates.push(ProjectUpdate::GithubUrl(project.github_url.clone()));
    }
    updates
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portfoliobuilder_shared::Catalogs;

    use super::*;

    fn fixture_path(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/profiles")
            .join(name)
    }

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(Catalogs::builtin()))
    }

    #[test]
    fn full_profile_replays_into_document() {
        let profile = load_profile(&fixture_path("full.toml")).unwrap();
        let mut w = wizard();
        let report = profile.replay(&mut w);

        let doc = w.document();
        assert_eq!(doc.full_name(), "Ada Lovelace");
        assert_eq!(doc.skills(), ["Mathematics", "Analytical Engine", "Notes"]);
        assert_eq!(doc.projects().len(), 2);
        assert_eq!(doc.projects()[1].title, "Difference Engine Commentary");
        assert_eq!(doc.projects()[0].technologies, vec!["Punch cards".to_string()]);
        assert_eq!(doc.social_links().len(), 2);
        assert_eq!(doc.social_links()[1].platform, "LinkedIn");
        assert!(report.ignored.is_empty());
        assert!(w.readiness().is_empty());
    }

    #[test]
    fn minimal_profile_keeps_initial_entries() {
        let profile = load_profile(&fixture_path("minimal.toml")).unwrap();
        let mut w = wizard();
        profile.replay(&mut w);

        let doc = w.document();
        assert_eq!(doc.full_name(), "Grace Hopper");
        assert_eq!(doc.projects().len(), 1);
        assert_eq!(doc.social_links().len(), 1);
        assert!(w.preview().projects.is_none());
    }

    #[test]
    fn duplicate_skills_are_reported() {
        let profile = parse_profile(r#"skills = ["Rust", " Rust", ""]"#).unwrap();
        let mut w = wizard();
        let report = profile.replay(&mut w);
        assert_eq!(w.document().skills(), ["Rust"]);
        let reasons: Vec<_> = report.ignored.iter().map(|(_, r)| *r).collect();
        assert_eq!(reasons, vec![NoOpReason::DuplicateSkill, NoOpReason::EmptySkill]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_profile("nickname = \"ada\"").unwrap_err();
        assert!(err.to_string().starts_with("profile error:"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_profile(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(matches!(err, PortfolioBuilderError::Io { .. }));
    }
}
