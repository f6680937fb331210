//! The builder wizard: owns the document being edited and the step pointer.
//!
//! Every operation returns an [`Outcome`]. Boundary conditions (empty or
//! duplicate skills, removing the last project, stepping past either end)
//! are absorbed as no-ops and logged at `debug`, never surfaced as errors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use portfoliobuilder_shared::{
    Catalogs, Document, NoOpReason, Outcome, PreviewView, ProjectUpdate, STEP_COUNT,
    ScalarField, SocialLinkUpdate, StepMeta,
};

use crate::preview;

/// Display state of a step chip relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Active,
    Completed,
    Upcoming,
}

/// A serializable wizard operation.
///
/// Profile replay and the TUI drive the wizard through this enum so that
/// every edit goes through the same invariant-preserving path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WizardCommand {
    SetField { field: ScalarField, value: String },
    AddSkill { value: String },
    RemoveSkill { value: String },
    AddProject,
    UpdateProject { index: usize, update: ProjectUpdate },
    RemoveProject { index: usize },
    AddSocialLink,
    UpdateSocialLink { index: usize, update: SocialLinkUpdate },
    RemoveSocialLink { index: usize },
    GoNext,
    GoPrevious,
    GoTo { step: u8 },
}

/// Wizard controller over a single in-memory [`Document`].
#[derive(Debug, Clone)]
pub struct Wizard {
    catalogs: Arc<Catalogs>,
    document: Document,
    current_step: u8,
}

impl Wizard {
    /// Start a session on an empty document at step 1.
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self {
            catalogs,
            document: Document::new(),
            current_step: 1,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// 1-based current step.
    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    // --- Field mutation ---

    pub fn set_field(&mut self, field: ScalarField, value: impl Into<String>) -> Outcome {
        self.document.set_field(field, value)
    }

    pub fn add_skill(&mut self, value: &str) -> Outcome {
        logged("add_skill", self.document.add_skill(value))
    }

    pub fn remove_skill(&mut self, value: &str) -> Outcome {
        logged("remove_skill", self.document.remove_skill(value))
    }

    pub fn add_project(&mut self) -> Outcome {
        self.document.add_project()
    }

    pub fn update_project(&mut self, index: usize, update: ProjectUpdate) -> Outcome {
        logged("update_project", self.document.update_project(index, update))
    }

    pub fn remove_project(&mut self, index: usize) -> Outcome {
        logged("remove_project", self.document.remove_project(index))
    }

    pub fn add_social_link(&mut self) -> Outcome {
        self.document.add_social_link()
    }

    pub fn update_social_link(&mut self, index: usize, update: SocialLinkUpdate) -> Outcome {
        logged(
            "update_social_link",
            self.document.update_social_link(index, update),
        )
    }

    pub fn remove_social_link(&mut self, index: usize) -> Outcome {
        logged("remove_social_link", self.document.remove_social_link(index))
    }

    // --- Navigation ---

    pub fn go_next(&mut self) -> Outcome {
        if self.current_step >= STEP_COUNT {
            return logged("go_next", Outcome::NoOp(NoOpReason::StepBoundary));
        }
        self.current_step += 1;
        Outcome::Applied
    }

    pub fn go_previous(&mut self) -> Outcome {
        if self.current_step <= 1 {
            return logged("go_previous", Outcome::NoOp(NoOpReason::StepBoundary));
        }
        self.current_step -= 1;
        Outcome::Applied
    }

    /// Move to an adjacent step. Steps are traversed strictly in order, so
    /// any other target (the current step included) is a boundary no-op.
    pub fn go_to(&mut self, step: u8) -> Outcome {
        if step == self.current_step.saturating_add(1) {
            self.go_next()
        } else if step.saturating_add(1) == self.current_step {
            self.go_previous()
        } else {
            logged("go_to", Outcome::NoOp(NoOpReason::StepBoundary))
        }
    }

    /// `current_step / STEP_COUNT`, for the progress bar.
    pub fn progress_fraction(&self) -> f64 {
        f64::from(self.current_step) / f64::from(STEP_COUNT)
    }

    pub fn step_status(&self, step_id: u8) -> StepStatus {
        match step_id.cmp(&self.current_step) {
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }

    pub fn current_step_meta(&self) -> Option<&StepMeta> {
        self.catalogs.step(self.current_step)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == STEP_COUNT
    }

    /// Snapshot the document for publishing. Only available on the last
    /// step; required fields are not enforced (see [`Wizard::readiness`]).
    pub fn finish(&self) -> Option<Document> {
        if !self.is_last_step() {
            debug!(step = self.current_step, "finish requested before last step");
            return None;
        }
        Some(self.document.clone())
    }

    /// Required fields that are still empty. Advisory only.
    pub fn readiness(&self) -> Vec<ScalarField> {
        self.document.missing_required()
    }

    /// Project the current document for the live preview.
    pub fn preview(&self) -> PreviewView {
        preview::project(&self.document)
    }

    /// Dispatch a [`WizardCommand`].
    pub fn apply(&mut self, command: WizardCommand) -> Outcome {
        match command {
            WizardCommand::SetField { field, value } => self.set_field(field, value),
            WizardCommand::AddSkill { value } => self.add_skill(&value),
            WizardCommand::RemoveSkill { value } => self.remove_skill(&value),
            WizardCommand::AddProject => self.add_project(),
            WizardCommand::UpdateProject { index, update } => self.update_project(index, update),
            WizardCommand::RemoveProject { index } => self.remove_project(index),
            WizardCommand::AddSocialLink => self.add_social_link(),
            WizardCommand::UpdateSocialLink { index, update } => {
                self.update_social_link(index, update)
            }
            WizardCommand::RemoveSocialLink { index } => self.remove_social_link(index),
            WizardCommand::GoNext => self.go_next(),
            WizardCommand::GoPrevious => self.go_previous(),
            WizardCommand::GoTo { step } => self.go_to(step),
        }
    }
}

fn logged(op: &'static str, outcome: Outcome) -> Outcome {
    if let Outcome::NoOp(reason) = outcome {
        debug!(op, %reason, "wizard no-op");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(Catalogs::builtin()))
    }

    #[test]
    fn new_session_starts_empty_at_step_one() {
        let w = wizard();
        assert_eq!(w.current_step(), 1);
        assert_eq!(w.document(), &Document::new());
        assert_eq!(w.progress_fraction(), 0.25);
        assert_eq!(w.current_step_meta().map(|s| s.title), Some("Personal Info"));
    }

    #[test]
    fn navigation_is_clamped() {
        let mut w = wizard();
        assert_eq!(w.go_previous(), Outcome::NoOp(NoOpReason::StepBoundary));
        assert_eq!(w.current_step(), 1);

        for _ in 0..3 {
            assert!(w.go_next().is_applied());
        }
        assert!(w.is_last_step());
        assert_eq!(w.go_next(), Outcome::NoOp(NoOpReason::StepBoundary));
        assert_eq!(w.current_step(), 4);
        assert_eq!(w.progress_fraction(), 1.0);
    }

    #[test]
    fn go_to_only_accepts_adjacent_steps() {
        let mut w = wizard();
        assert_eq!(w.go_to(3), Outcome::NoOp(NoOpReason::StepBoundary));
        assert_eq!(w.go_to(1), Outcome::NoOp(NoOpReason::StepBoundary));
        assert!(w.go_to(2).is_applied());
        assert!(w.go_to(1).is_applied());
        assert_eq!(w.go_to(0), Outcome::NoOp(NoOpReason::StepBoundary));
        assert_eq!(w.current_step(), 1);
    }

    #[test]
    fn step_status_tracks_current_step() {
        let mut w = wizard();
        w.go_next();
        assert_eq!(w.step_status(1), StepStatus::Completed);
        assert_eq!(w.step_status(2), StepStatus::Active);
        assert_eq!(w.step_status(3), StepStatus::Upcoming);
    }

    #[test]
    fn finish_only_on_last_step() {
        let mut w = wizard();
        w.set_field(ScalarField::FullName, "Ada");
        assert!(w.finish().is_none());

        w.apply(WizardCommand::GoNext);
        w.apply(WizardCommand::GoNext);
        w.apply(WizardCommand::GoNext);
        let doc = w.finish().expect("last step");
        assert_eq!(doc.full_name(), "Ada");
    }

    #[test]
    fn skills_trim_and_reject_duplicates() {
        let mut w = wizard();
        assert!(w.add_skill("  Rust ").is_applied());
        assert_eq!(w.add_skill("Rust"), Outcome::NoOp(NoOpReason::DuplicateSkill));
        assert_eq!(w.add_skill("   "), Outcome::NoOp(NoOpReason::EmptySkill));
        assert!(w.add_skill("rust").is_applied());
        assert_eq!(w.document().skills(), ["Rust", "rust"]);
        assert_eq!(w.remove_skill("Go"), Outcome::NoOp(NoOpReason::SkillNotFound));
    }

    #[test]
    fn last_project_and_link_cannot_be_removed() {
        let mut w = wizard();
        assert_eq!(w.remove_project(0), Outcome::NoOp(NoOpReason::LastEntry));
        assert_eq!(w.remove_social_link(0), Outcome::NoOp(NoOpReason::LastEntry));

        w.add_project();
        assert!(w.remove_project(0).is_applied());
        assert_eq!(w.document().projects().len(), 1);
    }

    #[test]
    fn out_of_range_index_is_a_noop() {
        let mut w = wizard();
        let before = w.document().clone();
        assert_eq!(
            w.update_project(5, ProjectUpdate::Title("x".into())),
            Outcome::NoOp(NoOpReason::IndexOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(
            w.remove_social_link(3),
            Outcome::NoOp(NoOpReason::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(w.document(), &before);
    }

    #[test]
    fn readiness_lists_empty_required_fields() {
        let mut w = wizard();
        w.set_field(ScalarField::FullName, "Ada");
        w.set_field(ScalarField::Phone, "123");
        assert_eq!(
            w.readiness(),
            vec![ScalarField::Title, ScalarField::Email, ScalarField::Bio]
        );
    }

    #[test]
    fn command_json_shape() {
        let cmd = WizardCommand::UpdateProject {
            index: 0,
            update: ProjectUpdate::LiveUrl("https://ray.dev".into()),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(
            json,
            r#"{"op":"update_project","index":0,"update":{"field":"live_url","value":"https://ray.dev"}}"#
        );
        let back: WizardCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn preview_follows_edits() {
        let mut w = wizard();
        assert!(w.preview().skills.is_none());
        w.add_skill("Rust");
        assert_eq!(w.preview().skills, Some(vec!["Rust".to_string()]));
    }

    fn any_command() -> impl Strategy<Value = WizardCommand> {
        let skill = prop::sample::select(vec!["Rust", "Go", " Rust ", "", "  ", "Zig"]);
        prop_oneof![
            skill.clone().prop_map(|s| WizardCommand::AddSkill { value: s.to_string() }),
            skill.prop_map(|s| WizardCommand::RemoveSkill { value: s.to_string() }),
            Just(WizardCommand::AddProject),
            (0usize..4).prop_map(|index| WizardCommand::RemoveProject { index }),
            (0usize..4).prop_map(|index| WizardCommand::UpdateProject {
                index,
                update: ProjectUpdate::Title(format!("p{index}")),
            }),
            Just(WizardCommand::AddSocialLink),
            (0usize..4).prop_map(|index| WizardCommand::RemoveSocialLink { index }),
            Just(WizardCommand::GoNext),
            Just(WizardCommand::GoPrevious),
            (0u8..6).prop_map(|step| WizardCommand::GoTo { step }),
        ]
    }

    proptest! {
        #[test]
        fn collections_never_empty(commands in prop::collection::vec(any_command(), 0..64)) {
            let mut w = wizard();
            for cmd in commands {
                w.apply(cmd);
                prop_assert!(!w.document().projects().is_empty());
                prop_assert!(!w.document().social_links().is_empty());
                prop_assert!((1..=STEP_COUNT).contains(&w.current_step()));
            }
        }

        #[test]
        fn skills_stay_unique_and_ordered(commands in prop::collection::vec(any_command(), 0..64)) {
            let mut w = wizard();
            // Reference model: first-insertion order of surviving skills.
            let mut model: Vec<String> = Vec::new();
            for cmd in commands {
                match &cmd {
                    WizardCommand::AddSkill { value } => {
                        let s = value.trim();
                        if !s.is_empty() && !model.iter().any(|m| m == s) {
                            model.push(s.to_string());
                        }
                    }
                    WizardCommand::RemoveSkill { value } => model.retain(|m| m != value),
                    _ => {}
                }
                w.apply(cmd);
            }
            prop_assert_eq!(w.document().skills(), model.as_slice());
        }
    }
}
