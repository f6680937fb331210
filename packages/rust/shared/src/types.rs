//! Core domain types for PortfolioBuilder documents and their previews.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of steps in the builder wizard.
pub const STEP_COUNT: u8 = 4;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for publish run identifiers (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Mutation outcomes
// ---------------------------------------------------------------------------

/// Result of a document or wizard mutation.
///
/// Boundary conditions never fail; they leave state unchanged and say why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// State left untouched.
    NoOp(NoOpReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a mutation was absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Skill was empty after trimming.
    EmptySkill,
    /// Skill already present (case-sensitive).
    DuplicateSkill,
    /// Skill to remove is not in the list.
    SkillNotFound,
    /// Removing would leave the collection empty.
    LastEntry,
    /// No entry at the given index.
    IndexOutOfRange { index: usize, len: usize },
    /// Navigation past the first or last step.
    StepBoundary,
}

impl std::fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySkill => write!(f, "skill is empty"),
            Self::DuplicateSkill => write!(f, "skill already added"),
            Self::SkillNotFound => write!(f, "skill not found"),
            Self::LastEntry => write!(f, "at least one entry must remain"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range (len {len})")
            }
            Self::StepBoundary => write!(f, "no step in that direction"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// The scalar fields of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Bio,
}

impl ScalarField {
    /// All scalar fields in form order.
    pub const ALL: [ScalarField; 6] = [
        Self::FullName,
        Self::Title,
        Self::Email,
        Self::Phone,
        Self::Location,
        Self::Bio,
    ];

    /// Human-readable form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Title => "Professional Title",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Location => "Location",
            Self::Bio => "Professional Bio",
        }
    }

    /// Whether publishing semantically needs this field. Advisory only.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::FullName | Self::Title | Self::Email | Self::Bio)
    }
}

/// A single-field update to a [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProjectUpdate {
    Title(String),
    Description(String),
    Technologies(Vec<String>),
    LiveUrl(String),
    GithubUrl(String),
}

/// A single-field update to a [`SocialLink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SocialLinkUpdate {
    Platform(String),
    Url(String),
}

// ---------------------------------------------------------------------------
// Project / SocialLink
// ---------------------------------------------------------------------------

/// One showcased project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub live_url: String,
    pub github_url: String,
}

impl Project {
    /// A project shows up in the preview once it has a title.
    pub fn is_previewable(&self) -> bool {
        !self.title.is_empty()
    }

    fn apply(&mut self, update: ProjectUpdate) {
        match update {
            ProjectUpdate::Title(v) => self.title = v,
            ProjectUpdate::Description(v) => self.description = v,
            ProjectUpdate::Technologies(v) => self.technologies = v,
            ProjectUpdate::LiveUrl(v) => self.live_url = v,
            ProjectUpdate::GithubUrl(v) => self.github_url = v,
        }
    }
}

/// A link to one of the user's profiles elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    /// A link shows up in the preview once both fields are filled.
    pub fn is_previewable(&self) -> bool {
        !self.platform.is_empty() && !self.url.is_empty()
    }

    fn apply(&mut self, update: SocialLinkUpdate) {
        match update {
            SocialLinkUpdate::Platform(v) => self.platform = v,
            SocialLinkUpdate::Url(v) => self.url = v,
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The profile document edited by the builder wizard.
///
/// Invariants: `skills` holds unique non-empty strings in insertion order;
/// `projects` and `social_links` are never empty. Every mutator preserves
/// them, which is why the fields are private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    full_name: String,
    title: String,
    email: String,
    phone: String,
    location: String,
    bio: String,
    skills: Vec<String>,
    projects: Vec<Project>,
    social_links: Vec<SocialLink>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: blank scalars, no skills, one empty project and link.
    pub fn new() -> Self {
        Self {
            full_name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            bio: String::new(),
            skills: Vec::new(),
            projects: vec![Project::default()],
            social_links: vec![SocialLink::default()],
        }
    }

    pub fn field(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::FullName => &self.full_name,
            ScalarField::Title => &self.title,
            ScalarField::Email => &self.email,
            ScalarField::Phone => &self.phone,
            ScalarField::Location => &self.location,
            ScalarField::Bio => &self.bio,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn social_links(&self) -> &[SocialLink] {
        &self.social_links
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required(&self) -> Vec<ScalarField> {
        ScalarField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.field(*f).is_empty())
            .collect()
    }

    /// Assign a scalar field. No write-time validation.
    pub fn set_field(&mut self, field: ScalarField, value: impl Into<String>) -> Outcome {
        let slot = match field {
            ScalarField::FullName => &mut self.full_name,
            ScalarField::Title => &mut self.title,
            ScalarField::Email => &mut self.email,
            ScalarField::Phone => &mut self.phone,
            ScalarField::Location => &mut self.location,
            ScalarField::Bio => &mut self.bio,
        };
        *slot = value.into();
        Outcome::Applied
    }

    /// Append a trimmed skill unless it is empty or already present.
    pub fn add_skill(&mut self, value: &str) -> Outcome {
        let skill = value.trim();
        if skill.is_empty() {
            return Outcome::NoOp(NoOpReason::EmptySkill);
        }
        if self.skills.iter().any(|s| s == skill) {
            return Outcome::NoOp(NoOpReason::DuplicateSkill);
        }
        self.skills.push(skill.to_string());
        Outcome::Applied
    }

    pub fn remove_skill(&mut self, value: &str) -> Outcome {
        match self.skills.iter().position(|s| s == value) {
            Some(pos) => {
                self.skills.remove(pos);
                Outcome::Applied
            }
            None => Outcome::NoOp(NoOpReason::SkillNotFound),
        }
    }

    pub fn add_project(&mut self) -> Outcome {
        self.projects.push(Project::default());
        Outcome::Applied
    }

    pub fn update_project(&mut self, index: usize, update: ProjectUpdate) -> Outcome {
        let len = self.projects.len();
        match self.projects.get_mut(index) {
            Some(project) => {
                project.apply(update);
                Outcome::Applied
            }
            None => Outcome::NoOp(NoOpReason::IndexOutOfRange { index, len }),
        }
    }

    pub fn remove_project(&mut self, index: usize) -> Outcome {
        remove_keeping_one(&mut self.projects, index)
    }

    pub fn add_social_link(&mut self) -> Outcome {
        self.social_links.push(SocialLink::default());
        Outcome::Applied
    }

    pub fn update_social_link(&mut self, index: usize, update: SocialLinkUpdate) -> Outcome {
        let len = self.social_links.len();
        match self.social_links.get_mut(index) {
            Some(link) => {
                link.apply(update);
                Outcome::Applied
            }
            None => Outcome::NoOp(NoOpReason::IndexOutOfRange { index, len }),
        }
    }

    pub fn remove_social_link(&mut self, index: usize) -> Outcome {
        remove_keeping_one(&mut self.social_links, index)
    }
}

/// Remove `items[index]` unless it is the only element left.
fn remove_keeping_one<T>(items: &mut Vec<T>, index: usize) -> Outcome {
    let len = items.len();
    if index >= len {
        return Outcome::NoOp(NoOpReason::IndexOutOfRange { index, len });
    }
    if len <= 1 {
        return Outcome::NoOp(NoOpReason::LastEntry);
    }
    items.remove(index);
    Outcome::Applied
}

// ---------------------------------------------------------------------------
// PreviewView
// ---------------------------------------------------------------------------

/// Render-ready projection of a [`Document`] with empty sections hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewView {
    pub identity: IdentityBlock,
    /// "About Me" text, present only when the bio is filled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectCard>>,
    pub contact: ContactBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<Vec<SocialBadge>>,
}

impl PreviewView {
    /// Visible sections in render order.
    pub fn sections(&self) -> Vec<SectionKind> {
        let mut sections = vec![SectionKind::Identity];
        if self.about.is_some() {
            sections.push(SectionKind::About);
        }
        if self.skills.is_some() {
            sections.push(SectionKind::Skills);
        }
        if self.projects.is_some() {
            sections.push(SectionKind::Projects);
        }
        sections.push(SectionKind::Contact);
        if self.connect.is_some() {
            sections.push(SectionKind::Connect);
        }
        sections
    }
}

/// The preview's section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Identity,
    About,
    Skills,
    Projects,
    Contact,
    Connect,
}

impl SectionKind {
    /// Section heading as shown to the reader; the identity hero has none.
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            Self::Identity => None,
            Self::About => Some("About Me"),
            Self::Skills => Some("Skills"),
            Self::Projects => Some("Projects"),
            Self::Contact => Some("Contact"),
            Self::Connect => Some("Connect"),
        }
    }
}

/// Hero block: name, title and optional location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityBlock {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A titled project as it appears in the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// "Live Demo" target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo: Option<String>,
    /// "GitHub" source target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Contact lines; the section is always shown even when both are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A complete social link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialBadge {
    pub platform: String,
    pub url: String,
}
