//! Static catalogs: wizard steps, publish targets, and templates.
//!
//! The tables are built once by [`Catalogs::builtin`] and shared read-only
//! (usually behind an `Arc`) with the wizard, the pipeline and the apps.

use std::str::FromStr;

use serde::Serialize;

use crate::error::PortfolioBuilderError;
use crate::types::STEP_COUNT;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Metadata for one wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepMeta {
    /// 1-based position.
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
}

fn builtin_steps() -> Vec<StepMeta> {
    vec![
        StepMeta {
            id: 1,
            title: "Personal Info",
            description: "Basic information about you",
        },
        StepMeta {
            id: 2,
            title: "Bio & Skills",
            description: "Your story and expertise",
        },
        StepMeta {
            id: 3,
            title: "Projects",
            description: "Showcase your work",
        },
        StepMeta {
            id: 4,
            title: "Social Links",
            description: "Connect with your audience",
        },
    ]
}

// ---------------------------------------------------------------------------
// Publish targets
// ---------------------------------------------------------------------------

/// The closed set of ways to publish a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    Download,
    GithubPages,
    Netlify,
    Vercel,
}

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        Self::Download,
        Self::GithubPages,
        Self::Netlify,
        Self::Vercel,
    ];

    /// Stable identifier used on the command line and in config.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::GithubPages => "github",
            Self::Netlify => "netlify",
            Self::Vercel => "vercel",
        }
    }

    /// Domain suffix of hosted URLs, `None` for the package download.
    pub fn hosting_domain(&self) -> Option<&'static str> {
        match self {
            Self::Download => None,
            Self::GithubPages => Some("github.io"),
            Self::Netlify => Some("netlify.app"),
            Self::Vercel => Some("vercel.app"),
        }
    }

    pub fn is_hosting(&self) -> bool {
        self.hosting_domain().is_some()
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TargetKind {
    type Err = PortfolioBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| PortfolioBuilderError::unknown("publish target", s))
    }
}

/// How hard a publish target is to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

/// One entry of the publish target catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishTarget {
    pub kind: TargetKind,
    pub label: &'static str,
    pub description: &'static str,
    /// Declared capability tags, in display order.
    pub features: Vec<&'static str>,
    pub difficulty: Difficulty,
    /// Estimated setup time, e.g. "2-3 minutes".
    pub time_estimate: &'static str,
    pub popular: bool,
}

fn builtin_targets() -> Vec<PublishTarget> {
    vec![
        PublishTarget {
            kind: TargetKind::Download,
            label: "Download ZIP",
            description: "Download your portfolio as a complete HTML/CSS/JS package that you can host anywhere.",
            features: vec![
                "Complete source code",
                "No dependencies",
                "Host anywhere",
                "Full customization",
            ],
            difficulty: Difficulty::Easy,
            time_estimate: "Instant",
            popular: true,
        },
        PublishTarget {
            kind: TargetKind::GithubPages,
            label: "GitHub Pages",
            description: "Deploy directly to GitHub Pages with automatic SSL and custom domain support.",
            features: vec![
                "Free hosting",
                "Custom domain",
                "SSL certificate",
                "Version control",
            ],
            difficulty: Difficulty::Easy,
            time_estimate: "2-3 minutes",
            popular: true,
        },
        PublishTarget {
            kind: TargetKind::Netlify,
            label: "Netlify",
            description: "Deploy to Netlify with continuous deployment, form handling, and edge functions.",
            features: vec!["CDN hosting", "Form handling", "Analytics", "Branch previews"],
            difficulty: Difficulty::Medium,
            time_estimate: "3-5 minutes",
            popular: false,
        },
        PublishTarget {
            kind: TargetKind::Vercel,
            label: "Vercel",
            description: "Deploy to Vercel with automatic HTTPS, global CDN, and serverless functions.",
            features: vec![
                "Global CDN",
                "Serverless functions",
                "Analytics",
                "Preview deployments",
            ],
            difficulty: Difficulty::Medium,
            time_estimate: "2-4 minutes",
            popular: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Minimal,
    Creative,
    Professional,
    Developer,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 4] = [
        Self::Minimal,
        Self::Creative,
        Self::Professional,
        Self::Developer,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Creative => "creative",
            Self::Professional => "professional",
            Self::Developer => "developer",
        }
    }
}

impl FromStr for TemplateCategory {
    type Err = PortfolioBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| PortfolioBuilderError::unknown("template category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateLayout {
    SingleColumn,
    TwoColumn,
    Grid,
    Sidebar,
}

/// Three color tokens (CSS hex strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

/// A named starting layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    pub level: TemplateLevel,
    pub features: Vec<&'static str>,
    pub color_schemes: Vec<ColorScheme>,
    pub hero: &'static str,
    pub layout: TemplateLayout,
    pub sections: Vec<&'static str>,
    pub popular: bool,
}

impl Template {
    /// Look up a color scheme by name, case-insensitively.
    pub fn scheme(&self, name: &str) -> Option<&ColorScheme> {
        self.color_schemes
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

const fn scheme(
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
) -> ColorScheme {
    ColorScheme {
        name,
        primary,
        secondary,
        accent,
    }
}

fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "minimal-pro",
            name: "Minimal Pro",
            description: "Clean and elegant design perfect for professionals who want to make a strong first impression.",
            category: TemplateCategory::Minimal,
            level: TemplateLevel::Beginner,
            features: vec!["Responsive Design", "Dark Mode", "Contact Form", "Project Gallery"],
            color_schemes: vec![
                scheme("Classic", "#2563eb", "#64748b", "#0ea5e9"),
                scheme("Warm", "#dc2626", "#78716c", "#ea580b"),
                scheme("Nature", "#059669", "#6b7280", "#10b981"),
            ],
            hero: "Large centered name with subtitle and call-to-action",
            layout: TemplateLayout::SingleColumn,
            sections: vec!["Hero", "About", "Skills", "Projects", "Contact"],
            popular: true,
        },
        Template {
            id: "creative-studio",
            name: "Creative Studio",
            description: "Bold and artistic template designed for creatives, designers, and artists to showcase their work.",
            category: TemplateCategory::Creative,
            level: TemplateLevel::Intermediate,
            features: vec!["Animation Effects", "Image Gallery", "Video Background", "Custom Cursor"],
            color_schemes: vec![
                scheme("Vibrant", "#7c3aed", "#ec4899", "#f59e0b"),
                scheme("Sunset", "#dc2626", "#ea580c", "#f59e0b"),
                scheme("Ocean", "#0ea5e9", "#06b6d4", "#8b5cf6"),
            ],
            hero: "Full-screen background with animated text overlay",
            layout: TemplateLayout::Grid,
            sections: vec!["Hero", "Portfolio", "About", "Services", "Contact"],
            popular: false,
        },
        Template {
            id: "developer-focus",
            name: "Developer Focus",
            description: "Technical and modern design tailored for software developers and engineers.",
            category: TemplateCategory::Developer,
            level: TemplateLevel::Intermediate,
            features: vec![
                "Code Syntax Highlighting",
                "GitHub Integration",
                "Tech Stack Icons",
                "Terminal Theme",
            ],
            color_schemes: vec![
                scheme("Terminal", "#22c55e", "#64748b", "#06b6d4"),
                scheme("VS Code", "#3b82f6", "#6366f1", "#8b5cf6"),
                scheme("GitHub", "#1f2937", "#4b5563", "#10b981"),
            ],
            hero: "Code-inspired layout with terminal-style elements",
            layout: TemplateLayout::Sidebar,
            sections: vec!["Hero", "Skills", "Projects", "Experience", "Blog"],
            popular: true,
        },
        Template {
            id: "business-executive",
            name: "Business Executive",
            description: "Professional and sophisticated template for business leaders and executives.",
            category: TemplateCategory::Professional,
            level: TemplateLevel::Beginner,
            features: vec![
                "LinkedIn Integration",
                "Testimonials",
                "Company Logos",
                "Professional Timeline",
            ],
            color_schemes: vec![
                scheme("Corporate", "#1e40af", "#64748b", "#0ea5e9"),
                scheme("Luxury", "#7c2d12", "#a3a3a3", "#d97706"),
                scheme("Modern", "#374151", "#6b7280", "#06b6d4"),
            ],
            hero: "Professional headshot with executive summary",
            layout: TemplateLayout::TwoColumn,
            sections: vec!["Hero", "Experience", "Achievements", "Testimonials", "Contact"],
            popular: false,
        },
        Template {
            id: "portfolio-showcase",
            name: "Portfolio Showcase",
            description: "Image-heavy template perfect for photographers, designers, and visual artists.",
            category: TemplateCategory::Creative,
            level: TemplateLevel::Advanced,
            features: vec!["Masonry Gallery", "Lightbox", "Image Optimization", "Lazy Loading"],
            color_schemes: vec![
                scheme("Monochrome", "#000000", "#737373", "#ffffff"),
                scheme("Warm Tones", "#92400e", "#78716c", "#f59e0b"),
                scheme("Cool Blues", "#1e3a8a", "#64748b", "#0ea5e9"),
            ],
            hero: "Full-width image carousel with overlay text",
            layout: TemplateLayout::Grid,
            sections: vec!["Hero", "Gallery", "About", "Services", "Contact"],
            popular: true,
        },
        Template {
            id: "startup-founder",
            name: "Startup Founder",
            description: "Dynamic and modern template for entrepreneurs and startup founders.",
            category: TemplateCategory::Professional,
            level: TemplateLevel::Intermediate,
            features: vec![
                "Startup Metrics",
                "Team Section",
                "Investor Relations",
                "Press Coverage",
            ],
            color_schemes: vec![
                scheme("Startup", "#7c3aed", "#64748b", "#06b6d4"),
                scheme("Growth", "#059669", "#6b7280", "#10b981"),
                scheme("Innovation", "#dc2626", "#78716c", "#f59e0b"),
            ],
            hero: "Bold statement with company metrics",
            layout: TemplateLayout::SingleColumn,
            sections: vec!["Hero", "Vision", "Team", "Achievements", "Contact"],
            popular: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

/// All read-only reference tables.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub steps: Vec<StepMeta>,
    pub targets: Vec<PublishTarget>,
    pub templates: Vec<Template>,
}

impl Catalogs {
    /// The tables shipped with the tool.
    pub fn builtin() -> Self {
        let catalogs = Self {
            steps: builtin_steps(),
            targets: builtin_targets(),
            templates: builtin_templates(),
        };
        debug_assert_eq!(catalogs.steps.len(), STEP_COUNT as usize);
        catalogs
    }

    /// Step metadata for a 1-based step id.
    pub fn step(&self, id: u8) -> Option<&StepMeta> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn target(&self, kind: TargetKind) -> Option<&PublishTarget> {
        self.targets.iter().find(|t| t.kind == kind)
    }

    pub fn template(&self, id: &str) -> crate::Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| PortfolioBuilderError::unknown("template", id))
    }

    /// Templates in catalog order, optionally restricted to one category.
    pub fn templates_in(&self, category: Option<TemplateCategory>) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_steps_and_targets() {
        let c = Catalogs::builtin();
        assert_eq!(c.steps.len(), 4);
        assert_eq!(c.step(2).map(|s| s.title), Some("Bio & Skills"));
        assert!(c.step(5).is_none());
        assert_eq!(c.targets.len(), 4);
        for kind in TargetKind::ALL {
            assert_eq!(c.target(kind).map(|t| t.kind), Some(kind));
        }
    }

    #[test]
    fn target_kind_parses_ids() {
        assert_eq!("netlify".parse::<TargetKind>().unwrap(), TargetKind::Netlify);
        assert_eq!("github".parse::<TargetKind>().unwrap(), TargetKind::GithubPages);
        assert!("heroku".parse::<TargetKind>().is_err());
    }

    #[test]
    fn hosting_domains() {
        assert_eq!(TargetKind::Download.hosting_domain(), None);
        assert_eq!(TargetKind::GithubPages.hosting_domain(), Some("github.io"));
        assert_eq!(TargetKind::Vercel.hosting_domain(), Some("vercel.app"));
    }

    #[test]
    fn templates_have_three_schemes_each() {
        let c = Catalogs::builtin();
        assert_eq!(c.templates.len(), 6);
        assert!(c.templates.iter().all(|t| t.color_schemes.len() == 3));
    }

    #[test]
    fn template_category_filter() {
        let c = Catalogs::builtin();
        let creative = c.templates_in(Some(TemplateCategory::Creative));
        let ids: Vec<_> = creative.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["creative-studio", "portfolio-showcase"]);
        assert_eq!(c.templates_in(None).len(), 6);
    }

    #[test]
    fn template_scheme_lookup_ignores_case() {
        let c = Catalogs::builtin();
        let t = c.template("developer-focus").expect("template");
        assert_eq!(t.scheme("vs code").map(|s| s.primary), Some("#3b82f6"));
        assert!(c.template("nope").is_err());
    }
}
