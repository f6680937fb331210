//! Shared types, error model, catalogs, and configuration for PortfolioBuilder.
//!
//! This crate is the foundation depended on by all other PortfolioBuilder crates.
//! It provides:
//! - [`PortfolioBuilderError`]: the unified error type
//! - Domain types ([`Document`], [`Project`], [`SocialLink`], [`PreviewView`], [`RunId`])
//! - Static catalogs ([`Catalogs`]: steps, publish targets, templates)
//! - Configuration ([`AppConfig`], [`PipelineTiming`], config loading)

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use catalog::{
    Catalogs, ColorScheme, Difficulty, PublishTarget, StepMeta, TargetKind, Template,
    TemplateCategory, TemplateLayout, TemplateLevel,
};
pub use config::{
    AppConfig, DefaultsConfig, PipelineConfig, PipelineTiming, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_output_dir, validate_config,
};
pub use error::{PortfolioBuilderError, Result};
pub use types::{
    ContactBlock, Document, IdentityBlock, NoOpReason, Outcome, PreviewView, Project,
    ProjectCard, ProjectUpdate, RunId, STEP_COUNT, ScalarField, SectionKind, SocialBadge,
    SocialLink, SocialLinkUpdate,
};
