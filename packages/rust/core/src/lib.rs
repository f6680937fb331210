//! Core domain logic for PortfolioBuilder.
//!
//! This crate ties the document model to its consumers:
//! - [`wizard`]: step navigation and invariant-preserving edits
//! - [`preview`]: the "only show what's filled in" projection
//! - [`pipeline`]: the timed publish state machine
//! - [`package`]: the download delivery that writes a package to disk
//! - [`profile`]: TOML profiles replayed through the wizard

pub mod package;
pub mod pipeline;
pub mod preview;
pub mod profile;
pub mod wizard;

pub use package::{PackageDelivery, slugify};
pub use pipeline::{
    Advance, Clipboard, Delivery, ImmediateTimer, NoDelivery, PipelineRun, PipelineStatus,
    ProgressReporter, PublishPipeline, PublishResult, SilentProgress, Stage, StageScript, Timer,
    TokioTimer, mint_hosted_url,
};
pub use preview::{PLACEHOLDER_NAME, PLACEHOLDER_TITLE, PreviewDevice, project};
pub use profile::{Profile, ReplayReport, load_profile, parse_profile};
pub use wizard::{StepStatus, Wizard, WizardCommand};
