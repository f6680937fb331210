//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use portfoliobuilder_core::{
    PackageDelivery, PipelineStatus, ProgressReporter, PublishPipeline, PublishResult, Wizard,
    load_profile,
};
use portfoliobuilder_shared::{
    AppConfig, Catalogs, PipelineTiming, PreviewView, PublishTarget, RunId, STEP_COUNT,
    SectionKind, TargetKind, TemplateCategory, init_config, load_config, resolve_output_dir,
    validate_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// PortfolioBuilder: build a portfolio from a profile and publish it.
#[derive(Parser)]
#[command(
    name = "portfoliobuilder",
    version,
    about = "Build a personal portfolio from a profile file and publish it.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for `preview`.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum PreviewFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Replay a profile and print the live preview.
    Preview {
        /// Profile TOML file.
        #[arg(short, long)]
        profile: PathBuf,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: PreviewFormat,
    },

    /// Replay a profile and publish it to a target.
    Publish {
        /// Profile TOML file.
        #[arg(short, long)]
        profile: PathBuf,

        /// Publish target: download, github, netlify, or vercel.
        #[arg(short, long, default_value = "download")]
        target: String,

        /// Output directory for downloaded packages (defaults to config).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Template id (defaults to config).
        #[arg(long)]
        template: Option<String>,

        /// Color scheme name within the template (defaults to config).
        #[arg(long)]
        scheme: Option<String>,
    },

    /// List publish targets.
    Targets,

    /// List portfolio templates.
    Templates {
        /// Only show one category: minimal, creative, professional, developer.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List the builder wizard steps.
    Steps,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "portfoliobuilder=info",
        1 => "portfoliobuilder=debug",
        _ => "portfoliobuilder=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let catalogs = Arc::new(Catalogs::builtin());
    match cli.command {
        Command::Preview { profile, format } => cmd_preview(&catalogs, &profile, format),
        Command::Publish {
            profile,
            target,
            out,
            template,
            scheme,
        } => {
            let opts = PublishOpts {
                target,
                out,
                template,
                scheme,
            };
            cmd_publish(catalogs, &profile, opts).await
        }
        Command::Targets => cmd_targets(&catalogs),
        Command::Templates { category } => cmd_templates(&catalogs, category.as_deref()),
        Command::Steps => cmd_steps(&catalogs),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&catalogs),
        },
    }
}

// ---------------------------------------------------------------------------
// preview
// ---------------------------------------------------------------------------

/// Build a wizard session from a profile file, reporting absorbed entries.
fn wizard_from_profile(catalogs: &Arc<Catalogs>, path: &Path) -> Result<Wizard> {
    let profile = load_profile(path)?;
    let mut wizard = Wizard::new(Arc::clone(catalogs));
    let report = profile.replay(&mut wizard);
    for (command, reason) in &report.ignored {
        warn!(?command, %reason, "profile entry ignored");
    }
    Ok(wizard)
}

fn cmd_preview(catalogs: &Arc<Catalogs>, profile: &Path, format: PreviewFormat) -> Result<()> {
    let wizard = wizard_from_profile(catalogs, profile)?;
    let view = wizard.preview();

    match format {
        PreviewFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        PreviewFormat::Text => {
            print!("{}", render_preview(&view));
            let missing = wizard.readiness();
            if !missing.is_empty() {
                let labels: Vec<_> = missing.iter().map(|f| f.label()).collect();
                println!();
                println!("  Missing required fields: {}", labels.join(", "));
            }
        }
    }
    Ok(())
}

/// Plain-text rendering of a preview, one block per visible section.
fn render_preview(view: &PreviewView) -> String {
    let mut out = String::new();
    for section in view.sections() {
        out.push('\n');
        if let Some(heading) = section.heading() {
            out.push_str(&format!("  {heading}\n"));
            out.push_str(&format!("  {}\n", "-".repeat(heading.len())));
        }
        match section {
            SectionKind::Identity => {
                out.push_str(&format!("  {}\n", view.identity.name));
                out.push_str(&format!("  {}\n", view.identity.title));
                if let Some(location) = &view.identity.location {
                    out.push_str(&format!("  {location}\n"));
                }
            }
            SectionKind::About => {
                if let Some(about) = &view.about {
                    out.push_str(&format!("  {about}\n"));
                }
            }
            SectionKind::Skills => {
                if let Some(skills) = &view.skills {
                    out.push_str(&format!("  {}\n", skills.join(" · ")));
                }
            }
            SectionKind::Projects => {
                for card in view.projects.iter().flatten() {
                    out.push_str(&format!("  * {}\n", card.title));
                    if let Some(description) = &card.description {
                        out.push_str(&format!("    {description}\n"));
                    }
                    if let Some(url) = &card.live_demo {
                        out.push_str(&format!("    Live Demo: {url}\n"));
                    }
                    if let Some(url) = &card.source {
                        out.push_str(&format!("    GitHub:    {url}\n"));
                    }
                }
            }
            SectionKind::Contact => {
                if let Some(email) = &view.contact.email {
                    out.push_str(&format!("  Email: {email}\n"));
                }
                if let Some(phone) = &view.contact.phone {
                    out.push_str(&format!("  Phone: {phone}\n"));
                }
            }
            SectionKind::Connect => {
                for badge in view.connect.iter().flatten() {
                    out.push_str(&format!("  {}: {}\n", badge.platform, badge.url));
                }
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// publish
// ---------------------------------------------------------------------------

struct PublishOpts {
    target: String,
    out: Option<PathBuf>,
    template: Option<String>,
    scheme: Option<String>,
}

async fn cmd_publish(catalogs: Arc<Catalogs>, profile: &Path, opts: PublishOpts) -> Result<()> {
    let config = load_config()?;
    let target: TargetKind = opts.target.parse()?;

    let mut wizard = wizard_from_profile(&catalogs, profile)?;
    while !wizard.is_last_step() {
        wizard.go_next();
    }
    let document = wizard
        .finish()
        .ok_or_else(|| eyre!("wizard did not reach the last step"))?;

    let missing = wizard.readiness();
    if !missing.is_empty() {
        let labels: Vec<_> = missing.iter().map(|f| f.label()).collect();
        warn!(missing = %labels.join(", "), "publishing with empty required fields");
    }

    let delivery = delivery_for(&catalogs, &config, &opts)?;

    info!(%target, profile = %profile.display(), "publishing portfolio");

    let mut pipeline = PublishPipeline::new(
        Arc::clone(&catalogs),
        PipelineTiming::from(&config),
        Arc::new(delivery),
    )
    .with_reporter(Arc::new(CliProgress::new()));

    let run_id = pipeline.start(document, target)?;
    let status = pipeline.wait().await;

    println!();
    match status {
        PipelineStatus::Succeeded(PublishResult::Artifact { manifest, location }) => {
            println!("  Portfolio package ready!");
            println!("  Run:   {run_id}");
            if let Some(dir) = location {
                println!("  Path:  {}", dir.display());
            }
            println!("  Files:");
            for part in &manifest.parts {
                println!("    {:<12} {}", part.name, part.description);
            }
        }
        PipelineStatus::Succeeded(PublishResult::Hosted { url }) => {
            println!("  Portfolio deployed!");
            println!("  Run:   {run_id}");
            println!("  URL:   {url}");
        }
        PipelineStatus::Failed { reason } => {
            return Err(eyre!("publish failed: {reason}"));
        }
        PipelineStatus::Idle | PipelineStatus::Running { .. } => {
            return Err(eyre!("publish run ended without a result"));
        }
    }
    println!();

    Ok(())
}

/// Package delivery for the template and scheme this run actually uses:
/// command-line overrides first, config defaults otherwise.
fn delivery_for(
    catalogs: &Catalogs,
    config: &AppConfig,
    opts: &PublishOpts,
) -> Result<PackageDelivery> {
    let output_root = match &opts.out {
        Some(dir) => dir.clone(),
        None => resolve_output_dir(&config.defaults.output_dir)?,
    };
    let delivery = PackageDelivery::new(
        catalogs,
        output_root,
        opts.template.as_deref().unwrap_or(&config.defaults.template),
        opts.scheme.as_deref().unwrap_or(&config.defaults.color_scheme),
        env!("CARGO_PKG_VERSION"),
    )?;
    Ok(delivery)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} [{bar:30.cyan/blue}] {pos:>3}% {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        bar.set_style(style);
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, _run_id: RunId, target: &PublishTarget) {
        self.bar.set_message(format!("Publishing to {}", target.label));
    }

    fn stage(&self, label: &str, progress: u8) {
        self.bar.set_position(u64::from(progress));
        self.bar.set_message(label.to_string());
    }

    fn finished(&self, _status: &PipelineStatus) {
        self.bar.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Catalog listings
// ---------------------------------------------------------------------------

fn cmd_targets(catalogs: &Catalogs) -> Result<()> {
    println!();
    for target in &catalogs.targets {
        let popular = if target.popular { "  [popular]" } else { "" };
        println!("  {:<9} {}{popular}", target.kind.id(), target.label);
        println!("            {}", target.description);
        println!(
            "            {} · {} · {}",
            target.difficulty,
            target.time_estimate,
            target.features.join(", ")
        );
        println!();
    }
    Ok(())
}

fn cmd_templates(catalogs: &Catalogs, category: Option<&str>) -> Result<()> {
    let category = category.map(str::parse::<TemplateCategory>).transpose()?;
    let templates = catalogs.templates_in(category);

    println!();
    if templates.is_empty() {
        println!("  No templates in this category.");
    }
    for template in templates {
        let popular = if template.popular { "  [popular]" } else { "" };
        println!("  {:<20} {}{popular}", template.id, template.name);
        println!("                       {}", template.description);
        let schemes: Vec<_> = template.color_schemes.iter().map(|s| s.name).collect();
        println!(
            "                       {} · schemes: {}",
            template.category.id(),
            schemes.join(", ")
        );
        println!();
    }
    Ok(())
}

fn cmd_steps(catalogs: &Catalogs) -> Result<()> {
    println!();
    for step in &catalogs.steps {
        println!(
            "  {}/{STEP_COUNT}  {:<14} {}",
            step.id, step.title, step.description
        );
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(catalogs: &Catalogs) -> Result<()> {
    let config: AppConfig = load_config()?;
    if let Err(e) = validate_config(&config, catalogs) {
        warn!(error = %e, "config references an unknown template or scheme");
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use portfoliobuilder_shared::{Document, ScalarField};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn publish_args_parse() {
        let cli = Cli::try_parse_from([
            "portfoliobuilder",
            "-vv",
            "publish",
            "--profile",
            "me.toml",
            "--target",
            "netlify",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Publish { target, out, .. } => {
                assert_eq!(target, "netlify");
                assert!(out.is_none());
            }
            _ => panic!("expected publish"),
        }
    }

    fn publish_opts(template: Option<&str>, scheme: Option<&str>) -> PublishOpts {
        PublishOpts {
            target: "download".to_string(),
            out: Some(std::env::temp_dir().join("pb-cli-test")),
            template: template.map(String::from),
            scheme: scheme.map(String::from),
        }
    }

    #[test]
    fn overrides_win_over_stale_config_defaults() {
        let catalogs = Catalogs::builtin();
        let mut config = AppConfig::default();
        config.defaults.template = "retired-template".to_string();
        config.defaults.color_scheme = "Retired".to_string();
        assert!(validate_config(&config, &catalogs).is_err());

        let opts = publish_opts(Some("minimal-pro"), Some("Warm"));
        assert!(delivery_for(&catalogs, &config, &opts).is_ok());

        let opts = publish_opts(None, None);
        assert!(delivery_for(&catalogs, &config, &opts).is_err());
    }

    #[test]
    fn unknown_override_is_rejected() {
        let catalogs = Catalogs::builtin();
        let config = AppConfig::default();
        let opts = publish_opts(Some("minimal-pro"), Some("Neon"));
        assert!(delivery_for(&catalogs, &config, &opts).is_err());
    }

    #[test]
    fn render_preview_of_empty_document() {
        let text = render_preview(&portfoliobuilder_core::project(&Document::new()));
        assert!(text.contains("Your Name"));
        assert!(text.contains("  Contact\n"));
        assert!(!text.contains("About Me"));
    }

    #[test]
    fn render_preview_lists_contact_lines() {
        let mut doc = Document::new();
        doc.set_field(ScalarField::Email, "ada@example.com");
        doc.set_field(ScalarField::Bio, "Hello.");
        let text = render_preview(&portfoliobuilder_core::project(&doc));
        assert!(text.contains("  About Me\n"));
        assert!(text.contains("Email: ada@example.com"));
        assert!(!text.contains("Phone:"));
    }
}
