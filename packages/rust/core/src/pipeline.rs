//! Publish pipeline: finished document → scripted stages → result.
//!
//! A run is an explicit state machine ([`PipelineRun`]) walked by a spawned
//! task that sleeps on a [`Timer`] between stages. Status is published through
//! a `tokio::sync::watch` channel, a [`ProgressReporter`] and `tracing`.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use portfoliobuilder_artifacts::ArtifactManifest;
use portfoliobuilder_shared::{
    Catalogs, Document, PipelineTiming, PortfolioBuilderError, PublishTarget, Result, RunId,
    TargetKind,
};

// ---------------------------------------------------------------------------
// Stage scripts
// ---------------------------------------------------------------------------

/// One timed step of a script: wait `delay`, then report `progress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub label: &'static str,
    pub delay: Duration,
    pub progress: u8,
}

/// The stage table for one kind of run, plus a final wait before the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageScript {
    pub stages: Vec<Stage>,
    pub settle: Duration,
}

impl StageScript {
    /// Five packaging ticks of +20, then one more tick before the artifact.
    pub fn download(timing: &PipelineTiming) -> Self {
        let stages = (1..=5)
            .map(|i| Stage {
                label: "Packaging files",
                delay: timing.download_tick,
                progress: i * 20,
            })
            .collect();
        Self {
            stages,
            settle: timing.download_tick,
        }
    }

    /// Four deployment stages of +25 each.
    pub fn hosting(timing: &PipelineTiming) -> Self {
        let labels = [
            "Generating portfolio files",
            "Optimizing assets",
            "Deploying to platform",
            "Finalizing deployment",
        ];
        let stages = labels
            .into_iter()
            .zip(1u8..)
            .map(|(label, i)| Stage {
                label,
                delay: timing.hosting_stage,
                progress: i * 25,
            })
            .collect();
        Self {
            stages,
            settle: Duration::ZERO,
        }
    }

    pub fn for_target(kind: TargetKind, timing: &PipelineTiming) -> Self {
        if kind.is_hosting() {
            Self::hosting(timing)
        } else {
            Self::download(timing)
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Terminal payload of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PublishResult {
    /// Downloadable package. `location` is where delivery wrote it, if anywhere.
    Artifact {
        manifest: ArtifactManifest,
        location: Option<PathBuf>,
    },
    /// Simulated deployment.
    Hosted { url: Url },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineStatus {
    Idle,
    Running { progress: u8, stage: &'static str },
    Succeeded(PublishResult),
    Failed { reason: String },
}

impl PipelineStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed { .. })
    }

    /// The hosted URL, once a hosting run has succeeded.
    pub fn hosted_url(&self) -> Option<&Url> {
        match self {
            Self::Succeeded(PublishResult::Hosted { url }) => Some(url),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineRun state machine
// ---------------------------------------------------------------------------

/// What a call to [`PipelineRun::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next stage; status changed.
    Stage { label: &'static str, progress: u8 },
    /// All stages done and the settle wait elapsed; ready for a result.
    Settled,
    /// Nothing left to advance.
    Exhausted,
}

/// One execution of a stage script against a target.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub id: RunId,
    pub target: TargetKind,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    script: StageScript,
    /// Index of the next stage; `stages.len()` means only the settle is left.
    cursor: usize,
    settled: bool,
    status: PipelineStatus,
}

impl PipelineRun {
    pub fn new(target: TargetKind, script: StageScript) -> Self {
        let stage = script.stages.first().map_or("", |s| s.label);
        Self {
            id: RunId::new(),
            target,
            started_at: Utc::now(),
            finished_at: None,
            script,
            cursor: 0,
            settled: false,
            status: PipelineStatus::Running { progress: 0, stage },
        }
    }

    pub fn status(&self) -> &PipelineStatus {
        &self.status
    }

    /// How long to wait before the next [`advance`](Self::advance), or
    /// `None` once the run is settled or finished.
    pub fn pending_delay(&self) -> Option<Duration> {
        if self.settled || !self.status.is_running() {
            return None;
        }
        Some(
            self.script
                .stages
                .get(self.cursor)
                .map_or(self.script.settle, |s| s.delay),
        )
    }

    /// Step the clock once.
    pub fn advance(&mut self) -> Advance {
        if self.pending_delay().is_none() {
            return Advance::Exhausted;
        }
        match self.script.stages.get(self.cursor) {
            Some(stage) => {
                self.cursor += 1;
                let current = match self.status {
                    PipelineStatus::Running { progress, .. } => progress,
                    _ => 0,
                };
                let progress = stage.progress.clamp(current, 100);
                self.status = PipelineStatus::Running {
                    progress,
                    stage: stage.label,
                };
                Advance::Stage {
                    label: stage.label,
                    progress,
                }
            }
            None => {
                self.settled = true;
                Advance::Settled
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Record the terminal state. Ignored unless the run is settled and
    /// still running.
    pub fn finish(&mut self, outcome: std::result::Result<PublishResult, String>) {
        if !self.settled || !self.status.is_running() {
            return;
        }
        self.status = match outcome {
            Ok(result) => PipelineStatus::Succeeded(result),
            Err(reason) => PipelineStatus::Failed { reason },
        };
        self.finished_at = Some(Utc::now());
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Source of the waits between stages.
pub trait Timer: Send + Sync + 'static {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real time via `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Skips every wait (yields once so other tasks can observe progress).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTimer;

impl Timer for ImmediateTimer {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called once when a run begins.
    fn started(&self, run_id: RunId, target: &PublishTarget);
    /// Called after each stage.
    fn stage(&self, label: &str, progress: u8);
    /// Called with the terminal status.
    fn finished(&self, status: &PipelineStatus);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _run_id: RunId, _target: &PublishTarget) {}
    fn stage(&self, _label: &str, _progress: u8) {}
    fn finished(&self, _status: &PipelineStatus) {}
}

/// The side effect behind a successful download run.
pub trait Delivery: Send + Sync {
    /// Deliver the package for `document`. Returns where it landed, if on disk.
    fn deliver(
        &self,
        run_id: RunId,
        document: &Document,
        manifest: &ArtifactManifest,
    ) -> Result<Option<PathBuf>>;
}

/// Delivery that does nothing; the artifact result is still reported.
pub struct NoDelivery;

impl Delivery for NoDelivery {
    fn deliver(&self, _: RunId, _: &Document, _: &ArtifactManifest) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Destination for [`PublishPipeline::copy_url`].
pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Hosted URLs
// ---------------------------------------------------------------------------

const TOKEN_LEN: usize = 9;

/// `https://your-portfolio-<token>.<domain>` with a fresh random token.
pub fn mint_hosted_url(domain: &str) -> Result<Url> {
    let raw = format!("https://your-portfolio-{}.{domain}", random_token());
    Url::parse(&raw)
        .map_err(|e| PortfolioBuilderError::Pipeline(format!("invalid hosted URL {raw}: {e}")))
}

/// Nine lowercase base-36 characters drawn from a v4 UUID.
fn random_token() -> String {
    let mut n = Uuid::new_v4().as_u128();
    (0..TOKEN_LEN)
        .map(|_| {
            let digit = (n % 36) as u32;
            n /= 36;
            char::from_digit(digit, 36).unwrap_or('0')
        })
        .collect()
}

// ---------------------------------------------------------------------------
// PublishPipeline
// ---------------------------------------------------------------------------

/// Shared state handed to each spawned run.
struct RunContext<T: Timer> {
    timer: Arc<T>,
    delivery: Arc<dyn Delivery>,
    reporter: Arc<dyn ProgressReporter>,
    status_tx: watch::Sender<PipelineStatus>,
    generation: Arc<AtomicU64>,
    target: PublishTarget,
}

impl<T: Timer> RunContext<T> {
    /// Publish `status` unless a newer run has started since `generation`.
    fn publish(&self, generation: u64, status: &PipelineStatus) -> bool {
        self.status_tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = status.clone();
            true
        })
    }
}

/// Owns at most one in-flight run and its observable status.
///
/// `start` must be called from within a tokio runtime. Dropping the pipeline
/// aborts the in-flight run.
pub struct PublishPipeline<T: Timer = TokioTimer> {
    catalogs: Arc<Catalogs>,
    timing: PipelineTiming,
    timer: Arc<T>,
    delivery: Arc<dyn Delivery>,
    reporter: Arc<dyn ProgressReporter>,
    status_tx: watch::Sender<PipelineStatus>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl PublishPipeline<TokioTimer> {
    pub fn new(catalogs: Arc<Catalogs>, timing: PipelineTiming, delivery: Arc<dyn Delivery>) -> Self {
        Self::with_timer(catalogs, timing, delivery, TokioTimer)
    }
}

impl<T: Timer> PublishPipeline<T> {
    pub fn with_timer(
        catalogs: Arc<Catalogs>,
        timing: PipelineTiming,
        delivery: Arc<dyn Delivery>,
        timer: T,
    ) -> Self {
        let (status_tx, _) = watch::channel(PipelineStatus::Idle);
        Self {
            catalogs,
            timing,
            timer: Arc::new(timer),
            delivery,
            reporter: Arc::new(SilentProgress),
            status_tx,
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Begin a run for `target`, discarding any previous result and aborting
    /// a run still in flight.
    #[instrument(skip_all, fields(kind = %target))]
    pub fn start(&mut self, document: Document, target: TargetKind) -> Result<RunId> {
        let entry = self
            .catalogs
            .target(target)
            .cloned()
            .ok_or_else(|| PortfolioBuilderError::unknown("publish target", target.id()))?;

        self.abort_in_flight();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let run = PipelineRun::new(target, StageScript::for_target(target, &self.timing));
        let run_id = run.id;
        self.status_tx.send_replace(run.status().clone());
        info!(%run_id, label = entry.label, "publish run started");

        let ctx = RunContext {
            timer: Arc::clone(&self.timer),
            delivery: Arc::clone(&self.delivery),
            reporter: Arc::clone(&self.reporter),
            status_tx: self.status_tx.clone(),
            generation: Arc::clone(&self.generation),
            target: entry,
        };
        self.task = Some(tokio::spawn(drive(ctx, generation, run, document)));
        Ok(run_id)
    }

    /// Current status (polled).
    pub fn status(&self) -> PipelineStatus {
        self.status_tx.borrow().clone()
    }

    /// Status updates (pushed). Intermediate values may be coalesced.
    pub fn subscribe(&self) -> watch::Receiver<PipelineStatus> {
        self.status_tx.subscribe()
    }

    /// Wait until the current run is no longer running and return its status.
    pub async fn wait(&self) -> PipelineStatus {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| !s.is_running()).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        }
    }

    /// Abort any in-flight run and return to `Idle`.
    pub fn reset(&mut self) {
        self.abort_in_flight();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.status_tx.send_replace(PipelineStatus::Idle);
        debug!("publish pipeline reset");
    }

    /// Hand the hosted URL to `clipboard`. Returns whether anything was copied.
    pub fn copy_url(&self, clipboard: &dyn Clipboard) -> bool {
        let Some(url) = self.status().hosted_url().cloned() else {
            return false;
        };
        match clipboard.set_text(url.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to copy hosted URL");
                false
            }
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!("aborting in-flight publish run");
            }
            task.abort();
        }
    }
}

impl<T: Timer> Drop for PublishPipeline<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn drive<T: Timer>(ctx: RunContext<T>, generation: u64, mut run: PipelineRun, document: Document) {
    ctx.reporter.started(run.id, &ctx.target);

    while let Some(delay) = run.pending_delay() {
        ctx.timer.sleep(delay).await;
        if let Advance::Stage { label, progress } = run.advance() {
            debug!(run_id = %run.id, label, progress, "stage complete");
            if !ctx.publish(generation, run.status()) {
                return;
            }
            ctx.reporter.stage(label, progress);
        }
    }

    let outcome = match ctx.target.kind.hosting_domain() {
        Some(domain) => mint_hosted_url(domain).map(|url| PublishResult::Hosted { url }),
        None => {
            let manifest = ArtifactManifest::package();
            ctx.delivery
                .deliver(run.id, &document, &manifest)
                .map(|location| PublishResult::Artifact { manifest, location })
        }
    };
    run.finish(outcome.map_err(|e| e.to_string()));

    match run.status() {
        PipelineStatus::Failed { reason } => warn!(run_id = %run.id, %reason, "publish run failed"),
        _ => info!(run_id = %run.id, kind = %run.target, "publish run succeeded"),
    }
    if ctx.publish(generation, run.status()) {
        ctx.reporter.finished(run.status());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for Recorder {
        fn started(&self, _run_id: RunId, target: &PublishTarget) {
            self.events.lock().unwrap().push(format!("start {}", target.kind));
        }
        fn stage(&self, _label: &str, progress: u8) {
            self.events.lock().unwrap().push(format!("{progress}"));
        }
        fn finished(&self, status: &PipelineStatus) {
            let tag = match status {
                PipelineStatus::Succeeded(PublishResult::Artifact { .. }) => "artifact",
                PipelineStatus::Succeeded(PublishResult::Hosted { .. }) => "hosted",
                PipelineStatus::Failed { .. } => "failed",
                _ => "other",
            };
            self.events.lock().unwrap().push(tag.to_string());
        }
    }

    #[derive(Default)]
    struct CountingDelivery {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Delivery for CountingDelivery {
        fn deliver(&self, _: RunId, _: &Document, _: &ArtifactManifest) -> Result<Option<PathBuf>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PortfolioBuilderError::Pipeline("disk full".into()));
            }
            Ok(None)
        }
    }

    struct MemoryClipboard(Mutex<Option<String>>);

    impl Clipboard for MemoryClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            *self.0.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    fn pipeline(delivery: Arc<dyn Delivery>) -> PublishPipeline<ImmediateTimer> {
        PublishPipeline::with_timer(
            Arc::new(Catalogs::builtin()),
            PipelineTiming::instant(),
            delivery,
            ImmediateTimer,
        )
    }

    #[test]
    fn download_run_state_sequence() {
        let mut run = PipelineRun::new(
            TargetKind::Download,
            StageScript::download(&PipelineTiming::default()),
        );
        let mut seen = vec![run.status().clone()];
        while let Some(delay) = run.pending_delay() {
            assert_eq!(delay, Duration::from_millis(200));
            if let Advance::Stage { .. } = run.advance() {
                seen.push(run.status().clone());
            }
        }
        let progress: Vec<u8> = seen
            .iter()
            .map(|s| match s {
                PipelineStatus::Running { progress, .. } => *progress,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(progress, vec![0, 20, 40, 60, 80, 100]);
        assert!(run.is_settled());
        assert_eq!(run.advance(), Advance::Exhausted);
    }

    #[test]
    fn finish_before_settle_is_ignored() {
        let mut run = PipelineRun::new(
            TargetKind::Netlify,
            StageScript::hosting(&PipelineTiming::instant()),
        );
        run.finish(Err("early".into()));
        assert!(run.status().is_running());
        assert!(run.finished_at.is_none());
    }

    #[test]
    fn hosting_script_labels() {
        let script = StageScript::hosting(&PipelineTiming::default());
        let labels: Vec<_> = script.stages.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Generating portfolio files",
                "Optimizing assets",
                "Deploying to platform",
                "Finalizing deployment"
            ]
        );
        assert!(script.stages.iter().all(|s| s.delay == Duration::from_secs(1)));
        assert_eq!(script.stages.last().map(|s| s.progress), Some(100));
    }

    #[test]
    fn minted_urls_are_well_formed_and_distinct() {
        let a = mint_hosted_url("vercel.app").unwrap();
        let b = mint_hosted_url("vercel.app").unwrap();
        assert_ne!(a, b);
        let host = a.host_str().unwrap();
        let token = host
            .strip_prefix("your-portfolio-")
            .and_then(|h| h.strip_suffix(".vercel.app"))
            .unwrap();
        assert_eq!(token.len(), 9);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(a.scheme(), "https");
    }

    #[tokio::test]
    async fn download_run_reports_every_stage_and_delivers_once() {
        let delivery = Arc::new(CountingDelivery::default());
        let recorder = Arc::new(Recorder::default());
        let mut p = pipeline(delivery.clone()).with_reporter(recorder.clone());

        assert_eq!(p.status(), PipelineStatus::Idle);
        p.start(Document::new(), TargetKind::Download).unwrap();
        assert_eq!(
            p.status(),
            PipelineStatus::Running { progress: 0, stage: "Packaging files" }
        );

        let status = p.wait().await;
        match status {
            PipelineStatus::Succeeded(PublishResult::Artifact { manifest, location }) => {
                assert_eq!(manifest, ArtifactManifest::package());
                assert_eq!(manifest.len(), 5);
                assert!(location.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(delivery.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            recorder.events(),
            vec!["start download", "20", "40", "60", "80", "100", "artifact"]
        );
    }

    #[tokio::test]
    async fn netlify_run_ends_hosted() {
        let mut p = pipeline(Arc::new(NoDelivery));
        p.start(Document::new(), TargetKind::Netlify).unwrap();
        let status = p.wait().await;
        let url = status.hosted_url().expect("hosted url");
        assert!(url.as_str().starts_with("https://your-portfolio-"));
        assert!(url.host_str().unwrap().ends_with(".netlify.app"));
    }

    #[tokio::test]
    async fn two_hosting_runs_mint_different_urls() {
        let mut p = pipeline(Arc::new(NoDelivery));
        p.start(Document::new(), TargetKind::GithubPages).unwrap();
        let first = p.wait().await.hosted_url().cloned().unwrap();
        p.start(Document::new(), TargetKind::GithubPages).unwrap();
        let second = p.wait().await.hosted_url().cloned().unwrap();
        assert_ne!(first, second);
        assert!(second.as_str().ends_with(".github.io/"));
    }

    #[tokio::test]
    async fn delivery_failure_is_terminal() {
        let delivery = Arc::new(CountingDelivery {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let mut p = pipeline(delivery.clone());
        p.start(Document::new(), TargetKind::Download).unwrap();
        match p.wait().await {
            PipelineStatus::Failed { reason } => assert!(reason.contains("disk full")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(delivery.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hosting_run_skips_delivery() {
        let delivery = Arc::new(CountingDelivery::default());
        let mut p = pipeline(delivery.clone());
        p.start(Document::new(), TargetKind::Vercel).unwrap();
        assert!(p.wait().await.hosted_url().is_some());
        assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reset_returns_to_idle() {
        let mut p = PublishPipeline::new(
            Arc::new(Catalogs::builtin()),
            PipelineTiming::default(),
            Arc::new(NoDelivery),
        );
        p.start(Document::new(), TargetKind::Netlify).unwrap();
        assert!(p.status().is_running());
        p.reset();
        assert_eq!(p.status(), PipelineStatus::Idle);
        assert_eq!(p.wait().await, PipelineStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_in_flight_run() {
        let mut p = PublishPipeline::new(
            Arc::new(Catalogs::builtin()),
            PipelineTiming::default(),
            Arc::new(NoDelivery),
        );
        p.start(Document::new(), TargetKind::Download).unwrap();
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(p.status().is_running());

        p.start(Document::new(), TargetKind::Vercel).unwrap();
        assert_eq!(
            p.status(),
            PipelineStatus::Running { progress: 0, stage: "Generating portfolio files" }
        );
        let status = p.wait().await;
        assert!(status.hosted_url().unwrap().as_str().contains(".vercel.app"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_pipeline_stops_in_flight_run() {
        let delivery = Arc::new(CountingDelivery::default());
        let mut p = PublishPipeline::new(
            Arc::new(Catalogs::builtin()),
            PipelineTiming::default(),
            delivery.clone(),
        );
        p.start(Document::new(), TargetKind::Download).unwrap();
        let rx = p.subscribe();

        drop(p);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            *rx.borrow(),
            PipelineStatus::Running { progress: 0, .. }
        ));
    }

    #[tokio::test]
    async fn copy_url_only_after_hosted_success() {
        let clipboard = MemoryClipboard(Mutex::new(None));
        let mut p = pipeline(Arc::new(NoDelivery));
        assert!(!p.copy_url(&clipboard));

        p.start(Document::new(), TargetKind::Download).unwrap();
        p.wait().await;
        assert!(!p.copy_url(&clipboard));

        p.start(Document::new(), TargetKind::Netlify).unwrap();
        let url = p.wait().await.hosted_url().cloned().unwrap();
        assert!(p.copy_url(&clipboard));
        assert_eq!(clipboard.0.lock().unwrap().as_deref(), Some(url.as_str()));
    }
}
