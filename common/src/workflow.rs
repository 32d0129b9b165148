//! Selection / transformation workflow
//!
//! State machine:
//! - Idle -> Submitting: `begin` with a non-empty selection
//! - Idle -> Completed(NoSelection): `begin` with an empty selection, no network call
//! - Submitting -> Completed(Success | Failure): `complete` with the batch report
//! - Completed -> Idle: `dismiss`, or `dismiss_generation` from the auto-dismiss timer
//!
//! The selection can be edited in every state except Submitting.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::api::SimmerApi;
use crate::error::{Error, Result};
use crate::method::TransformationMethod;
use crate::selection::PendingSelection;
use crate::types::PlaylistRef;

/// How long a completed outcome stays on screen before it is dismissed.
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// One submission: the method is fixed for every playlist in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub method: TransformationMethod,
    pub write_back: bool,
    pub playlists: Vec<PlaylistRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistStatus {
    Done { tracks: usize },
    Failed { reason: String, requires_login: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistResult {
    pub playlist: PlaylistRef,
    pub status: PlaylistStatus,
}

/// Settled results of a batch, keyed by playlist id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub method: TransformationMethod,
    pub results: BTreeMap<String, PlaylistResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> Vec<PlaylistRef> {
        self.results
            .values()
            .filter(|r| matches!(r.status, PlaylistStatus::Done { .. }))
            .map(|r| r.playlist.clone())
            .collect()
    }

    pub fn failed(&self) -> Vec<FailedPlaylist> {
        self.results
            .values()
            .filter_map(|r| match &r.status {
                PlaylistStatus::Failed {
                    reason,
                    requires_login,
                } => Some(FailedPlaylist {
                    playlist: r.playlist.clone(),
                    reason: reason.clone(),
                    requires_login: *requires_login,
                }),
                PlaylistStatus::Done { .. } => None,
            })
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results
            .values()
            .all(|r| matches!(r.status, PlaylistStatus::Done { .. }))
    }

    /// True when any playlist failed because the session is gone.
    pub fn requires_login(&self) -> bool {
        self.failed().iter().any(|f| f.requires_login)
    }

    pub fn into_outcome(self) -> Outcome {
        if self.all_succeeded() {
            Outcome::Success {
                method: self.method,
                succeeded: self.succeeded(),
            }
        } else {
            Outcome::Failure {
                method: self.method,
                failed: self.failed(),
                succeeded: self.succeeded(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPlaylist {
    pub playlist: PlaylistRef,
    pub reason: String,
    pub requires_login: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        method: TransformationMethod,
        succeeded: Vec<PlaylistRef>,
    },
    Failure {
        method: TransformationMethod,
        failed: Vec<FailedPlaylist>,
        succeeded: Vec<PlaylistRef>,
    },
    NoSelection,
}

impl Outcome {
    /// Ids of the playlists that failed, in id order.
    pub fn failed_ids(&self) -> Vec<String> {
        match self {
            Outcome::Failure { failed, .. } => {
                failed.iter().map(|f| f.playlist.id.clone()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Outcome::Success { method, succeeded } => {
                let text = match succeeded.as_slice() {
                    [only] => format!("{} finished for \"{}\".", method, only.name),
                    many => format!("{} finished for {} playlists.", method, many.len()),
                };
                Notice::new(Severity::Success, text)
            }
            Outcome::Failure {
                method,
                failed,
                succeeded,
            } => {
                let total = failed.len() + succeeded.len();
                let details = failed
                    .iter()
                    .map(|f| format!("\"{}\" ({})", f.playlist.name, f.reason))
                    .collect::<Vec<_>>()
                    .join(", ");
                Notice::new(
                    Severity::Error,
                    format!(
                        "{} failed for {} of {} playlists: {}",
                        method,
                        failed.len(),
                        total,
                        details
                    ),
                )
            }
            Outcome::NoSelection => Notice::new(
                Severity::Warning,
                "Select at least one playlist first.".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Transient, dismissable message for a completed outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn new(severity: Severity, text: String) -> Self {
        Self { severity, text }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting {
        method: TransformationMethod,
        count: usize,
    },
    Completed(Outcome),
}

/// Owns the pending selection and the outcome of the last submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workflow {
    selection: PendingSelection,
    state: WorkflowState,
    write_back: bool,
    generation: u64,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &PendingSelection {
        &self.selection
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting { .. })
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn write_back(&self) -> bool {
        self.write_back
    }

    /// Whether the reordered tracks are written back to the source playlist.
    pub fn set_write_back(&mut self, write_back: bool) {
        self.write_back = write_back;
    }

    /// Bumped on every completion. The auto-dismiss timer remembers the
    /// value it was scheduled for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Card click with the intended membership.
    pub fn select(&mut self, selected: bool, id: &str, name: &str) -> Result<()> {
        if self.is_submitting() {
            return Err(Error::Busy);
        }
        self.selection.set(selected, id, name);
        Ok(())
    }

    pub fn toggle(&mut self, playlist: &PlaylistRef) -> Result<bool> {
        if self.is_submitting() {
            return Err(Error::Busy);
        }
        Ok(self.selection.toggle(playlist))
    }

    /// Starts a submission. Returns the batch to run, or `None` when nothing
    /// is selected (the state is then `Completed(NoSelection)`).
    pub fn begin(&mut self, method: TransformationMethod) -> Result<Option<Batch>> {
        if self.is_submitting() {
            return Err(Error::Busy);
        }

        if self.selection.is_empty() {
            debug!("submission without a selection");
            self.finish(Outcome::NoSelection);
            return Ok(None);
        }

        let playlists = self.selection.to_vec();
        info!(
            method = %method,
            evaluator = method.evaluator(),
            count = playlists.len(),
            "starting transformation batch"
        );
        self.state = WorkflowState::Submitting {
            method,
            count: playlists.len(),
        };
        Ok(Some(Batch {
            method,
            write_back: self.write_back,
            playlists,
        }))
    }

    /// Records a settled batch. Returns the new generation.
    pub fn complete(&mut self, report: BatchReport) -> u64 {
        if !self.is_submitting() {
            warn!("batch report arrived outside of a submission");
        }
        let outcome = report.into_outcome();
        if let Outcome::Failure { failed, .. } = &outcome {
            warn!(failed = failed.len(), "transformation batch had failures");
        }
        self.finish(outcome)
    }

    /// `begin` + `run_batch` + `complete` for callers that can hold the
    /// workflow across the await.
    pub async fn submit<A>(&mut self, api: &A, method: TransformationMethod) -> Result<Outcome>
    where
        A: SimmerApi + ?Sized,
    {
        if let Some(batch) = self.begin(method)? {
            let report = run_batch(api, &batch).await;
            self.complete(report);
        }
        match &self.state {
            WorkflowState::Completed(outcome) => Ok(outcome.clone()),
            _ => Err(Error::Busy),
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            WorkflowState::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.outcome().map(Outcome::notice)
    }

    /// Completed -> Idle. Other states are left alone.
    pub fn dismiss(&mut self) {
        if matches!(self.state, WorkflowState::Completed(_)) {
            self.state = WorkflowState::Idle;
        }
    }

    /// Dismisses only if no newer outcome replaced the one scheduled.
    pub fn dismiss_generation(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.outcome().is_none() {
            return false;
        }
        self.dismiss();
        true
    }

    fn finish(&mut self, outcome: Outcome) -> u64 {
        self.generation += 1;
        self.state = WorkflowState::Completed(outcome);
        self.generation
    }
}

/// Issues one transformation request per playlist, all at once, and waits
/// for every one of them to settle.
pub async fn run_batch<A>(api: &A, batch: &Batch) -> BatchReport
where
    A: SimmerApi + ?Sized,
{
    let evaluator = batch.method.evaluator();
    let requests = batch.playlists.iter().map(|playlist| async move {
        let result = api
            .request_transformation(&playlist.id, evaluator, batch.write_back)
            .await;
        (playlist, result)
    });

    let mut results = BTreeMap::new();
    for (playlist, result) in join_all(requests).await {
        let status = match result {
            Ok(tracks) => {
                debug!(playlist = %playlist.id, tracks = tracks.len(), "playlist reordered");
                PlaylistStatus::Done {
                    tracks: tracks.len(),
                }
            }
            Err(e) => {
                warn!(playlist = %playlist.id, error = %e, "playlist transformation failed");
                PlaylistStatus::Failed {
                    reason: e.to_string(),
                    requires_login: e.requires_login(),
                }
            }
        };
        results.insert(
            playlist.id.clone(),
            PlaylistResult {
                playlist: playlist.clone(),
                status,
            },
        );
    }

    BatchReport {
        method: batch.method,
        results,
    }
}
