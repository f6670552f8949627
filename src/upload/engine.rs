//! Skip-or-upload engine shared by the local and bucket flows.
//!
//! The engine is deliberately sequential: GEE ingestion is the
//! bottleneck, and the original operational pain was quota pressure, not
//! throughput. Rendering is pushed out through an event sink so the
//! engine never prints.

use std::thread;
use std::time::Duration;

use crate::error::{SilicaError, SilicaResult};
use crate::store::{AssetPresence, AssetStore};
use crate::upload::candidate::CandidateSource;
use crate::upload::report::{truncate_chars, UploadOutcome, UploadReport};

/// Pause inserted at every throttle point.
const THROTTLE_PAUSE: Duration = Duration::from_secs(1);

/// Recorded failure reasons are cut to this many characters.
const FAILURE_REASON_LIMIT: usize = 100;

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// Candidate enumeration is starting.
    Enumerating,
    /// Enumeration finished; `total` may be zero.
    Found { total: usize },
    /// The asset already exists; nothing was sent.
    Skipped {
        index: usize,
        total: usize,
        name: String,
    },
    /// The ingest command was accepted.
    Uploaded {
        index: usize,
        total: usize,
        name: String,
    },
    /// The ingest command failed; the run continues.
    Failed {
        index: usize,
        total: usize,
        name: String,
        reason: String,
    },
}

/// Drives one upload run against a store.
pub struct UploadEngine<S> {
    store: S,
    asset_root: String,
}

impl<S: AssetStore> UploadEngine<S> {
    pub fn new(store: S, asset_root: impl Into<String>) -> Self {
        Self {
            store,
            asset_root: asset_root.into(),
        }
    }

    /// Run the full pipeline: verify the session, enumerate candidates,
    /// then skip-or-upload each one.
    ///
    /// Per-candidate upload failures are recorded and the run continues;
    /// only a broken session, an empty candidate set, or a failed
    /// enumeration abort it.
    pub fn run(
        &self,
        source: &dyn CandidateSource,
        sink: &mut dyn FnMut(UploadEvent),
    ) -> SilicaResult<UploadReport> {
        self.store.verify_session().map_err(|err| {
            SilicaError::SessionNotConfigured {
                detail: err.detail().to_string(),
            }
        })?;

        sink(UploadEvent::Enumerating);
        let candidates = source.list()?;
        let total = candidates.len();
        sink(UploadEvent::Found { total });

        if candidates.is_empty() {
            return Err(SilicaError::NoCandidates {
                location: source.location(),
            });
        }

        let mut report = UploadReport::default();
        let every = source.throttle_every();

        for (i, candidate) in candidates.iter().enumerate() {
            let index = i + 1;
            let asset_id = format!("{}/{}", self.asset_root, candidate.name);

            match self.store.describe(&asset_id) {
                AssetPresence::Present => {
                    report.record(UploadOutcome::skipped(&candidate.name));
                    sink(UploadEvent::Skipped {
                        index,
                        total,
                        name: candidate.name.clone(),
                    });
                }
                AssetPresence::Missing => match self.store.upload(&asset_id, &candidate.source) {
                    Ok(()) => {
                        report.record(UploadOutcome::uploaded(&candidate.name));
                        sink(UploadEvent::Uploaded {
                            index,
                            total,
                            name: candidate.name.clone(),
                        });
                    }
                    Err(err) => {
                        let reason = truncate_chars(err.detail(), FAILURE_REASON_LIMIT);
                        report.record(UploadOutcome::failed(&candidate.name, reason.clone()));
                        sink(UploadEvent::Failed {
                            index,
                            total,
                            name: candidate.name.clone(),
                            reason,
                        });
                    }
                },
            }

            // Skips count toward the pacing too; the describe call is
            // still an API hit.
            if throttle_due(index, every) {
                thread::sleep(THROTTLE_PAUSE);
            }
        }

        Ok(report)
    }
}

/// True after every `every`-th processed candidate.
fn throttle_due(processed: usize, every: usize) -> bool {
    every > 0 && processed % every == 0
}
