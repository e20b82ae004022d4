//! Reconciliation service: the registration orchestrator.
//!
//! Drives one-at-a-time registration attempts against the remote event
//! service and correlates each accepted email registration with the
//! asynchronous confirmation pushed on the notification stream.
//!
//! ## Confirmation correlation
//!
//! The service pushes one `NotifiedPlayer` per successful email registration,
//! in issuance order, with no identifier tying it back to the request. The
//! orchestrator therefore never has more than one email attempt outstanding:
//! the notification consumer forwards into a bounded channel of capacity 1,
//! and the loop does not issue the next request until the previous attempt
//! has failed definitively, succeeded without needing confirmation, or been
//! confirmed. Parallelizing attempts would break the order-based correlation.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::{
    classify_rejection, dedup_decision, DedupDecision, ExistingParticipant, ParticipantRecord,
    Phase, RejectionKind,
};
use crate::error::ReconcileError;
use crate::ports::outbound::{EmailRegistration, EventService, GuestRegistration};

/// Final result of a reconciliation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records that could not be registered by any path, in input order.
    pub missing: Vec<ParticipantRecord>,
    /// Records registered this run (email or guest path).
    pub registered: usize,
    /// Records the service reported as already registered.
    pub already_registered: usize,
}

/// Apply the deduplication filter to normalized records.
///
/// Returns the records to queue, in input order, plus the number skipped.
/// Every decision is logged; nothing is dropped silently.
pub fn filter_against_roster(
    records: Vec<ParticipantRecord>,
    existing: &[ExistingParticipant],
) -> (Vec<ParticipantRecord>, usize) {
    let mut queued = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for record in records {
        match dedup_decision(&record, existing) {
            DedupDecision::Include => queued.push(record),
            DedupDecision::IncludeWithWarning => {
                warn!(
                    player = %record.display_name(),
                    email = record.email.as_deref().unwrap_or_default(),
                    "a player with this name is already in the event; they may \
                     have been added before - if their email ends up in the \
                     missing-player report, it can probably be ignored"
                );
                queued.push(record);
            }
            DedupDecision::Skip => {
                warn!(
                    player = %record.display_name(),
                    "a player with this name is already in the event and the \
                     row has no email address; skipping"
                );
                skipped += 1;
            }
        }
    }

    (queued, skipped)
}

/// Registration orchestrator.
///
/// Owns the pending queue cursor and the missing set for the duration of one
/// run; both are touched only from the single reconciliation control flow.
pub struct ReconcileService<S: EventService> {
    service: Arc<S>,
    phase: Phase,
}

impl<S: EventService + 'static> ReconcileService<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            phase: Phase::Idle,
        }
    }

    /// Current orchestrator phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Record a phase change; every transition shows up in the trace.
    fn transition(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "orchestrator phase change");
        self.phase = phase;
    }

    /// Register every queued record, returning the aggregate report.
    ///
    /// Consumes each record exactly once: it either ends registered (counted)
    /// or lands in the report's missing set, never both and never neither.
    ///
    /// # Errors
    ///
    /// Only fatal conditions surface here: the subscription could not be
    /// established, or the notification stream closed while a registration
    /// was still awaiting confirmation. Per-record failures are absorbed
    /// into the missing set.
    pub async fn run(
        &mut self,
        records: Vec<ParticipantRecord>,
    ) -> Result<ReconcileReport, ReconcileError> {
        // Subscribe before the first attempt so no confirmation can be missed.
        let stream = self
            .service
            .subscribe_player_registered()
            .await
            .map_err(ReconcileError::Subscribe)?;

        // Capacity 1: at most one confirmation can ever be pending, matching
        // the single-outstanding-attempt discipline of the loop below.
        let (tx, mut rx) = mpsc::channel(1);
        let pump = tokio::spawn(async move {
            let mut stream = stream;
            while let Some(player) = stream.next().await {
                if tx.send(player).await.is_err() {
                    break;
                }
            }
        });

        let result = self.drain_queue(records, &mut rx).await;

        // The subscription has no mid-run teardown; the pump is only stopped
        // once the queue is exhausted (or a fatal error ends the run).
        pump.abort();
        result
    }

    async fn drain_queue(
        &mut self,
        records: Vec<ParticipantRecord>,
        confirmations: &mut mpsc::Receiver<crate::domain::NotifiedPlayer>,
    ) -> Result<ReconcileReport, ReconcileError> {
        let mut report = ReconcileReport::default();
        let total = records.len();

        for (cursor, record) in records.iter().enumerate() {
            self.transition(Phase::Idle);
            info!(
                position = cursor + 1,
                total,
                player = %record.display_name(),
                "processing participant"
            );

            let Some(email) = record.email.as_deref() else {
                self.attempt_guest(record, &mut report).await;
                continue;
            };

            match self.service.register_player_by_email(email).await {
                Ok(EmailRegistration::Accepted) => {
                    self.transition(Phase::AwaitingConfirmation);
                    let player = confirmations
                        .recv()
                        .await
                        .ok_or(ReconcileError::NotificationStreamClosed)?;

                    if !player.has_name() {
                        info!(
                            player_id = %player.id,
                            "platform did not capture a name; setting it from the input row"
                        );
                        if let Err(err) = self
                            .service
                            .set_registered_player_name(
                                &player.id,
                                &record.first_name,
                                &record.last_name,
                            )
                            .await
                        {
                            // The player is registered either way; only the
                            // display name is affected.
                            warn!(player_id = %player.id, error = %err, "name correction failed");
                        }
                    }

                    info!(player = %record.display_name(), "player added");
                    report.registered += 1;
                }
                Ok(EmailRegistration::Rejected { message }) => {
                    match classify_rejection(&message) {
                        RejectionKind::AlreadyRegistered => {
                            info!(player = %record.display_name(), "already registered; skipping");
                            report.already_registered += 1;
                        }
                        RejectionKind::NoAccount => {
                            self.transition(Phase::Draining);
                            info!(
                                player = %record.display_name(),
                                "no platform account for that email; adding as guest"
                            );
                            self.attempt_guest(record, &mut report).await;
                        }
                        RejectionKind::Other => {
                            warn!(
                                player = %record.display_name(),
                                %message,
                                "unable to add player; recording as missing"
                            );
                            report.missing.push(record.clone());
                        }
                    }
                }
                Err(err) => {
                    warn!(
                        player = %record.display_name(),
                        error = %err,
                        "registration call failed; recording as missing"
                    );
                    report.missing.push(record.clone());
                }
            }
        }

        self.transition(Phase::Done);
        Ok(report)
    }

    /// Guest-path attempt. The call's own response is authoritative; no
    /// notification is waited on.
    async fn attempt_guest(&self, record: &ParticipantRecord, report: &mut ReconcileReport) {
        info!(player = %record.display_name(), "adding guest player");
        match self
            .service
            .register_guest_player(&record.first_name, &record.last_name)
            .await
        {
            Ok(GuestRegistration::Added) => {
                info!(player = %record.display_name(), "guest player added");
                report.registered += 1;
            }
            Ok(GuestRegistration::Rejected) => {
                error!(
                    player = %record.display_name(),
                    "unable to add guest player; recording as missing"
                );
                report.missing.push(record.clone());
            }
            Err(err) => {
                error!(
                    player = %record.display_name(),
                    error = %err,
                    "guest registration call failed; recording as missing"
                );
                report.missing.push(record.clone());
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
