//! Value objects for reconciliation state and decisions.

/// Orchestrator phase.
///
/// The reconciliation loop is an explicit state machine over these four
/// phases rather than a chain of callbacks; the phase is observable for
/// logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Ready to pop the next pending record.
    Idle,
    /// An email registration was accepted; waiting for the roster
    /// notification that confirms the player is visible in the event.
    AwaitingConfirmation,
    /// An email attempt found no platform account; the guest fallback for
    /// the same record is in flight.
    Draining,
    /// Queue exhausted; the missing set is final.
    Done,
}

/// Decision for one record against the existing-roster snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupDecision {
    /// No name collision; queue normally.
    Include,
    /// Name collision but the record has an email, so it may be a different
    /// person; queue it and warn the operator.
    IncludeWithWarning,
    /// Name collision and no email: a second identical guest entry would be
    /// indistinguishable, so the record is dropped.
    Skip,
}

/// Closed classification of email-registration rejections.
///
/// The remote service reports rejections as free text; this is the closed
/// category set the orchestrator acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionKind {
    /// The player is already in the event; success-equivalent.
    AlreadyRegistered,
    /// No platform account for that email; retry on the guest path.
    NoAccount,
    /// Anything else; the record goes to the missing set.
    Other,
}
