//! Domain services: dedup decisions and rejection classification.

use super::{DedupDecision, ExistingParticipant, ParticipantRecord, RejectionKind};

/// Rejection message fragment meaning the player is already in the event.
pub const ALREADY_REGISTERED_PATTERN: &str = "Player already registered";

/// Rejection message fragment meaning no platform account exists for the email.
pub const NO_ACCOUNT_PATTERN: &str = "No platform account found";

/// Decide whether a record should be queued, given the roster snapshot.
///
/// Match key is the exact `(first_name, last_name)` pair, case-sensitive.
/// A colliding record with an email is still queued (same name does not
/// prove same person); a colliding record without one is skipped, since
/// re-adding it could only produce a second guest entry with an identical
/// display name.
#[must_use]
pub fn dedup_decision(
    record: &ParticipantRecord,
    existing: &[ExistingParticipant],
) -> DedupDecision {
    if !existing.iter().any(|p| p.matches(record)) {
        DedupDecision::Include
    } else if record.has_email() {
        DedupDecision::IncludeWithWarning
    } else {
        DedupDecision::Skip
    }
}

/// Classify an email-registration rejection message.
///
/// The remote service reports rejections as free text; all substring
/// matching against it is confined to this function so the patterns stay in
/// one place.
#[must_use]
pub fn classify_rejection(message: &str) -> RejectionKind {
    if message.contains(ALREADY_REGISTERED_PATTERN) {
        RejectionKind::AlreadyRegistered
    } else if message.contains(NO_ACCOUNT_PATTERN) {
        RejectionKind::NoAccount
    } else {
        RejectionKind::Other
    }
}
