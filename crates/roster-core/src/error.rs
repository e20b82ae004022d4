//! Error types for roster reconciliation.

use thiserror::Error;

/// Fatal reconciliation errors.
///
/// Recoverable per-record failures never surface here; they are absorbed by
/// the orchestrator and reported in aggregate through the missing set.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A record is missing a required name field. Raised at normalization
    /// time, before any registration is attempted.
    #[error("participant record missing a name (first: {first_name:?}, last: {last_name:?})")]
    MalformedRecord {
        first_name: String,
        last_name: String,
    },

    /// The registration notification stream could not be established.
    #[error("failed to subscribe to player-registered notifications")]
    Subscribe(#[source] ServiceError),

    /// The notification stream ended while an email registration was still
    /// awaiting its confirmation.
    #[error("notification stream closed with a registration still awaiting confirmation")]
    NotificationStreamClosed,
}

/// Transport-level errors from the remote event service.
///
/// These describe the call itself failing, not the service declining a
/// registration; declines are ordinary [`EmailRegistration::Rejected`] /
/// [`GuestRegistration::Rejected`] values.
///
/// [`EmailRegistration::Rejected`]: crate::ports::outbound::EmailRegistration
/// [`GuestRegistration::Rejected`]: crate::ports::outbound::GuestRegistration
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response from service: {0}")]
    InvalidResponse(String),

    #[error("authentication rejected by service")]
    Unauthorized,
}
