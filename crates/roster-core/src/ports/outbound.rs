//! Outbound port (driven side) for the remote event service.
//!
//! The core drives registration through this trait; adapters (the HTTP
//! client, test mocks) implement it. A facade instance is bound to one event,
//! so no event id appears in the call signatures.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{ExistingParticipant, NotifiedPlayer};
use crate::error::ServiceError;

/// Push stream of roster registrations for the bound event.
pub type PlayerStream = BoxStream<'static, NotifiedPlayer>;

/// Outcome of an email registration request.
///
/// `Accepted` only means the request was taken; the player is not visible
/// in the roster until the service pushes a [`NotifiedPlayer`] for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmailRegistration {
    Accepted,
    Rejected { message: String },
}

/// Outcome of a guest registration request.
///
/// Guest registrations are authoritative in the response itself; no
/// notification follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuestRegistration {
    Added,
    Rejected,
}

/// Remote event service capabilities consumed by the core.
///
/// ## Notification contract
///
/// [`subscribe_player_registered`](EventService::subscribe_player_registered)
/// must deliver exactly one [`NotifiedPlayer`] per accepted email
/// registration, in issuance order, before the next email registration is
/// issued. The orchestrator correlates confirmations purely by that order;
/// the single-outstanding-attempt discipline on the caller side is what makes
/// this sound.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Register a platform account holder by email.
    async fn register_player_by_email(
        &self,
        email: &str,
    ) -> Result<EmailRegistration, ServiceError>;

    /// Register a guest (no platform account) by name.
    async fn register_guest_player(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<GuestRegistration, ServiceError>;

    /// Set the display name of an already-registered player.
    async fn set_registered_player_name(
        &self,
        player_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), ServiceError>;

    /// Open the long-lived player-registered notification stream.
    async fn subscribe_player_registered(&self) -> Result<PlayerStream, ServiceError>;

    /// Snapshot of the players currently in the event.
    async fn players_in_event(&self) -> Result<Vec<ExistingParticipant>, ServiceError>;
}
