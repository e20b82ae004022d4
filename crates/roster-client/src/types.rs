//! Wire types for the event-service HTTP API.

use roster_core::{ExistingParticipant, NotifiedPlayer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct EmailRegistrationRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestRegistrationRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetPlayerNameRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Registration call result as the service reports it: a success flag plus a
/// free-text error body on decline.
#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationResponse {
    pub success: bool,
    #[serde(default)]
    pub err: Option<RegistrationErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerEntry {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<PlayerEntry> for ExistingParticipant {
    fn from(entry: PlayerEntry) -> Self {
        ExistingParticipant::new(
            entry.first_name.unwrap_or_default(),
            entry.last_name.unwrap_or_default(),
        )
    }
}

/// One event on the player-registered notification stream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerRegisteredEvent {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<PlayerRegisteredEvent> for NotifiedPlayer {
    fn from(event: PlayerRegisteredEvent) -> Self {
        NotifiedPlayer {
            id: event.id,
            first_name: event.first_name,
            last_name: event.last_name,
        }
    }
}
