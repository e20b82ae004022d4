//! HTTP implementation of the [`EventService`] port.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use roster_core::{
    EmailRegistration, EventService, ExistingParticipant, GuestRegistration, NotifiedPlayer,
    PlayerStream, ServiceError,
};

use crate::sse::SseParser;
use crate::types::{
    EmailRegistrationRequest, GuestRegistrationRequest, PlayerEntry, PlayerRegisteredEvent,
    RegistrationResponse, SetPlayerNameRequest,
};

/// Per-call timeout for the unary operations. The subscription request is
/// exempt: an event stream is expected to stay open indefinitely.
const CALL_TIMEOUT: Duration = Duration::from_secs(15);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Buffered notifications between the transport reader and the stream
/// consumer.
const NOTIFICATION_BUFFER: usize = 32;

/// Event service client bound to a single event.
pub struct HttpEventService {
    client: Client,
    base_url: String,
    event_id: String,
    token: Option<String>,
}

impl HttpEventService {
    /// Build a client for one event.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        event_id: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, ServiceError> {
        // No client-level request timeout: it would also cap how long the
        // notification stream may stay open. Unary calls set their own.
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            event_id: event_id.into(),
            token,
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/events/{}/{}", self.base_url, self.event_id, suffix)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ServiceError::Unauthorized),
            status if status.is_success() => Ok(response),
            status => Err(ServiceError::Transport(format!(
                "service returned {status}"
            ))),
        }
    }

    async fn registration_call(
        &self,
        request: RequestBuilder,
    ) -> Result<RegistrationResponse, ServiceError> {
        let response = self.send(request.timeout(CALL_TIMEOUT)).await?;
        response
            .json::<RegistrationResponse>()
            .await
            .map_err(|err| ServiceError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl EventService for HttpEventService {
    async fn register_player_by_email(
        &self,
        email: &str,
    ) -> Result<EmailRegistration, ServiceError> {
        let request = self
            .client
            .post(self.url("registrations"))
            .json(&EmailRegistrationRequest { email });
        let response = self.registration_call(request).await?;

        if response.success {
            Ok(EmailRegistration::Accepted)
        } else {
            Ok(EmailRegistration::Rejected {
                message: response.err.map(|e| e.message).unwrap_or_default(),
            })
        }
    }

    async fn register_guest_player(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<GuestRegistration, ServiceError> {
        let request = self.client.post(self.url("guests")).json(&GuestRegistrationRequest {
            first_name,
            last_name,
        });
        let response = self.registration_call(request).await?;

        if response.success {
            Ok(GuestRegistration::Added)
        } else {
            Ok(GuestRegistration::Rejected)
        }
    }

    async fn set_registered_player_name(
        &self,
        player_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), ServiceError> {
        let request = self
            .client
            .patch(self.url(&format!("players/{player_id}/name")))
            .json(&SetPlayerNameRequest {
                first_name,
                last_name,
            })
            .timeout(CALL_TIMEOUT);
        self.send(request).await?;
        Ok(())
    }

    async fn subscribe_player_registered(&self) -> Result<PlayerStream, ServiceError> {
        let request = self
            .client
            .get(self.url("registrations/stream"))
            .header(reqwest::header::ACCEPT, "text/event-stream");
        let response = self.send(request).await?;

        let (tx, rx) = mpsc::channel(NOTIFICATION_BUFFER);
        tokio::spawn(async move {
            let mut chunks = response.bytes_stream();
            let mut parser = SseParser::new();
            while let Some(chunk) = chunks.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(err) => {
                        warn!(error = %err, "notification stream transport error");
                        break;
                    }
                };
                for payload in parser.push(&chunk) {
                    match serde_json::from_str::<PlayerRegisteredEvent>(&payload) {
                        Ok(event) => {
                            if tx.send(NotifiedPlayer::from(event)).await.is_err() {
                                return;
                            }
                        }
                        Err(err) => {
                            // A frame we cannot read is dropped rather than
                            // ending the stream; the service also sends
                            // heartbeat frames with non-JSON payloads.
                            debug!(error = %err, %payload, "ignoring unreadable stream frame");
                        }
                    }
                }
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }

    async fn players_in_event(&self) -> Result<Vec<ExistingParticipant>, ServiceError> {
        let request = self.client.get(self.url("players")).timeout(CALL_TIMEOUT);
        let response = self.send(request).await?;
        let players = response
            .json::<Vec<PlayerEntry>>()
            .await
            .map_err(|err| ServiceError::InvalidResponse(err.to_string()))?;
        Ok(players.into_iter().map(ExistingParticipant::from).collect())
    }
}
