//! # Roster HTTP Client
//!
//! HTTP adapter for the [`EventService`] port: JSON requests for the unary
//! registration operations, plus a Server-Sent-Events stream for the
//! player-registered notifications.
//!
//! Session establishment (login, organization and event discovery) is
//! outside this crate; a client is constructed with an endpoint, an event id
//! and an optional bearer token, and is bound to that one event.
//!
//! [`EventService`]: roster_core::EventService

pub mod client;
pub mod sse;
pub mod types;

pub use client::HttpEventService;
