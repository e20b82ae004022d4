//! # Roster Reconciliation Core
//!
//! Reconciles a list of intended event participants against a remote
//! event-management service: every participant missing from the event roster
//! is registered (by email where possible, as a guest otherwise), and the
//! ones that could not be added by any path are collected for reporting.
//!
//! ## Architecture Role
//!
//! ```text
//! [Normalized CSV rows] ──→ [Dedup Filter] ──→ [Reconcile Service]
//!                                                    │
//!                                        register / confirm / fall back
//!                                                    ↓
//!                                          [EventService port]
//!                                                    │
//!                                                    ↓
//!                                          [MissingSet report]
//! ```
//!
//! The remote service is consumed through the [`EventService`] outbound port;
//! adapters (HTTP client, test mocks) live outside this crate.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::*;
pub use error::{ReconcileError, ServiceError};
pub use ports::outbound::{EmailRegistration, EventService, GuestRegistration, PlayerStream};
pub use service::{filter_against_roster, ReconcileReport, ReconcileService};
