//! Ports for the reconciliation core.

pub mod outbound;
