//! # rostersync Test Suite
//!
//! Unified test crate for cross-crate scenarios:
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Scripted in-memory event service
//! └── integration/      # CSV-to-report reconciliation flows
//! ```
//!
//! Run with `cargo test -p roster-tests`.

#![allow(dead_code)]
