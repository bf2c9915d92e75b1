//! Testing utilities for nitro runs.
//!
//! This module provides mock actions and probes that record how the
//! orchestrator drives them.

mod mocks;

pub use mocks::{CountingProbe, StaticAction};
