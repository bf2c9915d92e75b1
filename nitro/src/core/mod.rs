//! Core domain model types for nitro.
//!
//! This module contains the fundamental types used throughout the engine:
//! - Stage lifecycle state
//! - Action results and recorded stage outcomes
//! - Parameter maps

mod output;
mod params;
mod status;

pub use output::{ActionResult, StageOutcome};
pub use params::{param_str, param_str_or, params_from, Params};
pub use status::StageState;
