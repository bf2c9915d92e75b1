//! # Nitro
//!
//! A staged-execution engine for scripted test runs.
//!
//! A run is an ordered list of stage names. Each name resolves through a
//! stage factory into a definition that binds an action to parameters and,
//! optionally, to one earlier stage it depends on. Nitro provides:
//!
//! - **Pluggable actions**: string-keyed async behaviours with an explicit
//!   success, semantic failure or hard failure result
//! - **Probes**: side-effect-only hooks such as the metrics probe fired
//!   before every attempted stage
//! - **Stage lifecycle**: a small state machine whose transitions are
//!   published to subscribers
//! - **Fail-fast orchestration**: the first failing action aborts the run
//!   while the partial result map stays inspectable
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nitro::prelude::*;
//!
//! init_tracing(LogFormat::Compact);
//! init_registries(EngineConfig::default());
//!
//! let params = params_from([("http_url", "https://httpbin.org/get")]);
//! let mut run = Orchestrator::new(["http_get", "read_file"], params);
//! let outcomes = run.execute().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod actions;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod orchestrator;
pub mod probes;
pub mod registry;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::actions::{Action, ActionRegistry};
    pub use crate::config::EngineConfig;
    pub use crate::core::{params_from, ActionResult, Params, StageOutcome, StageState};
    pub use crate::errors::{ConfigError, NitroError, RunError, TransitionError};
    pub use crate::events::{
        CollectingSubscriber, NotificationChannel, ProgressSubscriber, Subscriber, SubscriberId,
    };
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::orchestrator::{Orchestrator, RunResults, TestCase, TestCaseBuilder};
    pub use crate::probes::{Probe, ProbeRegistry};
    pub use crate::registry::{init_registries, registries, Registries};
    pub use crate::stages::{Stage, StageDefinition, StageDefinitionRegistry};
}
