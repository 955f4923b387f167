//! # simcon-core - Core Domain Types
//!
//! Foundation crate for the simulator operator console. Provides the wire
//! types of the simulator control API, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Status & Metrics (`types`)
//! - [`RunStatus`] - Simulator run state (running, stopped, error, unknown)
//! - [`SimulatorStatus`] - `/api/status` payload
//! - [`Metrics`] - `/api/metrics` payload
//! - [`Health`], [`SimulatorState`], [`ControlResponse`] - remaining payloads
//!
//! ### Activity Log (`activity`)
//! - [`EventType`] - Activity event category
//! - [`ActivityEvent`] - A single event in the append-only log
//! - [`ActivityPage`] - One page of `/api/activity`
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum grouped by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use simcon_core::prelude::*;
//! ```

pub mod activity;
pub mod error;
pub mod logging;
pub mod timestamp;
pub mod types;

/// Prelude for common imports used throughout all simcon crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use activity::{ActivityEvent, ActivityPage, EventType};
pub use error::{Error, Result, ResultExt};
pub use types::{ControlResponse, Health, Metrics, RunStatus, SimulatorState, SimulatorStatus};
