//! # simcon-client - Simulator Control API Client
//!
//! Talks to the simulator's HTTP control API. Depends on [`simcon_core`] for
//! the wire types.
//!
//! ## Public API
//!
//! ### Transport
//! - [`HttpTransport`] - Issues requests and normalizes every outcome into
//!   `Result<serde_json::Value, ApiError>`
//! - [`ApiError`] - The single failure shape surfaced to callers
//!
//! ### Domain Accessors
//! - [`ControlApi`] - Typed operations, one per server capability
//! - [`SimulatorClient`] - [`ControlApi`] over [`HttpTransport`]
//! - [`paths`] - Deterministic endpoint builders
//!
//! ### Testing
//! - `test_utils::FakeControlApi` (feature `test-helpers`) - scripted,
//!   gateable in-memory implementation of [`ControlApi`]

pub mod api;
pub mod error;
pub mod paths;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod transport;

pub use api::{ControlApi, LocalControlApi, SimulatorClient};
pub use error::ApiError;
pub use transport::{HttpTransport, TransportConfig, DEFAULT_BASE_URL};
