//! Core library for the prayer times gateway.
//!
//! This crate defines:
//! - Validation of caller input and upstream query construction
//! - Abstraction over the upstream prayer-times provider (Aladhan)
//! - Shared domain models (timings, monthly entries, outcomes)
//! - Configuration handling
//!
//! It is used by `prayer-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod service;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::{FetchError, InvalidArgument};
pub use model::{MonthlyEntry, Outcome, PrayerTimings};
pub use provider::{PrayerTimesProvider, aladhan::AladhanProvider, provider_from_config};
pub use query::{DEFAULT_METHOD, Endpoint, UpstreamQuery};
pub use service::PrayerTimeService;
