//! HTTP client and host-side effects for the magazine content portal.
//!
//! - [`api`] talks to the portal backend and validates what it returns.
//! - [`batch`] runs many requests with a concurrency cap and cancellation.
//! - [`runner`] drives a full horoscope spread through the batch executor.
//! - [`download`] saves export documents where the user can pick them up.
//! - [`config`] loads all of the above from the environment.

pub mod api;
pub mod batch;
pub mod config;
pub mod download;
pub mod runner;

pub use api::{ApiError, HoroscopeGenerator, PortalApi};
pub use batch::{BatchExecutor, TaskOutcome};
pub use config::ClientConfig;
