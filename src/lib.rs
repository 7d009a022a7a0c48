#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Client core of the RedBridge blood-donation platform.
//!
//! This crate owns the two pieces of the browser-facing client that are not
//! presentation: the [`api::ApiClient`], a single choke point for all REST
//! backend calls with uniform envelope normalization, and the
//! [`session::SessionManager`], which owns the authenticated session for the
//! lifetime of the client process and mediates every identity transition
//! (restore, login, signup, logout). UI layers consume these through plain
//! method calls and re-render from the session state they expose.

/// Version of the redbridge-client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod models;
pub mod session;
pub mod settings;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use api::{ApiClient, ApiResponse};
pub use models::{SignupRequest, UserIdentity, UserRole};
pub use session::{Landing, SessionManager, SessionState};
pub use settings::ClientSettings;
