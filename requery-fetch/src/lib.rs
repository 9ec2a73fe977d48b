// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Requery Fetch
//!
//! Fetch state controller and transport layer for `requery`.
//!
//! This crate executes the request/response cycles described by
//! `requery-core` and publishes their progress as observable state:
//!
//! - [`controller::FetchController`] - one logical request with observable
//!   `data`, `error`, and `loading` cells, manual execution, mount-time
//!   fetching, and dependency-driven re-fetching
//! - [`cell::Cell`] - the observable value holder behind that state
//! - [`transport::Transport`] - the seam between controller and HTTP client
//! - [`client::HttpClient`] - the reqwest-backed default transport
//!
//! ## Example
//!
//! ```ignore
//! use requery_fetch::FetchController;
//! use requery_core::RequestOverrides;
//!
//! let controller = FetchController::builder()
//!     .base_url("http://localhost:8080")
//!     .url("/users")
//!     .on_success(|data, _response| println!("{data:?}"))
//!     .build();
//!
//! controller.execute(RequestOverrides::default()).await;
//! assert!(controller.loading().get() == false);
//! ```

pub mod cell;
pub mod client;
pub mod controller;
pub mod error;
pub mod transport;

// Re-export key types at crate root
pub use cell::Cell;
pub use client::HttpClient;
pub use controller::{ErrorCallback, FetchController, FetchControllerBuilder, SuccessCallback};
pub use error::FetchError;
pub use transport::Transport;
