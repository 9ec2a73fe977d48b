// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Requery Core
//!
//! Core types and pure utilities for the `requery` data-fetching layer.
//!
//! This crate provides the transport-agnostic foundation consumed by
//! `requery-fetch`:
//!
//! - Request model ([`RequestConfig`], [`RequestOverrides`], [`Method`],
//!   [`Body`]) and the merge/assembly pipeline that turns them into an
//!   [`HttpRequest`]
//! - Response model ([`HttpResponse`], [`Payload`], [`ErrorRecord`])
//! - [`UrlResolver`] for joining paths to a base origin
//! - Query codec ([`encode_query`], [`decode_query`],
//!   [`patch_location_query`]) with the [`HistoryApi`] collaborator
//!
//! Everything here is synchronous and performs no I/O.

pub mod error;
pub mod models;
pub mod query;
pub mod resolver;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Request types
    Body,
    HttpRequest,
    Method,
    RequestConfig,
    RequestOverrides,
    RequestPlan,
    // Response types
    ErrorRecord,
    HttpResponse,
    Payload,
};

// Re-export codec and resolver
pub use query::{decode_query, encode_query, patch_location_query, QueryValue};
pub use resolver::UrlResolver;
pub use traits::{HistoryApi, MemoryHistory};
