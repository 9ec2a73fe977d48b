//! Data model for requests, responses, and errors.

pub mod request;
pub mod response;

pub use request::{Body, HttpRequest, Method, RequestConfig, RequestOverrides, RequestPlan};
pub use response::{ErrorRecord, HttpResponse, Payload};
