//! HTTP Layer
//!
//! Request pipeline shared by every endpoint:
//! - request: request/response values and the query string
//! - envelope: `{code, message, data}` unwrapping
//! - error: failure taxonomy and user-facing messages
//! - client: interceptors around a pluggable [`Transport`]

mod client;
mod envelope;
mod error;
mod request;

pub use client::{HttpClient, LocationFn, Notifier, Transport, JSON_CONTENT_TYPE};
pub use envelope::{Envelope, DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE, SUCCESS_CODE};
pub use error::{ApiError, Notice, TransportError};
pub use request::{HttpRequest, HttpResponse, Method, RequestOptions};

#[cfg(test)]
pub(crate) use client::testing;
