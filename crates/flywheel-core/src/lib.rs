//! Flywheel Dashboard Core
//!
//! Target-independent logic behind the dashboard. Nothing here touches the
//! browser; the UI crate plugs in its adapters through the ports below.
//!
//! - menu / nav: permission tree to sidebar navigation
//! - task / labels: task lifecycle, transition table, display metadata
//! - income / query: calendar output map and stale-response guard
//! - http / api: request pipeline with interceptors and typed endpoints
//! - session: auth store and active team over a persistence port

pub mod api;
pub mod config;
pub mod dashboard;
pub mod http;
pub mod icon;
pub mod income;
pub mod labels;
pub mod menu;
pub mod nav;
pub mod query;
pub mod session;
pub mod task;

mod value;


pub use config::ClientConfig;
pub use http::{ApiError, HttpClient, Notifier, Transport};
pub use session::{KeyValueStore, MemoryStore, Session, SessionExpiry, User};
