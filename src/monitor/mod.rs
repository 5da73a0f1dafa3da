pub mod client;
pub mod download;
pub mod error;
pub mod models;

pub use client::MonitorClient;
pub use error::{MonitorError, TransportError};
pub use models::*;
