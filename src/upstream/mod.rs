//! External users/departments API.

pub mod client;

pub use client::{UpstreamClient, UpstreamError, UpstreamReply};
