//! HTTP access to the remote API.

mod client;

pub use client::HttpClient;
pub(crate) use client::encode_segment;
