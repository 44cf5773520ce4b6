//! HTTP transport and the shared request dispatcher

pub mod client;
pub mod dispatcher;

pub use client::{HttpClient, HttpClientBuilder};
pub use dispatcher::Dispatcher;
