//! Harbor - a small hand-rolled HTTP/1.1 server
//!
//! Serves a health check, an echo endpoint with gzip negotiation, User-Agent
//! reflection, and file upload/download under a configured directory.

pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
