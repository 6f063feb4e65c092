//! HTTP/1.1 protocol implementation.
//!
//! One request is served per connection; there is no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine and bounded request reading
//! - **`parser`**: Parses a buffered request into a [`request::Request`]
//! - **`headers`**: Ordered, case-insensitive header collection
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: Accept-Encoding negotiation and gzip bodies
//! - **`writer`**: Serializes and writes responses, streaming file bodies
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read headers, then the declared body
//!        └──────┬──────┘
//!               │ Request parsed (parse failure → Closed, no response)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
