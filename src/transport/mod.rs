//! Transport — the adapter between a chat session and the assistant service.
//!
//! DESIGN
//! ======
//! `Transport` is the seam: the session controller only ever holds an
//! `Arc<dyn Transport>`, so tests drive it with in-memory fakes and the
//! binary plugs in `HttpTransport`. An adapter makes one attempt per call.
//! Single-flight and failure-to-message mapping live in the controller.

pub mod http;
pub mod types;

pub use http::HttpTransport;
pub use types::{Transport, TransportError};
