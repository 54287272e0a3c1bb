//! Chat widget core: a toggleable assistant panel's conversation session.
//!
//! DESIGN
//! ======
//! `session` owns the state machine (panel, log, draft, pending) and is the
//! only thing that mutates it. `transport` is the one-shot adapter to the
//! remote assistant. `render` and the binary are a terminal stand-in for the
//! page's presentation layer.

pub mod config;
pub mod render;
pub mod session;
pub mod transport;
