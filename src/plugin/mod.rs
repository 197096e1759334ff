//! Host-facing plugin adapter.
//!
//! Exposes an [`AdrHandler`](crate::handler::AdrHandler) to a network
//! server over any byte stream.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  Read ──▶ Codec (framing) ──▶ Protocol ──▶ Server     │
//! │                                               │        │
//! │                                               ▼        │
//! │  Write ◀── Codec ◀── Protocol ◀──── AdrHandler::handle │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod codec;
pub mod protocol;
pub mod server;
