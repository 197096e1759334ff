//! ALITECS adaptive data rate library.
//!
//! Exposes the pure decision engine ([`adr`]) plus the host-side layers
//! around it: handler port, device session helper and the framed plugin
//! adapter used by the `alitecs-adr` binary.

#![deny(unused_must_use)]

pub mod adr;
pub mod config;
pub mod error;
pub mod handler;
pub mod plugin;
pub mod session;

pub use adr::{DecisionRequest, DecisionResult, UplinkObservation, decide};
pub use error::{Error, Result};
