//! ProEvent lead capture server.
//!
//! Wires the storage backend and forwarding into an Axum server exposing
//! the capture API under `/api`: lead create/list, status checks, and a
//! hello route. This is the remote endpoint the `proevent-client`
//! transport talks to.

pub mod config;
pub mod error;
pub mod forward;
pub mod routes;
pub mod state;
