//! Core library for ProEvent lead capture.
//!
//! Contains the lead record and its validation, the service catalog, the
//! local fallback store, the notification sink, the remote transport
//! contract, and the submission controller that drives one capture
//! attempt end-to-end. This crate depends on `proevent-storage` for the
//! persistence trait and knows nothing about HTTP — the wire lives in
//! `proevent-client` and `proevent-server`.

pub mod content;
pub mod error;
pub mod lead;
pub mod notify;
pub mod store;
pub mod submit;
pub mod transport;
