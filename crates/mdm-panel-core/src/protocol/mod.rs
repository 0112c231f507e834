//! Protocol layer for the device API.
//!
//! Builds command bodies and unwraps the `{success, data, error}` envelope
//! every endpoint answers with.

pub mod commands;
pub mod response;
