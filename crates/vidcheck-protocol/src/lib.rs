//! Shared protocol definitions for the vidcheck backend
//!
//! Request payloads, response bodies and endpoint paths used by the client.

pub mod endpoints;
pub mod messages;
pub mod types;

pub use messages::*;
pub use types::*;
