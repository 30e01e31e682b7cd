//! vidcheck client library
//!
//! This crate provides the client side of the vidcheck backend: an HTTP
//! pass-through wrapper, a local session store, the login/signup/logout form
//! handlers and captcha token generation.

pub mod captcha;
pub mod config;
pub mod error;
pub mod network;
pub mod state;
pub mod ui;
