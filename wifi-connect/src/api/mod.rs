//! Public API module.
//!
//! This module contains the high-level user-facing API for the `wifi_connect` crate.

pub mod builders;
pub mod models;
pub mod wifi_connect;
