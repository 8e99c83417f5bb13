//! Type definitions and constants.
//!
//! This module contains NetworkManager wire constants and the flag types
//! decoded from access point properties.

pub(crate) mod constants;
pub mod flags;
