//! Core internal logic for connection management.
//!
//! Everything here is written against [`NmBackend`](crate::backend::NmBackend)
//! and returns `Result`; the boolean outcomes of the public API are derived
//! in [`crate::api::wifi_connect`].

pub(crate) mod connection;
pub(crate) mod connection_settings;
pub(crate) mod device;
pub mod reachability;
pub(crate) mod scan;
pub mod state_wait;
