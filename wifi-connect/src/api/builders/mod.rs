//! Connection settings builders.
//!
//! [`ConnectionBuilder`] produces the sections every profile shares;
//! [`ProfileBuilder`] and [`build_profile`] produce complete Wi-Fi profiles
//! for each [`ConnectionMode`](crate::ConnectionMode).

pub mod connection_builder;
pub mod wifi;

pub use connection_builder::{
    ConnectionBuilder, ConnectionProfile, IpConfig, Section, Settings,
};
pub use wifi::{ProfileBuilder, build_profile};
