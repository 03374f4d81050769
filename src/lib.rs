//! vmnet-watch: inventory network-address change monitor
//!
//! A library for watching a virtualization inventory change feed and
//! forwarding genuine MAC and guest address transitions to observers,
//! suppressing the spurious near-duplicate events the feed emits.

pub mod config;
pub mod extract;
pub mod inventory;
pub mod monitor;
