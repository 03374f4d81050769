//! Contract with the remote inventory service.
//!
//! This module provides:
//! - Wire types for the versioned change feed ([`UpdateSet`],
//!   [`ObjectUpdate`], [`PropertyChange`], [`PropertyValue`])
//! - Subscription scoping ([`PropertySelection`], [`WaitOptions`])
//! - The service client contract ([`InventoryClient`], [`InventoryError`])
//! - A scripted replay source ([`ScriptedInventory`], [`FeedStep`])
//!
//! The service itself is an external collaborator; only the
//! subscribe/poll/unsubscribe surface the monitor consumes is modeled here.

mod client;
mod script;
mod types;

pub use client::{InventoryClient, InventoryError};
pub use script::{FeedStep, ScriptError, ScriptedInventory};
pub use types::{
    EntityId, GuestNic, ObjectUpdate, ObjectUpdateKind, PropertyChange, PropertyOperation,
    PropertySelection, PropertyValue, SubscriptionHandle, UpdateSet, VersionToken, VirtualDevice,
    WaitOptions,
};
