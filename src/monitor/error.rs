//! Error types for the monitor layer.

use crate::inventory::InventoryError;
use thiserror::Error;

/// Error type for change-detector operations.
///
/// Wait timeouts never appear here; the detector re-polls through them.
/// Everything that does appear is fatal for this detector instance: the
/// caller decides whether to rebuild a fresh detector (and connection) and
/// resume from the initial version token.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The detector was closed; its subscription is released.
    #[error("Monitor is closed")]
    Closed,

    /// The inventory service failed fatally (auth expiry, connection loss,
    /// rejected subscription).
    #[error("Inventory service error: {0}")]
    Inventory(#[from] InventoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn closed_displays_message() {
        assert_eq!(MonitorError::Closed.to_string(), "Monitor is closed");
    }

    #[test]
    fn inventory_error_preserves_source_chain() {
        let error = MonitorError::Inventory(InventoryError::Session {
            message: "login expired".to_string(),
        });

        assert!(error.to_string().contains("Inventory service error"));
        let source = error.source().unwrap();
        assert!(source.to_string().contains("login expired"));
    }

    #[test]
    fn from_inventory_error_conversion() {
        let inventory_error = InventoryError::Transport {
            message: "connection reset".to_string(),
        };
        let error: MonitorError = inventory_error.into();

        assert!(matches!(error, MonitorError::Inventory(_)));
    }
}
