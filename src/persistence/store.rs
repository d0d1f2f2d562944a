use std::fmt;

use async_trait::async_trait;

use crate::core::drop::ReorderEvent;
use crate::core::tree::{Tree, TreeError};

/// Errors that can occur while talking to a navigation store.
#[derive(Debug)]
pub enum StoreError {
    /// Store misconfigured (bad URL, unusable path). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Server returned an error response. Retryable if status >= 500.
    Api { status: u16, message: String },
    /// Payload could not be parsed as a menu tree.
    Parse(String),
    /// Local filesystem failure.
    Io(std::io::Error),
    /// Payload parsed but breaks a tree invariant.
    Invalid(TreeError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Config(msg) => write!(f, "config error: {msg}"),
            StoreError::Network(msg) => write!(f, "network error: {msg}"),
            StoreError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            StoreError::Parse(msg) => write!(f, "parse error: {msg}"),
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Invalid(e) => write!(f, "invalid menu: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// The persistence collaborator the editor loads from and commits to.
#[async_trait]
pub trait NavigationStore: Send + Sync {
    /// Returns the name of the store backend.
    fn name(&self) -> &str;

    /// Fetch the current menu tree.
    async fn load_tree(&self) -> Result<Tree, StoreError>;

    /// Persist `tree`. The edit session only closes once this returns `Ok`.
    async fn save_tree(&self, tree: &Tree) -> Result<(), StoreError>;

    /// Best-effort reorder telemetry. Callers log failures and move on.
    async fn record_reorder(&self, event: &ReorderEvent) -> Result<(), StoreError>;
}
