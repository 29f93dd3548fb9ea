//! Snapshot export for the materialized store.
//!
//! Persistence of the store belongs to the surrounding system; this module
//! only provides a stable JSON exchange form with version metadata, so a
//! reporting collaborator can consume the materialized relations without
//! linking against the engine.

use crate::engine::errors::MvError;
use crate::engine::store::ViewStore;

/// Metadata included in snapshots for compatibility checking.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotMetadata {
    /// Engine version string
    pub version: String,
    /// Feature flags enabled when the snapshot was created
    pub features: Vec<String>,
}

/// A snapshot of a [`ViewStore`] with metadata.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// The materialized relations
    pub store: ViewStore,
    /// Metadata for compatibility checking
    pub metadata: SnapshotMetadata,
}

impl Snapshot {
    /// Creates a new snapshot from a store.
    pub fn new(store: ViewStore) -> Self {
        let metadata = SnapshotMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            features: enabled_features(),
        };
        Self { store, metadata }
    }

    /// Validates that this snapshot is compatible with the current engine.
    ///
    /// Requires an exact version match and that every feature recorded in the
    /// snapshot is enabled in this build.
    pub fn validate_compatibility(&self) -> Result<(), MvError> {
        let current_version = env!("CARGO_PKG_VERSION");
        if self.metadata.version != current_version {
            return Err(MvError::Snapshot(format!(
                "version mismatch: snapshot was created with {}, current version is {}",
                self.metadata.version, current_version
            )));
        }

        let current_features = enabled_features();
        for required in &self.metadata.features {
            if !current_features.contains(required) {
                return Err(MvError::Snapshot(format!(
                    "snapshot requires feature '{}' which is not enabled",
                    required
                )));
            }
        }

        Ok(())
    }
}

/// Returns a list of enabled feature flags.
fn enabled_features() -> Vec<String> {
    #[allow(unused_mut)]
    let mut features = Vec::new();

    #[cfg(feature = "serde")]
    {
        features.push("serde".to_string());
    }

    #[cfg(feature = "tracing")]
    {
        features.push("tracing".to_string());
    }

    features
}

/// Saves a snapshot to a JSON string.
#[cfg(feature = "serde")]
pub fn save_snapshot_json(snapshot: &Snapshot) -> Result<String, MvError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| MvError::Snapshot(format!("failed to serialize snapshot: {}", e)))
}

/// Loads a snapshot from a JSON string, validating compatibility and
/// rebuilding the store's key indexes (which are not serialized).
#[cfg(feature = "serde")]
pub fn load_snapshot_json(json: &str) -> Result<Snapshot, MvError> {
    let mut snapshot: Snapshot = serde_json::from_str(json)
        .map_err(|e| MvError::Snapshot(format!("failed to deserialize snapshot: {}", e)))?;

    snapshot.validate_compatibility()?;
    snapshot.store.rebuild_indexes();
    Ok(snapshot)
}
