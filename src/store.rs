// ABOUTME: Loads restriction store snapshots and other JSON documents from files
// ABOUTME: Falls back to the built-in seed catalog when no snapshot path is given
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::seed;
use nutriguard_core::errors::{AppError, AppResult, ErrorCode};
use nutriguard_core::models::RestrictionStore;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read and deserialize a JSON document from disk
///
/// # Errors
///
/// Returns a storage error if the file cannot be read, or an invalid-format
/// error if it does not deserialize into `T`. Both carry the path in `details`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::storage(format!("Failed to read {}", path.display()))
            .with_details(json!({ "path": path.display().to_string() }))
            .with_source(e)
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!("{} is not a valid document: {e}", path.display()),
        )
        .with_details(json!({ "path": path.display().to_string() }))
        .with_source(e)
    })
}

/// Read a restriction store snapshot from disk
///
/// # Errors
///
/// Propagates [`read_json_file`] errors.
pub fn load_store(path: &Path) -> AppResult<RestrictionStore> {
    let store: RestrictionStore = read_json_file(path)?;

    if store.conditions.is_empty() {
        warn!(path = %path.display(), "Restriction store has no conditions");
    }
    debug!(
        path = %path.display(),
        conditions = store.conditions.len(),
        limits = store.limits.len(),
        exclusions = store.exclusions.len(),
        "Loaded restriction store"
    );
    Ok(store)
}

/// Load a snapshot if a path is given, otherwise the seed catalog
///
/// # Errors
///
/// Propagates [`load_store`] errors.
pub fn load_store_or_default(path: Option<&Path>) -> AppResult<RestrictionStore> {
    path.map_or_else(|| Ok(seed::default_store()), load_store)
}
