// ABOUTME: Per-user restriction profile cache with copy-on-write replacement
// ABOUTME: Rebuilds a user's profile only when the fingerprint of their condition set changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use nutriguard_core::models::{ComputedLimits, ConditionCatalog, RestrictionStore, UserProfile};
use nutriguard_intelligence::RestrictionProfile;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// One cached profile
#[derive(Debug, Clone)]
pub struct CachedProfile {
    /// SHA-256 of the normalized condition set (and AI overlay, if any)
    pub fingerprint: String,
    /// Shared, never mutated after insertion
    pub profile: Arc<RestrictionProfile>,
    /// When this entry was built
    pub built_at: DateTime<Utc>,
}

/// Restriction profiles keyed by user id
///
/// Readers get an `Arc` to a finished profile. A rebuild inserts a new `Arc`;
/// readers holding the old one keep a consistent snapshot.
#[derive(Clone)]
pub struct RestrictionProfileCache {
    store: Arc<RestrictionStore>,
    catalog: Arc<ConditionCatalog>,
    /// `DashMap` shards locking so concurrent users do not contend
    entries: Arc<DashMap<String, CachedProfile>>,
}

impl RestrictionProfileCache {
    /// Create a cache over a restriction store snapshot
    #[must_use]
    pub fn new(store: RestrictionStore) -> Self {
        let catalog = store.catalog();
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Fingerprint a condition set: lowercase, trimmed, de-duplicated, sorted
    #[must_use]
    pub fn fingerprint<S: AsRef<str>>(slugs: &[S], computed: Option<&ComputedLimits>) -> String {
        let normalized: BTreeSet<String> = slugs
            .iter()
            .map(|slug| slug.as_ref().trim().to_lowercase())
            .filter(|slug| !slug.is_empty())
            .collect();

        let mut hasher = Sha256::new();
        for slug in &normalized {
            hasher.update(slug.as_bytes());
            hasher.update(b"\n");
        }
        if let Some(computed) = computed {
            // Serialization of plain data into a Vec cannot fail
            let overlay = serde_json::to_vec(computed).unwrap_or_default();
            hasher.update(b"ai\n");
            hasher.update(&overlay);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Cached profile for a user, rebuilt if their conditions changed
    pub fn get_or_build(&self, user_id: &str, profile: &UserProfile) -> Arc<RestrictionProfile> {
        self.get_or_build_with(user_id, profile, None)
    }

    /// Same as [`Self::get_or_build`], with an AI overlay merged in
    pub fn get_or_build_with(
        &self,
        user_id: &str,
        profile: &UserProfile,
        computed: Option<&ComputedLimits>,
    ) -> Arc<RestrictionProfile> {
        let slugs = profile.condition_slugs();
        let fingerprint = Self::fingerprint(&slugs, computed);

        if let Some(entry) = self.entries.get(user_id) {
            if entry.fingerprint == fingerprint {
                debug!(user_id, "Restriction profile cache hit");
                return Arc::clone(&entry.profile);
            }
        }

        // Build outside any map guard; the insert below is the only write
        let mut built = RestrictionProfile::build(&self.catalog, &self.store, &slugs);
        if let Some(computed) = computed {
            built = built.with_computed_limits(computed);
        }
        let built = Arc::new(built);

        info!(
            user_id,
            conditions = ?slugs,
            conflicts = built.conflicts().count(),
            "Rebuilt restriction profile"
        );
        self.entries.insert(
            user_id.to_owned(),
            CachedProfile {
                fingerprint,
                profile: Arc::clone(&built),
                built_at: Utc::now(),
            },
        );
        built
    }

    /// Cached entry without rebuilding
    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<CachedProfile> {
        self.entries.get(user_id).map(|entry| entry.value().clone())
    }

    /// Drop a user's entry; returns whether one existed
    pub fn invalidate(&self, user_id: &str) -> bool {
        self.entries.remove(user_id).is_some()
    }

    /// Number of cached users
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Underlying store snapshot
    #[must_use]
    pub fn store(&self) -> &RestrictionStore {
        &self.store
    }
}
