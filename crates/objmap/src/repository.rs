// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping repository: resolves, builds and caches one mapper per type pair.
//!
//! # Architecture
//!
//! ```text
//! MappingRepository
//! +-- cache: ArcSwap<HashMap<TypePair, erased Arc<dyn Mapper<S, T>>>>
//! |          (snapshot, lock-free reads, copy-on-write publish)
//! +-- build: ReentrantMutex<()>
//! |          (serializes builds, register, clear and options changes)
//! +-- options: Mutex<MappingOptions>
//! |          (held only to read or mutate, never across a build)
//! +-- builds: AtomicU64
//! ```
//!
//! # Resolution
//!
//! 1. Lock-free lookup in the current snapshot -> hit returns the cached mapper
//! 2. Miss -> take the build lock, look again (another thread may have won)
//! 3. Instantiate the configured strategies for `(S, T)`
//! 4. Build a [`CompositeMapper`], publish a new snapshot, return
//!
//! A failed build publishes nothing; the next `resolve` for the same pair
//! tries again.
//!
//! # Pair States
//!
//! ```text
//! Unresolved --resolve--> Building --ok--> Resolved
//!     ^                      |                |
//!     +------- error --------+                |
//!     +--------------- clear -----------------+
//! ```
//!
//! `Building` only exists while the build lock is held and is never seen
//! by readers.
//!
//! The build lock is re-entrant: a strategy factory or `generate` may
//! resolve other pairs through the same repository from the building
//! thread. Resolving the pair currently being built from inside its own
//! build recurses without end.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::{Mutex, ReentrantMutex};

use crate::composite::{CompositeMapper, Mapper};
use crate::error::Result;
use crate::member::Mapped;
use crate::options::MappingOptions;
use crate::pair::TypePair;

type CacheEntry = Arc<dyn Any + Send + Sync>;
type Cache = HashMap<TypePair, CacheEntry>;

/// Counters reported by [`MappingRepository::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepositoryStats {
    /// Pairs currently holding a mapper.
    pub cached_pairs: usize,
    /// Mappers built by this repository since creation (registrations excluded).
    pub builds: u64,
}

/// Cache of mappers keyed by `(source type, target type)`.
pub struct MappingRepository {
    cache: ArcSwap<Cache>,
    build: ReentrantMutex<()>,
    options: Mutex<MappingOptions>,
    builds: AtomicU64,
}

impl MappingRepository {
    /// Repository with default options.
    pub fn new() -> Self {
        Self::with_options(MappingOptions::default())
    }

    pub fn with_options(options: MappingOptions) -> Self {
        Self {
            cache: ArcSwap::from_pointee(HashMap::new()),
            build: ReentrantMutex::new(()),
            options: Mutex::new(options),
            builds: AtomicU64::new(0),
        }
    }

    /// Get the global repository instance (default options).
    pub fn global() -> &'static MappingRepository {
        use std::sync::OnceLock;
        static REPOSITORY: OnceLock<MappingRepository> = OnceLock::new();
        REPOSITORY.get_or_init(MappingRepository::new)
    }

    /// Mapper for `(S, T)`, built on first request.
    ///
    /// Every call for the same pair returns the same instance until
    /// [`clear`](Self::clear) or [`register`](Self::register) replaces it.
    ///
    /// # Errors
    ///
    /// Strategy instantiation or generation errors; nothing is cached.
    pub fn resolve<S: Mapped, T: Mapped>(&self) -> Result<Arc<dyn Mapper<S, T>>> {
        let pair = TypePair::of::<S, T>();
        if let Some(mapper) = self.lookup::<S, T>(&pair) {
            return Ok(mapper);
        }

        let _guard = self.build.lock();
        if let Some(mapper) = self.lookup::<S, T>(&pair) {
            return Ok(mapper);
        }

        let options = self.options();
        let strategies = options.instantiate::<S, T>()?;
        let composite = CompositeMapper::with_policy(strategies, options.conflict_policy())?;
        log::debug!(
            "[MappingRepository] Built mapper for {} ({} correspondence(s), strategies {:?})",
            pair,
            composite.type_mapping().len(),
            composite.strategy_names()
        );

        let mapper: Arc<dyn Mapper<S, T>> = Arc::new(composite);
        self.publish(pair, Arc::new(mapper.clone()));
        self.builds.fetch_add(1, Ordering::Relaxed);
        Ok(mapper)
    }

    /// Install `mapper` for `(S, T)`, replacing any cached entry.
    pub fn register<S: Mapped, T: Mapped>(&self, mapper: Arc<dyn Mapper<S, T>>) {
        let pair = TypePair::of::<S, T>();
        let _guard = self.build.lock();
        self.publish(pair, Arc::new(mapper));
        log::debug!("[MappingRepository] Registered mapper for {}", pair);
    }

    /// Drop every cached mapper. Handles held by callers stay valid.
    pub fn clear(&self) {
        let _guard = self.build.lock();
        let dropped = self.cache.swap(Arc::new(HashMap::new())).len();
        log::debug!("[MappingRepository] Cleared {} cached mapper(s)", dropped);
    }

    pub fn contains<S: Mapped, T: Mapped>(&self) -> bool {
        self.cache.load().contains_key(&TypePair::of::<S, T>())
    }

    pub fn len(&self) -> usize {
        self.cache.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.load().is_empty()
    }

    /// Snapshot of the current options.
    pub fn options(&self) -> MappingOptions {
        self.options.lock().clone()
    }

    /// Mutate the options under the build lock.
    ///
    /// Only mappers built afterwards see the change; call
    /// [`clear`](Self::clear) to rebuild cached pairs.
    pub fn configure<F: FnOnce(&mut MappingOptions)>(&self, f: F) {
        let _guard = self.build.lock();
        let mut options = self.options.lock();
        f(&mut options);
        log::debug!(
            "[MappingRepository] Options updated: strategies {:?}, conflict policy {:?}",
            options.strategies(),
            options.conflict_policy()
        );
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            cached_pairs: self.len(),
            builds: self.builds.load(Ordering::Relaxed),
        }
    }

    fn lookup<S: Mapped, T: Mapped>(&self, pair: &TypePair) -> Option<Arc<dyn Mapper<S, T>>> {
        self.cache
            .load()
            .get(pair)
            .and_then(|entry| entry.downcast_ref::<Arc<dyn Mapper<S, T>>>())
            .cloned()
    }

    /// Publish a snapshot with `entry` under `pair`. Caller holds the build lock.
    fn publish(&self, pair: TypePair, entry: CacheEntry) {
        let mut next = HashMap::clone(&self.cache.load());
        next.insert(pair, entry);
        self.cache.store(Arc::new(next));
    }
}

impl Default for MappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MappingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.load();
        f.debug_struct("MappingRepository")
            .field("pairs", &cache.keys().collect::<Vec<_>>())
            .field("builds", &self.builds.load(Ordering::Relaxed))
            .finish()
    }
}
