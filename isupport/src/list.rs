//! Server-wide `RPL_ISUPPORT` state.
//!
//! The registry is owned by the configuration path; every regeneration builds a
//! fresh [`ReplyCache`] and publishes it by swapping an `Arc`. Per-client send
//! paths hold a [`CacheReader`] and only ever see a complete cache.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::ReplyCache;
use crate::error::TokenError;
use crate::limits::PackLimits;
use crate::pack::ReplyCacheBuilder;
use crate::registry::TokenRegistry;

type Published = Arc<RwLock<Arc<ReplyCache>>>;

/// Token registry plus the published reply cache built from it.
#[derive(Debug)]
pub struct ISupportList {
    registry: TokenRegistry,
    builder: ReplyCacheBuilder,
    published: Published,
    generation: u64,
    dirty: bool,
}

impl Default for ISupportList {
    fn default() -> Self {
        Self::new()
    }
}

impl ISupportList {
    /// Empty registry and empty cache, default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(PackLimits::default())
    }

    #[must_use]
    pub fn with_limits(limits: PackLimits) -> Self {
        Self {
            registry: TokenRegistry::new(),
            builder: ReplyCacheBuilder::new(limits),
            published: Arc::new(RwLock::new(Arc::new(ReplyCache::default()))),
            generation: 0,
            dirty: false,
        }
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.registry.add(name, value);
        self.dirty = true;
    }

    pub fn add_no_value(&mut self, name: impl Into<String>) {
        self.registry.add_no_value(name);
        self.dirty = true;
    }

    /// Validated against this list's `max_line_len`, so an accepted token
    /// always fits a line at the next regeneration.
    pub fn try_add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), TokenError> {
        let max_len = self.limits().max_line_len;
        self.registry.try_add_within(name, value, max_len)?;
        self.dirty = true;
        Ok(())
    }

    pub fn try_add_no_value(&mut self, name: impl Into<String>) -> Result<(), TokenError> {
        let max_len = self.limits().max_line_len;
        self.registry.try_add_no_value_within(name, max_len)?;
        self.dirty = true;
        Ok(())
    }

    /// Returns `true` if the token was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.registry.remove(name).is_some();
        self.dirty |= removed;
        removed
    }

    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    #[must_use]
    pub fn limits(&self) -> &PackLimits {
        self.builder.limits()
    }

    /// Whether the registry changed since the last [`regenerate`](Self::regenerate).
    #[must_use]
    pub fn needs_regeneration(&self) -> bool {
        self.dirty
    }

    /// Rebuild the cache from the registry and publish it.
    pub fn regenerate(&mut self) -> Arc<ReplyCache> {
        self.generation += 1;
        let cache = Arc::new(
            self.builder
                .build(&self.registry)
                .with_generation(self.generation),
        );
        debug!(
            tokens = self.registry.len(),
            lines = cache.len(),
            generation = self.generation,
            "regenerated ISUPPORT reply"
        );
        *self.published.write() = Arc::clone(&cache);
        self.dirty = false;
        cache
    }

    /// The currently published cache.
    #[must_use]
    pub fn cached_reply(&self) -> Arc<ReplyCache> {
        Arc::clone(&*self.published.read())
    }

    /// A handle for send paths that outlive a borrow of this list.
    #[must_use]
    pub fn reader(&self) -> CacheReader {
        CacheReader {
            published: Arc::clone(&self.published),
        }
    }
}

/// Read-only handle to the published cache. Cheap to clone and share.
#[derive(Debug, Clone)]
pub struct CacheReader {
    published: Published,
}

impl CacheReader {
    /// The currently published cache. The lock is held only to clone the `Arc`.
    #[must_use]
    pub fn current(&self) -> Arc<ReplyCache> {
        Arc::clone(&*self.published.read())
    }
}
