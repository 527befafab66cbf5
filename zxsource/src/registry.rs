//! # Source Registry
//!
//! Central registry of the media sources known to the host, keyed by
//! domain. Browse and resolve requests are dispatched to the matching
//! source.
//!
//! The registry is cheap to clone and shares its map through
//! `Arc<RwLock<...>>`: many readers may dispatch concurrently while
//! registration takes the write lock.

use crate::{BrowseMedia, MediaSource, MediaSourceError, PlayMedia, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registry of media sources
///
/// # Examples
///
/// ```ignore
/// use zxsource::SourceRegistry;
///
/// let registry = SourceRegistry::new();
/// registry.register(Arc::new(MySource::new())).await;
///
/// if let Some(source) = registry.get("my_domain").await {
///     let root = source.browse_media("").await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Arc<RwLock<HashMap<String, Arc<dyn MediaSource>>>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source under its domain
    ///
    /// A source already registered under the same domain is replaced.
    pub async fn register(&self, source: Arc<dyn MediaSource>) {
        let domain = source.domain().to_string();
        let mut sources = self.sources.write().await;

        tracing::info!(
            source_domain = %domain,
            source_name = %source.name(),
            "Registering media source"
        );

        sources.insert(domain, source);
    }

    pub async fn get(&self, domain: &str) -> Option<Arc<dyn MediaSource>> {
        let sources = self.sources.read().await;
        sources.get(domain).cloned()
    }

    /// Lists all registered sources
    pub async fn list_all(&self) -> Vec<Arc<dyn MediaSource>> {
        let sources = self.sources.read().await;
        sources.values().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.sources.read().await.len()
    }

    /// Removes a source
    ///
    /// Returns `true` if the source was registered.
    pub async fn remove(&self, domain: &str) -> bool {
        let mut sources = self.sources.write().await;

        if sources.remove(domain).is_some() {
            tracing::info!(source_domain = %domain, "Removed media source");
            true
        } else {
            false
        }
    }

    pub async fn contains(&self, domain: &str) -> bool {
        self.sources.read().await.contains_key(domain)
    }

    /// Browses `identifier` in the source registered under `domain`
    ///
    /// # Errors
    ///
    /// [`MediaSourceError::UnknownSource`] if no source has that domain,
    /// otherwise whatever the source returns.
    pub async fn browse(&self, domain: &str, identifier: &str) -> Result<BrowseMedia> {
        let source = self.require(domain).await?;
        source.browse_media(identifier).await
    }

    /// Resolves `identifier` in the source registered under `domain`
    pub async fn resolve(&self, domain: &str, identifier: &str) -> Result<PlayMedia> {
        let source = self.require(domain).await?;
        source.resolve_media(identifier).await
    }

    // The read guard is dropped before the source is awaited
    async fn require(&self, domain: &str) -> Result<Arc<dyn MediaSource>> {
        self.get(domain)
            .await
            .ok_or_else(|| MediaSourceError::UnknownSource(domain.to_string()))
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{async_trait, content_type};

    #[derive(Debug)]
    struct Named(&'static str);

    #[async_trait]
    impl MediaSource for Named {
        fn domain(&self) -> &str {
            self.0
        }

        fn name(&self) -> &str {
            self.0
        }

        async fn browse_media(&self, identifier: &str) -> Result<BrowseMedia> {
            Ok(BrowseMedia::folder(self.0, identifier, content_type::PLAYLIST, self.0))
        }

        async fn resolve_media(&self, identifier: &str) -> Result<PlayMedia> {
            Ok(PlayMedia::new(format!("http://{}/{}", self.0, identifier), "audio/mpeg"))
        }
    }

    #[tokio::test]
    async fn test_register_get_remove() {
        let registry = SourceRegistry::new();
        registry.register(Arc::new(Named("a"))).await;
        registry.register(Arc::new(Named("b"))).await;

        assert_eq!(registry.count().await, 2);
        assert!(registry.contains("a").await);
        assert_eq!(registry.get("b").await.unwrap().name(), "b");

        assert!(registry.remove("a").await);
        assert!(!registry.remove("a").await);
        assert_eq!(registry.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch() {
        let registry = SourceRegistry::new();
        registry.register(Arc::new(Named("a"))).await;

        let node = registry.browse("a", "x").await.unwrap();
        assert_eq!(node.identifier.as_deref(), Some("x"));

        let play = registry.resolve("a", "tune/1").await.unwrap();
        assert_eq!(play.url, "http://a/tune/1");
    }

    #[tokio::test]
    async fn test_unknown_domain() {
        let registry = SourceRegistry::new();
        let err = registry.resolve("missing", "tune/1").await.unwrap_err();
        assert!(matches!(err, MediaSourceError::UnknownSource(d) if d == "missing"));
    }
}
