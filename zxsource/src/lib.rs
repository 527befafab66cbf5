//! # ZXSource
//!
//! Common traits and types for media sources exposed to the host.
//!
//! A media source turns an opaque identifier into a tree of browsable
//! nodes ([`BrowseMedia`]) and resolves playable identifiers into a URL
//! with its MIME type ([`PlayMedia`]). The host registers sources in a
//! [`SourceRegistry`] keyed by their domain and dispatches user navigation
//! to them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zxsource::{MediaSource, SourceRegistry};
//! use std::sync::Arc;
//!
//! let registry = SourceRegistry::new();
//! registry.register(Arc::new(my_source)).await;
//!
//! let root = registry.browse("my_domain", "").await?;
//! let play = registry.resolve("my_domain", "tune/42").await?;
//! ```

pub mod registry;

use serde::Serialize;
use std::fmt::Debug;

pub use async_trait::async_trait;
pub use registry::SourceRegistry;

/// Error types for media source operations
#[derive(Debug, thiserror::Error)]
pub enum MediaSourceError {
    /// The identifier cannot be turned into playable media
    #[error("Media not resolvable: {0}")]
    Unresolvable(String),

    #[error("Unknown media source: {0}")]
    UnknownSource(String),

    /// The source exists but has no usable backend yet
    #[error("Media source not ready: {0}")]
    NotReady(String),

    /// Failure reported by the remote backend, passed through untouched
    #[error(transparent)]
    Remote(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl MediaSourceError {
    /// Wraps a backend error without altering it
    pub fn remote<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Remote(Box::new(err))
    }
}

/// Result type for media source operations
pub type Result<T> = std::result::Result<T, MediaSourceError>;

/// Presentation class of a browse node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaClass {
    Directory,
    Music,
    Image,
}

/// Content type of a folder (`music`, `image`, `playlist`)
///
/// Playable leaves carry their MIME type instead.
pub mod content_type {
    pub const MUSIC: &str = "music";
    pub const IMAGE: &str = "image";
    pub const PLAYLIST: &str = "playlist";
}

/// A node in a browse tree
///
/// Folders are expandable and not playable; leaves are playable and not
/// expandable. The root node returned by a source has no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseMedia {
    /// Domain of the source that produced this node
    pub domain: String,
    pub identifier: Option<String>,
    pub media_class: MediaClass,
    pub media_content_type: String,
    pub title: String,
    pub can_play: bool,
    pub can_expand: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_media_class: Option<MediaClass>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BrowseMedia>,
}

impl BrowseMedia {
    /// Creates an expandable, non-playable folder node
    pub fn folder(
        domain: impl Into<String>,
        identifier: impl Into<String>,
        media_content_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            identifier: Some(identifier.into()),
            media_class: MediaClass::Directory,
            media_content_type: media_content_type.into(),
            title: title.into(),
            can_play: false,
            can_expand: true,
            thumbnail: None,
            children_media_class: None,
            children: Vec::new(),
        }
    }

    /// Creates a playable, non-expandable leaf node
    pub fn leaf(
        domain: impl Into<String>,
        identifier: impl Into<String>,
        media_class: MediaClass,
        mime_type: impl Into<String>,
        title: impl Into<String>,
        thumbnail: Option<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            identifier: Some(identifier.into()),
            media_class,
            media_content_type: mime_type.into(),
            title: title.into(),
            can_play: true,
            can_expand: false,
            thumbnail,
            children_media_class: None,
            children: Vec::new(),
        }
    }

    /// Returns true for expandable nodes
    pub fn is_folder(&self) -> bool {
        self.can_expand && !self.can_play
    }

    /// Returns true for playable nodes
    pub fn is_leaf(&self) -> bool {
        self.can_play && !self.can_expand
    }
}

/// A playable URL with its MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayMedia {
    pub url: String,
    pub mime_type: String,
}

impl PlayMedia {
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Capability interface every media source implements
///
/// The host calls [`browse_media`](MediaSource::browse_media) on user
/// navigation and [`resolve_media`](MediaSource::resolve_media) when the
/// user asks to play a node. An empty identifier addresses the root.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: the host may browse and resolve
/// concurrently on the same instance.
///
/// # Examples
///
/// ```rust,no_run
/// use zxsource::{BrowseMedia, MediaSource, MediaSourceError, PlayMedia, Result};
///
/// #[derive(Debug)]
/// struct Empty;
///
/// #[zxsource::async_trait]
/// impl MediaSource for Empty {
///     fn domain(&self) -> &str {
///         "empty"
///     }
///
///     fn name(&self) -> &str {
///         "Empty"
///     }
///
///     async fn browse_media(&self, _identifier: &str) -> Result<BrowseMedia> {
///         Ok(BrowseMedia::folder("empty", "", "playlist", "Empty"))
///     }
///
///     async fn resolve_media(&self, identifier: &str) -> Result<PlayMedia> {
///         Err(MediaSourceError::Unresolvable(identifier.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait MediaSource: Debug + Send + Sync {
    /// Unique key under which the source is registered
    fn domain(&self) -> &str;

    /// Human-readable name of the source
    fn name(&self) -> &str;

    /// Returns the node addressed by `identifier` with its children
    async fn browse_media(&self, identifier: &str) -> Result<BrowseMedia>;

    /// Resolves a playable identifier to a URL and MIME type
    ///
    /// # Errors
    ///
    /// Returns [`MediaSourceError::Unresolvable`] when the identifier does
    /// not designate playable media.
    async fn resolve_media(&self, identifier: &str) -> Result<PlayMedia>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestSource;

    #[async_trait]
    impl MediaSource for TestSource {
        fn domain(&self) -> &str {
            "test_source"
        }

        fn name(&self) -> &str {
            "Test Source"
        }

        async fn browse_media(&self, _identifier: &str) -> Result<BrowseMedia> {
            Ok(BrowseMedia::folder("test_source", "", content_type::PLAYLIST, "Test"))
        }

        async fn resolve_media(&self, identifier: &str) -> Result<PlayMedia> {
            Err(MediaSourceError::Unresolvable(identifier.to_string()))
        }
    }

    #[tokio::test]
    async fn test_media_source_trait() {
        let source = TestSource;
        assert_eq!(source.domain(), "test_source");
        assert_eq!(source.name(), "Test Source");

        let root = source.browse_media("").await.unwrap();
        assert!(root.is_folder());

        let err = source.resolve_media("x").await.unwrap_err();
        assert!(matches!(err, MediaSourceError::Unresolvable(id) if id == "x"));
    }

    #[test]
    fn test_folder_and_leaf_flags() {
        let folder = BrowseMedia::folder("d", "tune", content_type::MUSIC, "Tunes");
        assert!(folder.is_folder());
        assert!(!folder.is_leaf());
        assert_eq!(folder.media_class, MediaClass::Directory);

        let leaf = BrowseMedia::leaf("d", "tune/1", MediaClass::Music, "audio/mpeg", "A", None);
        assert!(leaf.is_leaf());
        assert!(!leaf.is_folder());
        assert_eq!(leaf.media_content_type, "audio/mpeg");
    }

    #[test]
    fn test_remote_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "remote timed out");
        let err = MediaSourceError::remote(io);
        assert_eq!(err.to_string(), "remote timed out");

        let MediaSourceError::Remote(inner) = err else {
            panic!("expected remote error");
        };
        let io = inner.downcast::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_browse_media_serialization() {
        let leaf = BrowseMedia::leaf(
            "d",
            "image/7",
            MediaClass::Image,
            "image/png",
            "Pic",
            Some("http://x/7.png".into()),
        );
        let json = serde_json::to_value(&leaf).unwrap();
        assert_eq!(json["media_class"], "image");
        assert_eq!(json["thumbnail"], "http://x/7.png");
        assert!(json.get("children").is_none());
    }
}
