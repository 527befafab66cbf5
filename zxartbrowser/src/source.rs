//! MediaSource implementation for ZXArt
//!
//! Builds the browse tree described in [`crate::media`] and resolves the
//! leaves it has produced through the [`UrlCache`].

use crate::catalog::{CatalogClient, CatalogItem};
use crate::media::{leaf_identifier, parse_leaf_identifier, Category, MediaKind, NavigationPath};
use crate::url_cache::UrlCache;
use crate::{DOMAIN, TITLE};
use std::sync::Arc;
use tracing::{debug, warn};
use zxsource::{
    async_trait, content_type, BrowseMedia, MediaClass, MediaSource, MediaSourceError, PlayMedia,
    Result,
};

/// ZXArt media source
///
/// Holds the shared catalog client and the URL cache. Listings and
/// resolutions may run concurrently; the cache lock is never held across
/// a catalog call.
pub struct ZxArtMediaSource<C> {
    client: Arc<C>,
    /// Title of the config entry, shown on the root node
    title: String,
    urls: UrlCache,
}

impl<C: CatalogClient> ZxArtMediaSource<C> {
    pub fn new(client: Arc<C>, title: impl Into<String>) -> Self {
        Self {
            client,
            title: title.into(),
            urls: UrlCache::new(),
        }
    }

    /// Title shown on the root node
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn url_cache(&self) -> &UrlCache {
        &self.urls
    }

    /// Lists the children of `path`
    ///
    /// - `""`: the `tune` and `image` folders
    /// - `"<kind>"`: the five category folders of that kind
    /// - `"<kind>/<category>"`: the playable items of that category
    /// - anything else: nothing
    ///
    /// # Errors
    ///
    /// Only a category listing can fail, with the catalog client's error
    /// wrapped in [`MediaSourceError::Remote`].
    pub async fn list(&self, path: &str) -> Result<Vec<BrowseMedia>> {
        match NavigationPath::parse(path) {
            NavigationPath::Root => Ok(MediaKind::ALL.iter().map(kind_folder).collect()),
            NavigationPath::Kind(kind) => Ok(Category::ALL
                .iter()
                .map(|category| category_folder(kind, *category))
                .collect()),
            NavigationPath::Category(kind, category) => self.list_category(kind, category).await,
            NavigationPath::Unknown => {
                debug!(path, "Ignoring unknown browse path");
                Ok(Vec::new())
            }
        }
    }

    /// Resolves a leaf identifier produced by a previous listing
    ///
    /// # Errors
    ///
    /// [`MediaSourceError::Unresolvable`] if the identifier is malformed or
    /// was never listed by this instance.
    pub async fn resolve(&self, identifier: &str) -> Result<PlayMedia> {
        let Some((kind, id)) = parse_leaf_identifier(identifier) else {
            warn!(identifier, "Malformed ZXArt media identifier");
            return Err(MediaSourceError::Unresolvable(identifier.to_string()));
        };

        match self.urls.get(kind, id).await {
            Some(url) => Ok(PlayMedia::new(url, kind.mime_type())),
            None => {
                warn!(identifier, "ZXArt media is not available");
                Err(MediaSourceError::Unresolvable(identifier.to_string()))
            }
        }
    }

    async fn list_category(&self, kind: MediaKind, category: Category) -> Result<Vec<BrowseMedia>> {
        debug!(
            kind = %kind,
            category = category.as_str(),
            limit = category.limit(),
            "Fetching ZXArt catalog"
        );

        let items = self
            .client
            .fetch(kind.entity(), category.order(), category.limit())
            .await
            .map_err(MediaSourceError::remote)?;

        let (nodes, urls) = build_leaves(kind, items);
        self.urls.extend(kind, urls).await;

        let cached = self.urls.len().await;
        debug!(
            kind = %kind,
            category = category.as_str(),
            leaves = nodes.len(),
            cached,
            "Listed ZXArt category"
        );

        Ok(nodes)
    }
}

/// Converts catalog items into leaves and the `(id, url)` pairs to cache
///
/// Items without a media URL are dropped.
fn build_leaves(
    kind: MediaKind,
    items: Vec<CatalogItem>,
) -> (Vec<BrowseMedia>, Vec<(String, String)>) {
    let mut nodes = Vec::with_capacity(items.len());
    let mut urls = Vec::with_capacity(items.len());

    for item in items {
        let Some(url) = item.media_url else {
            continue;
        };
        let id = item.id.to_string();
        let thumbnail = kind.has_thumbnail().then(|| url.clone());

        nodes.push(BrowseMedia::leaf(
            DOMAIN,
            leaf_identifier(kind, &id),
            kind.media_class(),
            kind.mime_type(),
            item.title,
            thumbnail,
        ));
        urls.push((id, url));
    }

    (nodes, urls)
}

fn kind_folder(kind: &MediaKind) -> BrowseMedia {
    BrowseMedia::folder(DOMAIN, kind.as_str(), kind.content_type(), kind.title())
}

fn category_folder(kind: MediaKind, category: Category) -> BrowseMedia {
    BrowseMedia::folder(
        DOMAIN,
        format!("{}/{}", kind, category.as_str()),
        kind.content_type(),
        category.title(),
    )
}

impl<C> std::fmt::Debug for ZxArtMediaSource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZxArtMediaSource")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: CatalogClient> MediaSource for ZxArtMediaSource<C> {
    fn domain(&self) -> &str {
        DOMAIN
    }

    fn name(&self) -> &str {
        TITLE
    }

    async fn browse_media(&self, identifier: &str) -> Result<BrowseMedia> {
        let children = self.list(identifier).await?;

        Ok(BrowseMedia {
            domain: DOMAIN.to_string(),
            identifier: None,
            media_class: MediaClass::Directory,
            media_content_type: content_type::PLAYLIST.to_string(),
            title: self.title.clone(),
            can_play: false,
            can_expand: true,
            thumbnail: None,
            children_media_class: Some(MediaClass::Directory),
            children,
        })
    }

    async fn resolve_media(&self, identifier: &str) -> Result<PlayMedia> {
        self.resolve(identifier).await
    }
}
