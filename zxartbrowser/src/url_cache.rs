//! Process-lifetime cache of listed media URLs
//!
//! Filled by every category listing and read by resolve. Entries are never
//! evicted; the catalog limits keep it under
//! `2 kinds × 5 categories × CATEGORY_LIMIT` distinct items.

use crate::media::MediaKind;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Map from `(kind, remote id)` to the remote media URL
#[derive(Debug, Default)]
pub struct UrlCache {
    urls: RwLock<HashMap<(MediaKind, String), String>>,
}

impl UrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one URL, replacing any previous one for the same item
    pub async fn insert(&self, kind: MediaKind, id: impl Into<String>, url: impl Into<String>) {
        self.urls.write().await.insert((kind, id.into()), url.into());
    }

    /// Records a batch of `(id, url)` pairs under a single write lock
    pub async fn extend<I>(&self, kind: MediaKind, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut urls = self.urls.write().await;
        urls.extend(entries.into_iter().map(|(id, url)| ((kind, id), url)));
    }

    pub async fn get(&self, kind: MediaKind, id: &str) -> Option<String> {
        self.urls.read().await.get(&(kind, id.to_string())).cloned()
    }

    pub async fn contains(&self, kind: MediaKind, id: &str) -> bool {
        self.urls.read().await.contains_key(&(kind, id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.urls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.urls.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        tokio_test::block_on(async {
            let cache = UrlCache::new();
            assert!(cache.is_empty().await);

            cache.insert(MediaKind::Tune, "1", "http://a/1.mp3").await;
            assert_eq!(
                cache.get(MediaKind::Tune, "1").await.as_deref(),
                Some("http://a/1.mp3")
            );
            assert_eq!(cache.len().await, 1);
        });
    }

    #[test]
    fn test_keys_are_per_kind() {
        tokio_test::block_on(async {
            let cache = UrlCache::new();
            cache.insert(MediaKind::Tune, "5", "http://a/5.mp3").await;

            assert!(cache.contains(MediaKind::Tune, "5").await);
            assert!(!cache.contains(MediaKind::Image, "5").await);
        });
    }

    #[test]
    fn test_extend_last_writer_wins() {
        tokio_test::block_on(async {
            let cache = UrlCache::new();
            cache.insert(MediaKind::Image, "9", "http://old").await;
            cache
                .extend(
                    MediaKind::Image,
                    vec![
                        ("9".to_string(), "http://new".to_string()),
                        ("10".to_string(), "http://ten".to_string()),
                    ],
                )
                .await;

            assert_eq!(cache.get(MediaKind::Image, "9").await.as_deref(), Some("http://new"));
            assert_eq!(cache.len().await, 2);
        });
    }
}
