//! Seam to the ZXArt catalog API
//!
//! The browser only needs one query: "give me up to `limit` entities of
//! this type in this order". Whatever performs the HTTP call implements
//! [`CatalogClient`]; its error type is passed through to the caller of a
//! listing without translation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Catalog entity types the browser queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Tune,
    Image,
}

/// Ranking applied by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    MostRecent,
    TopRated,
    TopPlaced,
    MostCommented,
    MostPlayed,
}

/// One entity returned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    /// Direct URL of the media file, absent for items without one
    #[serde(default)]
    pub media_url: Option<String>,
}

impl CatalogItem {
    pub fn new(id: u64, title: impl Into<String>, media_url: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            media_url,
        }
    }
}

/// ZXArt catalog client
///
/// Implementations must be shareable across tasks: one client handle is
/// created at entry setup and used by every listing.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches up to `limit` entities of type `entity` ranked by `order`
    async fn fetch(
        &self,
        entity: Entity,
        order: Order,
        limit: usize,
    ) -> std::result::Result<Vec<CatalogItem>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_without_url_deserializes() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 12, "title": "Demo"}"#).unwrap();
        assert_eq!(item, CatalogItem::new(12, "Demo", None));
    }

    #[test]
    fn test_order_serialization() {
        assert_eq!(
            serde_json::to_string(&Order::MostCommented).unwrap(),
            "\"most_commented\""
        );
        assert_eq!(serde_json::to_string(&Entity::Tune).unwrap(), "\"tune\"");
    }
}
