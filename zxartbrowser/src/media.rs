//! Media kinds, browse categories and navigation paths
//!
//! The browse tree is fixed:
//!
//! ```text
//! (root)
//! ├── tune
//! │   ├── tune/recent      Most Recent
//! │   ├── tune/rated       Top Rated
//! │   ├── tune/placed      Top Placed
//! │   ├── tune/commented   Most Commented
//! │   └── tune/played      Most Played
//! └── image
//!     └── image/...        (same five categories)
//! ```

use crate::catalog::{Entity, Order};
use zxsource::{content_type, MediaClass};

/// Maximum number of items fetched for one category
pub const CATEGORY_LIMIT: usize = 250;

/// Top-level media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Tune,
    Image,
}

impl MediaKind {
    /// Root listing order
    pub const ALL: [MediaKind; 2] = [MediaKind::Tune, MediaKind::Image];

    /// Path segment and identifier prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Tune => "tune",
            MediaKind::Image => "image",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "tune" => Some(MediaKind::Tune),
            "image" => Some(MediaKind::Image),
            _ => None,
        }
    }

    /// Folder title at the root
    pub fn title(&self) -> &'static str {
        match self {
            MediaKind::Tune => "Tunes",
            MediaKind::Image => "Images",
        }
    }

    pub fn entity(&self) -> Entity {
        match self {
            MediaKind::Tune => Entity::Tune,
            MediaKind::Image => Entity::Image,
        }
    }

    /// MIME type handed to the player
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Tune => "audio/mpeg",
            MediaKind::Image => "image/png",
        }
    }

    /// Class of the leaves of this kind
    pub fn media_class(&self) -> MediaClass {
        match self {
            MediaKind::Tune => MediaClass::Music,
            MediaKind::Image => MediaClass::Image,
        }
    }

    /// Content type of the folders of this kind
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Tune => content_type::MUSIC,
            MediaKind::Image => content_type::IMAGE,
        }
    }

    /// Images use their own URL as thumbnail, tunes have none
    pub fn has_thumbnail(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked view of one media kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Recent,
    Rated,
    Placed,
    Commented,
    Played,
}

impl Category {
    /// Listing order under a media kind folder
    pub const ALL: [Category; 5] = [
        Category::Recent,
        Category::Rated,
        Category::Placed,
        Category::Commented,
        Category::Played,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Recent => "recent",
            Category::Rated => "rated",
            Category::Placed => "placed",
            Category::Commented => "commented",
            Category::Played => "played",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Recent => "Most Recent",
            Category::Rated => "Top Rated",
            Category::Placed => "Top Placed",
            Category::Commented => "Most Commented",
            Category::Played => "Most Played",
        }
    }

    pub fn order(&self) -> Order {
        match self {
            Category::Recent => Order::MostRecent,
            Category::Rated => Order::TopRated,
            Category::Placed => Order::TopPlaced,
            Category::Commented => Order::MostCommented,
            Category::Played => Order::MostPlayed,
        }
    }

    /// Same for every category
    pub fn limit(&self) -> usize {
        CATEGORY_LIMIT
    }
}

/// A parsed browse identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPath {
    /// Empty identifier
    Root,
    /// `"<kind>"`
    Kind(MediaKind),
    /// `"<kind>/<category>"`
    Category(MediaKind, Category),
    /// Anything else
    Unknown,
}

impl NavigationPath {
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return NavigationPath::Root;
        }

        match path.split_once('/') {
            None => MediaKind::from_slug(path)
                .map(NavigationPath::Kind)
                .unwrap_or(NavigationPath::Unknown),
            Some((kind, category)) => {
                match (MediaKind::from_slug(kind), Category::from_slug(category)) {
                    (Some(kind), Some(category)) => NavigationPath::Category(kind, category),
                    _ => NavigationPath::Unknown,
                }
            }
        }
    }
}

/// Splits a leaf identifier `"<kind>/<remote id>"`
///
/// Returns `None` for an unknown kind or an empty remote id.
pub fn parse_leaf_identifier(identifier: &str) -> Option<(MediaKind, &str)> {
    let (kind, id) = identifier.split_once('/')?;
    let kind = MediaKind::from_slug(kind)?;
    if id.is_empty() {
        return None;
    }
    Some((kind, id))
}

/// Builds a leaf identifier
pub fn leaf_identifier(kind: MediaKind, id: &str) -> String {
    format!("{}/{}", kind, id)
}
