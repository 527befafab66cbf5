//! ZXArt browser media source
//!
//! This crate exposes the ZXArt catalog (ZX Spectrum tunes and images) to
//! the host as a browsable media source.
//!
//! # Features
//!
//! - **Fixed browse tree**: `tune` and `image` folders, each with five
//!   ranked views (most recent, top rated, top placed, most commented,
//!   most played) of up to 250 items.
//! - **URL cache**: every listed item's URL is remembered so a later
//!   play request resolves without querying the catalog again.
//! - **Config flow**: single-instance, no-input setup wizard.
//! - **Entry lifecycle**: setup stores the shared catalog client, unload
//!   releases it.
//!
//! The catalog itself is reached through the [`CatalogClient`] trait; the
//! HTTP client is supplied by the host.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use zxartbrowser::{setup_entry, get_media_source, ConfigEntry, TITLE};
//! use zxsource::MediaSource;
//!
//! let mut entry = ConfigEntry::new(TITLE);
//! setup_entry(&mut entry, Arc::new(my_client));
//!
//! let source = get_media_source(std::slice::from_ref(&entry))?;
//! let folders = source.list("tune").await?;
//! let leaves = source.list("tune/recent").await?;
//! let play = source.resolve_media(leaves[0].identifier.as_deref().unwrap()).await?;
//! ```

pub mod catalog;
pub mod config_ext;
pub mod config_flow;
pub mod entry;
pub mod error;
pub mod media;
pub mod source;
pub mod url_cache;

/// Domain under which the source is registered
pub const DOMAIN: &str = "zxart_browser";

/// Default title of the config entry
pub const TITLE: &str = "ZXArt Browser";

pub use catalog::{CatalogClient, CatalogItem, Entity, Order};
pub use config_ext::ZxArtConfigExt;
pub use config_flow::{ConfigFlow, FlowResult};
pub use entry::{
    get_media_source, register_media_source, setup_entry, unload_entry, ConfigEntry, EntryRecord,
};
pub use error::{Error, Result};
pub use media::{Category, MediaKind, NavigationPath, CATEGORY_LIMIT};
pub use source::ZxArtMediaSource;
pub use url_cache::UrlCache;
