//! Config entry lifecycle
//!
//! A config entry is what the config flow creates. Setting it up attaches
//! the shared catalog client as runtime data; unloading releases it. The
//! integration sets up no entities: the media source is its only product.

use crate::catalog::CatalogClient;
use crate::config_ext::ZxArtConfigExt;
use crate::error::Result;
use crate::source::ZxArtMediaSource;
use crate::{DOMAIN, TITLE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;
use zxconfig::Config;
use zxsource::{MediaSourceError, SourceRegistry};

/// Persisted part of a config entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub entry_id: String,
    pub title: String,
    pub version: u32,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl EntryRecord {
    /// New record with a fresh id and empty data
    pub fn new(title: impl Into<String>, version: u32) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            version,
            data: Map::new(),
        }
    }
}

/// A config entry with its runtime data
pub struct ConfigEntry<C> {
    pub record: EntryRecord,
    runtime_data: Option<Arc<C>>,
}

impl<C> ConfigEntry<C> {
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_record(EntryRecord::new(title, crate::config_flow::FLOW_VERSION))
    }

    pub fn from_record(record: EntryRecord) -> Self {
        Self {
            record,
            runtime_data: None,
        }
    }

    pub fn entry_id(&self) -> &str {
        &self.record.entry_id
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    /// The catalog client attached by [`setup_entry`]
    pub fn runtime_data(&self) -> Option<&Arc<C>> {
        self.runtime_data.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.runtime_data.is_some()
    }
}

impl<C> std::fmt::Debug for ConfigEntry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("record", &self.record)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Sets up an entry by attaching the shared catalog client
pub fn setup_entry<C>(entry: &mut ConfigEntry<C>, client: Arc<C>) -> bool {
    entry.runtime_data = Some(client);
    info!(entry_id = %entry.entry_id(), title = %entry.title(), "ZXArt entry set up");
    true
}

/// Unloads an entry, releasing its catalog client
pub fn unload_entry<C>(entry: &mut ConfigEntry<C>) -> bool {
    entry.runtime_data = None;
    info!(entry_id = %entry.entry_id(), "ZXArt entry unloaded");
    true
}

/// Builds the media source from the single config entry
///
/// # Errors
///
/// [`MediaSourceError::NotReady`] if there is no entry or the entry has
/// not been set up.
pub fn get_media_source<C: CatalogClient>(
    entries: &[ConfigEntry<C>],
) -> zxsource::Result<ZxArtMediaSource<C>> {
    // Only a single entry is supported
    let entry = entries
        .first()
        .ok_or_else(|| MediaSourceError::NotReady(format!("{} has no config entry", TITLE)))?;

    let client = entry.runtime_data().ok_or_else(|| {
        MediaSourceError::NotReady(format!("config entry {} is not set up", entry.entry_id()))
    })?;

    Ok(ZxArtMediaSource::new(client.clone(), entry.title()))
}

/// Registers the media source with the host, unless disabled in config
///
/// Returns whether the source was registered.
pub async fn register_media_source<C>(
    registry: &SourceRegistry,
    config: &Config,
    entries: &[ConfigEntry<C>],
) -> Result<bool>
where
    C: CatalogClient + 'static,
{
    if !config.get_zxart_enabled()? {
        info!(domain = DOMAIN, "ZXArt browser is disabled");
        return Ok(false);
    }

    let source = get_media_source(entries)?;
    registry.register(Arc::new(source)).await;
    Ok(true)
}
