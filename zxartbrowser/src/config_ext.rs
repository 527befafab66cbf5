//! Extension for storing ZXArt settings in zxconfig
//!
//! Adds to [`zxconfig::Config`] the source on/off switch and the record of
//! the single config entry, under `sources.zxart_browser`.
//!
//! # Example
//!
//! ```no_run
//! use zxconfig::Config;
//! use zxartbrowser::ZxArtConfigExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load_config("")?;
//!
//! if !config.get_zxart_enabled()? {
//!     println!("ZXArt browser is disabled");
//!     return Ok(());
//! }
//!
//! if let Some(entry) = config.get_zxart_entry()? {
//!     println!("Configured as {}", entry.title);
//! }
//! # Ok(())
//! # }
//! ```

use crate::entry::EntryRecord;
use anyhow::Result;
use serde_yaml::Value;
use zxconfig::Config;

const ENABLED_PATH: &[&str] = &["sources", "zxart_browser", "enabled"];
const ENTRY_PATH: &[&str] = &["sources", "zxart_browser", "entry"];

/// Extension trait for ZXArt settings
///
/// Getters persist the default value when the key does not exist yet.
pub trait ZxArtConfigExt {
    /// `true` unless explicitly disabled
    fn get_zxart_enabled(&self) -> Result<bool>;

    fn set_zxart_enabled(&self, enabled: bool) -> Result<()>;

    /// The stored config entry, if the config flow has completed
    fn get_zxart_entry(&self) -> Result<Option<EntryRecord>>;

    fn set_zxart_entry(&self, entry: &EntryRecord) -> Result<()>;

    /// Forgets the stored entry so the flow can run again
    fn clear_zxart_entry(&self) -> Result<()>;
}

impl ZxArtConfigExt for Config {
    fn get_zxart_enabled(&self) -> Result<bool> {
        match self.get_value(ENABLED_PATH)? {
            Some(Value::Bool(b)) => Ok(b),
            _ => {
                self.set_zxart_enabled(true)?;
                Ok(true)
            }
        }
    }

    fn set_zxart_enabled(&self, enabled: bool) -> Result<()> {
        self.set_value(ENABLED_PATH, Value::Bool(enabled))
    }

    fn get_zxart_entry(&self) -> Result<Option<EntryRecord>> {
        match self.get_value(ENTRY_PATH)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_yaml::from_value(value)?)),
        }
    }

    fn set_zxart_entry(&self, entry: &EntryRecord) -> Result<()> {
        let value = serde_yaml::to_value(entry)?;
        self.set_value(ENTRY_PATH, value)
    }

    fn clear_zxart_entry(&self) -> Result<()> {
        self.set_value(ENTRY_PATH, Value::Null)
    }
}
