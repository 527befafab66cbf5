//! Setup wizard for the ZXArt browser
//!
//! The flow has a single step with no fields: confirming it creates the
//! entry. Onboarding creates the entry without asking. Only one entry may
//! exist; once it is stored every step aborts.

use crate::config_ext::ZxArtConfigExt;
use crate::entry::EntryRecord;
use crate::error::Result;
use crate::TITLE;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};
use zxconfig::Config;

/// Version stamped on created entries
pub const FLOW_VERSION: u32 = 1;

/// Step id of the user step
pub const STEP_USER: &str = "user";

/// Abort reason when an entry already exists
pub const ABORT_SINGLE_INSTANCE: &str = "single_instance_allowed";

/// Outcome of a flow step
#[derive(Debug, Clone, PartialEq)]
pub enum FlowResult {
    /// Ask the user to confirm the step
    ShowForm { step_id: String },
    /// The entry was created and stored
    CreateEntry(EntryRecord),
    Abort { reason: String },
}

/// Config flow handler
#[derive(Debug, Clone)]
pub struct ConfigFlow {
    config: Arc<Config>,
}

impl ConfigFlow {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Handles the user step
    ///
    /// Without input the (empty) form is shown; any submitted input
    /// creates the entry.
    pub fn step_user(&self, user_input: Option<&Map<String, Value>>) -> Result<FlowResult> {
        if let Some(abort) = self.abort_if_configured()? {
            return Ok(abort);
        }

        match user_input {
            Some(_) => self.create_entry(),
            None => {
                debug!(step_id = STEP_USER, "Showing ZXArt setup form");
                Ok(FlowResult::ShowForm {
                    step_id: STEP_USER.to_string(),
                })
            }
        }
    }

    /// Handles a flow started by onboarding
    pub fn step_onboarding(&self) -> Result<FlowResult> {
        if let Some(abort) = self.abort_if_configured()? {
            return Ok(abort);
        }
        self.create_entry()
    }

    fn abort_if_configured(&self) -> Result<Option<FlowResult>> {
        if self.config.get_zxart_entry()?.is_some() {
            debug!("ZXArt browser already configured");
            return Ok(Some(FlowResult::Abort {
                reason: ABORT_SINGLE_INSTANCE.to_string(),
            }));
        }
        Ok(None)
    }

    fn create_entry(&self) -> Result<FlowResult> {
        let record = EntryRecord::new(TITLE, FLOW_VERSION);
        self.config.set_zxart_entry(&record)?;
        info!(entry_id = %record.entry_id, "Created ZXArt config entry");
        Ok(FlowResult::CreateEntry(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> (tempfile::TempDir, ConfigFlow) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, ConfigFlow::new(Arc::new(config)))
    }

    #[test]
    fn test_user_step_shows_form_without_input() {
        let (_dir, flow) = flow();
        assert_eq!(
            flow.step_user(None).unwrap(),
            FlowResult::ShowForm {
                step_id: "user".to_string()
            }
        );
    }

    #[test]
    fn test_user_step_creates_entry_with_empty_data() {
        let (_dir, flow) = flow();
        let FlowResult::CreateEntry(record) = flow.step_user(Some(&Map::new())).unwrap() else {
            panic!("expected entry creation");
        };

        assert_eq!(record.title, "ZXArt Browser");
        assert_eq!(record.version, 1);
        assert!(record.data.is_empty());
        assert_eq!(flow.config.get_zxart_entry().unwrap(), Some(record));
    }

    #[test]
    fn test_onboarding_creates_entry() {
        let (_dir, flow) = flow();
        assert!(matches!(
            flow.step_onboarding().unwrap(),
            FlowResult::CreateEntry(_)
        ));
    }

    #[test]
    fn test_single_instance() {
        let (_dir, flow) = flow();
        flow.step_onboarding().unwrap();

        let abort = FlowResult::Abort {
            reason: "single_instance_allowed".to_string(),
        };
        assert_eq!(flow.step_user(None).unwrap(), abort);
        assert_eq!(flow.step_user(Some(&Map::new())).unwrap(), abort);
        assert_eq!(flow.step_onboarding().unwrap(), abort);
    }
}
