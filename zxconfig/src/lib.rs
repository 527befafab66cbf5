//! # ZXArt Browser configuration
//!
//! The configuration is a YAML tree built from the embedded `zxart.yaml`
//! defaults, overlaid with the user's `config.yaml` and then with
//! `ZXART_CONFIG__*` environment variables. Keys are case-insensitive.
//! Every change is written back to `config.yaml`.
//!
//! The workspace stores two sections:
//! - `host.logger`: `min_level` and `enable_console`, read by [`init_logging`]
//! - `sources.zxart_browser`: the source switch and the config entry record
//!
//! ## Usage
//!
//! ```no_run
//! use zxconfig::Config;
//!
//! let config = Config::load_config("")?;
//!
//! let level = config.get_log_min_level()?;
//! config.set_log_enable_console(false)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::{
    env,
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, info, warn};

pub mod logging;

pub use logging::init_logging;

const DEFAULT_CONFIG: &str = include_str!("zxart.yaml");
const CONFIG_FILE: &str = "config.yaml";

const ENV_CONFIG_DIR: &str = "ZXART_CONFIG";
const ENV_PREFIX: &str = "ZXART_CONFIG__";
const DEFAULT_CONFIG_DIR: &str = ".zxart";

const LOG_MIN_LEVEL: &[&str] = &["host", "logger", "min_level"];
const LOG_ENABLE_CONSOLE: &[&str] = &["host", "logger", "enable_console"];
const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";
const DEFAULT_LOG_ENABLE_CONSOLE: bool = true;

/// Configuration manager
///
/// Holds the merged YAML tree behind a mutex and writes it back to
/// `config.yaml` on every change.
///
/// # Examples
///
/// ```no_run
/// use zxconfig::Config;
///
/// let config = Config::load_config("/tmp/zxart")?;
/// println!("log level: {}", config.get_log_min_level()?);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    data: Mutex<Value>,
}

impl Config {
    /// Loads the configuration stored in `directory`
    ///
    /// When `directory` is empty it is looked up in `$ZXART_CONFIG`, then
    /// `./.zxart`, then `~/.zxart`. The directory is created if missing.
    /// The merged tree is saved right away, so an unwritable directory fails
    /// here rather than on the first change.
    pub fn load_config(directory: &str) -> Result<Self> {
        let dir = locate_dir(directory);
        fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create config directory {}", dir.display()))?;

        let path = dir.join(CONFIG_FILE);
        info!(config_file = %path.display(), "Loading configuration");

        let mut tree = lowercase_keys(serde_yaml::from_str(DEFAULT_CONFIG)?);
        if let Some(user) = read_user_file(&path)? {
            overlay(&mut tree, lowercase_keys(user));
        }

        for (segments, value) in env_overrides(env::vars_os()) {
            let key = segments.join(".");
            let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
            match insert(&mut tree, &segments, value) {
                Ok(()) => debug!(key = %key, "Applied environment override"),
                Err(e) => warn!(key = %key, error = %e, "Ignoring environment override"),
            }
        }

        let config = Config {
            path,
            data: Mutex::new(tree),
        };
        config.save()?;
        Ok(config)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Value>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("configuration lock poisoned"))
    }

    /// Writes the current tree to `config.yaml`
    pub fn save(&self) -> Result<()> {
        let yaml = serde_yaml::to_string(&*self.lock()?)?;
        fs::write(&self.path, yaml)
            .with_context(|| format!("cannot write {}", self.path.display()))
    }

    /// Reads the value at `path` (e.g. `&["host", "logger", "min_level"]`)
    ///
    /// Returns `Ok(None)` when a key along the path is missing, and an error
    /// when an intermediate node is not a mapping.
    pub fn get_value(&self, path: &[&str]) -> Result<Option<Value>> {
        lookup(&*self.lock()?, path)
    }

    /// Writes `value` at `path` and saves
    ///
    /// Missing intermediate mappings are created.
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        insert(&mut *self.lock()?, path, value)?;
        self.save()
    }

    /// Minimum log level name, `INFO` when unset
    pub fn get_log_min_level(&self) -> Result<String> {
        Ok(match self.get_value(LOG_MIN_LEVEL)? {
            Some(Value::String(level)) => level,
            _ => DEFAULT_LOG_MIN_LEVEL.to_string(),
        })
    }

    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(LOG_MIN_LEVEL, Value::String(level))
    }

    /// Whether logs go to the console, `true` when unset
    pub fn get_log_enable_console(&self) -> Result<bool> {
        Ok(match self.get_value(LOG_ENABLE_CONSOLE)? {
            Some(Value::Bool(enabled)) => enabled,
            _ => DEFAULT_LOG_ENABLE_CONSOLE,
        })
    }

    pub fn set_log_enable_console(&self, enabled: bool) -> Result<()> {
        self.set_value(LOG_ENABLE_CONSOLE, Value::Bool(enabled))
    }
}

fn locate_dir(directory: &str) -> PathBuf {
    if !directory.is_empty() {
        return PathBuf::from(directory);
    }

    if let Some(dir) = env::var_os(ENV_CONFIG_DIR) {
        info!(env_var = ENV_CONFIG_DIR, "Config directory taken from environment");
        return PathBuf::from(dir);
    }

    let local = PathBuf::from(DEFAULT_CONFIG_DIR);
    if local.is_dir() {
        return local;
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_DIR))
        .filter(|home| home.is_dir())
        .unwrap_or(local)
}

/// Parses `config.yaml`, `None` if it does not exist yet or is empty
fn read_user_file(path: &Path) -> Result<Option<Value>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let value: Value = serde_yaml::from_str(&text)
                .with_context(|| format!("invalid YAML in {}", path.display()))?;
            Ok((!value.is_null()).then_some(value))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(config_file = %path.display(), "No config file yet, using defaults");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
    }
}

/// Collects `ZXART_CONFIG__SECTION__KEY=value` overrides
///
/// Each override is returned as its lowercased key path and its value parsed
/// as YAML, falling back to a plain string. Variables that are not valid
/// Unicode are skipped.
fn env_overrides(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> Vec<(Vec<String>, Value)> {
    vars.into_iter()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            let rest = key.strip_prefix(ENV_PREFIX)?;
            let Ok(value) = value.into_string() else {
                warn!(variable = %key, "Skipping non-Unicode environment override");
                return None;
            };
            let segments = rest.split("__").map(str::to_lowercase).collect();
            let value = serde_yaml::from_str::<Value>(&value).unwrap_or(Value::String(value));
            Some((segments, value))
        })
        .collect()
}

fn key(segment: &str) -> Result<Value> {
    if segment.is_empty() {
        bail!("empty key in configuration path");
    }
    Ok(Value::String(segment.to_lowercase()))
}

fn lookup(tree: &Value, path: &[&str]) -> Result<Option<Value>> {
    let mut node = tree;
    for (depth, segment) in path.iter().enumerate() {
        let Some(map) = node.as_mapping() else {
            bail!("`{}` is not a mapping", path[..depth].join("."));
        };
        match map.get(&key(segment)?) {
            Some(next) => node = next,
            None => return Ok(None),
        }
    }
    Ok(Some(node.clone()))
}

fn insert(tree: &mut Value, path: &[&str], value: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        bail!("empty configuration path");
    };

    let mut node = tree;
    for (depth, segment) in parents.iter().enumerate() {
        let name = key(segment)?;
        node = node
            .as_mapping_mut()
            .ok_or_else(|| anyhow!("`{}` is not a mapping", path[..depth].join(".")))?
            .entry(name)
            .or_insert(Value::Mapping(Mapping::new()));
    }

    let map = node
        .as_mapping_mut()
        .ok_or_else(|| anyhow!("`{}` is not a mapping", parents.join(".")))?;
    map.insert(key(last)?, value);
    Ok(())
}

/// Overlays `top` onto `base`: mappings merge key by key, anything else
/// replaces the base value.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Mapping(base), Value::Mapping(top)) => {
            for (k, v) in top {
                match base.get_mut(&k) {
                    Some(slot) => overlay(slot, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lowercase_keys(v))
                })
                .collect(),
        ),
        other => other,
    }
}
