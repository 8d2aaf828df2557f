//! Loading `rackready.toml`.
//!
//! Every field is optional; anything missing falls back to the standard
//! bar, the 5 lb rounding policy and the standard inventory. Command-line
//! flags override the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    bar::Bar, inventory::Inventory, plate::Plate, rack_error::ConfigError, rounding::Rounding,
    weight::Weight,
};

pub const CONFIG_FILE_NAME: &str = "rackready.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RackConfig {
    pub bar_weight: Option<Weight>,
    pub rounding_increment: Option<Weight>,
    /// Restricts planning to these plates.
    pub denominations: Option<Vec<Plate>>,
    pub inventory: Option<Inventory>,
}

impl RackConfig {
    ///
    /// # Errors
    /// If the file cannot be read or is not valid config TOML.
    ///
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `rackready.toml` from `dir` if present, otherwise the defaults.
    ///
    /// # Errors
    /// If the file exists but cannot be loaded.
    ///
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path: PathBuf = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            debug!(dir = %dir.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn bar(&self) -> Bar {
        self.bar_weight.map(Bar::new).unwrap_or_default()
    }

    #[must_use]
    pub fn rounding(&self) -> Rounding {
        self.rounding_increment
            .map(Rounding::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn inventory(&self) -> Inventory {
        self.inventory.clone().unwrap_or_else(Inventory::standard)
    }
}
