use std::path::Path;

use herdbook_types::ScanBounds;
use serde::{Deserialize, Serialize};

/// Errors from loading or rendering a [`LedgerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Behavioural switches for the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// When `true`, `changeCowOwner` loads the claimed previous owner and
    /// rejects the transfer unless its identifier matches the cow's current
    /// owner snapshot. When `false` the claim is accepted unchecked, so any
    /// caller can move any cow.
    pub enforce_transfer_hint: bool,
    /// Discriminator window used by `queryAllCows` / `queryAllOwners`.
    pub listing: ScanBounds,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enforce_transfer_hint: false,
            listing: ScanBounds::default(),
        }
    }
}

impl LedgerConfig {
    /// Accept transfer hints unchecked, as historic deployments did.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Check transfer hints against the current owner.
    pub fn strict() -> Self {
        Self {
            enforce_transfer_hint: true,
            ..Default::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}
