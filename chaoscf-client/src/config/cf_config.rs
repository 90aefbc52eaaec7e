use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The state file the `cf` CLI keeps after `cf login`
///
/// Only the fields needed to reach the API are typed, the others are ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CfConfig {
    /// API URL the CLI is logged into
    #[serde(rename = "Target", default)]
    pub target: Option<String>,
    /// Access token, prefixed by its type, e.g. `bearer eyJ...`
    #[serde(rename = "AccessToken", default)]
    pub access_token: Option<String>,
    /// Whether `cf login --skip-ssl-validation` was used
    #[serde(rename = "SSLDisabled", default)]
    pub ssl_disabled: bool,
    /// Targeted organization
    #[serde(rename = "OrganizationFields", default)]
    pub organization_fields: Option<EntityFields>,
    /// Targeted space
    #[serde(rename = "SpaceFields", default)]
    pub space_fields: Option<EntityFields>,
}

/// Identity of the organization or space targeted by the CLI
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct EntityFields {
    /// Its GUID
    #[serde(rename = "GUID", default)]
    pub guid: String,
    /// Its name
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl CfConfig {
    /// `$CF_HOME/.cf/config.json`, or `~/.cf/config.json` when `CF_HOME` is not set
    pub fn default_path() -> Option<PathBuf> {
        let base = match std::env::var_os("CF_HOME") {
            Some(cf_home) if !cf_home.is_empty() => PathBuf::from(cf_home),
            _ => home::home_dir()?,
        };
        Some(base.join(".cf").join("config.json"))
    }

    /// Read the config file of the local `cf` CLI
    pub fn from_cf_home() -> Result<Self, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoHomeDirectory)?;
        Self::read_from(path)
    }

    /// Read and parse a `cf` CLI config file
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ConfigError::ReadCfConfig {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_slice(&data).map_err(|source| ConfigError::ParseCfConfig {
            path: path.to_owned(),
            source,
        })
    }

    /// Name of the targeted organization, if any
    pub fn targeted_org(&self) -> Option<&str> {
        self.organization_fields
            .as_ref()
            .map(|o| o.name.as_str())
            .filter(|n| !n.is_empty())
    }

    /// Name of the targeted space, if any
    pub fn targeted_space(&self) -> Option<&str> {
        self.space_fields
            .as_ref()
            .map(|s| s.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeted_org_and_space() {
        let cf: CfConfig = serde_json::from_str(
            r#"{
                "Target": "https://api.sys.example.com",
                "OrganizationFields": {"GUID": "o-1", "Name": "pcfdev-org"},
                "SpaceFields": {"GUID": "", "Name": ""}
            }"#,
        )
        .unwrap();
        assert_eq!(cf.targeted_org(), Some("pcfdev-org"));
        assert_eq!(cf.targeted_space(), None);
        assert!(!cf.ssl_disabled);
    }
}
