use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

pub const DEFAULT_FLAG: &str = "/flags/default.png";
pub const DEFAULT_PHOTO: &str = "/players/default.png";

/// Image references for teams and players. Lookups never fail.
pub trait AssetLookup {
    fn flag_for(&self, team: &str) -> &str;

    fn photo_for(&self, player: &str) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    #[serde(default)]
    flags: HashMap<String, String>,
    #[serde(default)]
    photos: HashMap<String, String>,
    #[serde(default = "default_flag")]
    default_flag: String,
    #[serde(default = "default_photo")]
    default_photo: String,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            flags: HashMap::new(),
            photos: HashMap::new(),
            default_flag: default_flag(),
            default_photo: default_photo(),
        }
    }
}

impl AssetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from the `{ name: path }` flag and photo documents.
    pub fn from_json(flags_json: &str, photos_json: &str) -> VizResult<Self> {
        let flags = serde_json::from_str(flags_json)
            .map_err(|e| VizError::DataProvider(format!("failed to parse flag map: {e}")))?;
        let photos = serde_json::from_str(photos_json)
            .map_err(|e| VizError::DataProvider(format!("failed to parse photo map: {e}")))?;
        Ok(Self {
            flags,
            photos,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_flag(mut self, team: impl Into<String>, path: impl Into<String>) -> Self {
        self.flags.insert(team.into(), path.into());
        self
    }

    #[must_use]
    pub fn with_photo(mut self, player: impl Into<String>, path: impl Into<String>) -> Self {
        self.photos.insert(player.into(), path.into());
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, flag: impl Into<String>, photo: impl Into<String>) -> Self {
        self.default_flag = flag.into();
        self.default_photo = photo.into();
        self
    }
}

impl AssetLookup for AssetCatalog {
    fn flag_for(&self, team: &str) -> &str {
        self.flags
            .get(team)
            .map_or(self.default_flag.as_str(), String::as_str)
    }

    fn photo_for(&self, player: &str) -> &str {
        self.photos
            .get(player)
            .map_or(self.default_photo.as_str(), String::as_str)
    }
}

fn default_flag() -> String {
    DEFAULT_FLAG.to_owned()
}

fn default_photo() -> String {
    DEFAULT_PHOTO.to_owned()
}
