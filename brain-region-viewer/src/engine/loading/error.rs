use bevy::asset::AssetLoadError;
use serde::Serialize;
use thiserror::Error;

/// Why the brain model could not be shown. Both variants are non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelLoadError {
    /// The asset reader could not produce the bytes (missing file, HTTP status, IO).
    #[error("error fetching {path}: {reason}")]
    Fetch { path: String, reason: String },
    /// Bytes were read but could not be turned into a scene.
    #[error("error parsing {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl ModelLoadError {
    pub fn from_asset_error(path: &str, error: &AssetLoadError) -> Self {
        match error {
            AssetLoadError::AssetReaderError(reader_error) => Self::Fetch {
                path: path.to_string(),
                reason: reader_error.to_string(),
            },
            other => Self::Decode {
                path: path.to_string(),
                reason: other.to_string(),
            },
        }
    }

    pub fn no_scene(path: &str) -> Self {
        Self::Decode {
            path: path.to_string(),
            reason: "file contains no scenes".to_string(),
        }
    }
}
