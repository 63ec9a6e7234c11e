/*
 * Error Module
 *
 * Errors raised while loading the scene configuration, loading textures
 * and releasing tracked resources.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::ResourceId;

#[derive(Debug, Error)]
pub enum SpheresError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to load texture {path:?}: {reason}")]
    TextureLoad { path: PathBuf, reason: String },

    #[error("Resource {0} was already released")]
    AlreadyReleased(ResourceId),

    #[error("Resource {0} was never acquired")]
    UnknownResource(ResourceId),
}

pub type Result<T> = std::result::Result<T, SpheresError>;
