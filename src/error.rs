// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

/// Why the map image could not be loaded. Always fatal.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// The file picker was cancelled or returned an empty path.
    #[error("no image selected")]
    NoSelection,

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Image load error: {0}")]
    ImageLoad(#[from] ImageLoadError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    // Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
