use std::path::PathBuf;

use thiserror::Error;

/// Errors from the I/O edges of the crate. Geometry building itself never
/// fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not load obj: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("{} contains no models", path.display())]
    EmptyObj { path: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
