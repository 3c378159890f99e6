use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("tag error: {0}")]
    Tag(#[from] lofty::error::LoftyError),

    #[error("config store error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("file has no writable tag: `{path}`")]
    NoPrimaryTag { path: String },
}
