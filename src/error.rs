use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Failed to persist temp file: {0}")]
    Persist(#[from] tempfile::PathPersistError),

    #[error("File must be named `PKGBUILD`: `{}`", .0.display())]
    NotPkgbuild(PathBuf),

    #[error("Missing .SRCINFO file in {}", .0.display())]
    MissingSrcInfo(PathBuf),

    #[error("Failed to generate expected .SRCINFO file")]
    Generation,
}

pub type Result<T> = std::result::Result<T, Error>;
