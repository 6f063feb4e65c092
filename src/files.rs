//! Static file access under a fixed serving root.
//!
//! The root is handed in at construction; nothing here looks at process
//! arguments or the environment. Names coming from request paths are
//! checked before they are joined to the root, so a request can never reach
//! outside it.
//!
//! Concurrent requests for the same name are not coordinated: the last
//! POST wins, and a GET racing a POST may see a partially written file.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("file not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a relative name onto the serving root.
    ///
    /// Rejects empty names, NUL bytes, `..` segments, and absolute or
    /// drive-prefixed paths. `.` segments are dropped.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        if name.contains('\0') {
            return Err(FileError::InvalidName(name.to_string()));
        }

        let mut relative = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FileError::InvalidName(name.to_string()));
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(FileError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Opens a regular file and returns it with its size in bytes.
    pub async fn open(&self, name: &str) -> Result<(File, u64), FileError> {
        let path = self.resolve(name)?;

        let file = File::open(&path).await.map_err(not_found_or_io)?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(FileError::NotFound);
        }

        Ok((file, metadata.len()))
    }

    /// Creates or truncates a file and writes `contents` to it.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf, FileError> {
        let path = self.resolve(name)?;

        let mut file = File::create(&path).await?;
        file.write_all(contents).await?;
        file.flush().await?;

        Ok(path)
    }
}

fn not_found_or_io(err: io::Error) -> FileError {
    if err.kind() == io::ErrorKind::NotFound {
        FileError::NotFound
    } else {
        FileError::Io(err)
    }
}
