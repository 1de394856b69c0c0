use std::{
    ffi::OsStr,
    fmt, io,
    path::{Component, Path, PathBuf},
    pin::pin,
};

use actix_web::web;
use anyhow::Context;
use futures_util::{Stream, StreamExt as _};
use tokio::{fs, io::AsyncWriteExt as _};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("upload interrupted: {0}")]
    Interrupted(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Flat directory of stored files. The directory listing is the only index.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub async fn init(root: impl Into<PathBuf>) -> anyhow::Result<web::Data<Self>> {
        let root = root.into();

        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("failed to create upload directory {}", root.display()))?;

        tracing::info!(upload_dir = %root.display(), "storage ready");

        Ok(web::Data::new(Storage { root }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` inside the storage directory.
    ///
    /// `name` must be a single normal path component, so the result can never
    /// point outside the directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(name).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == OsStr::new(name) => {
                Ok(self.root.join(part))
            }
            _ => Err(StorageError::InvalidName(name.to_string())),
        }
    }

    /// Stream `chunks` into a new file called `name`, returning the byte count.
    ///
    /// An existing file is never overwritten. If the stream fails, a write
    /// fails, or the future is dropped before completion, the partial file is
    /// removed.
    pub async fn save<S, B, E>(&self, name: &str, chunks: S) -> Result<u64, StorageError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: fmt::Display,
    {
        let path = self.resolve(name)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let mut partial = PartialFile {
            path,
            complete: false,
        };

        let mut chunks = pin!(chunks);
        let mut written = 0u64;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|err| StorageError::Interrupted(err.to_string()))?;
            let bytes = chunk.as_ref();

            file.write_all(bytes).await?;
            written += bytes.len() as u64;
        }

        file.flush().await?;
        partial.complete = true;

        Ok(written)
    }

    /// Best effort; a concurrent delete may win right after this returns.
    pub async fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.resolve(name)?;

        fs::remove_file(&path).await.map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::Io(err),
        })
    }

    /// Entry names in directory order. Not sorted.
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }
}

struct PartialFile {
    path: PathBuf,
    complete: bool,
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.complete {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed partial upload"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to remove partial upload"
            ),
        }
    }
}
