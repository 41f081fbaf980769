#![forbid(unsafe_code)]

//! Byte sinks an acquisition writes into.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Destination for fetched resource bytes.
///
/// The driver calls `write` once per chunk and then exactly one of
/// `commit` / `abort`. A committed sink holds the complete resource; an
/// aborted one must not leave partial bytes behind.
#[async_trait]
pub trait AcquisitionSink: Send {
    async fn write(&mut self, chunk: Bytes) -> io::Result<()>;

    async fn commit(&mut self) -> io::Result<()>;

    async fn abort(&mut self) -> io::Result<()>;
}

/// Sink writing to a file; `abort` removes the partial file.
///
/// A commit that fails mid-flush leaves the file in place for the caller
/// to inspect or clean up by path.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Create (or truncate) `path` and return a sink over it.
    pub async fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).await?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AcquisitionSink for FileSink {
    async fn write(&mut self, chunk: Bytes) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(&chunk).await,
            None => Err(io::Error::other("file sink already finalized")),
        }
    }

    async fn commit(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
            debug!(path = %self.path.display(), "file sink committed");
        }
        Ok(())
    }

    async fn abort(&mut self) -> io::Result<()> {
        if self.file.take().is_some() {
            tokio::fs::remove_file(&self.path).await?;
            debug!(path = %self.path.display(), "file sink aborted");
        }
        Ok(())
    }
}

/// In-memory sink for tests and small resources.
#[derive(Debug, Default)]
pub struct VecSink {
    bytes: Vec<u8>,
    committed: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[async_trait]
impl AcquisitionSink for VecSink {
    async fn write(&mut self, chunk: Bytes) -> io::Result<()> {
        self.bytes.extend_from_slice(&chunk);
        Ok(())
    }

    async fn commit(&mut self) -> io::Result<()> {
        self.committed = true;
        Ok(())
    }

    async fn abort(&mut self) -> io::Result<()> {
        self.bytes.clear();
        Ok(())
    }
}
