use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;

/// A source of bytes backing a dataset: a file re-opened per reader, a raw
/// byte array held in memory, or a memory-mapped region. Readers are built
/// against a `Source`, never own the bytes themselves.
pub enum Source {
    File { path: PathBuf, delete_on_dispose: bool },
    Bytes(Arc<[u8]>),
    Mmap { mmap: Arc<Mmap>, cleanup_path: Option<PathBuf> },
}

impl Source {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Source::File { path: path.as_ref().to_path_buf(), delete_on_dispose: false }
    }

    pub fn from_temporary_path(path: impl AsRef<Path>) -> Self {
        Source::File { path: path.as_ref().to_path_buf(), delete_on_dispose: true }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Source::Bytes(Arc::from(bytes))
    }

    pub fn mmap_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::mmap_path_with_cleanup(path, None)
    }

    fn mmap_path_with_cleanup(path: impl AsRef<Path>, cleanup_path: Option<PathBuf>) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Source::Mmap { mmap: Arc::new(mmap), cleanup_path })
    }

    /// Opens a fresh handle suitable for one `Reader`. For `Bytes`/`Mmap`
    /// this is a cheap `Arc` clone; for `File` it reopens the path so each
    /// pooled reader has its own cursor and file descriptor.
    pub(crate) fn open_handle(&self) -> Result<SourceHandle> {
        match self {
            Source::File { path, .. } => Ok(SourceHandle::File(File::open(path)?)),
            Source::Bytes(bytes) => Ok(SourceHandle::Bytes(bytes.clone())),
            Source::Mmap { mmap, .. } => Ok(SourceHandle::Mmap(mmap.clone())),
        }
    }

    /// If `memory_mode` is set and this is a plain file, maps it instead of
    /// leaving it to be reopened per reader — the same conversion
    /// `Watcher` applies on reload, so `Config::memory_mode` means the same
    /// thing everywhere a dataset gets opened, not just on a background
    /// reload. A file marked `delete_on_dispose` carries that forward onto
    /// the resulting mapping's cleanup path rather than losing it.
    pub(crate) fn resolve_memory_mode(self, memory_mode: bool) -> Result<Source> {
        match self {
            Source::File { path, delete_on_dispose } if memory_mode => {
                let cleanup = delete_on_dispose.then(|| path.clone());
                Self::mmap_path_with_cleanup(path, cleanup)
            }
            other => Ok(other),
        }
    }

    pub(crate) fn cleanup(&self) {
        match self {
            Source::File { path, delete_on_dispose: true } => {
                let _ = std::fs::remove_file(path);
            }
            Source::Mmap { cleanup_path: Some(path), .. } => {
                let _ = std::fs::remove_file(path);
            }
            _ => {}
        }
    }
}

pub(crate) enum SourceHandle {
    File(File),
    Bytes(Arc<[u8]>),
    Mmap(Arc<Mmap>),
}
