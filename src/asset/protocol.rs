use std::sync::RwLock;
use anyhow::anyhow;
use crate::{AssetPath, HashMap};

/**
 * A method of receiving bytes from files.
 * IE: file, mem, etc.
 */
pub trait Protocol: Send + Sync + 'static {
    /**
     * Name of the protocol. IE: file, mem etc.
     * Should not change across invocations.
     */
    fn name(&self) -> &str;
    /**
     * Retrieves raw bytes from the path specified.
     */
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>>;
}

/**
 * An implementation of [`Protocol`] that fetches bytes from the file system.
 */
#[derive(Copy, Clone, Debug)]
pub struct FileProtocol;
impl Protocol for FileProtocol {
    fn name(&self) -> &str { "file" }
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let bytes = std::fs::read(path.without_protocol())?;
        Ok(bytes)
    }
}

/**
 * An implementation of [`Protocol`] that serves files stored in memory.
 * Files are keyed by their path without protocol.
 * Useful for testing purposes, and for maps bundled into a binary.
 */
#[derive(Default, Debug)]
pub struct MemoryProtocol {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryProtocol {

    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a file, replacing the previous one at the same path.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let mut files = self.files.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        files.insert(path.into(), bytes.into());
    }

    pub fn with_file(self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl Protocol for MemoryProtocol {
    fn name(&self) -> &str { "mem" }
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let key = path.without_protocol();
        let files = self.files.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        files
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow!("No file stored at '{key}'"))
    }
}
