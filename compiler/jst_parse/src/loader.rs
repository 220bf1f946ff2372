//! The file-loading seam.
//!
//! The engine performs no I/O. Hosts hand it a [`FileLoader`]; tests and
//! embedders with sources already in memory use [`MemoryLoader`].

use std::sync::Arc;

use jst_diagnostic::JstError;
use jst_lexer_core::SourceText;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Why a loader could not supply a file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("file \"{0}\" not found")]
    NotFound(String),
    #[error("cannot read \"{name}\": {reason}")]
    Unreadable { name: String, reason: String },
}

/// Supplies source files by name.
pub trait FileLoader: Sync {
    /// Returns the resolved file name and its bytes.
    fn load(&self, name: &str) -> Result<(String, Vec<u8>), LoadError>;
}

/// Files held in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(name.into(), bytes.into());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<(String, Vec<u8>), LoadError> {
        self.files
            .get(name)
            .map(|bytes| (name.to_string(), bytes.clone()))
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}

/// Load `name` through `loader` into a shareable source.
pub fn load_source(loader: &dyn FileLoader, name: &str) -> Result<Arc<SourceText>, JstError> {
    let (resolved, bytes) = loader
        .load(name)
        .map_err(|err| JstError::load(name, err.to_string()))?;
    debug!(name, resolved = %resolved, len = bytes.len(), "loaded");
    let source = SourceText::new(resolved, &bytes)?;
    Ok(Arc::new(source))
}
