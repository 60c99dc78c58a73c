use std::{collections::BTreeMap, path::PathBuf};

use rayon::prelude::*;

/// A batch fetch failed; no buffers are returned.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Reading a local reference failed.
    #[error("read '{reference}': {source}")]
    Io {
        /// Reference as given by the caller.
        reference: String,
        /// Underlying reader failure.
        #[source]
        source: std::io::Error,
    },

    /// The resolver cannot handle this kind of reference.
    #[error("unsupported reference '{0}'")]
    Unsupported(String),

    /// No buffer is known for this reference.
    #[error("no data for reference '{0}'")]
    Missing(String),
}

/// Supplies raw bytes for image references.
///
/// Implementations return one buffer per reference, in order, or fail the
/// whole batch.
pub trait Resolver: Sync {
    /// Fetch every reference. All-or-nothing.
    fn get_all(&self, references: &[&str]) -> Result<Vec<Vec<u8>>, FetchError>;
}

/// Resolves local file paths, relative ones against `root`. Reads run in
/// parallel.
#[derive(Clone, Debug)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Resolver for paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_one(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Err(FetchError::Unsupported(reference.to_owned()));
        }
        let path = self.root.join(reference);
        std::fs::read(&path).map_err(|source| FetchError::Io {
            reference: reference.to_owned(),
            source,
        })
    }
}

impl Resolver for FsResolver {
    fn get_all(&self, references: &[&str]) -> Result<Vec<Vec<u8>>, FetchError> {
        references.par_iter().map(|r| self.read_one(r)).collect()
    }
}

/// In-memory reference table.
#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryResolver {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `reference`, replacing any previous entry.
    pub fn insert(&mut self, reference: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.entries.insert(reference.into(), bytes);
        self
    }
}

impl Resolver for MemoryResolver {
    fn get_all(&self, references: &[&str]) -> Result<Vec<Vec<u8>>, FetchError> {
        references
            .iter()
            .map(|r| {
                self.entries
                    .get(*r)
                    .cloned()
                    .ok_or_else(|| FetchError::Missing((*r).to_owned()))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
