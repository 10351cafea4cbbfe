use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::key::ArticleKey;
use crate::fs::atomic_write;
use crate::translation::SentencePair;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to create cache directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read cache entry {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write cache entry {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cache entry {key} holds no readable sentence pairs")]
    Empty { key: String },

    #[error("failed to encode sentence pair: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encodes pairs as JSONL: one `["original", "translation"]` array per line.
pub fn encode_jsonl(pairs: &[SentencePair]) -> Result<String, serde_json::Error> {
    let mut contents = String::new();
    for pair in pairs {
        contents.push_str(&serde_json::to_string(pair)?);
        contents.push('\n');
    }
    Ok(contents)
}

/// On-disk store of translated articles, one JSONL file per [`ArticleKey`].
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Opens the store, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CacheError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &ArticleKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    pub fn exists(&self, key: &ArticleKey) -> bool {
        self.path_for(key).is_file()
    }

    /// Loads a cached article in its original sentence order.
    ///
    /// Lines that are not a valid pair are skipped with a warning. An entry
    /// with no valid line at all is reported as [`CacheError::Empty`].
    pub fn load(&self, key: &ArticleKey) -> Result<Vec<SentencePair>, CacheError> {
        let path = self.path_for(key);
        let contents =
            fs::read_to_string(&path).map_err(|source| CacheError::Read { path, source })?;

        let mut pairs = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<SentencePair>(line) {
                Ok(pair) => pairs.push(pair),
                Err(e) => warn!(
                    key = %key,
                    line = index + 1,
                    error = %e,
                    "skipping corrupt cache line"
                ),
            }
        }

        if pairs.is_empty() {
            return Err(CacheError::Empty {
                key: key.to_string(),
            });
        }

        debug!(key = %key, pairs = pairs.len(), "loaded cache entry");
        Ok(pairs)
    }

    /// Writes the whole article in one atomic replace. The directory is
    /// recreated if it vanished since the store was opened.
    pub fn save(&self, key: &ArticleKey, pairs: &[SentencePair]) -> Result<(), CacheError> {
        let contents = encode_jsonl(pairs)?;
        fs::create_dir_all(&self.dir).map_err(|source| CacheError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        atomic_write(&path, &contents).map_err(|source| CacheError::Write { path, source })?;
        debug!(key = %key, pairs = pairs.len(), "saved cache entry");
        Ok(())
    }

    pub fn remove(&self, key: &ArticleKey) -> Result<(), CacheError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Write { path, source }),
        }
    }
}
