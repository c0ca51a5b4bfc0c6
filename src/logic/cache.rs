//! Result Cache
//!
//! Content hash -> verdict memo for the life of the process.
//!
//! Không có expiry, không eviction: mỗi distinct content chỉ được classify
//! remote tối đa một lần. Với process chạy lâu dài đây là rủi ro bộ nhớ duy nhất;
//! một bounded/LRU policy sẽ là deviation có chủ đích.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::logic::threat::Verdict;

#[derive(Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, Verdict>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &str) -> Option<Verdict> {
        self.entries.read().get(hash).cloned()
    }

    /// Store `verdict` unless the hash is already cached.
    ///
    /// Returns the verdict held by the cache; a written entry is never
    /// overwritten.
    pub fn insert(&self, hash: &str, verdict: Verdict) -> Verdict {
        self.entries
            .write()
            .entry(hash.to_string())
            .or_insert(verdict)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// SHA-256 of a file's content, hex encoded
pub fn content_hash(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
