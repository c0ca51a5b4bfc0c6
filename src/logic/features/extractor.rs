//! Feature Extractor
//!
//! Turns a file into a bounded text snippet for the classifiers. Never fails:
//! every error path returns a sentinel string.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::pe::{locate_entry_point, PeError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Leading bytes read for the text representation
pub const STRING_SAMPLE_BYTES: u64 = 2048;

/// Executables larger than this are not disassembled
pub const MAX_DISASSEMBLY_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Bytes taken from the entry point
pub const ENTRY_SAMPLE_BYTES: usize = 200;

/// Maximum rows in the listing
pub const MAX_LISTING_ROWS: usize = 25;

const BYTES_PER_ROW: usize = 8;

pub const SENTINEL_TOO_LARGE: &str = "File too large";
pub const SENTINEL_NO_SECTION: &str = "No executable section";
pub const SENTINEL_UNAVAILABLE: &str = "Disassembly unavailable";

/// True for the failure strings of `extract_assembly`
pub fn is_sentinel(listing: &str) -> bool {
    matches!(listing, SENTINEL_TOO_LARGE | SENTINEL_NO_SECTION | SENTINEL_UNAVAILABLE)
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// Capability consumed by the classification pipeline
pub trait FeatureExtractor: Send + Sync {
    /// Leading bytes as lossy UTF-8 text, empty on failure
    fn extract_strings(&self, path: &Path) -> String;

    /// Entry point listing of an executable, or a sentinel
    fn extract_assembly(&self, path: &Path) -> String;
}

/// Default extractor reading straight from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFeatureExtractor;

impl FeatureExtractor for FileFeatureExtractor {
    fn extract_strings(&self, path: &Path) -> String {
        let mut buf = Vec::with_capacity(STRING_SAMPLE_BYTES as usize);
        match File::open(path).and_then(|f| f.take(STRING_SAMPLE_BYTES).read_to_end(&mut buf)) {
            Ok(_) => String::from_utf8_lossy(&buf).into_owned(),
            Err(e) => {
                log::debug!("String extraction failed for {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    fn extract_assembly(&self, path: &Path) -> String {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > MAX_DISASSEMBLY_FILE_SIZE => return SENTINEL_TOO_LARGE.to_string(),
            Ok(_) => {}
            Err(_) => return SENTINEL_UNAVAILABLE.to_string(),
        }

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(_) => return SENTINEL_UNAVAILABLE.to_string(),
        };

        render_entry_listing(&data)
    }
}

/// Render the entry point rows of a PE image
pub fn render_entry_listing(data: &[u8]) -> String {
    let entry = match locate_entry_point(data) {
        Ok(entry) => entry,
        Err(PeError::NoEntrySection) => return SENTINEL_NO_SECTION.to_string(),
        Err(PeError::NotPe(_)) => return SENTINEL_UNAVAILABLE.to_string(),
    };

    let len = entry.available.min(ENTRY_SAMPLE_BYTES);
    let code = &data[entry.file_offset..entry.file_offset + len];

    let mut listing = String::new();
    for (row, chunk) in code.chunks(BYTES_PER_ROW).take(MAX_LISTING_ROWS).enumerate() {
        let address = entry.address.wrapping_add((row * BYTES_PER_ROW) as u64);
        let operands = chunk
            .iter()
            .map(|b| format!("0x{:02x}", b))
            .collect::<Vec<_>>()
            .join(", ");
        listing.push_str(&format!("0x{:x}:\tdb\t{}\n", address, operands));
    }
    listing
}
