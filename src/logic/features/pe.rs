//! Minimal PE reader
//!
//! Locates the bytes at the entry point of a PE image. Only the headers needed
//! for that are parsed.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeError {
    #[error("Not a PE file: {0}")]
    NotPe(&'static str),
    #[error("No executable section")]
    NoEntrySection,
}

/// Entry point location inside a PE image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Virtual address (image base + RVA)
    pub address: u64,
    /// Offset of the entry bytes in the file
    pub file_offset: usize,
    /// Raw bytes available from `file_offset` to the end of the section
    pub available: usize,
}

const PE32_MAGIC: u16 = 0x10b;
const PE32_PLUS_MAGIC: u16 = 0x20b;
const SECTION_HEADER_SIZE: usize = 40;

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn read_u64(data: &[u8], at: usize) -> Option<u64> {
    data.get(at..at + 8).map(|b| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        u64::from_le_bytes(buf)
    })
}

/// Find the entry point section and the file offset of the entry bytes
pub fn locate_entry_point(data: &[u8]) -> Result<EntryPoint, PeError> {
    if data.len() < 64 {
        return Err(PeError::NotPe("file too small"));
    }
    if &data[0..2] != b"MZ" {
        return Err(PeError::NotPe("no MZ header"));
    }

    let pe_offset = read_u32(data, 0x3C).ok_or(PeError::NotPe("truncated DOS header"))? as usize;
    if data.get(pe_offset..pe_offset + 4) != Some(b"PE\0\0".as_slice()) {
        return Err(PeError::NotPe("invalid PE signature"));
    }

    // COFF header follows the signature
    let coff = pe_offset + 4;
    let section_count = read_u16(data, coff + 2).ok_or(PeError::NotPe("truncated COFF header"))? as usize;
    let optional_size = read_u16(data, coff + 16).ok_or(PeError::NotPe("truncated COFF header"))? as usize;

    let optional = coff + 20;
    let magic = read_u16(data, optional).ok_or(PeError::NotPe("missing optional header"))?;
    let entry_rva = read_u32(data, optional + 16).ok_or(PeError::NotPe("missing optional header"))?;
    let image_base = match magic {
        PE32_MAGIC => read_u32(data, optional + 28).map(u64::from),
        PE32_PLUS_MAGIC => read_u64(data, optional + 24),
        _ => return Err(PeError::NotPe("unknown optional header magic")),
    }
    .ok_or(PeError::NotPe("missing image base"))?;

    let sections = optional + optional_size;
    for i in 0..section_count {
        let header = sections + i * SECTION_HEADER_SIZE;
        let (Some(virtual_size), Some(virtual_address), Some(raw_size), Some(raw_pointer)) = (
            read_u32(data, header + 8),
            read_u32(data, header + 12),
            read_u32(data, header + 16),
            read_u32(data, header + 20),
        ) else {
            break;
        };

        let span = virtual_size.max(raw_size);
        if entry_rva < virtual_address || entry_rva >= virtual_address.saturating_add(span) {
            continue;
        }

        let delta = (entry_rva - virtual_address) as usize;
        let file_offset = raw_pointer as usize + delta;
        let section_end = (raw_pointer as usize + raw_size as usize).min(data.len());
        if file_offset >= section_end {
            return Err(PeError::NoEntrySection);
        }

        let address = image_base
            .checked_add(entry_rva as u64)
            .ok_or(PeError::NotPe("image base overflow"))?;
        return Ok(EntryPoint {
            address,
            file_offset,
            available: section_end - file_offset,
        });
    }

    Err(PeError::NoEntrySection)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Smallest PE32+ image with one `.text` section holding `code` at the entry point
    pub(crate) fn build_pe(code: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 0x200];
        data[0..2].copy_from_slice(b"MZ");
        data[0x3C..0x40].copy_from_slice(&0x80u32.to_le_bytes());

        data[0x80..0x84].copy_from_slice(b"PE\0\0");
        let coff = 0x84;
        data[coff..coff + 2].copy_from_slice(&0x8664u16.to_le_bytes());
        data[coff + 2..coff + 4].copy_from_slice(&1u16.to_le_bytes());
        data[coff + 16..coff + 18].copy_from_slice(&0xF0u16.to_le_bytes());

        let optional = coff + 20;
        data[optional..optional + 2].copy_from_slice(&PE32_PLUS_MAGIC.to_le_bytes());
        data[optional + 16..optional + 20].copy_from_slice(&0x1000u32.to_le_bytes());
        data[optional + 24..optional + 32].copy_from_slice(&0x1_4000_0000u64.to_le_bytes());

        let section = optional + 0xF0;
        data[section..section + 5].copy_from_slice(b".text");
        data[section + 8..section + 12].copy_from_slice(&(code.len() as u32).to_le_bytes());
        data[section + 12..section + 16].copy_from_slice(&0x1000u32.to_le_bytes());
        data[section + 16..section + 20].copy_from_slice(&(code.len() as u32).to_le_bytes());
        data[section + 20..section + 24].copy_from_slice(&0x200u32.to_le_bytes());

        data.extend_from_slice(code);
        data
    }

    #[test]
    fn test_locate_entry_point() {
        let image = build_pe(&[0x55, 0x48, 0x89, 0xE5, 0xC3]);
        let entry = locate_entry_point(&image).unwrap();
        assert_eq!(entry.address, 0x1_4000_1000);
        assert_eq!(entry.file_offset, 0x200);
        assert_eq!(entry.available, 5);
    }

    #[test]
    fn test_reject_overflowing_image_base() {
        let mut image = build_pe(&[0xC3]);
        let image_base = 0x84 + 20 + 24;
        image[image_base..image_base + 8].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(locate_entry_point(&image), Err(PeError::NotPe(_))));
    }

    #[test]
    fn test_reject_non_pe() {
        let data = vec![0x7Fu8; 128];
        assert!(matches!(locate_entry_point(&data), Err(PeError::NotPe(_))));
    }
}
