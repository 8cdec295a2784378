/// CRC32 digests over file content.
///
/// CRC32 is a content fingerprint, not a cryptographic hash — good for
/// change detection and duplicate triage of scan output, useless
/// against an adversary.
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Compute the CRC32 digest of a byte slice.
///
/// Returns the standard IEEE polynomial checksum as 8 lowercase hex
/// characters, zero-padded.
pub fn crc32_digest(content: &[u8]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(content);
    format!("{:08x}", hasher.finalize())
}

/// Compute the CRC32 digest of a file, reading through `scratch`.
///
/// The caller supplies the scratch block — typically one borrowed from
/// a [`crate::pool::BufferPool`] — so repeated digests over a scan
/// reuse the same staging memory instead of allocating per file.
pub fn crc32_file(path: &Path, scratch: &mut [u8]) -> io::Result<String> {
    debug_assert!(!scratch.is_empty(), "scratch block must be non-empty");
    let mut file = File::open(path)?;
    let mut hasher = crc32fast::Hasher::new();
    loop {
        let n = file.read(scratch)?;
        if n == 0 {
            break;
        }
        hasher.update(&scratch[..n]);
    }
    Ok(format!("{:08x}", hasher.finalize()))
}
