//! Container framing: the self-describing header wrapped around every
//! compressed payload (`spec.md` §4.H).
//!
//! ```text
//! +--------+----------------------+-----------------------+
//! | magic  | payload_size (u64le) | code lengths (257B)   |
//! | 6B     | 8B                   |                        |
//! +--------+----------------------+-----------------------+
//! ```
//!
//! The original tool wrote `sizeof(size_t)` bytes in host byte order,
//! leaving the width and endianness implementation-defined. This codec
//! fixes both: an 8-byte little-endian integer, chosen for portability
//! across architectures (`SPEC_FULL.md` §4.H).

use crate::{SYM_NUM, MAGIC};
use fg2019_core::error::{FgError, Result};
use std::io::{Read, Write};

/// A parsed container header.
#[derive(Debug)]
pub struct Header {
    /// Declared payload length in bytes, as read from the header.
    pub payload_size: u64,
    /// Code length per symbol, indexed by symbol value.
    pub lengths: [u8; SYM_NUM],
}

/// Compute the payload size in bytes: `ceil(Σ freq[s] * length[s] / 8)`.
fn compute_payload_size(freqs: &[u64; SYM_NUM], lengths: &[u8; SYM_NUM]) -> u64 {
    let total_bits: u128 = freqs
        .iter()
        .zip(lengths.iter())
        .map(|(&f, &l)| f as u128 * l as u128)
        .sum();
    ((total_bits + 7) / 8) as u64
}

/// Write the container header (magic, payload size, length table) and
/// return the computed payload size so the caller knows how many payload
/// bytes to expect.
pub fn write_header<W: Write>(
    dest: &mut W,
    freqs: &[u64; SYM_NUM],
    lengths: &[u8; SYM_NUM],
) -> Result<u64> {
    dest.write_all(MAGIC)
        .map_err(|e| FgError::io("writing magic marker", e))?;

    let payload_size = compute_payload_size(freqs, lengths);
    dest.write_all(&payload_size.to_le_bytes())
        .map_err(|e| FgError::io("writing payload size", e))?;

    dest.write_all(lengths)
        .map_err(|e| FgError::io("writing code length table", e))?;

    Ok(payload_size)
}

fn read_exact_or_malformed<R: Read>(src: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    src.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            FgError::malformed_header(format!("truncated before {what} could be read"))
        } else {
            FgError::io("reading header", e)
        }
    })
}

/// Read and validate a container header.
pub fn read_header<R: Read>(src: &mut R) -> Result<Header> {
    let mut magic = [0u8; 6];
    // A magic read can be truncated (too few bytes) or simply wrong; both
    // are reported, but as distinct error kinds.
    match src.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(FgError::magic_missing(Vec::new()));
        }
        Err(e) => return Err(FgError::io("reading magic marker", e)),
    }
    if &magic != MAGIC {
        return Err(FgError::magic_missing(magic.to_vec()));
    }

    let mut size_bytes = [0u8; 8];
    read_exact_or_malformed(src, &mut size_bytes, "the payload size field")?;
    let payload_size = u64::from_le_bytes(size_bytes);

    let mut lengths = [0u8; SYM_NUM];
    read_exact_or_malformed(src, &mut lengths, "the 257-byte code length table")?;

    Ok(Header { payload_size, lengths })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_roundtrip() {
        let mut freqs = [0u64; SYM_NUM];
        freqs[b'A' as usize] = 10;
        freqs[256] = 1;
        let mut lengths = [0u8; SYM_NUM];
        lengths[b'A' as usize] = 1;
        lengths[256] = 1;

        let mut buf = Vec::new();
        let written_size = write_header(&mut buf, &freqs, &lengths).unwrap();
        assert_eq!(written_size, 2); // 11 bits -> 2 bytes

        let mut cursor = Cursor::new(buf);
        let header = read_header(&mut cursor).unwrap();
        assert_eq!(header.payload_size, 2);
        assert_eq!(header.lengths, lengths);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"XXXXXX");
        buf.extend_from_slice(&0u64.to_le_bytes());
        buf.extend_from_slice(&[0u8; SYM_NUM]);

        let mut cursor = Cursor::new(buf);
        let err = read_header(&mut cursor).unwrap_err();
        assert!(matches!(err, FgError::MagicMissing { .. }));
    }

    #[test]
    fn test_truncated_header_is_malformed() {
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&3u32.to_le_bytes()); // short of the 8-byte field

        let mut cursor = Cursor::new(buf);
        let err = read_header(&mut cursor).unwrap_err();
        assert!(matches!(err, FgError::MalformedHeader { .. }));
    }
}
