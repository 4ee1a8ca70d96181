//! # FG2019 Codec
//!
//! A length-limited canonical Huffman codec for single-file, byte-for-byte
//! compression. This crate implements the three tightly coupled subsystems
//! described in `spec.md`:
//!
//! 1. [`lengths`] / [`tree`] / [`heap`] — code construction: build a
//!    canonical Huffman code from symbol frequencies, then length-limit it
//!    so no code exceeds [`L_MAX`] bits.
//! 2. [`table`] — the flat decoder lookup table, keyed by the next
//!    [`L_MAX`] input bits, for constant-time symbol decoding.
//! 3. [`streaming`] — buffered, byte-aligned streaming encode/decode that
//!    packs variable-length codes into a byte stream and recovers them
//!    without back-tracking.
//!
//! [`container`] frames those payloads with a self-describing header, and
//! [`compress`]/[`decompress`] tie the whole pipeline together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod canonical;
pub mod container;
pub mod frequency;
pub mod heap;
pub mod lengths;
pub mod streaming;
pub mod table;
pub mod tree;

use fg2019_core::error::Result;
use std::io::{Read, Seek, SeekFrom, Write};

/// Total alphabet size: the 256 byte values plus the synthetic EOS symbol.
pub const SYM_NUM: usize = 257;

/// The synthetic end-of-stream symbol, appended once at the end of every payload.
pub const EOS: usize = 256;

/// Maximum permitted canonical code length, in bits.
pub const L_MAX: u8 = 12;

/// Size of the flat decoder lookup table: `2^L_MAX` entries.
pub const DECOMP_SIZE: usize = 1 << L_MAX as usize;

/// The 6-byte ASCII magic marker that opens every container.
pub const MAGIC: &[u8; 6] = b"FG2019";

/// Recommended size (in bytes) of the read/write buffers used by the
/// streaming encoder and decoder.
pub const BUF_SIZE: usize = 1024;

/// A symbol's canonical code: its length in bits and its numeric value,
/// interpreted MSB-first with exactly `code_length` significant bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRecord {
    /// The symbol this record describes, `0..=256`.
    pub symbol: u16,
    /// Code length in bits; 0 means the symbol does not appear.
    pub code_length: u8,
    /// Numeric code value, valid only when `code_length > 0`.
    pub code_value: u32,
}

/// Compress `src` into `dest`, writing a complete FG2019 container.
///
/// `src` must support seeking: frequencies are counted in a first pass,
/// then the stream is rewound to encode the payload in a second pass,
/// mirroring the two-pass structure of the original tool.
///
/// Returns [`fg2019_core::error::FgError::EmptyInput`] if `src` contains no
/// bytes.
pub fn compress<R: Read + Seek, W: Write>(mut src: R, mut dest: W) -> Result<()> {
    let freqs = frequency::count_frequencies(&mut src)?;
    if freqs[..EOS].iter().all(|&f| f == 0) {
        return Err(fg2019_core::error::FgError::EmptyInput);
    }
    src.seek(SeekFrom::Start(0))
        .map_err(|e| fg2019_core::error::FgError::io("rewinding source before payload encode", e))?;

    let records = lengths::build_lengths(&freqs)?;
    log::debug!(
        "built {} live codes, max length {}",
        records.iter().filter(|r| r.code_length > 0).count(),
        records.iter().map(|r| r.code_length).max().unwrap_or(0)
    );

    let mut code_lengths = [0u8; SYM_NUM];
    for record in &records {
        code_lengths[record.symbol as usize] = record.code_length;
    }

    let payload_size = container::write_header(&mut dest, &freqs, &code_lengths)?;
    log::debug!("payload size: {payload_size} bytes");

    let comp_table = table::CompressionTable::from_records(&records);
    streaming::encode_payload(src, dest, &comp_table)
}

/// Decompress `src` into `dest`. `src` must be positioned at the start of
/// an FG2019 container (the magic marker).
pub fn decompress<R: Read, W: Write>(mut src: R, dest: W) -> Result<()> {
    let header = container::read_header(&mut src)?;

    let mut records: Vec<SymbolRecord> = (0..SYM_NUM)
        .map(|symbol| SymbolRecord {
            symbol: symbol as u16,
            code_length: header.lengths[symbol],
            code_value: 0,
        })
        .collect();
    records.sort_by_key(|r| (r.code_length, r.symbol));
    canonical::assign_code_values(&mut records);

    let decode_table = table::DecodeTable::build(&records);
    log::debug!("decoding payload of {} bytes", header.payload_size);

    streaming::decode_payload(src, dest, &decode_table, header.payload_size)
}
