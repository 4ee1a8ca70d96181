//! Buffered streaming encode/decode of the payload body.
//!
//! Builds on [`fg2019_core::bitstream`] for the bit-level packing and
//! unpacking; this module is only responsible for driving a byte at a time
//! from/to the caller's streams and handling the EOS-terminated tail
//! (`spec.md` §4.F/§4.G).

use crate::table::{CompressionTable, DecodeTable};
use crate::{BUF_SIZE, EOS, L_MAX};
use fg2019_core::bitstream::{BitReader, BitWriter};
use fg2019_core::error::{FgError, Result};
use std::io::{Read, Write};

/// A defensive bound on decode iterations once the declared payload has
/// been fully consumed and only the trailing bit window remains. Bounds
/// the loop the original tool left unbounded (`spec.md` §7): at `L_MAX`
/// bits decoded per symbol in the worst case, this comfortably exceeds any
/// legitimate EOS tail.
const MAX_TAIL_SYMBOLS: usize = 1 << 16;

/// Encode `src` byte-by-byte into `dest` using `table`, terminating with
/// the EOS code and flushing any partial final byte.
pub fn encode_payload<R: Read, W: Write>(
    mut src: R,
    dest: W,
    table: &CompressionTable,
) -> Result<()> {
    let mut writer = BitWriter::new(dest);
    let mut buf = [0u8; BUF_SIZE];

    loop {
        let n = src
            .read(&mut buf)
            .map_err(|e| FgError::io("reading source for payload encode", e))?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            let (length, value) = table.lookup_byte(byte);
            debug_assert!(length >= 1, "every byte present in the input has a live code");
            writer.write_bits(value, length)?;
        }
    }

    let (eos_length, eos_value) = table.lookup_eos();
    writer.write_bits(eos_value, eos_length)?;
    writer.flush()?;

    Ok(())
}

/// Decode a payload of exactly `payload_size` bytes from `src` into `dest`
/// using `table`, stopping at the EOS symbol.
///
/// Decoding continues past the declared payload length using whatever bits
/// remain buffered (`spec.md` §4.G): the final codeword, including EOS,
/// can straddle the boundary between the last declared payload byte and
/// the padding bits that follow it. A defensive counter bounds how many
/// symbols may be decoded from that trailing window alone, reporting
/// [`FgError::TruncatedPayload`] if EOS never arrives.
pub fn decode_payload<R: Read, W: Write>(
    src: R,
    dest: W,
    table: &DecodeTable,
    payload_size: u64,
) -> Result<()> {
    let mut reader = BitReader::new(src);
    let mut writer = BufferedSink::new(dest);

    let payload_bits = payload_size
        .checked_mul(8)
        .ok_or_else(|| FgError::truncated_payload("declared payload size overflows a bit count"))?;

    let mut tail_symbols = 0usize;
    loop {
        let bits_read = reader.bit_position();
        let (window, available) = reader.peek_available(L_MAX);

        if available == 0 {
            return Err(FgError::truncated_payload(
                "input exhausted before the EOS symbol was decoded",
            ));
        }

        // Entries are keyed on a full L_MAX-bit window; once fewer bits
        // remain, left-align what we have the same way the table does.
        let index = if available == L_MAX {
            window
        } else {
            window << (L_MAX - available)
        };
        let entry = table.lookup(index);

        if entry.code_length == 0 || entry.code_length > available {
            return Err(FgError::truncated_payload(
                "decoder table entry requires more bits than remain",
            ));
        }

        reader.skip_bits(entry.code_length)?;

        if entry.symbol as usize == EOS {
            break;
        }
        writer.push(entry.symbol as u8)?;

        if bits_read >= payload_bits {
            tail_symbols += 1;
            if tail_symbols > MAX_TAIL_SYMBOLS {
                return Err(FgError::truncated_payload(
                    "exceeded the defensive tail-decode iteration cap without reaching EOS",
                ));
            }
        }
    }

    writer.flush()
}

/// Small buffered byte sink so the decoder doesn't issue a write syscall
/// per output symbol.
struct BufferedSink<W: Write> {
    writer: W,
    buf: [u8; BUF_SIZE],
    len: usize,
}

impl<W: Write> BufferedSink<W> {
    fn new(writer: W) -> Self {
        Self { writer, buf: [0u8; BUF_SIZE], len: 0 }
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        self.buf[self.len] = byte;
        self.len += 1;
        if self.len == self.buf.len() {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.len > 0 {
            self.writer
                .write_all(&self.buf[..self.len])
                .map_err(|e| FgError::io("writing decoded output", e))?;
            self.len = 0;
        }
        Ok(())
    }

    fn flush(mut self) -> Result<()> {
        self.flush_buffer()?;
        self.writer.flush().map_err(|e| FgError::io("writing decoded output", e))
    }
}
