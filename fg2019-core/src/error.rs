//! Error types for FG2019 codec operations.
//!
//! This module provides a single error type that covers every fatal
//! condition the codec can encounter: I/O failures, malformed containers,
//! and truncated or corrupt payloads. All errors are fatal — there is no
//! retry or partial-output salvage path (see `spec.md` §7).

use std::io;
use thiserror::Error;

/// The error type for FG2019 compress/decompress operations.
#[derive(Debug, Error)]
pub enum FgError {
    /// The source file had zero bytes; compression requires at least one.
    #[error("the file is empty")]
    EmptyInput,

    /// A capacity reservation for tree/table construction failed.
    ///
    /// Rust's global allocator aborts the process on true OOM, so this
    /// variant only fires from the one fallible `try_reserve` call in the
    /// tree builder; it exists for parity with the original's malloc
    /// failure path.
    #[error("allocation failed while building the compression table")]
    AllocationFailed,

    /// I/O error from the underlying reader or writer.
    #[error("I/O error during {context}: {source}")]
    Io {
        /// What the codec was doing when the I/O call failed.
        context: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The 6-byte magic marker did not match `"FG2019"`.
    #[error("magic number missing: expected {expected:?}, found {found:?}")]
    MagicMissing {
        /// Expected magic bytes.
        expected: &'static [u8; 6],
        /// Bytes actually read.
        found: Vec<u8>,
    },

    /// The header was truncated before the payload-size field or the
    /// 257-byte code-length table could be read in full.
    #[error("malformed header: {message}")]
    MalformedHeader {
        /// Description of where the header ended early.
        message: String,
    },

    /// Fewer payload bytes were present than the header declared, or the
    /// decoder ran past a defensive iteration cap without reaching EOS.
    #[error("truncated payload: {message}")]
    TruncatedPayload {
        /// Description of the shortfall.
        message: String,
    },

    /// The CLI mode flag was neither `-C`, `-D`, nor `-H`.
    #[error("unknown mode: {flag}")]
    UnknownMode {
        /// The unrecognized flag as given on the command line.
        flag: String,
    },
}

/// Result type alias for FG2019 operations.
pub type Result<T> = std::result::Result<T, FgError>;

impl FgError {
    /// Wrap an I/O error with the operation that triggered it.
    pub fn io(context: &'static str, source: io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Build a magic-mismatch error from the bytes actually read.
    pub fn magic_missing(found: impl Into<Vec<u8>>) -> Self {
        Self::MagicMissing {
            expected: b"FG2019",
            found: found.into(),
        }
    }

    /// Build a malformed-header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Build a truncated-payload error.
    pub fn truncated_payload(message: impl Into<String>) -> Self {
        Self::TruncatedPayload {
            message: message.into(),
        }
    }

    /// Build an unknown-mode error.
    pub fn unknown_mode(flag: impl Into<String>) -> Self {
        Self::UnknownMode { flag: flag.into() }
    }
}
