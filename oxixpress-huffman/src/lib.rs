//! # OxiXpress Huffman
//!
//! Pure Rust decompression of the LZXPRESS-Huffman format: LZ77-style
//! back-references entropy-coded with canonical Huffman codes over a
//! 512-symbol alphabet (256 literals + 256 match instructions).
//!
//! The compressed stream is chunked: each chunk carries its own
//! 256-byte nibble-packed code-length header and produces up to 64 KiB
//! of output. The format itself carries neither the decompressed size
//! nor a checksum - the caller supplies the size (from whatever outer
//! container framed the payload) and is responsible for any integrity
//! checking.
//!
//! ## Example
//!
//! ```rust
//! use oxixpress_huffman::{DecodeStatus, decompress_with_status};
//!
//! // A stream too short to hold a chunk header decodes to nothing.
//! let (output, status) = decompress_with_status(&[0u8; 16], 8).unwrap();
//! assert_eq!(status, DecodeStatus::Truncated { produced: 0 });
//! assert_eq!(output, vec![0u8; 8]);
//! ```
//!
//! ## Best-effort decoding
//!
//! Truncated or corrupt input is not a hard failure: decompression
//! stops at the damage and [`decompress_with_status`] reports how many
//! bytes were produced. Only an empty input buffer is rejected
//! outright.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod huffman;

// Re-exports
pub use decode::{CHUNK_SIZE, DecodeStatus, decompress, decompress_with_status};
pub use huffman::{
    ALPHABET_SIZE, CODE_LENGTHS_HEADER_SIZE, DecodeTable, MAX_CODE_LENGTH, TableEntry,
    code_lengths_from_header,
};
