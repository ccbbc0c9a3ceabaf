//! XPRESS-Huffman decompression.
//!
//! The compressed stream is a sequence of chunks, each producing up to
//! 64 KiB of output. A chunk opens with a 256-byte nibble-packed code
//! length header, followed by a Huffman-coded symbol stream. Literal
//! symbols (0-255) emit one byte; match symbols (256-511) copy bytes
//! from earlier in the output.
//!
//! Decompression is best-effort: the format carries no checksum and the
//! expected output length arrives out of band, so when the input runs
//! out early (or a match points before the start of the output) the
//! decoder stops and reports how much it produced instead of failing.

use crate::huffman::{
    CODE_LENGTHS_HEADER_SIZE, DecodeTable, MAX_CODE_LENGTH, code_lengths_from_header,
};
use oxixpress_core::BitReader;
use oxixpress_core::error::{Result, XpressError};

/// Maximum number of output bytes a single chunk produces.
pub const CHUNK_SIZE: usize = 65536;

/// Minimum match length; length slots count up from here.
const MIN_MATCH: usize = 3;

/// Match lengths from the extra-byte path start here (slot 15 exhausted).
const EXTENDED_MATCH_BASE: usize = 18;

/// Completion status of a decompression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The full declared output size was produced.
    Complete,
    /// Input ran out (or a match was corrupt) after `produced` bytes;
    /// the rest of the output buffer holds zeros.
    Truncated {
        /// Number of output bytes actually produced.
        produced: usize,
    },
}

impl DecodeStatus {
    /// Whether the full declared output size was produced.
    pub fn is_complete(self) -> bool {
        matches!(self, DecodeStatus::Complete)
    }
}

/// How a chunk's symbol loop ended.
enum ChunkOutcome {
    /// The chunk reached its output bound; another chunk may follow.
    Completed,
    /// The bit stream ran dry or a match was corrupt; decompression of
    /// the whole buffer stops here.
    Stopped,
}

/// Decompress an XPRESS-Huffman payload.
///
/// `uncompressed_size` is the exact expected output length, supplied by
/// the caller (typically from an outer container header). On truncated
/// or corrupt input the returned buffer is still `uncompressed_size`
/// long with the unproduced tail zeroed; use
/// [`decompress_with_status`] to distinguish that case.
///
/// # Errors
///
/// Returns [`XpressError::EmptyInput`] if `input` is empty.
pub fn decompress(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
    let (output, _) = decompress_with_status(input, uncompressed_size)?;
    Ok(output)
}

/// Decompress an XPRESS-Huffman payload, reporting completion status.
///
/// Behaves like [`decompress`] but also returns whether the declared
/// size was fully produced or where production stopped.
///
/// # Errors
///
/// Returns [`XpressError::EmptyInput`] if `input` is empty.
pub fn decompress_with_status(
    input: &[u8],
    uncompressed_size: usize,
) -> Result<(Vec<u8>, DecodeStatus)> {
    if input.is_empty() {
        return Err(XpressError::EmptyInput);
    }

    let mut output = vec![0u8; uncompressed_size];
    let mut out_pos = 0usize;
    let mut in_pos = 0usize;

    while out_pos < uncompressed_size {
        // Every chunk opens with a full code-length header.
        if input.len() - in_pos < CODE_LENGTHS_HEADER_SIZE {
            break;
        }
        let header = &input[in_pos..in_pos + CODE_LENGTHS_HEADER_SIZE];
        let lengths = code_lengths_from_header(header);
        in_pos += CODE_LENGTHS_HEADER_SIZE;

        let table = DecodeTable::from_code_lengths(&lengths);
        let chunk_end = (out_pos + CHUNK_SIZE).min(uncompressed_size);

        // The accumulator is chunk-scoped; the encoder byte-aligns at
        // chunk boundaries, so the next header starts at the reader's
        // resume position.
        let mut reader = BitReader::new(&input[in_pos..]);
        let outcome = decode_chunk(&mut reader, &table, &mut output, &mut out_pos, chunk_end);
        in_pos += reader.byte_position();

        if matches!(outcome, ChunkOutcome::Stopped) {
            break;
        }
    }

    let status = if out_pos == uncompressed_size {
        DecodeStatus::Complete
    } else {
        DecodeStatus::Truncated { produced: out_pos }
    };
    Ok((output, status))
}

/// Run one chunk's symbol loop until its output bound is reached or the
/// input gives out.
fn decode_chunk(
    reader: &mut BitReader<'_>,
    table: &DecodeTable,
    output: &mut [u8],
    out_pos: &mut usize,
    chunk_end: usize,
) -> ChunkOutcome {
    while *out_pos < chunk_end {
        if reader.fill(MAX_CODE_LENGTH).is_err() {
            return ChunkOutcome::Stopped;
        }

        let entry = table.lookup(reader.peek(MAX_CODE_LENGTH));
        // An unassigned slot is only reachable through a malformed
        // header. Decode it as symbol 0 with a full-width code and keep
        // going rather than aborting.
        let (symbol, code_len) = if entry.is_assigned() {
            (entry.symbol(), entry.length())
        } else {
            (0, MAX_CODE_LENGTH)
        };
        reader.consume(code_len);

        if symbol < 256 {
            output[*out_pos] = symbol as u8;
            *out_pos += 1;
            continue;
        }

        // Match instruction: 5-bit length slot above a 3-bit offset
        // magnitude selector.
        let m = (symbol - 256) as usize;
        let len_slot = m >> 3;
        let offset_high = (m & 7) as u32;

        let length = if len_slot < 15 {
            len_slot + MIN_MATCH
        } else {
            match reader.read_bits(8) {
                Ok(0xFF) => match reader.read_bits(16) {
                    Ok(raw) => raw as usize + MIN_MATCH,
                    Err(_) => return ChunkOutcome::Stopped,
                },
                Ok(extra) => extra as usize + EXTENDED_MATCH_BASE,
                Err(_) => return ChunkOutcome::Stopped,
            }
        };

        let extra = match reader.read_bits(offset_high) {
            Ok(bits) => bits as usize,
            Err(_) => return ChunkOutcome::Stopped,
        };
        let offset = (1usize << offset_high) + extra - 1;

        // The source would precede the start of the output: corrupt
        // back-reference, stop with what we have.
        if offset + 1 > *out_pos {
            return ChunkOutcome::Stopped;
        }
        let mut src = *out_pos - offset - 1;

        // Bytewise copy so source and destination may overlap; a match
        // may run past the chunk bound but never past the declared size.
        let count = length.min(output.len() - *out_pos);
        for _ in 0..count {
            output[*out_pos] = output[src];
            *out_pos += 1;
            src += 1;
        }
    }

    ChunkOutcome::Completed
}
