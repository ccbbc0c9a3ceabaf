//! Bit-level I/O for the XPRESS-Huffman bit stream.
//!
//! Variable-length Huffman codes do not respect byte boundaries, so the
//! decoder works through a [`BitReader`]: a 64-bit accumulator fed one
//! byte at a time from an input slice. Bits are packed LSB-first - each
//! newly loaded byte lands directly above the bits already buffered, and
//! consumption happens from the least-significant end.
//!
//! [`BitWriter`] is the mirror image, packing LSB-first bits into a
//! `Vec<u8>`. The decoder itself never writes bits; the writer exists so
//! that callers (and this workspace's tests and benches) can construct
//! conforming streams.
//!
//! # Example
//!
//! ```
//! use oxixpress_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let bytes = writer.into_bytes();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{Result, XpressError};

/// A bit-level reader over a byte slice.
///
/// The reader never seeks or rewinds: bytes are consumed sequentially
/// from the slice into the accumulator, and bits are consumed from the
/// accumulator's least-significant end. Running out of input is reported
/// by [`fill`](Self::fill) without disturbing the bits already buffered,
/// so a caller can treat exhaustion as an end-of-stream signal.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Remaining input.
    input: &'a [u8],
    /// Index of the next byte to load into the accumulator.
    pos: usize,
    /// Bit accumulator (LSB-first).
    buffer: u64,
    /// Number of valid low-order bits in the accumulator.
    bits: u32,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` over the given input slice.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            buffer: 0,
            bits: 0,
        }
    }

    /// Ensure at least `count` bits are buffered.
    ///
    /// Loads input bytes one at a time, each landing above the bits
    /// already buffered. Returns [`XpressError::UnexpectedEof`] if the
    /// input runs out first; the bits buffered so far remain valid.
    #[inline]
    pub fn fill(&mut self, count: u32) -> Result<()> {
        debug_assert!(count <= 57, "cannot buffer more than 57 bits at once");

        while self.bits < count {
            if self.pos >= self.input.len() {
                return Err(XpressError::unexpected_eof(count - self.bits));
            }
            self.buffer |= u64::from(self.input[self.pos]) << self.bits;
            self.pos += 1;
            self.bits += 8;
        }

        Ok(())
    }

    /// Return the low `count` bits of the accumulator without consuming.
    ///
    /// The caller must have buffered at least `count` bits via
    /// [`fill`](Self::fill).
    #[inline]
    pub fn peek(&self, count: u32) -> u32 {
        debug_assert!(count <= 32, "cannot peek more than 32 bits at once");
        debug_assert!(count <= self.bits, "peek past buffered bits");

        let mask = (1u64 << count).wrapping_sub(1);
        (self.buffer & mask) as u32
    }

    /// Discard the low `count` bits of the accumulator.
    #[inline]
    pub fn consume(&mut self, count: u32) {
        debug_assert!(count <= self.bits, "consume past buffered bits");

        self.buffer >>= count;
        self.bits -= count;
    }

    /// Fill, peek, and consume `count` bits in one step.
    #[inline]
    pub fn read_bits(&mut self, count: u32) -> Result<u32> {
        if count == 0 {
            return Ok(0);
        }
        self.fill(count)?;
        let value = self.peek(count);
        self.consume(count);
        Ok(value)
    }

    /// Number of valid bits currently buffered.
    pub fn buffered_bits(&self) -> u32 {
        self.bits
    }

    /// Byte offset into the input where sequential reading would resume.
    ///
    /// Whole bytes sitting unconsumed in the accumulator are given back;
    /// a sub-byte residue counts as consumed, which realizes the byte
    /// alignment the encoder applies when it flushes a chunk.
    pub fn byte_position(&self) -> usize {
        self.pos - (self.bits / 8) as usize
    }
}

/// A bit-level writer packing LSB-first bits into a `Vec<u8>`.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Completed output bytes.
    output: Vec<u8>,
    /// Bit accumulator (LSB-first).
    buffer: u64,
    /// Number of valid low-order bits in the accumulator.
    bits: u32,
}

impl BitWriter {
    /// Create a new, empty `BitWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits of `value`, LSB-first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32, "cannot write more than 32 bits at once");

        if count == 0 {
            return;
        }

        let mask = (1u64 << count).wrapping_sub(1);
        self.buffer |= (u64::from(value) & mask) << self.bits;
        self.bits += count;

        while self.bits >= 8 {
            self.output.push((self.buffer & 0xFF) as u8);
            self.buffer >>= 8;
            self.bits -= 8;
        }
    }

    /// Pad to the next byte boundary with zero bits.
    pub fn align_to_byte(&mut self) {
        if self.bits % 8 != 0 {
            let padding = 8 - (self.bits % 8);
            self.write_bits(0, padding);
        }
    }

    /// Append raw bytes, padding any pending bits to a byte boundary first.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align_to_byte();
        self.output.extend_from_slice(bytes);
    }

    /// Pad to a byte boundary and return the packed bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_lsb_first() {
        // 0b10110101 = 0xB5
        let data = [0xB5];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(1).unwrap(), 1); // LSB first
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
    }

    #[test]
    fn test_reader_crosses_byte_boundary() {
        let data = [0xFF, 0x00];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x0F);
        assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let data = [0xAB];
        let mut reader = BitReader::new(&data);

        reader.fill(8).unwrap();
        assert_eq!(reader.peek(4), 0xB);
        assert_eq!(reader.peek(4), 0xB);
        reader.consume(4);
        assert_eq!(reader.peek(4), 0xA);
    }

    #[test]
    fn test_fill_preserves_state_on_eof() {
        let data = [0xCD];
        let mut reader = BitReader::new(&data);

        reader.fill(8).unwrap();
        assert!(reader.fill(16).is_err());
        // The 8 buffered bits survive the failed fill.
        assert_eq!(reader.buffered_bits(), 8);
        assert_eq!(reader.peek(8), 0xCD);
    }

    #[test]
    fn test_byte_position_returns_whole_buffered_bytes() {
        let data = [0x11, 0x22, 0x33, 0x44];
        let mut reader = BitReader::new(&data);

        reader.fill(15).unwrap(); // loads two bytes
        reader.consume(1);
        // 15 bits buffered: one whole byte is given back, the 7-bit
        // residue counts as consumed.
        assert_eq!(reader.byte_position(), 1);

        reader.consume(7);
        assert_eq!(reader.byte_position(), 1);
        assert_eq!(reader.read_bits(8).unwrap(), 0x22);
        assert_eq!(reader.byte_position(), 2);
    }

    #[test]
    fn test_writer_packs_lsb_first() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b11001, 5);
        // 3 bits: 101, 5 bits: 11001 -> 0b11001_101 = 0xCD
        assert_eq!(writer.into_bytes(), vec![0xCD]);
    }

    #[test]
    fn test_writer_aligned_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1);
        writer.write_bytes(&[0xAA, 0xBB]);
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0x01, 0xAA, 0xBB]);
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b1111, 4);
        writer.write_bits(0b10, 2);
        writer.write_bits(0b110011, 6);
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
    }
}
