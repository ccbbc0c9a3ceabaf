//! Canonical Huffman decode tables for the XPRESS 512-symbol alphabet.
//!
//! Each compressed chunk opens with a 256-byte header packing one 4-bit
//! code length per symbol. Code values are never transmitted: they follow
//! from the lengths alone by the canonical rule, where symbols of the
//! same length take consecutive codes in ascending symbol order and
//! longer lengths take numerically larger codes.
//!
//! Decoding uses a single direct-lookup table covering the full 15-bit
//! code space, so each symbol costs one peek and one indexed load
//! instead of a bit-by-bit tree walk.

/// Size of the symbol alphabet (256 literals + 256 match instructions).
pub const ALPHABET_SIZE: usize = 512;

/// Maximum code length in bits.
pub const MAX_CODE_LENGTH: u32 = 15;

/// Size of the nibble-packed code-length header opening each chunk.
pub const CODE_LENGTHS_HEADER_SIZE: usize = 256;

/// Number of entries in the direct-lookup table.
const TABLE_SIZE: usize = 1 << MAX_CODE_LENGTH;

/// Entry in the decode table.
///
/// Packs the code length (upper bits) and the symbol (lower 9 bits).
/// A zero length marks a slot no code maps to, which is only reachable
/// when the chunk header describes an incomplete code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry(u16);

impl TableEntry {
    const UNASSIGNED: TableEntry = TableEntry(0);

    fn new(symbol: u16, length: u32) -> Self {
        TableEntry(((length as u16) << 9) | symbol)
    }

    /// The decoded symbol.
    pub fn symbol(self) -> u16 {
        self.0 & 0x1FF
    }

    /// Number of bits the symbol's code occupies.
    pub fn length(self) -> u32 {
        u32::from(self.0 >> 9)
    }

    /// Whether any code maps to this slot.
    pub fn is_assigned(self) -> bool {
        self.0 >> 9 != 0
    }
}

/// Direct-lookup canonical Huffman decode table.
///
/// Built fresh for every chunk from that chunk's code lengths and owned
/// by that chunk's decode loop; tables are never shared across chunks.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    entries: Vec<TableEntry>,
}

impl DecodeTable {
    /// Build a decode table from one code length per symbol.
    ///
    /// Pure and deterministic: the same lengths always produce an
    /// identical table. Lengths of zero mark unused symbols. Incomplete
    /// or over-subscribed length sets are not rejected; slots no code
    /// reaches stay unassigned and are handled at decode time.
    pub fn from_code_lengths(lengths: &[u8; ALPHABET_SIZE]) -> Self {
        let mut entries = vec![TableEntry::UNASSIGNED; TABLE_SIZE];

        // Count codes of each length.
        let mut count = [0u32; MAX_CODE_LENGTH as usize + 1];
        for &len in lengths {
            count[len as usize] += 1;
        }
        count[0] = 0;

        // First canonical code of each length.
        let mut next_code = [0u32; MAX_CODE_LENGTH as usize + 1];
        let mut code = 0u32;
        for bits in 1..=MAX_CODE_LENGTH as usize {
            code = (code + count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        // Assign codes in ascending symbol order and replicate each one
        // across every table slot it can be reached through.
        for (symbol, &len) in lengths.iter().enumerate() {
            if len == 0 {
                continue;
            }
            let len = u32::from(len);
            let code = next_code[len as usize];
            next_code[len as usize] += 1;

            // An over-subscribed length class walks off the end of its
            // code space; such codes are undecodable, skip them.
            if code >= 1 << len {
                continue;
            }

            // Codes are matched from the least-significant end of the
            // peeked window, so the code's bits enter the index reversed
            // and the trailing window bits select the replica.
            let reversed = Self::reverse_bits(code, len) as usize;
            let fill_count = 1usize << (MAX_CODE_LENGTH - len);
            for i in 0..fill_count {
                entries[reversed | (i << len)] = TableEntry::new(symbol as u16, len);
            }
        }

        Self { entries }
    }

    /// Look up the entry for a 15-bit window of upcoming stream bits.
    #[inline]
    pub fn lookup(&self, window: u32) -> TableEntry {
        debug_assert!(window < TABLE_SIZE as u32);
        self.entries[window as usize]
    }

    /// Reverse the low `length` bits of `code`.
    fn reverse_bits(mut code: u32, length: u32) -> u32 {
        let mut reversed = 0u32;
        for _ in 0..length {
            reversed = (reversed << 1) | (code & 1);
            code >>= 1;
        }
        reversed
    }
}

/// Unpack a 256-byte chunk header into 512 code lengths.
///
/// Each header byte carries two 4-bit lengths, low nibble first: byte
/// `i` holds the lengths of symbols `2i` (low nibble) and `2i + 1`
/// (high nibble).
pub fn code_lengths_from_header(header: &[u8]) -> [u8; ALPHABET_SIZE] {
    debug_assert_eq!(header.len(), CODE_LENGTHS_HEADER_SIZE);

    let mut lengths = [0u8; ALPHABET_SIZE];
    for (i, &byte) in header.iter().enumerate() {
        lengths[2 * i] = byte & 0x0F;
        lengths[2 * i + 1] = byte >> 4;
    }
    lengths
}
