//! Packed bit helpers for node bitmaps
//!
//! Bits are packed least-significant first: bit `i` lives in byte `i / 8`
//! at position `i % 8`.

/// Number of bytes needed to hold `bits` bits
#[must_use]
pub const fn bitmap_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Set or clear bit `index`
pub fn set_bit(bitmap: &mut [u8], index: usize, value: bool) {
    let mask = 1u8 << (index % 8);
    if value {
        bitmap[index / 8] |= mask;
    } else {
        bitmap[index / 8] &= !mask;
    }
}

/// Read bit `index`
#[must_use]
pub fn get_bit(bitmap: &[u8], index: usize) -> bool {
    (bitmap[index / 8] >> (index % 8)) & 1 == 1
}

/// Count the bits equal to `bit` among the first `prefix_len` bits
///
/// # Panics
/// Panics if `prefix_len` exceeds the number of bits in `bitmap`.
#[must_use]
pub fn rank_bits(bitmap: &[u8], bit: bool, prefix_len: usize) -> usize {
    let full = prefix_len / 8;
    let tail = prefix_len % 8;

    let mut ones: usize = bitmap[..full].iter().map(|b| b.count_ones() as usize).sum();
    if tail > 0 {
        let mask = (1u8 << tail) - 1;
        ones += (bitmap[full] & mask).count_ones() as usize;
    }

    if bit { ones } else { prefix_len - ones }
}
