//! 32-bit Murmur3 hash (x86 variant).
//!
//! Register selection in [`HyperLogLog`](crate::HyperLogLog) depends on the exact bit pattern
//! produced here, so the mixing schedule must match the reference `MurmurHash3_x86_32`:
//! - body: 4-byte little-endian blocks mixed with `c1`/`c2` multiplies and rotations.
//! - tail: the remaining 0..3 bytes folded into a single block.
//! - finalization: length xor followed by the `fmix32` avalanche.
//!
//! [Reference implementation](https://github.com/aappleby/smhasher/blob/master/src/MurmurHash3.cpp)

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Compute 32-bit Murmur3 hash of `data` with given `seed`
#[inline]
pub fn murmur3_hash(data: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h ^= mix_k(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k ^= u32::from(b) << (8 * i);
        }
        h ^= mix_k(k);
    }

    // the reference algorithm folds in the length truncated to 32 bits
    h ^= data.len() as u32;
    fmix32(h)
}

/// Scramble a single 4-byte block before it's combined into the hash state
#[inline(always)]
fn mix_k(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

/// Final avalanche forcing all bits of the hash state to affect each other
#[inline(always)]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
