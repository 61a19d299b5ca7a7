/// Floor applied to hashed identities so they never collide with the
/// numeric range real source ids live in.
pub const HASHED_ID_FLOOR: u32 = 100_000;

/// Derives a stable numeric surrogate id from a display name.
///
/// Classic 31-multiplier rolling hash over UTF-16 code units with 32-bit
/// wraparound, reinterpreted as unsigned. Used for source artists carrying
/// the "-1" sentinel id.
pub fn hash_string(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }

    let hash = hash as u32;
    if hash < HASHED_ID_FLOOR {
        hash + HASHED_ID_FLOOR
    } else {
        hash
    }
}
