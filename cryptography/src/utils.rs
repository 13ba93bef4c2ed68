//! Utility functions for cryptographic primitives.

/// Encodes a big-endian unsigned integer into exactly `N` bytes.
///
/// Shorter encodings are left-padded with zeros. Longer encodings are accepted only when the
/// surplus leading bytes are all zero (the value still fits in `N` bytes), otherwise `None`
/// is returned. The value itself is never truncated.
pub fn fixed_width<const N: usize>(big_endian: &[u8]) -> Option<[u8; N]> {
    let start = big_endian.len().saturating_sub(N);
    let (surplus, value) = big_endian.split_at(start);
    if surplus.iter().any(|byte| *byte != 0) {
        return None;
    }
    let mut out = [0u8; N];
    out[N - value.len()..].copy_from_slice(value);
    Some(out)
}
