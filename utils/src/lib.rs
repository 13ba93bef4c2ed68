//! Hex helpers shared by the tack crates.
//!
//! Raw keys and signatures are passed around as fixed-width byte arrays. Whenever they have to
//! be shown to a human (logs, the demo CLI, test vectors) they are rendered as lowercase hex.

/// Converts bytes to a lowercase hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    const ALPHABET: &[u8; 16] = b"0123456789abcdef";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(ALPHABET[(byte >> 4) as usize] as char);
        hex.push(ALPHABET[(byte & 0x0f) as usize] as char);
    }
    hex
}

/// Converts a hexadecimal string to bytes.
///
/// Returns `None` if the string has an odd length or contains a character that is not a hex
/// digit (either case is accepted).
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.as_bytes();
    if hex.len() % 2 != 0 {
        return None;
    }
    hex.chunks_exact(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some(((hi << 4) | lo) as u8)
        })
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Commonly used
/// in testing to encode external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}
