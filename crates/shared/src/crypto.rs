//! Random token helpers.

use rand::RngCore;

/// Returns `byte_len` random bytes from the thread RNG, hex encoded.
///
/// The output is always `2 * byte_len` lowercase hex characters.
pub fn random_hex(byte_len: usize) -> String {
    let mut bytes = vec![0u8; byte_len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
