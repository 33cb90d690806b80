use crate::error::GenerateError;
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::{RngCore, TryRngCore};
use zeroize::Zeroizing;

const KEY_LEN: usize = 32;
const BUFFER_LEN: usize = 1024;

/// ChaCha20 keystream exposed as a `rand` generator.
///
/// Output is buffered in blocks of `BUFFER_LEN` bytes; the buffer is wiped on
/// drop.
pub struct Keystream {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl Keystream {
    pub fn from_key(key: &[u8; KEY_LEN]) -> Self {
        let cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut keystream = Self {
            cipher,
            buffer: Zeroizing::new(vec![0u8; BUFFER_LEN]),
            pos: 0,
        };
        keystream.refill();
        keystream
    }

    /// Keys a fresh keystream from the operating system entropy source.
    pub fn from_entropy() -> Result<Self, GenerateError> {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        OsRng
            .try_fill_bytes(&mut key[..])
            .map_err(|e| GenerateError::Entropy(e.to_string()))?;
        log::trace!("keystream seeded from OS entropy");
        Ok(Self::from_key(&key))
    }

    fn refill(&mut self) {
        // apply_keystream XORs in place, so start from zeros to get raw output
        self.buffer.fill(0);
        self.cipher.apply_keystream(&mut self.buffer);
        self.pos = 0;
    }
}

impl RngCore for Keystream {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut written = 0;
        while written < dst.len() {
            if self.pos >= self.buffer.len() {
                self.refill();
            }

            let take = (dst.len() - written).min(self.buffer.len() - self.pos);
            dst[written..written + take].copy_from_slice(&self.buffer[self.pos..self.pos + take]);
            written += take;
            self.pos += take;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keystream_deterministic() {
        let key = [42u8; 32];
        let mut a = Keystream::from_key(&key);
        let mut b = Keystream::from_key(&key);

        let mut out_a = [0u8; 64];
        let mut out_b = [0u8; 64];
        a.fill_bytes(&mut out_a);
        b.fill_bytes(&mut out_b);
        assert_eq!(out_a, out_b);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_keystream_keys_differ() {
        let mut a = Keystream::from_key(&[1u8; 32]);
        let mut b = Keystream::from_key(&[2u8; 32]);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_keystream_chunking_is_consistent() {
        let key = [7u8; 32];

        let mut whole = vec![0u8; BUFFER_LEN * 3 + 17];
        Keystream::from_key(&key).fill_bytes(&mut whole);

        let mut pieces = Keystream::from_key(&key);
        let mut chunked = Vec::with_capacity(whole.len());
        let mut chunk = [0u8; 100];
        while chunked.len() < whole.len() {
            let n = chunk.len().min(whole.len() - chunked.len());
            pieces.fill_bytes(&mut chunk[..n]);
            chunked.extend_from_slice(&chunk[..n]);
        }

        assert_eq!(whole, chunked);
    }

    #[test]
    fn test_keystream_refill_produces_fresh_blocks() {
        let mut stream = Keystream::from_key(&[9u8; 32]);
        let mut first = vec![0u8; BUFFER_LEN];
        let mut second = vec![0u8; BUFFER_LEN];
        stream.fill_bytes(&mut first);
        stream.fill_bytes(&mut second);
        assert_ne!(first, second);
        assert!(second.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_from_entropy_differs_between_calls() {
        let mut a = Keystream::from_entropy().unwrap();
        let mut b = Keystream::from_entropy().unwrap();

        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.fill_bytes(&mut out_a);
        b.fill_bytes(&mut out_b);
        assert_ne!(out_a, out_b);
    }
}
