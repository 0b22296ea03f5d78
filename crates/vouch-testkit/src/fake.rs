//! A deterministic, non-cryptographic crypto suite.
//!
//! `FakeSuite` makes every primitive inspectable: keys are their own public
//! keys, signatures are a keyed checksum, text encoding is hex. Use it to
//! exercise the packet pipeline without depending on a real signature scheme.

use vouch_core::{CryptoSuite, PacketHash};

/// Length of a fake key in bytes.
pub const FAKE_KEY_LEN: usize = 8;

/// Deterministic stand-in for [`vouch_core::StandardSuite`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeSuite {
    /// When set, `verify` rejects everything.
    pub reject_all: bool,
}

impl FakeSuite {
    /// A suite whose `verify` always fails.
    pub fn rejecting() -> Self {
        Self { reject_all: true }
    }

    fn checksum(public_key: &[u8], digest: &PacketHash) -> Vec<u8> {
        let mut input = public_key.to_vec();
        input.extend_from_slice(digest.as_bytes());
        fnv1a(&input, 0).to_be_bytes().to_vec()
    }
}

impl CryptoSuite for FakeSuite {
    type SigningKey = [u8; FAKE_KEY_LEN];

    fn hash(&self, data: &[u8]) -> PacketHash {
        let mut out = [0u8; 32];
        for (lane, chunk) in out.chunks_mut(8).enumerate() {
            chunk.copy_from_slice(&fnv1a(data, lane as u64).to_be_bytes());
        }
        PacketHash(out)
    }

    fn public_key(&self, key: &[u8; FAKE_KEY_LEN]) -> Vec<u8> {
        key.to_vec()
    }

    fn sign(&self, key: &[u8; FAKE_KEY_LEN], digest: &PacketHash) -> Vec<u8> {
        Self::checksum(key, digest)
    }

    fn verify(&self, public_key: &[u8], digest: &PacketHash, signature: &[u8]) -> bool {
        !self.reject_all
            && public_key.len() == FAKE_KEY_LEN
            && Self::checksum(public_key, digest) == signature
    }

    fn encode_text(&self, bytes: &[u8]) -> String {
        hex::encode(bytes)
    }

    fn decode_text(&self, text: &str) -> Option<Vec<u8>> {
        hex::decode(text).ok()
    }

    fn derive_identity(&self, public_key: &[u8]) -> Option<String> {
        if public_key.len() != FAKE_KEY_LEN {
            return None;
        }
        Some(format!("fake:{}", hex::encode(&public_key[..4])))
    }

    fn encode_secret(&self, key: &[u8; FAKE_KEY_LEN]) -> String {
        format!("secret:{}", hex::encode(key))
    }
}

/// 64-bit FNV-1a with a lane number folded into the offset basis.
fn fnv1a(data: &[u8], lane: u64) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut h = OFFSET ^ lane.wrapping_mul(PRIME);
    for b in data {
        h ^= *b as u64;
        h = h.wrapping_mul(PRIME);
    }
    h
}
