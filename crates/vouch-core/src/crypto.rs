//! Cryptographic capability interface for vouch packets.
//!
//! The packet pipeline never calls a signature scheme, hash function or text
//! codec directly. It goes through [`CryptoSuite`], so the core can be driven
//! by deterministic fakes in tests and by [`StandardSuite`] in production.
//!
//! `StandardSuite` binds the interface to:
//! - BLAKE3 for the 256-bit packet digest
//! - Ed25519 signatures over that digest
//! - Base58 for keys and signatures, Base58Check for identities and secrets

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PacketHash;

/// Version byte prepended to identity hashes before Base58Check encoding.
pub const IDENTITY_VERSION: u8 = 0x66;

/// Version byte prepended to secret seeds before Base58Check encoding.
pub const SECRET_VERSION: u8 = 0xe6;

/// Length of the identity hash (truncated digest of the public key).
pub const IDENTITY_HASH_LEN: usize = 20;

/// The narrow set of trusted primitives the packet core depends on.
///
/// Implementations must be deterministic. `verify`, `decode_text` and
/// `derive_identity` report failure through their return value and must not
/// panic on arbitrary input.
pub trait CryptoSuite {
    /// Private key material accepted by [`CryptoSuite::sign`].
    type SigningKey;

    /// One-way 256-bit hash.
    fn hash(&self, data: &[u8]) -> PacketHash;

    /// Raw public key bytes for a signing key.
    fn public_key(&self, key: &Self::SigningKey) -> Vec<u8>;

    /// Sign a digest, returning raw signature bytes.
    fn sign(&self, key: &Self::SigningKey, digest: &PacketHash) -> Vec<u8>;

    /// Verify raw signature bytes over a digest against raw public key bytes.
    fn verify(&self, public_key: &[u8], digest: &PacketHash, signature: &[u8]) -> bool;

    /// Reversible byte-string to printable text encoding.
    fn encode_text(&self, bytes: &[u8]) -> String;

    /// Inverse of [`CryptoSuite::encode_text`]. `None` if `text` is not valid.
    fn decode_text(&self, text: &str) -> Option<Vec<u8>>;

    /// Short identity derived from raw public key bytes (hash + check-encoding).
    /// `None` if the key material is invalid.
    fn derive_identity(&self, public_key: &[u8]) -> Option<String>;

    /// Printable export form of a signing key.
    fn encode_secret(&self, key: &Self::SigningKey) -> String;
}

/// Production suite: BLAKE3, Ed25519, Base58.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardSuite;

impl CryptoSuite for StandardSuite {
    type SigningKey = Keypair;

    fn hash(&self, data: &[u8]) -> PacketHash {
        PacketHash(*blake3::hash(data).as_bytes())
    }

    fn public_key(&self, key: &Keypair) -> Vec<u8> {
        key.public_key().to_vec()
    }

    fn sign(&self, key: &Keypair, digest: &PacketHash) -> Vec<u8> {
        key.sign(digest.as_bytes()).to_vec()
    }

    fn verify(&self, public_key: &[u8], digest: &PacketHash, signature: &[u8]) -> bool {
        let Ok(pk_bytes) = <[u8; 32]>::try_from(public_key) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&pk_bytes) else {
            return false;
        };
        let Ok(sig) = DalekSignature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify(digest.as_bytes(), &sig).is_ok()
    }

    fn encode_text(&self, bytes: &[u8]) -> String {
        bs58::encode(bytes).into_string()
    }

    fn decode_text(&self, text: &str) -> Option<Vec<u8>> {
        bs58::decode(text).into_vec().ok()
    }

    fn derive_identity(&self, public_key: &[u8]) -> Option<String> {
        let pk_bytes = <[u8; 32]>::try_from(public_key).ok()?;
        VerifyingKey::from_bytes(&pk_bytes).ok()?;

        let digest = self.hash(&pk_bytes);
        Some(
            bs58::encode(&digest.as_bytes()[..IDENTITY_HASH_LEN])
                .with_check_version(IDENTITY_VERSION)
                .into_string(),
        )
    }

    fn encode_secret(&self, key: &Keypair) -> String {
        bs58::encode(key.seed())
            .with_check_version(SECRET_VERSION)
            .into_string()
    }
}

/// An Ed25519 keypair for signing packets.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Restore from the output of [`StandardSuite::encode_secret`].
    pub fn from_encoded_secret(text: &str) -> Option<Self> {
        let bytes = bs58::decode(text)
            .with_check(Some(SECRET_VERSION))
            .into_vec()
            .ok()?;
        // Decoded payload is version byte || seed.
        let seed = <[u8; 32]>::try_from(bytes.get(1..)?).ok()?;
        Some(Self::from_seed(&seed))
    }

    /// Get the raw public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", &hex::encode(self.public_key())[..16])
    }
}

/// Printable form of a signing key, its public key and derived identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyExport {
    #[serde(rename = "pubKey")]
    pub pub_key: String,
    #[serde(rename = "keyID")]
    pub key_id: String,
    #[serde(rename = "privKey")]
    pub priv_key: String,
}

/// Export a signing key in printable form.
pub fn export_key<S: CryptoSuite>(suite: &S, key: &S::SigningKey) -> KeyExport {
    let public_key = suite.public_key(key);
    KeyExport {
        pub_key: suite.encode_text(&public_key),
        key_id: suite.derive_identity(&public_key).unwrap_or_default(),
        priv_key: suite.encode_secret(key),
    }
}
