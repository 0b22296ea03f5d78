//! Detached signatures over a packet's signed payload.
//!
//! A signature covers the canonical text of the `signedData` member only,
//! never itself and never local metadata. The digest that is signed is
//! `suite.hash(signed_text)`.

use std::sync::OnceLock;

use crate::crypto::CryptoSuite;
use crate::types::PacketHash;

/// A detached proof of authorship: the signer's encoded public key and the
/// encoded signature bytes.
///
/// Immutable once constructed. The signer identity is derived from the
/// public key on first access and cached for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    signer_pub_key: String,
    signature: String,
    signer_key_id: OnceLock<String>,
}

impl Signature {
    /// Create from text-encoded public key and signature.
    pub fn new(signer_pub_key: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            signer_pub_key: signer_pub_key.into(),
            signature: signature.into(),
            signer_key_id: OnceLock::new(),
        }
    }

    /// The text-encoded public key of the signer.
    pub fn signer_pub_key(&self) -> &str {
        &self.signer_pub_key
    }

    /// The text-encoded signature value.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The signer identity derived from the public key.
    ///
    /// Empty if the public key is not valid key material.
    pub fn signer_key_id<S: CryptoSuite>(&self, suite: &S) -> &str {
        self.signer_key_id
            .get_or_init(|| derive_signer_identity(suite, &self.signer_pub_key))
    }

    /// Check this signature against a signed payload text.
    pub fn is_valid<S: CryptoSuite>(&self, suite: &S, signed_text: &str) -> bool {
        verify(suite, self, signed_text)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.signer_pub_key == other.signer_pub_key && self.signature == other.signature
    }
}

impl Eq for Signature {}

/// Digest of a signed payload text.
pub fn hash_of<S: CryptoSuite>(suite: &S, signed_text: &str) -> PacketHash {
    suite.hash(signed_text.as_bytes())
}

/// Sign a payload text, producing a detached [`Signature`].
pub fn create<S: CryptoSuite>(suite: &S, key: &S::SigningKey, signed_text: &str) -> Signature {
    let digest = hash_of(suite, signed_text);
    let pub_key = suite.public_key(key);
    let raw = suite.sign(key, &digest);
    Signature::new(suite.encode_text(&pub_key), suite.encode_text(&raw))
}

/// Verify a signature over a payload text.
///
/// Returns `false` if either text field fails to decode, if the key is not
/// valid key material, or if the signature does not match.
pub fn verify<S: CryptoSuite>(suite: &S, signature: &Signature, signed_text: &str) -> bool {
    let Some(pub_key) = suite.decode_text(&signature.signer_pub_key) else {
        return false;
    };
    let Some(raw) = suite.decode_text(&signature.signature) else {
        return false;
    };
    let digest = hash_of(suite, signed_text);
    suite.verify(&pub_key, &digest, &raw)
}

/// Derive the signer identity from a text-encoded public key.
///
/// Empty on invalid input.
pub fn derive_signer_identity<S: CryptoSuite>(suite: &S, pub_key_text: &str) -> String {
    suite
        .decode_text(pub_key_text)
        .and_then(|pk| suite.derive_identity(&pk))
        .unwrap_or_default()
}
