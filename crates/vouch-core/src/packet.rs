//! Packet: a signed or unsigned statement from authors about recipients.
//!
//! The signed payload is immutable once a packet exists. Only the attached
//! signature and the local-only metadata (`published`, `priority`) change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical::{keys, packet_document, CanonicalDocument};
use crate::crypto::CryptoSuite;
use crate::error::Result;
use crate::signature::{self, Signature};
use crate::types::{Identifier, PacketHash, Verification};
use crate::validation::{validate_document, SignedPayload};

/// A validated packet with its canonical text.
#[derive(Debug, Clone)]
pub struct Packet {
    document: CanonicalDocument,
    payload: SignedPayload,
    signed_text: String,
    hash: PacketHash,
    signature: Option<Signature>,
    published: bool,
    priority: i32,
}

impl Packet {
    /// Construct a packet from canonical text.
    ///
    /// Fails if the text is not canonical, any required field is missing or
    /// ill-formed, the rating is out of range, or (unless `verification` is
    /// `Skip`) an embedded signature does not verify.
    pub fn new<S: CryptoSuite>(text: &str, verification: Verification, suite: &S) -> Result<Self> {
        let document = CanonicalDocument::parse(text)?;
        let validated = validate_document(document.value(), verification, suite)?;
        let hash = signature::hash_of(suite, &validated.signed_text);

        tracing::debug!(
            hash = %hash,
            signed = validated.signature.is_some(),
            "constructed packet"
        );

        Ok(Self {
            document,
            payload: validated.payload,
            signed_text: validated.signed_text,
            hash,
            signature: validated.signature,
            published: false,
            priority: 0,
        })
    }

    /// Construct a packet received from elsewhere. Identical to
    /// [`Packet::new`] except the result is marked published.
    pub fn from_published<S: CryptoSuite>(
        text: &str,
        verification: Verification,
        suite: &S,
    ) -> Result<Self> {
        let mut packet = Self::new(text, verification, suite)?;
        packet.set_published();
        Ok(packet)
    }

    /// The packet's identity: digest of the signed payload text.
    pub fn hash(&self) -> PacketHash {
        self.hash
    }

    /// The full canonical text (wire form).
    pub fn data(&self) -> &str {
        self.document.as_str()
    }

    /// Canonical text of the signed payload. This is what signatures cover.
    pub fn signed_data(&self) -> &str {
        &self.signed_text
    }

    /// Sign the packet, replacing any existing signature.
    pub fn sign<S: CryptoSuite>(&mut self, suite: &S, key: &S::SigningKey) -> &Signature {
        let sig = signature::create(suite, key, &self.signed_text);
        tracing::debug!(hash = %self.hash, signer = sig.signer_pub_key(), "signed packet");
        self.attach(sig)
    }

    /// Attach `sig` if it verifies against this packet's signed payload.
    ///
    /// Returns whether the signature was attached.
    pub fn add_signature<S: CryptoSuite>(&mut self, suite: &S, sig: Signature) -> bool {
        if !signature::verify(suite, &sig, &self.signed_text) {
            tracing::warn!(
                hash = %self.hash,
                signer = sig.signer_pub_key(),
                "rejected signature"
            );
            return false;
        }
        tracing::debug!(hash = %self.hash, signer = sig.signer_pub_key(), "attached signature");
        self.attach(sig);
        true
    }

    fn attach(&mut self, sig: Signature) -> &Signature {
        let signed_data = self
            .document
            .value()
            .get(keys::SIGNED_DATA)
            .cloned()
            .unwrap_or(Value::Null);
        let doc = packet_document(
            signed_data,
            Some((sig.signer_pub_key(), sig.signature())),
        );
        self.document = CanonicalDocument::from_validated(doc);
        self.signature.insert(sig)
    }

    /// The attached signature, if any.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// The typed signed payload.
    pub fn payload(&self) -> &SignedPayload {
        &self.payload
    }

    pub fn authors(&self) -> &[Identifier] {
        &self.payload.authors
    }

    pub fn recipients(&self) -> &[Identifier] {
        &self.payload.recipients
    }

    pub fn claim_type(&self) -> &str {
        &self.payload.claim_type
    }

    /// Author-claimed timestamp (Unix seconds).
    pub fn timestamp(&self) -> i64 {
        self.payload.timestamp
    }

    pub fn rating(&self) -> Option<i64> {
        self.payload.rating.map(|r| r.value)
    }

    pub fn min_rating(&self) -> Option<i64> {
        self.payload.rating.map(|r| r.min)
    }

    pub fn max_rating(&self) -> Option<i64> {
        self.payload.rating.map(|r| r.max)
    }

    pub fn comment(&self) -> Option<&str> {
        self.payload.comment.as_deref()
    }

    pub fn set_published(&mut self) {
        self.published = true;
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Structured view for storage and RPC layers.
    pub fn export<S: CryptoSuite>(&self, suite: &S) -> PacketExport {
        let signature_details = match &self.signature {
            Some(sig) => SignatureDetails {
                signer_pub_key: sig.signer_pub_key().to_owned(),
                signer_key_id: sig.signer_key_id(suite).to_owned(),
                signature: sig.signature().to_owned(),
            },
            None => SignatureDetails::default(),
        };

        PacketExport {
            hash: suite.encode_text(self.hash.as_bytes()),
            data: self.document.value().clone(),
            published: self.published,
            priority: self.priority,
            signature_details,
        }
    }
}

/// Packets are equal iff their hashes and timestamps match. Signature and
/// local metadata are ignored.
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.payload.timestamp == other.payload.timestamp
    }
}

impl Eq for Packet {}

/// Export shape of a packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketExport {
    pub hash: String,
    pub data: Value,
    pub published: bool,
    pub priority: i32,
    pub signature_details: SignatureDetails,
}

/// Signature fields of a [`PacketExport`]. All empty for unsigned packets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDetails {
    #[serde(rename = "signerPubKey")]
    pub signer_pub_key: String,
    #[serde(rename = "signerKeyID")]
    pub signer_key_id: String,
    pub signature: String,
}

/// Builder for fresh, unsigned packets.
#[derive(Debug, Clone)]
pub struct PacketBuilder {
    claim_type: String,
    timestamp: i64,
    authors: Vec<Identifier>,
    recipients: Vec<Identifier>,
    rating: Option<(i64, i64, i64)>,
    comment: Option<String>,
}

impl PacketBuilder {
    /// Start building a packet of the given claim type.
    pub fn new(claim_type: impl Into<String>, timestamp: i64) -> Self {
        Self {
            claim_type: claim_type.into(),
            timestamp,
            authors: Vec::new(),
            recipients: Vec::new(),
            rating: None,
            comment: None,
        }
    }

    /// Add an author.
    pub fn author(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.authors.push(Identifier::new(kind, value));
        self
    }

    /// Add a recipient.
    pub fn recipient(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.recipients.push(Identifier::new(kind, value));
        self
    }

    /// Set the rating and its range.
    pub fn rating(mut self, rating: i64, min: i64, max: i64) -> Self {
        self.rating = Some((rating, min, max));
        self
    }

    /// Set a free-text comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Render the canonical packet text.
    ///
    /// The text is not validated here; [`PacketBuilder::build`] does that.
    pub fn to_text(&self) -> String {
        let pairs = |ids: &[Identifier]| {
            Value::Array(
                ids.iter()
                    .map(|id| {
                        Value::Array(vec![
                            Value::String(id.kind.clone()),
                            Value::String(id.value.clone()),
                        ])
                    })
                    .collect(),
            )
        };

        let mut signed = Map::new();
        signed.insert(keys::AUTHOR.into(), pairs(&self.authors));
        signed.insert(keys::RECIPIENT.into(), pairs(&self.recipients));
        signed.insert(keys::TYPE.into(), Value::String(self.claim_type.clone()));
        signed.insert(keys::TIMESTAMP.into(), self.timestamp.into());
        if let Some((rating, min, max)) = self.rating {
            signed.insert(keys::RATING.into(), rating.into());
            signed.insert(keys::MIN_RATING.into(), min.into());
            signed.insert(keys::MAX_RATING.into(), max.into());
        }
        if let Some(comment) = &self.comment {
            signed.insert(keys::COMMENT.into(), Value::String(comment.clone()));
        }

        crate::canonical::encode(&packet_document(Value::Object(signed), None))
    }

    /// Build the packet through the normal construction path.
    pub fn build<S: CryptoSuite>(&self, suite: &S) -> Result<Packet> {
        Packet::new(&self.to_text(), Verification::Required, suite)
    }
}
