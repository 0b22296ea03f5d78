//! Vouch: unified API for composing and accepting packets.
//!
//! A `Vouch` instance owns one signing key, a crypto suite and a config, and
//! applies them consistently to every packet it creates or ingests.

use vouch_core::{
    export_key, CryptoSuite, KeyExport, Keypair, Packet, PacketBuilder, PacketExport, Signature,
    StandardSuite, Verification,
};

use crate::error::{Result, VouchError};

/// Configuration for a Vouch instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VouchConfig {
    /// Whether embedded signatures are verified when ingesting packets.
    pub verification: Verification,
    /// Priority assigned to every packet this instance composes or ingests.
    pub default_priority: i32,
}

impl Default for VouchConfig {
    fn default() -> Self {
        Self {
            verification: Verification::Required,
            default_priority: 0,
        }
    }
}

/// The main Vouch struct.
///
/// Provides a unified API for:
/// - Composing and signing new packets
/// - Ingesting packets from text or wire frames
/// - Countersigning and attaching signatures
/// - Exporting packets and keys
pub struct Vouch<S: CryptoSuite = StandardSuite> {
    /// The crypto suite.
    suite: S,
    /// The signing key for this instance.
    key: S::SigningKey,
    /// Configuration.
    config: VouchConfig,
}

impl Vouch<StandardSuite> {
    /// Create an instance over the standard suite.
    pub fn new(keypair: Keypair, config: VouchConfig) -> Self {
        Self::with_suite(StandardSuite, keypair, config)
    }

    /// Create an instance from an exported secret (see [`Vouch::export_key`]).
    pub fn from_encoded_secret(secret: &str, config: VouchConfig) -> Result<Self> {
        let keypair = Keypair::from_encoded_secret(secret)
            .ok_or_else(|| VouchError::InvalidKey("undecodable secret".into()))?;
        Ok(Self::new(keypair, config))
    }
}

impl<S: CryptoSuite> Vouch<S> {
    /// Create an instance over any crypto suite.
    pub fn with_suite(suite: S, key: S::SigningKey, config: VouchConfig) -> Self {
        Self { suite, key, config }
    }

    /// The crypto suite.
    pub fn suite(&self) -> &S {
        &self.suite
    }

    /// The configuration.
    pub fn config(&self) -> &VouchConfig {
        &self.config
    }

    /// This instance's text-encoded public key.
    pub fn public_key_text(&self) -> String {
        self.suite.encode_text(&self.suite.public_key(&self.key))
    }

    /// This instance's signer identity.
    pub fn key_id(&self) -> String {
        self.suite
            .derive_identity(&self.suite.public_key(&self.key))
            .unwrap_or_default()
    }

    /// Export this instance's key in printable form.
    pub fn export_key(&self) -> KeyExport {
        export_key(&self.suite, &self.key)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Composing
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a packet stamped with the current time.
    pub fn builder(&self, claim_type: impl Into<String>) -> PacketBuilder {
        PacketBuilder::new(claim_type, now_secs())
    }

    /// Build, sign and prioritize a new packet.
    pub fn compose(&self, builder: &PacketBuilder) -> Result<Packet> {
        let mut packet = builder.build(&self.suite)?;
        packet.sign(&self.suite, &self.key);
        packet.set_priority(self.config.default_priority);

        tracing::info!(
            hash = %packet.hash(),
            claim_type = packet.claim_type(),
            "composed packet"
        );
        Ok(packet)
    }

    /// Replace a packet's signature with one from this instance.
    pub fn countersign(&self, packet: &mut Packet) -> Signature {
        packet.sign(&self.suite, &self.key).clone()
    }

    /// Attach a third-party signature if it verifies.
    pub fn attach(&self, packet: &mut Packet, signature: Signature) -> bool {
        packet.add_signature(&self.suite, signature)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ingest
    // ─────────────────────────────────────────────────────────────────────────

    /// Accept a packet received as canonical text.
    ///
    /// The packet is marked published.
    pub fn ingest_text(&self, text: &str) -> Result<Packet> {
        let mut packet = Packet::from_published(text, self.config.verification, &self.suite)
            .map_err(|e| {
                tracing::warn!("rejected packet: {}", e);
                e
            })?;
        packet.set_priority(self.config.default_priority);
        Ok(packet)
    }

    /// Accept one framed packet from the front of `bytes`.
    ///
    /// Returns the packet and the number of bytes consumed.
    pub fn ingest_wire(&self, bytes: &[u8]) -> Result<(Packet, usize)> {
        let (mut packet, consumed) =
            Packet::from_wire(bytes, self.config.verification, &self.suite).map_err(|e| {
                tracing::warn!("rejected framed packet: {}", e);
                e
            })?;
        packet.set_priority(self.config.default_priority);
        Ok((packet, consumed))
    }

    /// Accept every framed packet in `bytes`, in order.
    pub fn ingest_all(&self, mut bytes: &[u8]) -> Result<Vec<Packet>> {
        let mut packets = Vec::new();
        while !bytes.is_empty() {
            let (packet, consumed) = self.ingest_wire(bytes)?;
            packets.push(packet);
            bytes = &bytes[consumed..];
        }
        Ok(packets)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Structured view of a packet.
    pub fn export(&self, packet: &Packet) -> PacketExport {
        packet.export(&self.suite)
    }
}

/// Get current time in Unix seconds.
fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_core::PacketError;

    fn vouch(seed: u8) -> Vouch {
        Vouch::new(Keypair::from_seed(&[seed; 32]), VouchConfig::default())
    }

    fn review(v: &Vouch) -> PacketBuilder {
        v.builder("review")
            .author("name", "alice")
            .recipient("name", "bob")
            .rating(8, 0, 10)
    }

    #[test]
    fn test_compose_signs_and_prioritizes() {
        let v = Vouch::new(
            Keypair::from_seed(&[0x01; 32]),
            VouchConfig {
                default_priority: 5,
                ..VouchConfig::default()
            },
        );
        let packet = v.compose(&review(&v)).unwrap();

        let sig = packet.signature().unwrap();
        assert_eq!(sig.signer_pub_key(), v.public_key_text());
        assert!(sig.is_valid(v.suite(), packet.signed_data()));
        assert_eq!(packet.priority(), 5);
        assert!(!packet.is_published());
    }

    #[test]
    fn test_builder_timestamp_is_recent() {
        let v = vouch(1);
        let packet = v.compose(&review(&v)).unwrap();
        assert!(packet.timestamp() > 1_600_000_000);
    }

    #[test]
    fn test_ingest_text_marks_published() {
        let v = vouch(1);
        let packet = v.compose(&review(&v)).unwrap();
        let ingested = vouch(2).ingest_text(packet.data()).unwrap();
        assert!(ingested.is_published());
        assert_eq!(ingested, packet);
    }

    #[test]
    fn test_ingest_rejects_tampered() {
        let v = vouch(1);
        let packet = v.compose(&review(&v)).unwrap();
        let tampered = packet.data().replace("\"rating\":8", "\"rating\":9");

        let result = v.ingest_text(&tampered);
        assert!(matches!(
            result,
            Err(VouchError::Packet(PacketError::InvalidSignature))
        ));

        let lenient = Vouch::new(
            Keypair::from_seed(&[0x01; 32]),
            VouchConfig {
                verification: Verification::Skip,
                ..VouchConfig::default()
            },
        );
        assert!(lenient.ingest_text(&tampered).is_ok());
    }

    #[test]
    fn test_ingest_all() {
        let v = vouch(1);
        let a = v.compose(&review(&v)).unwrap();
        let b = v
            .compose(&v.builder("comment").author("name", "bob").recipient("name", "carol").comment("hi"))
            .unwrap();

        let mut stream = a.to_wire().unwrap().to_vec();
        stream.extend_from_slice(&b.to_wire().unwrap());

        let packets = v.ingest_all(&stream).unwrap();
        assert_eq!(packets, vec![a, b]);
        assert!(packets.iter().all(Packet::is_published));
    }

    #[test]
    fn test_countersign_and_attach() {
        let alice = vouch(1);
        let bob = vouch(2);
        let builder = PacketBuilder::new("review", 1400000000)
            .author("name", "alice")
            .recipient("name", "bob");

        let mut packet = alice.compose(&builder).unwrap();
        let bob_sig = bob.countersign(&mut packet);
        assert_eq!(packet.signature(), Some(&bob_sig));
        assert_eq!(packet.signature().unwrap().signer_key_id(bob.suite()), bob.key_id());

        // Same signed payload: bob's signature attaches.
        let mut same = alice.compose(&builder).unwrap();
        assert!(alice.attach(&mut same, bob_sig.clone()));
        assert_eq!(same.signature(), Some(&bob_sig));

        // Different payload: rejected, alice's signature stays.
        let mut other = alice.compose(&builder.clone().comment("different")).unwrap();
        let before = other.signature().cloned();
        assert!(!alice.attach(&mut other, bob_sig));
        assert_eq!(other.signature().cloned(), before);
    }

    #[test]
    fn test_export_key_roundtrip() {
        let v = vouch(7);
        let export = v.export_key();
        assert_eq!(export.pub_key, v.public_key_text());
        assert_eq!(export.key_id, v.key_id());

        let restored = Vouch::from_encoded_secret(&export.priv_key, VouchConfig::default()).unwrap();
        assert_eq!(restored.public_key_text(), v.public_key_text());

        assert!(matches!(
            Vouch::from_encoded_secret("garbage", VouchConfig::default()),
            Err(VouchError::InvalidKey(_))
        ));
    }
}
