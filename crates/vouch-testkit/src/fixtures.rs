//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use vouch_core::{Keypair, Packet, PacketBuilder, StandardSuite, Verification};

/// The reference unsigned packet: alice rates bob 8 on a 0..=10 scale.
pub const EXAMPLE_TEXT: &str = r#"{"signedData":{"author":[["name","alice"]],"recipient":[["name","bob"]],"type":"review","timestamp":1400000000,"rating":8,"minRating":0,"maxRating":10},"signature":{}}"#;

/// A test fixture with a keypair and the standard suite.
pub struct TestFixture {
    pub keypair: Keypair,
    pub suite: StandardSuite,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            suite: StandardSuite,
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            suite: StandardSuite,
        }
    }

    /// The reference example packet, unsigned.
    pub fn example(&self) -> Packet {
        Packet::new(EXAMPLE_TEXT, Verification::Required, &self.suite)
            .expect("example text is a valid packet")
    }

    /// An unsigned rating packet from `author` about `recipient`.
    pub fn make_rating(&self, author: &str, recipient: &str, rating: i64) -> Packet {
        PacketBuilder::new("rating", 1400000000)
            .author("name", author)
            .recipient("name", recipient)
            .rating(rating, -10, 10)
            .build(&self.suite)
            .expect("fixture rating is valid")
    }

    /// The same rating packet, signed by this fixture's key.
    pub fn make_signed_rating(&self, author: &str, recipient: &str, rating: i64) -> Packet {
        let mut packet = self.make_rating(author, recipient, rating);
        packet.sign(&self.suite, &self.keypair);
        packet
    }

    /// This fixture's text-encoded public key.
    pub fn public_key_text(&self) -> String {
        use vouch_core::CryptoSuite;
        self.suite.encode_text(&self.keypair.public_key())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}
