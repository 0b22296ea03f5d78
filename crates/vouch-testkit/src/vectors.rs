//! Golden test vectors for canonical packet text.
//!
//! Each vector pins the exact canonical text a builder must produce. Hashes
//! and signatures are derived from that text, so agreeing on the text is
//! what makes packets portable across implementations.

use vouch_core::{Keypair, Packet, PacketBuilder, StandardSuite};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    pub claim_type: &'static str,
    pub timestamp: i64,
    pub authors: &'static [(&'static str, &'static str)],
    pub recipients: &'static [(&'static str, &'static str)],
    pub rating: Option<(i64, i64, i64)>,
    pub comment: Option<&'static str>,
    /// Expected canonical text of the unsigned packet.
    pub expected_text: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "rated review",
            seed: [0x42; 32],
            claim_type: "review",
            timestamp: 1400000000,
            authors: &[("name", "alice")],
            recipients: &[("name", "bob")],
            rating: Some((8, 0, 10)),
            comment: None,
            expected_text: r#"{"signedData":{"author":[["name","alice"]],"recipient":[["name","bob"]],"type":"review","timestamp":1400000000,"rating":8,"minRating":0,"maxRating":10},"signature":{}}"#,
        },
        GoldenVector {
            name: "unrated connection",
            seed: [0x01; 32],
            claim_type: "confirm_connection",
            timestamp: 0,
            authors: &[("email", "alice@example.com")],
            recipients: &[("email", "alice@example.com"), ("url", "https://example.com/alice")],
            rating: None,
            comment: None,
            expected_text: r#"{"signedData":{"author":[["email","alice@example.com"]],"recipient":[["email","alice@example.com"],["url","https://example.com/alice"]],"type":"confirm_connection","timestamp":0},"signature":{}}"#,
        },
        GoldenVector {
            name: "negative rating with comment",
            seed: [0x02; 32],
            claim_type: "rating",
            timestamp: 1700000000,
            authors: &[("name", "carol"), ("keyID", "abc")],
            recipients: &[("name", "dave")],
            rating: Some((-5, -10, 10)),
            comment: Some("late \"again\"\n"),
            expected_text: r#"{"signedData":{"author":[["name","carol"],["keyID","abc"]],"recipient":[["name","dave"]],"type":"rating","timestamp":1700000000,"rating":-5,"minRating":-10,"maxRating":10,"comment":"late \"again\"\n"},"signature":{}}"#,
        },
        GoldenVector {
            name: "non-ascii values",
            seed: [0x03; 32],
            claim_type: "review",
            timestamp: 1400000001,
            authors: &[("name", "zoë")],
            recipients: &[("name", "東京")],
            rating: Some((1, 1, 5)),
            comment: None,
            expected_text: r#"{"signedData":{"author":[["name","zoë"]],"recipient":[["name","東京"]],"type":"review","timestamp":1400000001,"rating":1,"minRating":1,"maxRating":5},"signature":{}}"#,
        },
    ]
}

/// Builder populated from a vector.
pub fn builder_from_vector(vector: &GoldenVector) -> PacketBuilder {
    let mut builder = PacketBuilder::new(vector.claim_type, vector.timestamp);
    for (kind, value) in vector.authors {
        builder = builder.author(*kind, *value);
    }
    for (kind, value) in vector.recipients {
        builder = builder.recipient(*kind, *value);
    }
    if let Some((rating, min, max)) = vector.rating {
        builder = builder.rating(rating, min, max);
    }
    if let Some(comment) = vector.comment {
        builder = builder.comment(comment);
    }
    builder
}

/// Build the vector's packet and sign it with the vector's seed.
pub fn generate_packet_from_vector(vector: &GoldenVector) -> Packet {
    let mut packet = builder_from_vector(vector)
        .build(&StandardSuite)
        .expect("golden vectors are valid");
    packet.sign(&StandardSuite, &Keypair::from_seed(&vector.seed));
    packet
}

/// Check every vector's builder output against its expected text.
///
/// Returns `(name, matches, actual_text)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let text = builder_from_vector(v).to_text();
            let matches = text == v.expected_text;
            (v.name.to_string(), matches, text)
        })
        .collect()
}
