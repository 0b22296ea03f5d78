//! Proptest generators for property-based testing.

use proptest::prelude::*;

use vouch_core::{Identifier, Keypair, Packet, PacketBuilder, StandardSuite};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate an identifier with a short type and arbitrary value text.
pub fn identifier() -> impl Strategy<Value = Identifier> {
    (
        prop_oneof![Just("name"), Just("email"), Just("url"), Just("keyID")],
        any::<String>(),
    )
        .prop_map(|(kind, value)| Identifier::new(kind, value))
}

/// Generate a non-empty list of identifiers.
pub fn identifiers(max: usize) -> impl Strategy<Value = Vec<Identifier>> {
    prop::collection::vec(identifier(), 1..=max)
}

/// Generate a claim type.
pub fn claim_type() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// Generate a reasonable timestamp (Unix seconds).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800
}

/// Generate a valid `(rating, min, max)` triple.
pub fn rating() -> impl Strategy<Value = (i64, i64, i64)> {
    (-1000i64..1000, 1i64..1000)
        .prop_flat_map(|(min, span)| (min..=min + span, Just(min), Just(min + span)))
}

/// Parameters for generating a packet.
#[derive(Debug, Clone)]
pub struct PacketParams {
    pub claim_type: String,
    pub timestamp: i64,
    pub authors: Vec<Identifier>,
    pub recipients: Vec<Identifier>,
    pub rating: Option<(i64, i64, i64)>,
    pub comment: Option<String>,
}

impl Arbitrary for PacketParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            claim_type(),
            timestamp(),
            identifiers(3),
            identifiers(3),
            proptest::option::of(rating()),
            proptest::option::of(any::<String>()),
        )
            .prop_map(
                |(claim_type, timestamp, authors, recipients, rating, comment)| PacketParams {
                    claim_type,
                    timestamp,
                    authors,
                    recipients,
                    rating,
                    comment,
                },
            )
            .boxed()
    }
}

/// A builder populated from parameters.
pub fn builder_from_params(params: &PacketParams) -> PacketBuilder {
    let mut builder = PacketBuilder::new(params.claim_type.clone(), params.timestamp);
    for id in &params.authors {
        builder = builder.author(id.kind.clone(), id.value.clone());
    }
    for id in &params.recipients {
        builder = builder.recipient(id.kind.clone(), id.value.clone());
    }
    if let Some((rating, min, max)) = params.rating {
        builder = builder.rating(rating, min, max);
    }
    if let Some(comment) = &params.comment {
        builder = builder.comment(comment.clone());
    }
    builder
}

/// Build an unsigned packet from parameters.
pub fn packet_from_params(params: &PacketParams) -> Packet {
    builder_from_params(params)
        .build(&StandardSuite)
        .expect("generated params are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_core::canonical::{encode, parse};
    use vouch_core::{signature, Verification};

    proptest! {
        #[test]
        fn test_generated_packets_are_valid(params: PacketParams) {
            let packet = packet_from_params(&params);
            prop_assert_eq!(packet.authors(), params.authors.as_slice());
            prop_assert_eq!(packet.recipients(), params.recipients.as_slice());
            prop_assert_eq!(packet.timestamp(), params.timestamp);
            prop_assert_eq!(packet.rating(), params.rating.map(|r| r.0));
            prop_assert_eq!(packet.comment(), params.comment.as_deref());
        }

        #[test]
        fn test_canonical_text_roundtrips(params: PacketParams) {
            let packet = packet_from_params(&params);
            let reencoded = encode(&parse(packet.data()).unwrap());
            prop_assert_eq!(reencoded.as_str(), packet.data());

            let again = Packet::new(packet.data(), Verification::Required, &StandardSuite).unwrap();
            prop_assert_eq!(again.hash(), packet.hash());
            prop_assert_eq!(again.timestamp(), packet.timestamp());
        }

        #[test]
        fn test_hash_deterministic(params: PacketParams) {
            let p1 = packet_from_params(&params);
            let p2 = packet_from_params(&params);
            prop_assert_eq!(p1.hash(), p2.hash());
        }

        #[test]
        fn test_hash_ignores_signature_and_metadata(
            params in any::<PacketParams>(),
            kp in keypair(),
            priority in any::<i32>(),
        ) {
            let mut packet = packet_from_params(&params);
            let original = packet.hash();

            packet.sign(&StandardSuite, &kp);
            packet.set_priority(priority);
            packet.set_published();
            prop_assert_eq!(packet.hash(), original);
        }

        #[test]
        fn test_signature_roundtrip(params in any::<PacketParams>(), kp in keypair()) {
            let mut packet = packet_from_params(&params);
            let sig = packet.sign(&StandardSuite, &kp).clone();
            prop_assert!(signature::verify(&StandardSuite, &sig, packet.signed_data()));

            let reparsed = Packet::new(packet.data(), Verification::Required, &StandardSuite).unwrap();
            prop_assert_eq!(reparsed.signature(), Some(&sig));
        }

        #[test]
        fn test_different_timestamps_different_hashes(
            params in any::<PacketParams>(),
            delta in 1i64..1000,
        ) {
            let mut other = params.clone();
            other.timestamp = params.timestamp + delta;
            prop_assert_ne!(
                packet_from_params(&params).hash(),
                packet_from_params(&other).hash()
            );
        }
    }
}
