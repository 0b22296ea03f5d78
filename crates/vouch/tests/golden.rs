//! End-to-end and rejection vectors for the packet pipeline.
//!
//! Every implementation must:
//! - accept the reference example byte-for-byte
//! - produce the same canonical text for the golden vectors
//! - reject the same malformed inputs with the same error kind

use vouch::core::canonical::{encode, parse};
use vouch::core::signature;
use vouch::{
    CryptoSuite, Keypair, Packet, PacketError, Signature, StandardSuite, Verification, Vouch,
    VouchConfig,
};
use vouch_testkit::{all_vectors, generate_packet_from_vector, FakeSuite, EXAMPLE_TEXT};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn construct(text: &str) -> Result<Packet, PacketError> {
    Packet::new(text, Verification::Required, &StandardSuite)
}

fn example_with(field: &str, value: &str) -> String {
    let mut doc = parse(EXAMPLE_TEXT).unwrap();
    doc["signedData"][field] = serde_json::from_str(value).unwrap();
    encode(&doc)
}

// =============================================================================
// END-TO-END
// =============================================================================

#[test]
fn test_example_end_to_end() {
    init_tracing();
    let suite = StandardSuite;
    let keypair = Keypair::from_seed(&[0x42; 32]);

    let mut packet = construct(EXAMPLE_TEXT).unwrap();
    assert_eq!(packet.rating(), Some(8));
    assert!(!packet.is_published());

    packet.sign(&suite, &keypair);
    let export = packet.export(&suite);

    assert_eq!(
        export.signature_details.signer_pub_key,
        suite.encode_text(&keypair.public_key())
    );
    assert!(!export.signature_details.signer_key_id.is_empty());
    assert_eq!(export.data, parse(packet.data()).unwrap());

    let json = serde_json::to_value(&export).unwrap();
    for key in ["hash", "data", "published", "priority", "signatureDetails"] {
        assert!(json.get(key).is_some(), "export missing {}", key);
    }
}

#[test]
fn test_roundtrip_identity() {
    let packet = construct(EXAMPLE_TEXT).unwrap();
    assert_eq!(encode(&parse(packet.data()).unwrap()), packet.data());

    let again = construct(packet.data()).unwrap();
    assert_eq!(again.hash(), packet.hash());
    assert_eq!(again.timestamp(), packet.timestamp());
}

#[test]
fn test_tamper_detection() {
    let suite = StandardSuite;
    let keypair = Keypair::from_seed(&[0x42; 32]);
    let mut packet = construct(EXAMPLE_TEXT).unwrap();
    let sig = packet.sign(&suite, &keypair).clone();
    assert!(signature::verify(&suite, &sig, packet.signed_data()));

    let tampered_text = packet.data().replace("1400000000", "1400000001");

    // Verification required: rejected.
    assert!(matches!(
        construct(&tampered_text),
        Err(PacketError::InvalidSignature)
    ));

    // Verification skipped: accepted, but the old signature no longer covers it.
    let tampered = Packet::new(&tampered_text, Verification::Skip, &suite).unwrap();
    assert!(!signature::verify(&suite, &sig, tampered.signed_data()));
    assert_ne!(tampered.hash(), packet.hash());
}

#[test]
fn test_invalid_key_material_never_panics() {
    let suite = StandardSuite;
    let packet = construct(EXAMPLE_TEXT).unwrap();

    // 32 bytes that do not decompress to an Ed25519 point.
    let mut off_curve = [0u8; 32];
    off_curve[0] = 2;
    off_curve[31] = 0x7f;

    for pub_key in [
        suite.encode_text(&off_curve),
        suite.encode_text(&[0u8; 0]),
        suite.encode_text(&[0x09; 31]),
        suite.encode_text(&[0x09; 33]),
        suite.encode_text(&[0xff; 64]),
        "not-base58-0OIl".to_string(),
    ] {
        let sig = Signature::new(pub_key, suite.encode_text(&[0x01; 64]));
        assert!(!signature::verify(&suite, &sig, packet.signed_data()));
        assert_eq!(sig.signer_key_id(&suite), "");
    }
}

#[test]
fn test_fake_suite_pipeline() {
    let fake = FakeSuite::default();
    let vouch = Vouch::with_suite(fake, *b"testkey!", VouchConfig::default());

    let packet = vouch
        .compose(
            &vouch
                .builder("review")
                .author("name", "alice")
                .recipient("name", "bob"),
        )
        .unwrap();
    let export = vouch.export(&packet);
    assert_eq!(export.signature_details.signer_key_id, "fake:74657374");
    assert_eq!(export.hash, packet.hash().to_hex());

    let received = vouch.ingest_wire(&packet.to_wire().unwrap()).unwrap().0;
    assert!(received.is_published());
    assert_eq!(received, packet);
}

#[test]
fn test_null_optionals_read_as_absent() {
    let unrated = EXAMPLE_TEXT.replace(r#""rating":8"#, r#""rating":null"#);
    let packet = construct(&unrated).unwrap();
    assert_eq!(packet.rating(), None);
    assert_eq!(packet.min_rating(), None);

    let unsigned = EXAMPLE_TEXT.replace(
        r#""signature":{}"#,
        r#""signature":{"pubKey":null,"signature":null}"#,
    );
    let packet = construct(&unsigned).unwrap();
    assert!(packet.signature().is_none());
    assert_eq!(packet.export(&StandardSuite).signature_details.signer_key_id, "");
}

// =============================================================================
// GOLDEN VECTORS
// =============================================================================

#[test]
fn test_golden_vectors_sign_and_verify() {
    let suite = StandardSuite;
    for vector in all_vectors() {
        let packet = generate_packet_from_vector(&vector);
        let sig = packet.signature().expect("vectors are signed");

        assert!(
            sig.is_valid(&suite, packet.signed_data()),
            "verify failed for {}",
            vector.name
        );
        assert_eq!(
            sig.signer_pub_key(),
            suite.encode_text(&Keypair::from_seed(&vector.seed).public_key())
        );

        let reparsed = construct(packet.data()).unwrap();
        assert_eq!(reparsed, packet, "reparse mismatch for {}", vector.name);
    }
}

// =============================================================================
// REJECTION VECTORS
// =============================================================================

#[test]
fn test_reject_non_canonical() {
    for text in [
        EXAMPLE_TEXT.replacen('{', "{ ", 1),
        format!("{}\n", EXAMPLE_TEXT),
        EXAMPLE_TEXT.replace("\"alice\"", "\"\\u0061lice\""),
        EXAMPLE_TEXT.replace(":8,", ":8.0,"),
    ] {
        assert!(
            matches!(construct(&text), Err(PacketError::MalformedDocument(_))),
            "must reject {}",
            text
        );
    }
}

#[test]
fn test_reject_rating_out_of_range() {
    assert!(matches!(
        construct(&example_with("rating", "11")),
        Err(PacketError::InvalidRatingRange { .. })
    ));

    let mut doc = parse(EXAMPLE_TEXT).unwrap();
    doc["signedData"]["rating"] = 7.into();
    doc["signedData"]["minRating"] = 10.into();
    doc["signedData"]["maxRating"] = 5.into();
    assert!(matches!(
        construct(&encode(&doc)),
        Err(PacketError::InvalidRatingRange { .. })
    ));
}

#[test]
fn test_reject_empty_parties() {
    assert!(matches!(
        construct(&example_with("author", "[]")),
        Err(PacketError::InvalidCardinality(_))
    ));
    assert!(matches!(
        construct(&example_with("recipient", "[]")),
        Err(PacketError::InvalidCardinality(_))
    ));
}

#[test]
fn test_reject_missing_fields() {
    for field in ["author", "recipient", "type", "timestamp"] {
        let mut doc = parse(EXAMPLE_TEXT).unwrap();
        doc["signedData"].as_object_mut().unwrap().remove(field);
        assert!(
            matches!(
                construct(&encode(&doc)),
                Err(PacketError::MissingRequiredField(f)) if f == field
            ),
            "must reject missing {}",
            field
        );
    }
}

#[test]
fn test_reject_forged_signature_block() {
    let suite = StandardSuite;
    let alice = Keypair::from_seed(&[0x01; 32]);
    let mallory = Keypair::from_seed(&[0x02; 32]);

    let mut packet = construct(EXAMPLE_TEXT).unwrap();
    let sig = packet.sign(&suite, &alice).clone();

    let forged = packet.data().replace(
        sig.signer_pub_key(),
        &suite.encode_text(&mallory.public_key()),
    );
    assert!(matches!(
        construct(&forged),
        Err(PacketError::InvalidSignature)
    ));
}
