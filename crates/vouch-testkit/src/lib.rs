//! # Vouch Testkit
//!
//! Testing utilities for vouch.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with their exact canonical text
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//! - **FakeSuite**: A deterministic crypto suite for exercising the pipeline
//!
//! ## Golden Vectors
//!
//! ```rust
//! use vouch_testkit::vectors::{all_vectors, generate_packet_from_vector};
//!
//! for vector in all_vectors() {
//!     let packet = generate_packet_from_vector(&vector);
//!     println!("{}: {}", vector.name, packet.hash().to_hex());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use vouch_testkit::generators::{PacketParams, packet_from_params};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: PacketParams) {
//!         let p1 = packet_from_params(&params);
//!         let p2 = packet_from_params(&params);
//!         prop_assert_eq!(p1.hash(), p2.hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use vouch_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let packet = fixture.make_signed_rating("alice", "bob", 7);
//! assert!(packet.signature().is_some());
//! ```

pub mod fake;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fake::FakeSuite;
pub use fixtures::{multi_party_fixtures, TestFixture, EXAMPLE_TEXT};
pub use generators::{packet_from_params, PacketParams};
pub use vectors::{all_vectors, generate_packet_from_vector, verify_all_vectors, GoldenVector};
