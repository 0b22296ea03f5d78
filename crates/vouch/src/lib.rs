//! # Vouch
//!
//! The unified API for vouch: signed, content-addressed trust statements.
//!
//! ## Overview
//!
//! A packet is a claim by one or more authors about one or more recipients,
//! optionally carrying a rating within a declared range. It is serialized as
//! canonical JSON, hashed over its signed payload, and optionally signed so
//! third parties can verify authorship.
//!
//! ## Key Concepts
//!
//! - **Packet**: Signed payload is immutable. Only the signature and local metadata change.
//! - **Hash**: Digest of the signed payload. Signature, `published` and `priority` never affect it.
//! - **Canonical text**: The one accepted spelling of a document; also the wire form.
//! - **Published**: Set on packets that arrived via ingest rather than local composition.
//!
//! ## Usage
//!
//! ```rust
//! use vouch::{Keypair, Vouch, VouchConfig};
//!
//! let vouch = Vouch::new(Keypair::generate(), VouchConfig::default());
//!
//! let packet = vouch
//!     .compose(
//!         &vouch
//!             .builder("review")
//!             .author("name", "alice")
//!             .recipient("name", "bob")
//!             .rating(8, 0, 10),
//!     )
//!     .unwrap();
//!
//! let received = vouch.ingest_wire(&packet.to_wire().unwrap()).unwrap().0;
//! assert!(received.is_published());
//! assert_eq!(received.hash(), packet.hash());
//! ```
//!
//! ## Re-exports
//!
//! - `vouch::core` - Core primitives (Packet, Signature, canonical encoding)

pub mod error;
pub mod vouch;

// Re-export component crates
pub use vouch_core as core;

// Re-export main types for convenience
pub use error::{Result, VouchError};
pub use vouch::{Vouch, VouchConfig};

// Re-export commonly used core types
pub use vouch_core::{
    CryptoSuite, Identifier, KeyExport, Keypair, Packet, PacketBuilder, PacketError, PacketExport,
    PacketHash, Signature, StandardSuite, Verification,
};
