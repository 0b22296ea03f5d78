//! # Vouch Core
//!
//! Pure primitives for vouch packets: canonical text, validation, and
//! detached signatures.
//!
//! This crate contains no I/O, no storage, no networking. Cryptography is
//! reached only through the [`CryptoSuite`] capability trait.
//!
//! ## Key Types
//!
//! - [`Packet`] - A statement from authors about recipients, optionally rated and signed
//! - [`PacketHash`] - Content address: digest of the signed payload text
//! - [`Signature`] - Detached signature over the signed payload
//! - [`CanonicalDocument`] - Text that equals its own canonical re-encoding
//!
//! ## Canonicalization
//!
//! Packet text is compact JSON with document-ordered members. See [`canonical`].
//!
//! ```rust
//! use vouch_core::{Keypair, PacketBuilder, StandardSuite};
//!
//! let suite = StandardSuite;
//! let mut packet = PacketBuilder::new("review", 1400000000)
//!     .author("name", "alice")
//!     .recipient("name", "bob")
//!     .rating(8, 0, 10)
//!     .build(&suite)
//!     .unwrap();
//!
//! let keypair = Keypair::generate();
//! let sig = packet.sign(&suite, &keypair).clone();
//! assert!(sig.is_valid(&suite, packet.signed_data()));
//! ```

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod packet;
pub mod signature;
pub mod types;
pub mod validation;
pub mod wire;

pub use canonical::CanonicalDocument;
pub use crypto::{export_key, CryptoSuite, KeyExport, Keypair, StandardSuite};
pub use error::{PacketError, Result};
pub use packet::{Packet, PacketBuilder, PacketExport, SignatureDetails};
pub use signature::Signature;
pub use types::{Identifier, PacketHash, Verification};
pub use validation::{validate_document, Rating, SignedPayload};
pub use wire::MAX_PACKET_LEN;
