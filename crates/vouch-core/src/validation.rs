//! Packet validation: field extraction and structural checks.
//!
//! Validation never mutates anything. It returns a [`Validated`] bundle that
//! the caller commits in one step, so a failed check leaves no partial state.

use serde_json::{Map, Value};

use crate::canonical::{encode, keys};
use crate::crypto::CryptoSuite;
use crate::error::{PacketError, Result};
use crate::signature::{self, Signature};
use crate::types::{Identifier, Verification};

/// A rating with its declared range. Always satisfies `min < max` and
/// `min <= value <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl Rating {
    /// Check the range invariant.
    pub fn new(value: i64, min: i64, max: i64) -> Result<Self> {
        if max <= min || value > max || value < min {
            return Err(PacketError::InvalidRatingRange {
                rating: value,
                min,
                max,
            });
        }
        Ok(Self { value, min, max })
    }
}

/// The typed contents of a packet's `signedData` member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    pub authors: Vec<Identifier>,
    pub recipients: Vec<Identifier>,
    pub claim_type: String,
    pub timestamp: i64,
    pub rating: Option<Rating>,
    pub comment: Option<String>,
}

/// Everything extracted from a valid packet document.
#[derive(Debug, Clone)]
pub struct Validated {
    pub payload: SignedPayload,
    /// Canonical text of the `signedData` member.
    pub signed_text: String,
    pub signature: Option<Signature>,
}

/// Validate a parsed packet document.
///
/// If the signature block carries both a public key and a signature, the
/// signature is verified against the signed payload text unless
/// `verification` is [`Verification::Skip`].
pub fn validate_document<S: CryptoSuite>(
    document: &Value,
    verification: Verification,
    suite: &S,
) -> Result<Validated> {
    let root = document
        .as_object()
        .ok_or_else(|| PacketError::malformed("document must be an object"))?;

    let signed_value = root
        .get(keys::SIGNED_DATA)
        .ok_or_else(|| PacketError::malformed("missing signedData"))?;
    let signed = signed_value
        .as_object()
        .ok_or_else(|| PacketError::malformed("signedData must be an object"))?;
    let sig_obj = root
        .get(keys::SIGNATURE)
        .ok_or_else(|| PacketError::malformed("missing signature block"))?
        .as_object()
        .ok_or_else(|| PacketError::malformed("signature block must be an object"))?;

    let payload = validate_signed_payload(signed)?;
    let signed_text = encode(signed_value);
    let signature = extract_signature(sig_obj)?;

    if let Some(sig) = &signature {
        if verification.is_required() {
            if !signature::verify(suite, sig, &signed_text) {
                tracing::warn!(
                    signer = sig.signer_pub_key(),
                    "packet signature failed verification"
                );
                return Err(PacketError::InvalidSignature);
            }
        } else {
            tracing::trace!("skipping signature verification");
        }
    }

    Ok(Validated {
        payload,
        signed_text,
        signature,
    })
}

/// Extract and check the fields of a `signedData` object.
pub fn validate_signed_payload(signed: &Map<String, Value>) -> Result<SignedPayload> {
    let timestamp = required_int(signed, keys::TIMESTAMP)?;
    let authors = required(signed, keys::AUTHOR)?;
    let recipients = required(signed, keys::RECIPIENT)?;
    let claim_type = required_str(signed, keys::TYPE)?.to_owned();

    let rating = match optional(signed, keys::RATING) {
        Some(value) => {
            let value = as_int(value, keys::RATING)?;
            let min = required_int(signed, keys::MIN_RATING)?;
            let max = required_int(signed, keys::MAX_RATING)?;
            Some(Rating::new(value, min, max)?)
        }
        None => None,
    };

    let comment = match optional(signed, keys::COMMENT) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(PacketError::malformed("comment must be a string")),
        None => None,
    };

    let authors = identifiers(authors, "author")?;
    let recipients = identifiers(recipients, "recipient")?;

    Ok(SignedPayload {
        authors,
        recipients,
        claim_type,
        timestamp,
        rating,
        comment,
    })
}

/// Pull a signature out of the signature block, if both halves are present.
fn extract_signature(sig_obj: &Map<String, Value>) -> Result<Option<Signature>> {
    match (
        optional(sig_obj, keys::PUB_KEY),
        optional(sig_obj, keys::SIGNATURE_VALUE),
    ) {
        (Some(pub_key), Some(sig)) => {
            let pub_key = pub_key
                .as_str()
                .ok_or_else(|| PacketError::malformed("pubKey must be a string"))?;
            let sig = sig
                .as_str()
                .ok_or_else(|| PacketError::malformed("signature must be a string"))?;
            Ok(Some(Signature::new(pub_key, sig)))
        }
        _ => Ok(None),
    }
}

fn identifiers(value: &Value, role: &str) -> Result<Vec<Identifier>> {
    let entries = value
        .as_array()
        .ok_or_else(|| PacketError::malformed(format!("{} must be an array", role)))?;
    if entries.is_empty() {
        return Err(PacketError::InvalidCardinality(format!(
            "packets must have at least 1 {}",
            role
        )));
    }

    entries
        .iter()
        .map(|entry| {
            let pair = entry.as_array().ok_or_else(|| {
                PacketError::InvalidCardinality(format!("{} entry must be a [type, value] pair", role))
            })?;
            if pair.len() != 2 {
                return Err(PacketError::InvalidCardinality(format!(
                    "invalid {} entry length: {}",
                    role,
                    pair.len()
                )));
            }
            match (&pair[0], &pair[1]) {
                (Value::String(kind), Value::String(value)) => {
                    Ok(Identifier::new(kind.as_str(), value.as_str()))
                }
                _ => Err(PacketError::malformed(format!(
                    "{} entry members must be strings",
                    role
                ))),
            }
        })
        .collect()
}

/// An optional member. Explicit `null` counts as absent.
fn optional<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|value| !value.is_null())
}

fn required<'a>(map: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value> {
    map.get(field)
        .ok_or(PacketError::MissingRequiredField(field))
}

fn required_int(map: &Map<String, Value>, field: &'static str) -> Result<i64> {
    as_int(required(map, field)?, field)
}

fn required_str<'a>(map: &'a Map<String, Value>, field: &'static str) -> Result<&'a str> {
    required(map, field)?
        .as_str()
        .ok_or_else(|| PacketError::malformed(format!("{} must be a string", field)))
}

fn as_int(value: &Value, field: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| PacketError::malformed(format!("{} must be an integer", field)))
}
