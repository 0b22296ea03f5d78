//! Canonical JSON encoding for deterministic packet text.
//!
//! A packet's text is both its wire form and the source of its hash, so it
//! must have exactly one spelling. The canonical form is defined by a single
//! encoder, [`encode`]:
//! - Compact: no whitespace between tokens
//! - Object members in document order (no key sorting)
//! - Strings escaped with the minimal JSON escape set, other UTF-8 verbatim
//! - Integers only; floats are not part of the canonical grammar
//!
//! A text is canonical iff `encode(parse(text)) == text`. [`CanonicalDocument`]
//! is the only way to hold text that passed that check.

use serde_json::{Map, Value};

use crate::error::{PacketError, Result};

/// Document member names.
pub mod keys {
    pub const SIGNED_DATA: &str = "signedData";
    pub const SIGNATURE: &str = "signature";

    pub const AUTHOR: &str = "author";
    pub const RECIPIENT: &str = "recipient";
    pub const TYPE: &str = "type";
    pub const TIMESTAMP: &str = "timestamp";
    pub const RATING: &str = "rating";
    pub const MIN_RATING: &str = "minRating";
    pub const MAX_RATING: &str = "maxRating";
    pub const COMMENT: &str = "comment";

    pub const PUB_KEY: &str = "pubKey";
    pub const SIGNATURE_VALUE: &str = "signature";
}

/// Parse text into a structured document.
///
/// Fails with `MalformedDocument` on invalid JSON or on any float value.
/// This does not check canonicality; see [`CanonicalDocument::parse`].
pub fn parse(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text)?;
    reject_floats(&value)?;
    Ok(value)
}

/// Encode a structured document to its canonical text.
///
/// Total over every `Value`.
pub fn encode(value: &Value) -> String {
    let mut buf = String::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Text that is byte-identical to its own re-encoding, with its parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDocument {
    text: String,
    value: Value,
}

impl CanonicalDocument {
    /// Accept `text` only if it is already canonical.
    pub fn parse(text: &str) -> Result<Self> {
        let value = parse(text)?;
        if encode(&value) != text {
            return Err(PacketError::malformed("non-canonical document"));
        }
        Ok(Self {
            text: text.to_owned(),
            value,
        })
    }

    /// Render a structured document canonically.
    ///
    /// Fails only if the document contains floats.
    pub fn from_value(value: Value) -> Result<Self> {
        reject_floats(&value)?;
        let text = encode(&value);
        Ok(Self { text, value })
    }

    /// Render a document assembled from already-validated parts.
    pub(crate) fn from_validated(value: Value) -> Self {
        let text = encode(&value);
        Self { text, value }
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed document.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume into the canonical text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Build the packet document `{"signedData":..,"signature":{..}}`.
///
/// The signature block is `{}` when `signature` is `None`.
pub fn packet_document(signed_data: Value, signature: Option<(&str, &str)>) -> Value {
    let mut sig_obj = Map::new();
    if let Some((pub_key, sig)) = signature {
        sig_obj.insert(keys::PUB_KEY.into(), Value::String(pub_key.into()));
        sig_obj.insert(keys::SIGNATURE_VALUE.into(), Value::String(sig.into()));
    }

    let mut doc = Map::new();
    doc.insert(keys::SIGNED_DATA.into(), signed_data);
    doc.insert(keys::SIGNATURE.into(), Value::Object(sig_obj));
    Value::Object(doc)
}

fn reject_floats(value: &Value) -> Result<()> {
    match value {
        Value::Number(n) if n.is_f64() => Err(PacketError::malformed(format!(
            "floats are not canonical: {}",
            n
        ))),
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
        _ => Ok(()),
    }
}

/// Recursively encode a value.
fn encode_value_to(buf: &mut String, value: &Value) {
    match value {
        Value::Null => buf.push_str("null"),
        Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => buf.push_str(&n.to_string()),
        Value::String(s) => encode_string(buf, s),
        Value::Array(items) => {
            buf.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                encode_value_to(buf, item);
            }
            buf.push(']');
        }
        Value::Object(map) => {
            buf.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                encode_string(buf, key);
                buf.push(':');
                encode_value_to(buf, item);
            }
            buf.push('}');
        }
    }
}

/// Encode a string literal with the minimal escape set.
///
/// Only `"`, `\` and C0 controls are escaped. DEL and all non-ASCII
/// characters are written verbatim.
fn encode_string(buf: &mut String, s: &str) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0c}' => buf.push_str("\\f"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let b = c as u8;
                buf.push_str("\\u00");
                buf.push(HEX[(b >> 4) as usize] as char);
                buf.push(HEX[(b & 0x0f) as usize] as char);
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}
