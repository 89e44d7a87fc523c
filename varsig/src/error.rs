//! Error types.
//!
//! Structural problems with a varsig ([`DecodeError`]) are kept apart from
//! failures of the signing backend ([`Error::Signing`], [`KeyError`]). A
//! signature that simply does not verify is neither: it is `Ok(false)`.

use crate::varint::MalformedVarint;
use std::fmt;
use thiserror::Error;

/// The varint fields of an envelope, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The signature algorithm tag.
    SignatureHeader,

    /// The hash algorithm tag.
    HashAlgorithm,

    /// The byte count of the trailing signature.
    SignatureLength,

    /// The payload encoding tag.
    Encoding,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::SignatureHeader => "signature header",
            Field::HashAlgorithm => "hash algorithm",
            Field::SignatureLength => "signature length",
            Field::Encoding => "encoding info",
        })
    }
}

/// A byte sequence is not a structurally valid varsig.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The leading byte is not the varsig prefix.
    #[error("invalid prefix: expected {expected:#04x}, found {}", display_byte(.found))]
    InvalidPrefix {
        /// The varsig prefix.
        expected: u8,

        /// The byte actually present, if any.
        found: Option<u8>,
    },

    /// One of the varint fields could not be read.
    #[error("malformed {field}: {source}")]
    MalformedVarint {
        /// The field being read.
        field: Field,

        /// The underlying varint error (with its offset).
        #[source]
        source: MalformedVarint,
    },

    /// The signature header is not registered.
    #[error("unknown signature algorithm tag {tag:#x} at offset {offset}")]
    UnknownAlgorithm {
        /// The signature header value.
        tag: u64,

        /// Offset of the signature header field.
        offset: usize,
    },

    /// The signature header is not the one the caller verifies with.
    #[error(
        "signature header {tag:#x} at offset {offset} is not the expected algorithm {expected:#x}"
    )]
    UnexpectedAlgorithm {
        /// The signature header value.
        tag: u64,

        /// The signature header of the algorithm in use.
        expected: u64,

        /// Offset of the signature header field.
        offset: usize,
    },

    /// The declared signature length runs past the end of the buffer.
    #[error(
        "truncated signature at offset {offset}: declared {declared} bytes, {available} available"
    )]
    TruncatedSignature {
        /// Offset where the signature bytes start.
        offset: usize,

        /// The signature length field's value.
        declared: u64,

        /// Bytes remaining after the header fields.
        available: usize,
    },
}

fn display_byte(byte: &Option<u8>) -> String {
    match byte {
        Some(byte) => format!("{byte:#04x}"),
        None => "end of input".to_string(),
    }
}

/// Key material could not be generated, imported, or exported.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Raw key bytes have the wrong length.
    #[error("expected {expected} key bytes, found {found}")]
    InvalidLength {
        /// Required length.
        expected: usize,

        /// Supplied length.
        found: usize,
    },

    /// The backend rejected the key bytes.
    #[error("invalid key: {0}")]
    Rejected(#[source] signature::Error),

    /// The system random number generator failed.
    #[error("random number generator failed: {0}")]
    Rng(#[from] getrandom::Error),

    /// RSA key generation or parsing failed.
    #[cfg(feature = "rsa")]
    #[error("RSA key error: {0}")]
    Rsa(#[from] rsa::Error),

    /// RSA key (de)serialization failed.
    #[cfg(feature = "rsa")]
    #[error("RSA key encoding error: {0}")]
    RsaEncoding(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BLS key generation or parsing failed.
    #[cfg(feature = "bls")]
    #[error("BLS key error: {0:?}")]
    Bls(blst::BLST_ERROR),
}

/// An algorithm could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// An algorithm with this name is already registered.
    #[error("algorithm {name:?} is already registered")]
    NameCollision {
        /// The duplicated name.
        name: String,
    },

    /// Another algorithm already uses this signature header.
    #[error("signature header {tag:#x} of {name:?} is already used by {existing:?}")]
    TagCollision {
        /// The duplicated tag.
        tag: u64,

        /// The algorithm being registered.
        name: String,

        /// The algorithm that owns the tag.
        existing: String,
    },
}

/// Top-level error for creating and verifying varsigs.
#[derive(Debug, Error)]
pub enum Error {
    /// The varsig is structurally invalid.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// No algorithm is registered under this name.
    #[error("no algorithm named {0:?}")]
    AlgorithmNotFound(String),

    /// The signing backend failed.
    #[error("signing failed: {0}")]
    Signing(#[source] signature::Error),

    /// The verification backend failed (as opposed to rejecting the signature).
    #[error("verification failed to run: {0}")]
    Verification(#[source] signature::Error),

    /// Key generation, import, or export failed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// An opaque key handle was passed to an algorithm that did not create it.
    #[error("key is not a {expected}")]
    KeyMismatch {
        /// The concrete key type the algorithm expected.
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varint::VarintFault;
    use pretty_assertions::assert_eq;

    #[test_log::test]
    fn test_invalid_prefix_message() {
        let err = DecodeError::InvalidPrefix {
            expected: 0x34,
            found: Some(0x35),
        };
        assert_eq!(err.to_string(), "invalid prefix: expected 0x34, found 0x35");

        let err = DecodeError::InvalidPrefix {
            expected: 0x34,
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "invalid prefix: expected 0x34, found end of input"
        );
    }

    #[test_log::test]
    fn test_unexpected_algorithm_message() {
        let err = DecodeError::UnexpectedAlgorithm {
            tag: 0x1205,
            expected: 0xed,
            offset: 1,
        };
        assert_eq!(
            err.to_string(),
            "signature header 0x1205 at offset 1 is not the expected algorithm 0xed"
        );
    }

    #[test_log::test]
    fn test_malformed_varint_message_names_field() {
        let err = DecodeError::MalformedVarint {
            field: Field::SignatureLength,
            source: MalformedVarint {
                offset: 4,
                fault: VarintFault::Truncated,
            },
        };
        assert_eq!(
            err.to_string(),
            "malformed signature length: malformed varint at offset 4: buffer ends before the terminating byte"
        );
    }
}
