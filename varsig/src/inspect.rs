//! Inspecting varsigs.

use crate::{
    envelope::Envelope,
    error::{DecodeError, Field},
    registry::{self, Registry},
};

/// One envelope field: its value and the bytes that encode it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldValue {
    /// Decoded value.
    pub value: u64,

    /// Offset of the field in the input.
    pub offset: usize,

    /// Encoded bytes.
    #[cfg_attr(feature = "serde", serde(with = "hex::serde"))]
    pub raw: Vec<u8>,
}

/// Everything a varsig says about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inspection {
    /// Registered name of the signature algorithm.
    pub algorithm: String,

    /// The prefix byte.
    pub prefix: FieldValue,

    /// The signature algorithm tag.
    pub signature_header: FieldValue,

    /// The hash algorithm tag.
    pub hash_algorithm: FieldValue,

    /// The signature length. Its `value` is the signature's byte count; its
    /// `raw` is the (usually shorter) varint encoding of that count.
    pub signature_length: FieldValue,

    /// The payload encoding tag.
    pub encoding: FieldValue,

    /// The signature bytes.
    #[cfg_attr(feature = "serde", serde(with = "hex::serde"))]
    pub signature: Vec<u8>,

    /// Offset one past the last signature byte.
    pub signature_end: usize,

    /// Length of the inspected input, trailing bytes included.
    pub total_length: usize,
}

impl Inspection {
    fn new(envelope: &Envelope<'_>, algorithm: &str) -> Self {
        let field = |field: Field| {
            let span = envelope.layout().field(field);
            FieldValue {
                value: match field {
                    Field::SignatureHeader => envelope.header().signature_header,
                    Field::HashAlgorithm => envelope.header().hash_algorithm,
                    Field::SignatureLength => envelope.signature().len() as u64,
                    Field::Encoding => envelope.header().encoding,
                },
                offset: span.start,
                raw: envelope.raw_field(field).to_vec(),
            }
        };

        Inspection {
            algorithm: algorithm.to_string(),
            prefix: FieldValue {
                value: u64::from(envelope.prefix()),
                offset: 0,
                raw: vec![envelope.prefix()],
            },
            signature_header: field(Field::SignatureHeader),
            hash_algorithm: field(Field::HashAlgorithm),
            signature_length: field(Field::SignatureLength),
            encoding: field(Field::Encoding),
            signature: envelope.signature().to_vec(),
            signature_end: envelope.signature_end(),
            total_length: envelope.input_len(),
        }
    }

    /// Number of bytes after the envelope in the inspected input.
    #[must_use]
    pub const fn trailing(&self) -> usize {
        self.total_length.saturating_sub(self.signature_end)
    }

    /// Whether the input was exactly one envelope, with nothing after it.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.trailing() == 0
    }
}

impl Registry {
    /// Decode a varsig and resolve its algorithm.
    ///
    /// Bytes after the signature are ignored; see [`Inspection::is_exact`].
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the varsig is malformed or its signature
    /// header is not registered.
    pub fn inspect(&self, varsig: &[u8]) -> Result<Inspection, DecodeError> {
        let (envelope, entry) = Envelope::decode_with(varsig, |tag| self.by_header_tag(tag))?;
        if envelope.header().known_encoding().is_none() {
            tracing::debug!(encoding = envelope.header().encoding, "unrecognised payload encoding");
        }
        Ok(Inspection::new(&envelope, entry.name()))
    }
}

/// Inspect a varsig against the [global](registry::global) registry.
///
/// # Errors
///
/// See [`Registry::inspect`].
pub fn inspect(varsig: &[u8]) -> Result<Inspection, DecodeError> {
    registry::global().inspect(varsig)
}
