//! The varsig byte layout.
//!
//! ```text
//! prefix ‖ signature header ‖ hash algorithm ‖ signature length ‖ encoding ‖ signature
//! 0x34     varint             varint           varint             varint     bytes
//! ```
//!
//! The envelope has no length prefix of its own. It ends where the signature
//! ends, and anything after that belongs to an outer framing.

use crate::{
    error::{DecodeError, Field},
    header::{Header, PREFIX},
    varint,
};
use std::ops::Range;

/// A decoded varsig, borrowing the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<'a> {
    bytes: &'a [u8],
    header: Header,
    layout: Layout,
}

/// Byte ranges of each envelope field within the decoded buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    /// The signature header varint.
    pub signature_header: Range<usize>,

    /// The hash algorithm varint.
    pub hash_algorithm: Range<usize>,

    /// The signature length varint.
    pub signature_length: Range<usize>,

    /// The encoding varint.
    pub encoding: Range<usize>,

    /// The signature bytes.
    pub signature: Range<usize>,
}

impl Layout {
    /// Range of one of the varint fields.
    #[must_use]
    pub fn field(&self, field: Field) -> Range<usize> {
        match field {
            Field::SignatureHeader => self.signature_header.clone(),
            Field::HashAlgorithm => self.hash_algorithm.clone(),
            Field::SignatureLength => self.signature_length.clone(),
            Field::Encoding => self.encoding.clone(),
        }
    }
}

impl<'a> Envelope<'a> {
    /// Serialize a header and signature into varsig bytes.
    #[must_use]
    pub fn encode(header: &Header, signature: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(header.encoded_len(signature.len()) + signature.len());
        out.push(PREFIX);
        varint::encode(header.signature_header, &mut out);
        varint::encode(header.hash_algorithm, &mut out);
        varint::encode(signature.len() as u64, &mut out);
        varint::encode(header.encoding, &mut out);
        out.extend_from_slice(signature);
        out
    }

    /// Decode the structure of a varsig without resolving its algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the prefix is wrong, a varint field is
    /// malformed, or the signature is truncated.
    pub fn decode(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        Self::decode_with(bytes, |_| Some(())).map(|(envelope, ())| envelope)
    }

    /// Decode a varsig, resolving its signature header as soon as it is read.
    ///
    /// `resolve` is called once with the signature header. Returning `None`
    /// aborts decoding with [`DecodeError::UnknownAlgorithm`] before any later
    /// field is examined.
    ///
    /// # Errors
    ///
    /// As [`Envelope::decode`], plus [`DecodeError::UnknownAlgorithm`].
    pub fn decode_with<R>(
        bytes: &'a [u8],
        resolve: impl FnOnce(u64) -> Option<R>,
    ) -> Result<(Self, R), DecodeError> {
        match bytes.first() {
            Some(&PREFIX) => {}
            found => {
                tracing::debug!(?found, "rejecting varsig with bad prefix");
                return Err(DecodeError::InvalidPrefix {
                    expected: PREFIX,
                    found: found.copied(),
                });
            }
        }

        let mut cursor = Cursor { bytes, pos: 1 };

        let (signature_header, signature_header_span) = cursor.varint(Field::SignatureHeader)?;
        let resolved = resolve(signature_header).ok_or_else(|| {
            tracing::debug!(tag = signature_header, "unknown signature header");
            DecodeError::UnknownAlgorithm {
                tag: signature_header,
                offset: signature_header_span.start,
            }
        })?;

        let (hash_algorithm, hash_algorithm_span) = cursor.varint(Field::HashAlgorithm)?;

        // The value is the signature's byte count; the span is this field's own width.
        let (declared, signature_length_span) = cursor.varint(Field::SignatureLength)?;

        let (encoding, encoding_span) = cursor.varint(Field::Encoding)?;

        let start = cursor.pos;
        let available = bytes.len() - start;
        let signature_len = usize::try_from(declared)
            .ok()
            .filter(|len| *len <= available)
            .ok_or_else(|| {
                tracing::debug!(declared, available, "signature runs past end of buffer");
                DecodeError::TruncatedSignature {
                    offset: start,
                    declared,
                    available,
                }
            })?;

        let envelope = Envelope {
            bytes,
            header: Header {
                signature_header,
                hash_algorithm,
                encoding,
            },
            layout: Layout {
                signature_header: signature_header_span,
                hash_algorithm: hash_algorithm_span,
                signature_length: signature_length_span,
                encoding: encoding_span,
                signature: start..start + signature_len,
            },
        };

        Ok((envelope, resolved))
    }

    /// The decoded header tags.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Field positions within the input.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The prefix byte (always [`PREFIX`] once decoded).
    #[must_use]
    pub fn prefix(&self) -> u8 {
        self.bytes[0]
    }

    /// The raw signature bytes.
    #[must_use]
    pub fn signature(&self) -> &'a [u8] {
        &self.bytes[self.layout.signature.clone()]
    }

    /// The encoded bytes of one varint field.
    #[must_use]
    pub fn raw_field(&self, field: Field) -> &'a [u8] {
        &self.bytes[self.layout.field(field)]
    }

    /// Offset one past the last signature byte.
    #[must_use]
    pub const fn signature_end(&self) -> usize {
        self.layout.signature.end
    }

    /// The envelope itself, without any trailing bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[..self.signature_end()]
    }

    /// Bytes following the envelope in the input.
    #[must_use]
    pub fn trailing(&self) -> &'a [u8] {
        &self.bytes[self.signature_end()..]
    }

    /// Length of the buffer this envelope was decoded from.
    #[must_use]
    pub const fn input_len(&self) -> usize {
        self.bytes.len()
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn varint(&mut self, field: Field) -> Result<(u64, Range<usize>), DecodeError> {
        let start = self.pos;
        let (value, len) = varint::decode(self.bytes, start).map_err(|source| {
            tracing::debug!(%field, %source, "malformed varint field");
            DecodeError::MalformedVarint { field, source }
        })?;
        self.pos += len;
        Ok((value, start..self.pos))
    }
}
