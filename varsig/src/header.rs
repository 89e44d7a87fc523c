//! Varsig header.

use crate::{encoding::Encoding, varint};

/// The single byte every varsig starts with.
pub const PREFIX: u8 = 0x34;

/// The tags preceding the signature in an envelope.
///
/// The signature length is not part of the header: it is derived from the
/// signature when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Signature algorithm tag (e.g. `0xed` for Ed25519).
    pub signature_header: u64,

    /// Multihash tag of the digest used when signing.
    pub hash_algorithm: u64,

    /// Payload encoding tag.
    pub encoding: u64,
}

impl Header {
    /// A header for raw payloads signed with the given algorithm tags.
    #[must_use]
    pub const fn new(signature_header: u64, hash_algorithm: u64) -> Self {
        Header {
            signature_header,
            hash_algorithm,
            encoding: Encoding::Identity.code(),
        }
    }

    /// The payload encoding, if it is one this crate knows.
    #[must_use]
    pub const fn known_encoding(&self) -> Option<Encoding> {
        Encoding::from_code(self.encoding)
    }

    /// Size in bytes of the prefix and header fields for a signature of
    /// `signature_len` bytes (the signature itself excluded).
    #[must_use]
    pub const fn encoded_len(&self, signature_len: usize) -> usize {
        1 + varint::encoded_len(self.signature_header)
            + varint::encoded_len(self.hash_algorithm)
            + varint::encoded_len(signature_len as u64)
            + varint::encoded_len(self.encoding)
    }
}
