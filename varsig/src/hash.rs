//! Multihash tags for digest algorithms.
//!
//! The codec never hashes anything itself; it only records which digest the
//! signing algorithm used. Binding the tag to the concrete digest type lets
//! an algorithm carry its hash as a type parameter instead of configuring
//! one globally.

/// Multihash prefix for a digest algorithm.
pub trait Multihasher {
    /// Multihash tag for this hasher.
    const MULTIHASH_TAG: u64;
}

/// Multihash tag for SHA2-256.
pub const SHA2_256: u64 = 0x12;

/// Multihash tag for SHA2-512.
pub const SHA2_512: u64 = 0x13;

/// Multihash tag for SHA2-384.
pub const SHA2_384: u64 = 0x20;

impl Multihasher for sha2::Sha256 {
    const MULTIHASH_TAG: u64 = SHA2_256;
}

impl Multihasher for sha2::Sha384 {
    const MULTIHASH_TAG: u64 = SHA2_384;
}

impl Multihasher for sha2::Sha512 {
    const MULTIHASH_TAG: u64 = SHA2_512;
}

/// Human-readable name of a known hash tag.
#[must_use]
pub const fn name(tag: u64) -> Option<&'static str> {
    match tag {
        SHA2_256 => Some("sha2-256"),
        SHA2_384 => Some("sha2-384"),
        SHA2_512 => Some("sha2-512"),
        _ => None,
    }
}
