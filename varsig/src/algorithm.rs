//! Signature algorithms.
//!
//! [`SignatureAlgorithm`] is the statically typed interface: each algorithm
//! names its own key types, and the codec only ever sees signature bytes.
//! [`any::DynAlgorithm`] erases those key types so algorithms can be looked
//! up at runtime through a [`Registry`](crate::registry::Registry).

pub mod any;

#[cfg(feature = "bls")]
pub mod bls;

#[cfg(feature = "ed25519")]
pub mod eddsa;

#[cfg(feature = "rsa")]
pub mod rsa;

use crate::{error::KeyError, header::Header};
use std::{fmt::Debug, future::Future};

/// A signing scheme that can produce and check varsig signatures.
///
/// Signing, verification, and key generation are asynchronous so that
/// implementations may defer to hardware-backed or remote key stores.
pub trait SignatureAlgorithm: Debug + Send + Sync + 'static {
    /// Private key type.
    type SigningKey: Send + Sync + 'static;

    /// Public key type.
    type VerifyingKey: Send + Sync + 'static;

    /// The signature header tag written to the envelope.
    ///
    /// For example, Ed25519 is `0xed`.
    fn signature_header(&self) -> u64;

    /// The multihash tag of the digest used when signing.
    fn hash_algorithm(&self) -> u64;

    /// Length of the signatures this algorithm produces, if fixed.
    fn signature_len(&self) -> Option<usize>;

    /// The envelope header for signatures from this algorithm.
    fn header(&self) -> Header {
        Header::new(self.signature_header(), self.hash_algorithm())
    }

    /// Sign a payload.
    ///
    /// # Errors
    ///
    /// Returns `signature::Error` if the backend fails to sign.
    fn sign(
        &self,
        payload: &[u8],
        key: &Self::SigningKey,
    ) -> impl Future<Output = Result<Vec<u8>, signature::Error>> + Send;

    /// Check a signature over a payload.
    ///
    /// A signature that does not match (including one the backend cannot
    /// parse) is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `signature::Error` only if the check itself could not run.
    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &Self::VerifyingKey,
    ) -> impl Future<Output = Result<bool, signature::Error>> + Send;

    /// Generate a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if randomness or the backend fails.
    fn generate_key(&self) -> impl Future<Output = Result<KeyPair<Self>, KeyError>> + Send;

    /// Import a private key from its byte encoding.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the bytes are not a valid key.
    fn decode_signing_key(&self, bytes: &[u8]) -> Result<Self::SigningKey, KeyError>;

    /// Export a private key to bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the key cannot be serialized.
    fn encode_signing_key(&self, key: &Self::SigningKey) -> Result<Vec<u8>, KeyError>;

    /// Import a public key from its byte encoding.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the bytes are not a valid key.
    fn decode_verifying_key(&self, bytes: &[u8]) -> Result<Self::VerifyingKey, KeyError>;

    /// Export a public key to bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the key cannot be serialized.
    fn encode_verifying_key(&self, key: &Self::VerifyingKey) -> Result<Vec<u8>, KeyError>;
}

/// A matching private and public key.
pub struct KeyPair<A: SignatureAlgorithm + ?Sized> {
    /// The private half.
    pub signing_key: A::SigningKey,

    /// The public half.
    pub verifying_key: A::VerifyingKey,
}

impl<A: SignatureAlgorithm + ?Sized> Debug for KeyPair<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("signing_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Check that `bytes` has exactly `N` bytes.
#[cfg(feature = "ed25519")]
pub(crate) fn fixed_len<const N: usize>(bytes: &[u8]) -> Result<[u8; N], KeyError> {
    bytes.try_into().map_err(|_| KeyError::InvalidLength {
        expected: N,
        found: bytes.len(),
    })
}
