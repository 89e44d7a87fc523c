//! `EdDSA` over Curve25519.

use super::{fixed_len, KeyPair, SignatureAlgorithm};
use crate::{error::KeyError, hash::SHA2_256};
use signature::{Signer, Verifier};

/// The Ed25519 signature algorithm, backed by `ed25519_dalek`.
///
/// Private keys are 32-byte seeds, public keys are 32-byte compressed points,
/// and signatures are 64 bytes. Ed25519 hashes with SHA2-512 internally; the
/// envelope records the SHA2-256 tag that every built-in algorithm carries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519;

impl Ed25519 {
    /// The Ed25519 signature header.
    pub const SIGNATURE_HEADER: u64 = 0xed;

    /// Ed25519 signature length in bytes.
    pub const SIGNATURE_LEN: usize = ed25519_dalek::SIGNATURE_LENGTH;
}

impl SignatureAlgorithm for Ed25519 {
    type SigningKey = ed25519_dalek::SigningKey;
    type VerifyingKey = ed25519_dalek::VerifyingKey;

    fn signature_header(&self) -> u64 {
        Self::SIGNATURE_HEADER
    }

    fn hash_algorithm(&self) -> u64 {
        SHA2_256
    }

    fn signature_len(&self) -> Option<usize> {
        Some(Self::SIGNATURE_LEN)
    }

    async fn sign(
        &self,
        payload: &[u8],
        key: &Self::SigningKey,
    ) -> Result<Vec<u8>, signature::Error> {
        let signature = key.try_sign(payload)?;
        Ok(signature.to_bytes().to_vec())
    }

    async fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &Self::VerifyingKey,
    ) -> Result<bool, signature::Error> {
        let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(key.verify(payload, &signature).is_ok())
    }

    async fn generate_key(&self) -> Result<KeyPair<Self>, KeyError> {
        let mut seed = [0u8; ed25519_dalek::SECRET_KEY_LENGTH];
        getrandom::getrandom(&mut seed)?;
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        Ok(KeyPair {
            verifying_key: signing_key.verifying_key(),
            signing_key,
        })
    }

    fn decode_signing_key(&self, bytes: &[u8]) -> Result<Self::SigningKey, KeyError> {
        let seed = fixed_len::<{ ed25519_dalek::SECRET_KEY_LENGTH }>(bytes)?;
        Ok(ed25519_dalek::SigningKey::from_bytes(&seed))
    }

    fn encode_signing_key(&self, key: &Self::SigningKey) -> Result<Vec<u8>, KeyError> {
        Ok(key.to_bytes().to_vec())
    }

    fn decode_verifying_key(&self, bytes: &[u8]) -> Result<Self::VerifyingKey, KeyError> {
        let point = fixed_len::<{ ed25519_dalek::PUBLIC_KEY_LENGTH }>(bytes)?;
        ed25519_dalek::VerifyingKey::from_bytes(&point).map_err(KeyError::Rejected)
    }

    fn encode_verifying_key(&self, key: &Self::VerifyingKey) -> Result<Vec<u8>, KeyError> {
        Ok(key.to_bytes().to_vec())
    }
}
