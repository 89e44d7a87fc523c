//! BLS12-381 signatures (minimal public key size variant).

use super::{KeyPair, SignatureAlgorithm};
use crate::{error::KeyError, hash::SHA2_256};
use blst::{
    min_pk::{PublicKey, SecretKey, Signature},
    BLST_ERROR,
};
use std::{borrow::Cow, fmt};

/// Hash-to-curve domain separation tag of the basic BLS ciphersuite.
pub const DEFAULT_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// BLS signatures over BLS12-381, backed by `blst`.
///
/// Public keys are 48-byte compressed G1 points, signatures 96-byte
/// compressed G2 points, and private keys 32-byte big-endian scalars.
///
/// The hash-to-curve configuration is the domain separation tag held by
/// each instance. Instances with different tags can be used side by side.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bls12381 {
    dst: Cow<'static, [u8]>,
}

impl Bls12381 {
    /// The BLS signature header.
    pub const SIGNATURE_HEADER: u64 = 0x1309;

    /// Compressed G2 signature length.
    pub const SIGNATURE_LEN: usize = 96;

    /// Sign and verify under a custom domain separation tag.
    #[must_use]
    pub fn with_dst(dst: impl Into<Cow<'static, [u8]>>) -> Self {
        Bls12381 { dst: dst.into() }
    }

    /// The domain separation tag in use.
    #[must_use]
    pub fn dst(&self) -> &[u8] {
        &self.dst
    }
}

impl Default for Bls12381 {
    fn default() -> Self {
        Self::with_dst(DEFAULT_DST)
    }
}

impl fmt::Debug for Bls12381 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bls12381")
            .field("dst", &String::from_utf8_lossy(&self.dst))
            .finish()
    }
}

impl SignatureAlgorithm for Bls12381 {
    type SigningKey = SecretKey;
    type VerifyingKey = PublicKey;

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
        Ok(key.sign(payload, self.dst(), &[]).to_bytes().to_vec())
    }

    async fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &Self::VerifyingKey,
    ) -> Result<bool, signature::Error> {
        let Ok(signature) = Signature::from_bytes(signature) else {
            return Ok(false);
        };
        let result = signature.verify(true, payload, self.dst(), &[], key, true);
        Ok(result == BLST_ERROR::BLST_SUCCESS)
    }

    async fn generate_key(&self) -> Result<KeyPair<Self>, KeyError> {
        let mut ikm = [0u8; 32];
        getrandom::getrandom(&mut ikm)?;
        let signing_key = SecretKey::key_gen(&ikm, &[]).map_err(KeyError::Bls)?;
        Ok(KeyPair {
            verifying_key: signing_key.sk_to_pk(),
            signing_key,
        })
    }

    fn decode_signing_key(&self, bytes: &[u8]) -> Result<Self::SigningKey, KeyError> {
        SecretKey::from_bytes(bytes).map_err(KeyError::Bls)
    }

    fn encode_signing_key(&self, key: &Self::SigningKey) -> Result<Vec<u8>, KeyError> {
        Ok(key.to_bytes().to_vec())
    }

    fn decode_verifying_key(&self, bytes: &[u8]) -> Result<Self::VerifyingKey, KeyError> {
        PublicKey::key_validate(bytes).map_err(KeyError::Bls)
    }

    fn encode_verifying_key(&self, key: &Self::VerifyingKey) -> Result<Vec<u8>, KeyError> {
        Ok(key.to_bytes().to_vec())
    }
}
