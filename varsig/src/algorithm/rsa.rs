//! RSASSA-PKCS1-v1_5 signatures.

use super::{KeyPair, SignatureAlgorithm};
use crate::{error::KeyError, hash::Multihasher};
use rsa::{
    pkcs1v15,
    pkcs8::{AssociatedOid, DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use sha2::Digest;
use signature::{SignatureEncoding, Signer, Verifier};
use std::{fmt, marker::PhantomData};

/// RSA PKCS#1 v1.5 signatures with the digest `D`.
///
/// The digest is part of the type, so two RSA configurations with different
/// hashes are simply two values of two types. The multihash tag written to
/// the envelope comes from `D`.
///
/// Private keys travel as PKCS#8 DER and public keys as SPKI DER.
pub struct Rsa<D> {
    bits: usize,
    _digest: PhantomData<fn() -> D>,
}

/// RS256: RSA PKCS#1 v1.5 with SHA2-256.
pub type Rs256 = Rsa<sha2::Sha256>;

impl<D> Rsa<D> {
    /// The RSA signature header.
    pub const SIGNATURE_HEADER: u64 = 0x1205;

    /// The default modulus size for generated keys.
    pub const DEFAULT_BITS: usize = 2048;

    /// Configure key generation with a `bits`-bit modulus.
    #[must_use]
    pub const fn with_bits(bits: usize) -> Self {
        Rsa {
            bits,
            _digest: PhantomData,
        }
    }

    /// Modulus size used by [`SignatureAlgorithm::generate_key`].
    #[must_use]
    pub const fn bits(&self) -> usize {
        self.bits
    }
}

impl<D> Default for Rsa<D> {
    fn default() -> Self {
        Self::with_bits(Self::DEFAULT_BITS)
    }
}

impl<D> Clone for Rsa<D> {
    fn clone(&self) -> Self {
        Self::with_bits(self.bits)
    }
}

impl<D> fmt::Debug for Rsa<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rsa")
            .field("bits", &self.bits)
            .field("digest", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D> SignatureAlgorithm for Rsa<D>
where
    D: Digest + AssociatedOid + Multihasher + 'static,
{
    type SigningKey = RsaPrivateKey;
    type VerifyingKey = RsaPublicKey;

    fn signature_header(&self) -> u64 {
        Self::SIGNATURE_HEADER
    }

    fn hash_algorithm(&self) -> u64 {
        D::MULTIHASH_TAG
    }

    fn signature_len(&self) -> Option<usize> {
        Some(self.bits() / 8)
    }

    async fn sign(
        &self,
        payload: &[u8],
        key: &Self::SigningKey,
    ) -> Result<Vec<u8>, signature::Error> {
        let signer = pkcs1v15::SigningKey::<D>::new(key.clone());
        Ok(signer.try_sign(payload)?.to_vec())
    }

    async fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &Self::VerifyingKey,
    ) -> Result<bool, signature::Error> {
        let Ok(signature) = pkcs1v15::Signature::try_from(signature) else {
            return Ok(false);
        };
        let verifier = pkcs1v15::VerifyingKey::<D>::new(key.clone());
        Ok(verifier.verify(payload, &signature).is_ok())
    }

    async fn generate_key(&self) -> Result<KeyPair<Self>, KeyError> {
        let signing_key = RsaPrivateKey::new(&mut rand::thread_rng(), self.bits())?;
        Ok(KeyPair {
            verifying_key: signing_key.to_public_key(),
            signing_key,
        })
    }

    fn decode_signing_key(&self, bytes: &[u8]) -> Result<Self::SigningKey, KeyError> {
        RsaPrivateKey::from_pkcs8_der(bytes).map_err(|e| KeyError::RsaEncoding(Box::new(e)))
    }

    fn encode_signing_key(&self, key: &Self::SigningKey) -> Result<Vec<u8>, KeyError> {
        let document = key
            .to_pkcs8_der()
            .map_err(|e| KeyError::RsaEncoding(Box::new(e)))?;
        Ok(document.as_bytes().to_vec())
    }

    fn decode_verifying_key(&self, bytes: &[u8]) -> Result<Self::VerifyingKey, KeyError> {
        RsaPublicKey::from_public_key_der(bytes).map_err(|e| KeyError::RsaEncoding(Box::new(e)))
    }

    fn encode_verifying_key(&self, key: &Self::VerifyingKey) -> Result<Vec<u8>, KeyError> {
        let document = key
            .to_public_key_der()
            .map_err(|e| KeyError::RsaEncoding(Box::new(e)))?;
        Ok(document.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use testresult::TestResult;

    #[test_log::test]
    fn test_tags_follow_digest() {
        assert_eq!(Rs256::default().hash_algorithm(), 0x12);
        assert_eq!(Rsa::<sha2::Sha512>::default().hash_algorithm(), 0x13);
        assert_eq!(Rs256::default().signature_header(), 0x1205);
        assert_eq!(Rs256::default().signature_len(), Some(256));
    }

    #[test_log::test]
    fn test_modulus_size() {
        assert_eq!(Rs256::default().bits(), Rs256::DEFAULT_BITS);
        assert_eq!(Rs256::with_bits(3072).bits(), 3072);
        assert_eq!(Rs256::with_bits(3072).signature_len(), Some(384));
    }

    #[test_log::test(tokio::test)]
    async fn test_sign_verify_and_key_encoding() -> TestResult {
        // Small modulus keeps the test quick; the scheme does not care.
        let rsa = Rs256::with_bits(1024);
        let pair = rsa.generate_key().await?;

        let sig = rsa.sign(b"payload", &pair.signing_key).await?;
        assert_eq!(sig.len(), 128);
        assert!(rsa.verify(b"payload", &sig, &pair.verifying_key).await?);
        assert!(!rsa.verify(b"other", &sig, &pair.verifying_key).await?);
        assert!(!rsa.verify(b"payload", &sig[1..], &pair.verifying_key).await?);

        let sk = rsa.decode_signing_key(&rsa.encode_signing_key(&pair.signing_key)?)?;
        let vk = rsa.decode_verifying_key(&rsa.encode_verifying_key(&pair.verifying_key)?)?;
        assert_eq!(sk, pair.signing_key);
        assert_eq!(vk, pair.verifying_key);
        Ok(())
    }

    #[test_log::test]
    fn test_garbage_key_bytes() {
        assert_matches!(
            Rs256::default().decode_verifying_key(&[1, 2, 3]),
            Err(KeyError::RsaEncoding(_))
        );
    }
}
