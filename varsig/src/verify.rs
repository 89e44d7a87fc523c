//! Verifying varsigs.

use crate::{
    algorithm::{any::PublicKey, SignatureAlgorithm},
    envelope::Envelope,
    error::{DecodeError, Error},
    registry::{self, Registry},
};

/// Verify a varsig over `payload` with a known algorithm.
///
/// Returns `Ok(false)` for a well-formed varsig whose signature does not
/// match. An envelope tagged for a different algorithm is rejected as
/// [`DecodeError::UnexpectedAlgorithm`].
///
/// # Errors
///
/// Returns [`Error::Decode`] for a malformed varsig, or
/// [`Error::Verification`] if the backend could not run.
#[tracing::instrument(skip_all, fields(signature_header = algorithm.signature_header()))]
pub async fn verify_with<A: SignatureAlgorithm>(
    algorithm: &A,
    payload: &[u8],
    varsig: &[u8],
    key: &A::VerifyingKey,
) -> Result<bool, Error> {
    let expected = algorithm.signature_header();
    let (envelope, ()) = Envelope::decode_with(varsig, |tag| (tag == expected).then_some(()))
        .map_err(|error| match error {
            DecodeError::UnknownAlgorithm { tag, offset } => DecodeError::UnexpectedAlgorithm {
                tag,
                expected,
                offset,
            },
            other => other,
        })?;
    let valid = algorithm
        .verify(payload, envelope.signature(), key)
        .await
        .map_err(Error::Verification)?;
    tracing::debug!(valid, "checked varsig");
    Ok(valid)
}

impl Registry {
    /// Verify a varsig over `payload`, dispatching on its signature header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for a malformed or unregistered varsig,
    /// [`Error::KeyMismatch`] if `key` is for another algorithm, or
    /// [`Error::Verification`] if the backend could not run.
    #[tracing::instrument(skip_all)]
    pub async fn verify(
        &self,
        payload: &[u8],
        varsig: &[u8],
        key: &PublicKey,
    ) -> Result<bool, Error> {
        let (envelope, entry) = Envelope::decode_with(varsig, |tag| self.by_header_tag(tag))?;
        let valid = entry
            .algorithm()
            .verify_dyn(payload, envelope.signature(), key)
            .await?;
        tracing::debug!(algorithm = entry.name(), valid, "checked varsig");
        Ok(valid)
    }
}

/// Verify a varsig against the [global](registry::global) registry.
///
/// # Errors
///
/// See [`Registry::verify`].
pub async fn verify(payload: &[u8], varsig: &[u8], key: &PublicKey) -> Result<bool, Error> {
    registry::global().verify(payload, varsig, key).await
}

#[cfg(all(test, feature = "ed25519"))]
mod tests {
    use super::*;
    use crate::{algorithm::eddsa::Ed25519, signer::create};
    use assert_matches::assert_matches;
    use testresult::TestResult;

    fn key(seed: u8) -> ed25519_dalek::SigningKey {
        ed25519_dalek::SigningKey::from_bytes(&[seed; 32])
    }

    #[test_log::test(tokio::test)]
    async fn test_verify_with() -> TestResult {
        let sk = key(1);
        let varsig = create(b"payload", &Ed25519, &sk).await?;
        assert!(verify_with(&Ed25519, b"payload", &varsig, &sk.verifying_key()).await?);
        assert!(!verify_with(&Ed25519, b"payload", &varsig, &key(2).verifying_key()).await?);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_verify_with_wrong_algorithm_tag() -> TestResult {
        let sk = key(1);
        let mut varsig = create(b"payload", &Ed25519, &sk).await?;
        varsig[1] = 0xec;
        assert_matches!(
            verify_with(&Ed25519, b"payload", &varsig, &sk.verifying_key()).await,
            Err(Error::Decode(DecodeError::UnexpectedAlgorithm {
                tag: 0xec,
                expected: 0xed,
                offset: 1
            }))
        );
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_verify_with_rsa_envelope() {
        let varsig = Envelope::encode(&crate::header::Header::new(0x1205, 0x12), &[0u8; 256]);
        let result = verify_with(&Ed25519, b"payload", &varsig, &key(1).verifying_key()).await;
        assert_matches!(
            &result,
            Err(Error::Decode(DecodeError::UnexpectedAlgorithm {
                tag: 0x1205,
                expected: 0xed,
                ..
            }))
        );
        assert_matches!(result, Err(e) if e.to_string().contains("not the expected algorithm"));
    }

    #[test_log::test(tokio::test)]
    async fn test_registry_verify_key_mismatch() -> TestResult {
        let sk = key(1);
        let varsig = create(b"payload", &Ed25519, &sk).await?;
        assert_matches!(
            Registry::builtin()
                .verify(b"payload", &varsig, &PublicKey::new("not a key"))
                .await,
            Err(Error::KeyMismatch { .. })
        );
        Ok(())
    }
}
