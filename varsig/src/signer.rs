//! Creating varsigs.

use crate::{
    algorithm::{any::PrivateKey, SignatureAlgorithm},
    envelope::Envelope,
    error::Error,
    header::Header,
    registry::Registry,
};

/// Sign `payload` and wrap the signature in a varsig.
///
/// The key is handed straight to the algorithm; its shape is not checked here.
///
/// # Errors
///
/// Returns [`Error::Signing`] with the backend's error if signing fails.
#[tracing::instrument(skip_all, fields(signature_header = algorithm.signature_header()))]
pub async fn create<A: SignatureAlgorithm>(
    payload: &[u8],
    algorithm: &A,
    key: &A::SigningKey,
) -> Result<Vec<u8>, Error> {
    let signature = algorithm
        .sign(payload, key)
        .await
        .map_err(Error::Signing)?;
    let varsig = Envelope::encode(&algorithm.header(), &signature);
    tracing::debug!(len = varsig.len(), "created varsig");
    Ok(varsig)
}

impl Registry {
    /// Sign `payload` with the named algorithm and wrap it in a varsig.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`], [`Error::KeyMismatch`] if `key`
    /// belongs to a different algorithm, or [`Error::Signing`].
    #[tracing::instrument(skip(self, payload, key))]
    pub async fn create(
        &self,
        name: &str,
        payload: &[u8],
        key: &PrivateKey,
    ) -> Result<Vec<u8>, Error> {
        let entry = self.by_name(name)?;
        let signature = entry.algorithm().sign_dyn(payload, key).await?;
        let header = Header::new(entry.signature_header(), entry.hash_algorithm());
        Ok(Envelope::encode(&header, &signature))
    }
}

#[cfg(all(test, feature = "ed25519"))]
mod tests {
    use super::*;
    use crate::algorithm::eddsa::Ed25519;
    use assert_matches::assert_matches;
    use testresult::TestResult;

    fn key() -> ed25519_dalek::SigningKey {
        ed25519_dalek::SigningKey::from_bytes(&[3; 32])
    }

    #[test_log::test(tokio::test)]
    async fn test_create_layout() -> TestResult {
        let varsig = create(b"payload", &Ed25519, &key()).await?;
        assert_eq!(varsig.len(), 70);
        assert_eq!(&varsig[..6], &[0x34, 0xed, 0x01, 0x12, 0x40, 0x5f]);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_registry_create_matches_typed() -> TestResult {
        let typed = create(b"payload", &Ed25519, &key()).await?;
        let dynamic = Registry::builtin()
            .create("ed25519", b"payload", &PrivateKey::new(key()))
            .await?;
        assert_eq!(typed, dynamic);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_registry_create_unknown_name() {
        assert_matches!(
            Registry::builtin()
                .create("ed448", b"payload", &PrivateKey::new(key()))
                .await,
            Err(Error::AlgorithmNotFound(_))
        );
    }
}
