//! Runtime-dispatched algorithms.
//!
//! Every [`SignatureAlgorithm`] is also a [`DynAlgorithm`]. The erased form
//! passes keys as opaque [`PrivateKey`] / [`PublicKey`] handles, which only
//! the algorithm that created them can open.

use super::SignatureAlgorithm;
use crate::error::Error;
use futures::future::BoxFuture;
use std::{any::Any, fmt};

/// An opaque private key for some algorithm.
pub struct PrivateKey(Box<dyn Any + Send + Sync>);

/// An opaque public key for some algorithm.
pub struct PublicKey(Box<dyn Any + Send + Sync>);

macro_rules! opaque_key {
    ($name:ident) => {
        impl $name {
            /// Wrap a concrete key.
            pub fn new<K: Any + Send + Sync>(key: K) -> Self {
                Self(Box::new(key))
            }

            /// Borrow the concrete key, if it is a `K`.
            #[must_use]
            pub fn downcast_ref<K: Any>(&self) -> Option<&K> {
                self.0.downcast_ref()
            }

            /// Unwrap the concrete key, or give the handle back.
            ///
            /// # Errors
            ///
            /// Returns `self` unchanged if the key is not a `K`.
            pub fn downcast<K: Any>(self) -> Result<K, Self> {
                self.0.downcast().map(|key| *key).map_err(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(..)"))
            }
        }
    };
}

opaque_key!(PrivateKey);
opaque_key!(PublicKey);

/// Object-safe view of a [`SignatureAlgorithm`].
///
/// Tags are not repeated here: a [`Registry`](crate::registry::Registry)
/// entry records them when the algorithm is registered.
pub trait DynAlgorithm: fmt::Debug + Send + Sync {
    /// Sign with an opaque private key.
    fn sign_dyn<'a>(
        &'a self,
        payload: &'a [u8],
        key: &'a PrivateKey,
    ) -> BoxFuture<'a, Result<Vec<u8>, Error>>;

    /// Verify with an opaque public key.
    fn verify_dyn<'a>(
        &'a self,
        payload: &'a [u8],
        signature: &'a [u8],
        key: &'a PublicKey,
    ) -> BoxFuture<'a, Result<bool, Error>>;

    /// Generate an opaque key pair.
    fn generate_key_dyn(&self) -> BoxFuture<'_, Result<(PrivateKey, PublicKey), Error>>;

    /// Import a private key from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Key`] if the bytes are not a valid key.
    fn import_private_key(&self, bytes: &[u8]) -> Result<PrivateKey, Error>;

    /// Export a private key to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyMismatch`] if the key belongs to another algorithm.
    fn export_private_key(&self, key: &PrivateKey) -> Result<Vec<u8>, Error>;

    /// Import a public key from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Key`] if the bytes are not a valid key.
    fn import_public_key(&self, bytes: &[u8]) -> Result<PublicKey, Error>;

    /// Export a public key to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyMismatch`] if the key belongs to another algorithm.
    fn export_public_key(&self, key: &PublicKey) -> Result<Vec<u8>, Error>;
}

fn open<K: Any>(key: Option<&K>) -> Result<&K, Error> {
    key.ok_or(Error::KeyMismatch {
        expected: std::any::type_name::<K>(),
    })
}

impl<A: SignatureAlgorithm> DynAlgorithm for A {
    fn sign_dyn<'a>(
        &'a self,
        payload: &'a [u8],
        key: &'a PrivateKey,
    ) -> BoxFuture<'a, Result<Vec<u8>, Error>> {
        Box::pin(async move {
            let key = open(key.downcast_ref::<A::SigningKey>())?;
            self.sign(payload, key).await.map_err(Error::Signing)
        })
    }

    fn verify_dyn<'a>(
        &'a self,
        payload: &'a [u8],
        signature: &'a [u8],
        key: &'a PublicKey,
    ) -> BoxFuture<'a, Result<bool, Error>> {
        Box::pin(async move {
            let key = open(key.downcast_ref::<A::VerifyingKey>())?;
            self.verify(payload, signature, key)
                .await
                .map_err(Error::Verification)
        })
    }

    fn generate_key_dyn(&self) -> BoxFuture<'_, Result<(PrivateKey, PublicKey), Error>> {
        Box::pin(async move {
            let pair = self.generate_key().await?;
            Ok((
                PrivateKey::new(pair.signing_key),
                PublicKey::new(pair.verifying_key),
            ))
        })
    }

    fn import_private_key(&self, bytes: &[u8]) -> Result<PrivateKey, Error> {
        Ok(PrivateKey::new(self.decode_signing_key(bytes)?))
    }

    fn export_private_key(&self, key: &PrivateKey) -> Result<Vec<u8>, Error> {
        let key = open(key.downcast_ref::<A::SigningKey>())?;
        Ok(self.encode_signing_key(key)?)
    }

    fn import_public_key(&self, bytes: &[u8]) -> Result<PublicKey, Error> {
        Ok(PublicKey::new(self.decode_verifying_key(bytes)?))
    }

    fn export_public_key(&self, key: &PublicKey) -> Result<Vec<u8>, Error> {
        let key = open(key.downcast_ref::<A::VerifyingKey>())?;
        Ok(self.encode_verifying_key(key)?)
    }
}
