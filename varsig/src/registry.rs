//! Algorithm registry.
//!
//! Maps algorithm names and signature header tags to implementations. A
//! registry is built up front, then only read; it is `Send + Sync` and can be
//! shared by any number of concurrent encode, inspect, and verify calls.
//!
//! Reverse lookup by tag scans in registration order and returns the first
//! match. [`Registry::register`] refuses duplicate tags, so the first-match
//! rule only matters for entries added with [`Registry::register_unchecked`].

use crate::{
    algorithm::{
        any::{DynAlgorithm, PrivateKey, PublicKey},
        SignatureAlgorithm,
    },
    error::{Error, RegistrationError},
};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};

/// A registered algorithm.
#[derive(Clone)]
pub struct Entry {
    name: String,
    signature_header: u64,
    hash_algorithm: u64,
    algorithm: Arc<dyn DynAlgorithm>,
}

impl Entry {
    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signature header tag.
    #[must_use]
    pub const fn signature_header(&self) -> u64 {
        self.signature_header
    }

    /// The hash algorithm tag.
    #[must_use]
    pub const fn hash_algorithm(&self) -> u64 {
        self.hash_algorithm
    }

    /// The implementation.
    #[must_use]
    pub fn algorithm(&self) -> &dyn DynAlgorithm {
        self.algorithm.as_ref()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("signature_header", &format_args!("{:#x}", self.signature_header))
            .field("hash_algorithm", &format_args!("{:#x}", self.hash_algorithm))
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// A set of named signature algorithms.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// A registry with no algorithms.
    #[must_use]
    pub const fn empty() -> Self {
        Registry {
            entries: Vec::new(),
        }
    }

    /// A registry of the built-in algorithms enabled by crate features.
    ///
    /// In order: `ed25519`, `rsa` (RS256, 2048-bit), `bls` (BLS12-381).
    #[must_use]
    pub fn builtin() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();

        #[cfg(feature = "ed25519")]
        registry.push("ed25519", crate::algorithm::eddsa::Ed25519);

        #[cfg(feature = "rsa")]
        registry.push("rsa", crate::algorithm::rsa::Rs256::default());

        #[cfg(feature = "bls")]
        registry.push("bls", crate::algorithm::bls::Bls12381::default());

        registry
    }

    /// Add an algorithm under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NameCollision`] if `name` is taken, or
    /// [`RegistrationError::TagCollision`] if another entry already uses the
    /// algorithm's signature header.
    pub fn register<A: SignatureAlgorithm>(
        &mut self,
        name: impl Into<String>,
        algorithm: A,
    ) -> Result<&mut Self, RegistrationError> {
        let name = name.into();
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(RegistrationError::NameCollision { name });
        }

        let tag = SignatureAlgorithm::signature_header(&algorithm);
        if let Some(existing) = self.by_header_tag(tag) {
            return Err(RegistrationError::TagCollision {
                tag,
                name,
                existing: existing.name.clone(),
            });
        }

        self.push(name, algorithm);
        Ok(self)
    }

    /// Add an algorithm without checking for name or tag collisions.
    ///
    /// Lookups by name or tag resolve to whichever matching entry was
    /// registered first, so a shadowed entry is unreachable by lookup.
    pub fn register_unchecked<A: SignatureAlgorithm>(
        &mut self,
        name: impl Into<String>,
        algorithm: A,
    ) -> &mut Self {
        self.push(name, algorithm);
        self
    }

    fn push<A: SignatureAlgorithm>(&mut self, name: impl Into<String>, algorithm: A) {
        let name = name.into();
        let signature_header = SignatureAlgorithm::signature_header(&algorithm);
        let hash_algorithm = SignatureAlgorithm::hash_algorithm(&algorithm);
        tracing::trace!(%name, signature_header, hash_algorithm, "registering algorithm");
        self.entries.push(Entry {
            name,
            signature_header,
            hash_algorithm,
            algorithm: Arc::new(algorithm),
        });
    }

    /// Look up an algorithm by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`] if no entry has this name.
    pub fn by_name(&self, name: &str) -> Result<&Entry, Error> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::AlgorithmNotFound(name.to_string()))
    }

    /// The first entry registered with this signature header tag.
    #[must_use]
    pub fn by_header_tag(&self, tag: u64) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.signature_header == tag)
    }

    /// All entries, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate a key pair for the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`] or the algorithm's key error.
    pub async fn generate_key(&self, name: &str) -> Result<(PrivateKey, PublicKey), Error> {
        self.by_name(name)?.algorithm().generate_key_dyn().await
    }

    /// Import a private key for the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`] or [`Error::Key`].
    pub fn import_private_key(&self, name: &str, bytes: &[u8]) -> Result<PrivateKey, Error> {
        self.by_name(name)?.algorithm().import_private_key(bytes)
    }

    /// Export a private key of the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`], or [`Error::KeyMismatch`] if the
    /// key belongs to another algorithm.
    pub fn export_private_key(&self, name: &str, key: &PrivateKey) -> Result<Vec<u8>, Error> {
        self.by_name(name)?.algorithm().export_private_key(key)
    }

    /// Import a public key for the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`] or [`Error::Key`].
    pub fn import_public_key(&self, name: &str, bytes: &[u8]) -> Result<PublicKey, Error> {
        self.by_name(name)?.algorithm().import_public_key(bytes)
    }

    /// Export a public key of the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotFound`], or [`Error::KeyMismatch`] if the
    /// key belongs to another algorithm.
    pub fn export_public_key(&self, name: &str, key: &PublicKey) -> Result<Vec<u8>, Error> {
        self.by_name(name)?.algorithm().export_public_key(key)
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Call this once, before any concurrent use, to extend or replace the
/// built-ins. Completing this call is the initialization barrier: any
/// [`global`] access that happens after it observes `registry`.
///
/// # Errors
///
/// Gives `registry` back if a registry was already installed, either by an
/// earlier call or implicitly by [`global`].
pub fn install(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)
}

/// The process-wide registry.
///
/// Installs [`Registry::builtin`] on first use if [`install`] was not called.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::builtin)
}
