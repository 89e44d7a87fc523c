//! Key import, generation, and export.

use crate::input;
use eyre::{Result, WrapErr};
use std::{io::Write, path::Path};
use varsig::{PrivateKey, PublicKey, Registry};

/// Exported key pair bytes.
#[derive(Debug)]
pub(crate) struct GeneratedKeys {
    pub(crate) private: Vec<u8>,
    pub(crate) public: Vec<u8>,
}

/// Import a private key for the named algorithm.
pub(crate) fn load_private(registry: &Registry, algo: &str, bytes: &[u8]) -> Result<PrivateKey> {
    let key = registry
        .import_private_key(algo, bytes)
        .wrap_err_with(|| format!("Failed to import {algo} private key"))?;
    Ok(key)
}

/// Import a public key for the named algorithm.
pub(crate) fn load_public(registry: &Registry, algo: &str, bytes: &[u8]) -> Result<PublicKey> {
    let key = registry
        .import_public_key(algo, bytes)
        .wrap_err_with(|| format!("Failed to import {algo} public key"))?;
    Ok(key)
}

/// Generate a key pair and export both halves.
pub(crate) async fn generate(registry: &Registry, algo: &str) -> Result<GeneratedKeys> {
    let (private, public) = registry.generate_key(algo).await?;
    tracing::info!("Generated {algo} key pair");

    Ok(GeneratedKeys {
        private: registry.export_private_key(algo, &private)?,
        public: registry.export_public_key(algo, &public)?,
    })
}

/// Write a key to `path` as raw bytes, or print it as hex.
pub(crate) fn save(
    out: &mut impl Write,
    label: &str,
    bytes: &[u8],
    path: Option<&Path>,
) -> Result<()> {
    match path {
        Some(path) => input::write_file(path, bytes),
        None => {
            writeln!(out, "{label}: {}", hex::encode(bytes))?;
            Ok(())
        }
    }
}
