//! [Varsig] implementation.
//!
//! A varsig is a compact, self-describing signature envelope:
//!
//! ```text
//! 0x34 ‖ signature header ‖ hash algorithm ‖ signature length ‖ encoding ‖ signature
//! ```
//!
//! where every field between the prefix and the signature is an unsigned
//! LEB128 varint. This crate encodes and decodes envelopes, and dispatches
//! signing and verification to pluggable [`SignatureAlgorithm`]s. Ed25519,
//! RSA (RS256), and BLS12-381 are built in behind the `ed25519`, `rsa`, and
//! `bls` features.
//!
//! [Varsig]: https://github.com/ChainAgnostic/varsig
//!
//! # Example
//!
//! ```rust
//! use varsig::{algorithm::eddsa::Ed25519, create, inspect, verify_with};
//!
//! # tokio_test::block_on(async {
//! let sk = ed25519_dalek::SigningKey::from_bytes(&[7; 32]);
//!
//! let varsig = create(b"hello world", &Ed25519, &sk).await.unwrap();
//! assert_eq!(varsig.len(), 70);
//!
//! let inspection = inspect(&varsig).unwrap();
//! assert_eq!(inspection.algorithm, "ed25519");
//! assert_eq!(inspection.signature.len(), 64);
//!
//! assert!(verify_with(&Ed25519, b"hello world", &varsig, &sk.verifying_key())
//!     .await
//!     .unwrap());
//! # })
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod algorithm;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod header;
pub mod inspect;
pub mod registry;
pub mod signer;
pub mod varint;
pub mod verify;

pub use algorithm::{
    any::{DynAlgorithm, PrivateKey, PublicKey},
    KeyPair, SignatureAlgorithm,
};
pub use envelope::Envelope;
pub use error::{DecodeError, Error, KeyError, RegistrationError};
pub use header::{Header, PREFIX};
pub use inspect::{inspect, FieldValue, Inspection};
pub use registry::Registry;
pub use signer::create;
pub use verify::{verify, verify_with};
