//! Fixed-output vectors.

#![cfg(feature = "ed25519")]

use pretty_assertions::assert_eq;
use testresult::TestResult;
use varsig::{algorithm::eddsa::Ed25519, create, inspect, verify, verify_with, PublicKey};

/// RFC 8032 test 1 secret key.
const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const PUBLIC_KEY: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
const HELLO_WORLD_SIGNATURE: &str = "2c5482392a197ec09fa33777958d3a0be4f4960af85e9796a4d822c95ecf704a34fed32adb699a88c0ea876b9fbb17d1dbd336f754fd9207bfc112c89aa54f02";

fn signing_key() -> ed25519_dalek::SigningKey {
    let seed: [u8; 32] = hex::decode(SEED)
        .expect("valid hex")
        .try_into()
        .expect("32 bytes");
    ed25519_dalek::SigningKey::from_bytes(&seed)
}

#[test_log::test(tokio::test)]
async fn hello_world_varsig() -> TestResult {
    let sk = signing_key();
    assert_eq!(hex::encode(sk.verifying_key().to_bytes()), PUBLIC_KEY);

    let varsig = create(b"hello world", &Ed25519, &sk).await?;
    assert_eq!(
        hex::encode(&varsig),
        format!("34ed0112405f{HELLO_WORLD_SIGNATURE}")
    );

    // Ed25519 is deterministic: signing again gives identical bytes.
    assert_eq!(create(b"hello world", &Ed25519, &sk).await?, varsig);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn hello_world_inspection() -> TestResult {
    let varsig = create(b"hello world", &Ed25519, &signing_key()).await?;
    let inspection = inspect(&varsig)?;

    assert_eq!(inspection.algorithm, "ed25519");
    assert_eq!(format!("{:x}", inspection.prefix.value), "34");
    assert_eq!(format!("{:x}", inspection.signature_header.value), "ed");
    assert_eq!(format!("{:x}", inspection.hash_algorithm.value), "12");
    assert_eq!(format!("{:x}", inspection.encoding.value), "5f");
    assert_eq!(inspection.signature_length.value, 64);
    assert_eq!(inspection.signature.len(), 64);
    assert_eq!(hex::encode(&inspection.signature), HELLO_WORLD_SIGNATURE);
    assert_eq!(inspection.total_length, 70);
    assert_eq!(inspection.signature_end, 70);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn hello_world_verifies() -> TestResult {
    let sk = signing_key();
    let varsig = hex::decode(format!("34ed0112405f{HELLO_WORLD_SIGNATURE}"))?;

    assert!(verify_with(&Ed25519, b"hello world", &varsig, &sk.verifying_key()).await?);
    assert!(verify(b"hello world", &varsig, &PublicKey::new(sk.verifying_key())).await?);
    assert!(!verify(b"hello world!", &varsig, &PublicKey::new(sk.verifying_key())).await?);
    Ok(())
}
