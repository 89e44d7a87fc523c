//! End-to-end runs of the `varsig` binary.

use std::{
    path::PathBuf,
    process::{Command, Output},
};
use testresult::TestResult;

const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const PUBLIC_KEY: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
const HELLO_WORLD_VARSIG: &str = "34ed0112405f\
    2c5482392a197ec09fa33777958d3a0be4f4960af85e9796a4d822c95ecf704a\
    34fed32adb699a88c0ea876b9fbb17d1dbd336f754fd9207bfc112c89aa54f02";

fn varsig(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_varsig"))
        .args(args)
        .output()
        .expect("failed to run varsig")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("varsig-cli-{}-{name}", std::process::id()))
}

#[test]
fn create_matches_the_fixed_vector() {
    let output = varsig(&[
        "create",
        "hello world",
        "--algo",
        "ed25519",
        "--key",
        SEED,
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), HELLO_WORLD_VARSIG);
}

#[test]
fn verify_exit_codes() {
    let valid = varsig(&[
        "verify",
        "hello world",
        "--key",
        PUBLIC_KEY,
        "--sig",
        HELLO_WORLD_VARSIG,
    ]);
    assert_eq!(valid.status.code(), Some(0));
    assert_eq!(stdout(&valid), "valid");

    let invalid = varsig(&[
        "verify",
        "hello world!",
        "--key",
        PUBLIC_KEY,
        "--sig",
        HELLO_WORLD_VARSIG,
    ]);
    assert_eq!(invalid.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&invalid.stderr).contains("invalid signature"));
}

#[test]
fn malformed_and_unknown_are_distinct() {
    let truncated = &HELLO_WORLD_VARSIG[..HELLO_WORLD_VARSIG.len() - 2];
    let malformed = varsig(&["inspect", truncated]);
    assert_eq!(malformed.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&malformed.stderr).contains("malformed input"));

    let retagged = format!("34ec01{}", &HELLO_WORLD_VARSIG[6..]);
    let unknown = varsig(&["inspect", &retagged]);
    assert_eq!(unknown.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("unknown algorithm"));

    let unnamed = varsig(&["create", "x", "--algo", "ed448", "--key", SEED]);
    assert_eq!(unnamed.status.code(), Some(4));
}

#[test]
fn bad_key_exits_with_key_failure() {
    let output = varsig(&["create", "x", "--algo", "ed25519", "--key", "0011"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn usage_errors_come_from_clap() {
    assert_eq!(varsig(&["verify", "x"]).status.code(), Some(2));
}

#[test]
fn inspect_json() -> TestResult {
    let output = varsig(&["inspect", "--json", HELLO_WORLD_VARSIG]);
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["algorithm"], "ed25519");
    assert_eq!(json["signature_header"]["value"], 0xed);
    assert_eq!(json["signature_header"]["raw"], "ed01");
    assert_eq!(json["total_length"], 70);
    Ok(())
}

#[test]
fn generated_keys_round_trip_through_files() -> TestResult {
    let private = scratch("bls.sk");
    let public = scratch("bls.pk");
    let sig = scratch("bls.varsig");
    let [private_arg, public_arg, sig_arg] =
        [&private, &public, &sig].map(|path| path.to_string_lossy().into_owned());

    let generated = varsig(&[
        "generate-key",
        "--algo",
        "bls",
        "--private",
        &private_arg,
        "--public",
        &public_arg,
    ]);
    assert_eq!(generated.status.code(), Some(0));

    let created = varsig(&[
        "create", "payload", "--text", "--algo", "bls", "--key", &private_arg, "--out", &sig_arg,
    ]);
    assert_eq!(created.status.code(), Some(0));
    assert_eq!(std::fs::read(&sig)?.len(), 1 + 2 + 1 + 1 + 1 + 96);

    let verified = varsig(&[
        "verify", "payload", "--text", "--key", &public_arg, "--sig", &sig_arg,
    ]);
    assert_eq!(verified.status.code(), Some(0));

    for path in [private, public, sig] {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[test]
fn lists_algorithms() {
    let output = varsig(&["algorithms"]);
    assert_eq!(output.status.code(), Some(0));
    let names: Vec<String> = stdout(&output)
        .lines()
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect();
    assert_eq!(names, ["ed25519", "rsa", "bls"]);
}
