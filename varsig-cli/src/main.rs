//! `varsig`: create, inspect, and verify varsig signature envelopes.

mod exit;
mod input;
mod key;
mod report;

use clap::{Parser, Subcommand};
use exit::Status;
use eyre::{Result, WrapErr};
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use varsig::registry;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Arguments::parse();

    match run(args.command).await {
        Ok(status) => status.into(),
        Err(report) => {
            let status = exit::classify(&report);
            eprintln!("{}: {report:?}", status.describe());
            status.into()
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Create, inspect, and verify varsig signature envelopes")]
struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign a payload and print the varsig as hex.
    Create {
        /// Payload: a file path, hex, or literal text.
        payload: String,

        /// Registered algorithm name (see `varsig algorithms`).
        #[arg(short, long)]
        algo: String,

        /// Private key: a file path or hex.
        #[arg(short, long)]
        key: String,

        /// Write the raw varsig bytes here instead of printing hex.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Take the payload argument as literal text, never as a path or hex.
        #[arg(long)]
        text: bool,
    },

    /// Check a varsig against a payload and public key.
    Verify {
        /// Payload: a file path, hex, or literal text.
        payload: String,

        /// Public key: a file path or hex.
        #[arg(short, long)]
        key: String,

        /// The varsig: a file path or hex.
        #[arg(short, long)]
        sig: String,

        /// Take the payload argument as literal text, never as a path or hex.
        #[arg(long)]
        text: bool,
    },

    /// Print the fields of a varsig.
    Inspect {
        /// The varsig: a file path or hex.
        varsig: String,

        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate a key pair.
    GenerateKey {
        /// Registered algorithm name (see `varsig algorithms`).
        #[arg(short, long)]
        algo: String,

        /// Write the raw private key here instead of printing hex.
        #[arg(long)]
        private: Option<PathBuf>,

        /// Write the raw public key here instead of printing hex.
        #[arg(long)]
        public: Option<PathBuf>,
    },

    /// List the registered algorithms.
    Algorithms,
}

async fn run(command: Command) -> Result<Status> {
    let registry = registry::global();
    let mut stdout = io::stdout();

    match command {
        Command::Create {
            payload,
            algo,
            key,
            out,
            text,
        } => {
            let payload = input::read_payload(&payload, text)?;
            let key = key::load_private(registry, &algo, &input::read_bytes(&key)?)?;
            let varsig = registry.create(&algo, &payload, &key).await?;

            match out {
                Some(path) => input::write_file(&path, &varsig)?,
                None => writeln!(stdout, "{}", hex::encode(&varsig))?,
            }
        }
        Command::Verify {
            payload,
            key,
            sig,
            text,
        } => {
            let payload = input::read_payload(&payload, text)?;
            let varsig = input::read_bytes(&sig).wrap_err("reading varsig")?;
            let algorithm = registry.inspect(&varsig)?.algorithm;
            let key = key::load_public(registry, &algorithm, &input::read_bytes(&key)?)?;

            if !registry.verify(&payload, &varsig, &key).await? {
                eprintln!("invalid signature");
                return Ok(Status::InvalidSignature);
            }
            writeln!(stdout, "valid")?;
        }
        Command::Inspect { varsig, json } => {
            let varsig = input::read_bytes(&varsig).wrap_err("reading varsig")?;
            let inspection = registry.inspect(&varsig)?;

            if json {
                serde_json::to_writer_pretty(&mut stdout, &inspection)?;
                writeln!(stdout)?;
            } else {
                report::inspection(&mut stdout, &inspection)?;
            }
        }
        Command::GenerateKey {
            algo,
            private,
            public,
        } => {
            let keys = key::generate(registry, &algo).await?;
            key::save(&mut stdout, "private", &keys.private, private.as_deref())?;
            key::save(&mut stdout, "public", &keys.public, public.as_deref())?;
        }
        Command::Algorithms => report::algorithms(&mut stdout, registry)?,
    }

    Ok(Status::Success)
}
