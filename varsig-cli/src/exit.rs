//! Process exit statuses.

use std::process::ExitCode;
use varsig::{DecodeError, Error, KeyError};

/// How a command ended.
///
/// Usage errors exit with 2, which `clap` reports on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success = 0,
    InvalidSignature = 1,
    MalformedInput = 3,
    UnknownAlgorithm = 4,
    KeyFailure = 5,
    Io = 6,
}

impl Status {
    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Status::Success => "ok",
            Status::InvalidSignature => "invalid signature",
            Status::MalformedInput => "malformed input",
            Status::UnknownAlgorithm => "unknown algorithm",
            Status::KeyFailure => "key or signing failure",
            Status::Io => "I/O error",
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

/// Pick the exit status for a failed command.
///
/// The first recognised error in the report's chain decides. Anything
/// unrecognised came from reading arguments and counts as malformed input.
pub(crate) fn classify(report: &eyre::Report) -> Status {
    report
        .chain()
        .find_map(|cause| {
            if let Some(error) = cause.downcast_ref::<Error>() {
                return Some(match error {
                    Error::Decode(decode) => decode_status(decode),
                    Error::AlgorithmNotFound(_) => Status::UnknownAlgorithm,
                    Error::Signing(_)
                    | Error::Verification(_)
                    | Error::Key(_)
                    | Error::KeyMismatch { .. } => Status::KeyFailure,
                });
            }
            if let Some(decode) = cause.downcast_ref::<DecodeError>() {
                return Some(decode_status(decode));
            }
            if cause.is::<KeyError>() {
                return Some(Status::KeyFailure);
            }
            if cause.is::<std::io::Error>() || cause.is::<serde_json::Error>() {
                return Some(Status::Io);
            }
            None
        })
        .unwrap_or(Status::MalformedInput)
}

const fn decode_status(error: &DecodeError) -> Status {
    match error {
        DecodeError::UnknownAlgorithm { .. } | DecodeError::UnexpectedAlgorithm { .. } => {
            Status::UnknownAlgorithm
        }
        DecodeError::InvalidPrefix { .. }
        | DecodeError::MalformedVarint { .. }
        | DecodeError::TruncatedSignature { .. } => Status::MalformedInput,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    fn report<E>(error: E) -> eyre::Report
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Err::<(), _>(error).wrap_err("context").unwrap_err()
    }

    #[test]
    fn decode_errors() {
        let unknown = DecodeError::UnknownAlgorithm { tag: 0xec, offset: 1 };
        assert_eq!(classify(&report(unknown.clone())), Status::UnknownAlgorithm);
        assert_eq!(
            classify(&report(Error::Decode(unknown))),
            Status::UnknownAlgorithm
        );

        let unexpected = DecodeError::UnexpectedAlgorithm {
            tag: 0x1205,
            expected: 0xed,
            offset: 1,
        };
        assert_eq!(classify(&report(unexpected)), Status::UnknownAlgorithm);

        let prefix = DecodeError::InvalidPrefix {
            expected: 0x34,
            found: Some(0x35),
        };
        assert_eq!(classify(&report(prefix)), Status::MalformedInput);
    }

    #[test]
    fn library_errors() {
        assert_eq!(
            classify(&report(Error::AlgorithmNotFound("nope".into()))),
            Status::UnknownAlgorithm
        );
        assert_eq!(
            classify(&report(Error::KeyMismatch { expected: "Key" })),
            Status::KeyFailure
        );
        assert_eq!(
            classify(&report(KeyError::InvalidLength {
                expected: 32,
                found: 3
            })),
            Status::KeyFailure
        );
    }

    #[test]
    fn backend_failures() {
        let unplugged = || signature::Error::from_source("token unplugged");
        assert_eq!(
            classify(&report(Error::Signing(unplugged()))),
            Status::KeyFailure
        );
        assert_eq!(
            classify(&report(Error::Verification(unplugged()))),
            Status::KeyFailure
        );
        assert_eq!(
            classify(&report(Error::Key(KeyError::Rejected(unplugged())))),
            Status::KeyFailure
        );
    }

    #[test]
    fn io_and_fallback() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(classify(&report(io)), Status::Io);
        assert_eq!(classify(&eyre::eyre!("bad hex")), Status::MalformedInput);
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            Status::Success,
            Status::InvalidSignature,
            Status::MalformedInput,
            Status::UnknownAlgorithm,
            Status::KeyFailure,
            Status::Io,
        ]
        .map(|status| status as u8);
        assert_eq!(codes, [0, 1, 3, 4, 5, 6]);
    }
}
