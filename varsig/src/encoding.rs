//! Payload encoding tags.

/// How the signed payload was encoded before signing.
///
/// Varsig does not canonicalize payloads. The only encoding defined here is
/// [`Encoding::Identity`]: the raw payload bytes were signed verbatim, with no
/// key material embedded.
#[repr(u64)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Encoding {
    /// Identity encoding (raw bytes).
    #[default]
    Identity = 0x5f,
}

impl Encoding {
    /// Multicodec code written to the envelope.
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Look up an encoding by its multicodec code.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0x5f => Some(Encoding::Identity),
            _ => None,
        }
    }
}

impl From<Encoding> for u64 {
    fn from(encoding: Encoding) -> Self {
        encoding.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_identity_code() {
        assert_eq!(Encoding::Identity.code(), 0x5f);
        assert_eq!(Encoding::from_code(0x5f), Some(Encoding::Identity));
        assert_eq!(Encoding::from_code(0x71), None);
    }
}
