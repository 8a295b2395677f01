use std::fmt;
use std::str::FromStr;

use anyhow::{Context as _, ensure};
use serde::{Deserialize, Serialize};

/// The SHA-1 info hash identifying a torrent.
///
/// Serialized as a lowercase hex string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Create an info hash from its raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// The hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for InfoHash {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        ensure!(s.len() == 40, "Info hash must be 40 hex characters, got {}", s.len());
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s, &mut bytes)
            .with_context(|| format!("Parsing info hash {s:?}"))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for InfoHash {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        value.parse()
    }
}

impl From<InfoHash> for String {
    fn from(value: InfoHash) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        let hash: InfoHash = "00112233445566778899aabbccddeeff00112233".parse().unwrap();
        assert_eq!(hash.as_bytes()[1], 0x11);
        assert_eq!(hash.to_string(), "00112233445566778899aabbccddeeff00112233");
    }

    #[test]
    fn rejects_bad_length() {
        assert!("abcd".parse::<InfoHash>().is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(
            "zz112233445566778899aabbccddeeff00112233"
                .parse::<InfoHash>()
                .is_err()
        );
    }
}
