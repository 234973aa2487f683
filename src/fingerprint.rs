//! Content fingerprinting for the poll strategy.

use crate::error::{Result, WatchError};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// Digest of the watched file's bytes.
///
/// Equality defines "unchanged": the poller only fires when the fingerprint
/// differs from the previous tick's. Nothing here is security-relevant; any
/// digest with negligible collision probability relative to the poll
/// frequency would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint an in-memory byte slice.
    pub fn of_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Fingerprint the file at `path` by streaming it through the hasher.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Read`] if the file cannot be opened or read.
    /// The fingerprint covers whatever bytes are successfully read; a file
    /// mutating mid-read is not detected here, the next tick catches it.
    pub fn of_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| WatchError::read(path, e))?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(|e| WatchError::read(path, e))?;
        Ok(Self(hasher.finalize().into()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn identical_bytes_identical_digest() {
        assert_eq!(
            Fingerprint::of_bytes(b"port: 8080"),
            Fingerprint::of_bytes(b"port: 8080")
        );
    }

    #[test]
    fn file_digest_matches_byte_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.conf");
        fs::write(&path, "port: 8080").unwrap();

        let from_file = Fingerprint::of_file(&path).unwrap();
        assert_eq!(from_file, Fingerprint::of_bytes(b"port: 8080"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Fingerprint::of_file("/nonexistent/app.conf").unwrap_err();
        assert!(matches!(err, WatchError::Read { .. }));
    }

    #[test]
    fn display_is_hex() {
        let rendered = Fingerprint::of_bytes(b"x").to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
    }

    proptest! {
        #[test]
        fn distinct_bytes_distinct_digest(a: Vec<u8>, b: Vec<u8>) {
            prop_assume!(a != b);
            prop_assert_ne!(Fingerprint::of_bytes(&a), Fingerprint::of_bytes(&b));
        }
    }
}
