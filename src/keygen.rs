use std::fmt::{self, Debug, Display, Formatter};
use std::num::NonZeroUsize;

use log::info;
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntropyError {
    #[error("failed to read secure random bytes from the operating system: {0}")]
    Unavailable(getrandom::Error),
    #[error("secure random source returned {0} identical bytes")]
    Degenerate(usize),
}

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// The operating system CSPRNG.
#[derive(Debug)]
pub struct OsEntropy(());

impl OsEntropy {
    pub fn open() -> Self {
        OsEntropy(())
    }
}

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(buf).map_err(EntropyError::Unavailable)
    }
}

/// Random key material, wiped from memory on drop.
pub struct KeyBytes(Zeroizing<Vec<u8>>);

impl KeyBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// Two lowercase hex digits per byte, high nibble first.
    pub fn to_hex(&self) -> HexString {
        HexString(Zeroizing::new(hex::encode(self.as_bytes())))
    }
}

impl Debug for KeyBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "KeyBytes({} bytes)", self.len())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct HexString(Zeroizing<String>);

impl HexString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Display for HexString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for HexString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "HexString({} chars)", self.len())
    }
}

/// Draws `length` bytes from the operating system CSPRNG.
pub fn generate(length: NonZeroUsize) -> Result<KeyBytes, EntropyError> {
    generate_with(OsEntropy::open(), length)
}

/// Draws `length` bytes from `source`. The source is consumed and dropped
/// before returning, on success and on failure.
pub fn generate_with<S: EntropySource>(mut source: S, length: NonZeroUsize) -> Result<KeyBytes, EntropyError> {
    let mut buf = Zeroizing::new(vec![0u8; length.get()]);
    source.fill(&mut buf)?;
    drop(source);

    // For 12 bytes and up a healthy generator practically never returns
    // a run of identical bytes. Seeing one means the source is broken.
    if buf.len() >= 12 {
        let first = buf[0];
        if buf.iter().all(|b| *b == first) {
            return Err(EntropyError::Degenerate(buf.len()));
        }
    }
    info!("generated {} random bytes", buf.len());
    Ok(KeyBytes(buf))
}
