//! Sources of 32-byte blocks for the streamed population.

use crate::{Error, FIELD_BYTES, Result};
use std::io::Read;

#[cfg(feature = "rand_core")]
use rand_core::RngCore;

/// Produces candidate inputs one block at a time.
///
/// Blocks are used as-is, never rejected: values `>= p` are left for the evaluator to reduce.
pub trait EntropySource {
    /// Next block, or [`Error::EntropyUnavailable`] once the source is exhausted or unreadable.
    fn next_block(&mut self) -> Result<[u8; FIELD_BYTES]>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn next_block(&mut self) -> Result<[u8; FIELD_BYTES]> {
        S::next_block(self)
    }
}

/// Reads consecutive blocks from a byte stream such as stdin.
///
/// A trailing partial block counts as end of stream.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> EntropySource for ReaderSource<R> {
    fn next_block(&mut self) -> Result<[u8; FIELD_BYTES]> {
        let mut block = [0u8; FIELD_BYTES];
        self.reader.read_exact(&mut block).map_err(|err| {
            log::debug!("entropy stream closed: {err}");
            Error::EntropyUnavailable
        })?;
        Ok(block)
    }
}

/// Draws blocks from a random number generator, e.g. the OS RNG.
#[cfg(feature = "rand_core")]
#[derive(Debug)]
pub struct RngSource<R> {
    rng: R,
}

#[cfg(feature = "rand_core")]
impl<R: RngCore> RngSource<R> {
    /// Wrap a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

#[cfg(feature = "rand_core")]
impl<R: RngCore> EntropySource for RngSource<R> {
    fn next_block(&mut self) -> Result<[u8; FIELD_BYTES]> {
        let mut block = [0u8; FIELD_BYTES];
        self.rng.fill_bytes(&mut block);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::{EntropySource, ReaderSource};
    use crate::Error;

    #[test]
    fn reader_yields_whole_blocks() {
        let bytes: Vec<u8> = (0..80).collect();
        let mut source = ReaderSource::new(bytes.as_slice());
        assert_eq!(source.next_block().unwrap()[0], 0);
        assert_eq!(source.next_block().unwrap()[31], 63);
        // 16 bytes remain
        assert_eq!(source.next_block(), Err(Error::EntropyUnavailable));
    }

    #[cfg(feature = "rand_core")]
    #[test]
    fn rng_never_runs_dry() {
        use super::RngSource;
        use rand_chacha::ChaCha8Rng;
        use rand_core::SeedableRng;

        let mut source = RngSource::new(ChaCha8Rng::seed_from_u64(7));
        let first = source.next_block().unwrap();
        let second = source.next_block().unwrap();
        assert_ne!(first, second);
    }
}
