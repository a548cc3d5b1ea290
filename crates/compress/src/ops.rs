//! In-memory and streaming compression operations.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use flate2::{Compression as GzLevel, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};
use tracing::instrument;

// Artifacts are written once and read back only for validation or restore,
// so the slowest, smallest level wins.
const GZIP_LEVEL: GzLevel = GzLevel::best();

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use kura_compress::Compression;
    ///
    /// let compressed = Compression::Gzip.compress(&[0u8; 512]).unwrap();
    /// assert!(compressed.len() < 512);
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len(), output_size))]
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = match self {
            Compression::None => input.to_vec(),
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), GZIP_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?
            },
        };
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }

    /// Decompress a byte slice in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use kura_compress::Compression;
    ///
    /// let original = b"Hello, world!";
    /// let compressed = Compression::Gzip.compress(original).unwrap();
    /// assert_eq!(Compression::Gzip.decompress(&compressed).unwrap(), original);
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len(), output_size))]
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = match self {
            Compression::None => input.to_vec(),
            Compression::Gzip => {
                let mut output = Vec::new();
                GzDecoder::new(input).read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
                output
            },
        };
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }

}
