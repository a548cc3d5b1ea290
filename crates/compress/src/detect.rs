use crate::Compression;
use crate::error::{Error, ErrorKind};
use std::{path::Path, str::FromStr};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

impl FromStr for Compression {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Compression::None),
            "gz" | "gzip" => Ok(Compression::Gzip),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}

impl From<&[u8]> for Compression {
    fn from(value: &[u8]) -> Self {
        Compression::from_magic_bytes(value)
    }
}

impl Compression {
    /// Detect compression from a file extension.
    ///
    /// Only the final extension is considered, so `backup.kbk.gz` detects as
    /// gzip and `backup.kbk` as uncompressed.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext.to_lowercase().as_str() {
                "gz" => Compression::Gzip,
                _ => Compression::None,
            })
            .unwrap_or(Compression::None)
    }

    /// Detect compression format from magic bytes.
    ///
    /// Returns the `None` variant if the magic bytes don't match or if the
    /// input is too short to detect any format.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            return Compression::Gzip;
        }
        Compression::None
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[rstest]
    #[case("none", Compression::None)]
    #[case("gz", Compression::Gzip)]
    #[case("gzip", Compression::Gzip)]
    #[case("GZIP", Compression::Gzip)]
    fn test_from_str(#[case] test: &str, #[case] expected: Compression) {
        assert_eq!(test.parse::<Compression>().unwrap(), expected);
    }

    #[rstest]
    #[case("invalid")]
    #[case("definitely not valid")]
    #[case(" ")]
    fn test_from_str_invalid(#[case] test: &str) {
        assert!(test.parse::<Compression>().is_err());
    }

    #[rstest]
    #[case("backup.kbk", Compression::None)]
    #[case("file.txt", Compression::None)]
    // `.gz` is a dotfile with no extension (like `.bashrc`), and therefore
    // with no extension is considered to have no compression.
    #[case(".gz", Compression::None)]
    #[case("backup.kbk.gz", Compression::Gzip)]
    #[case("file.gz", Compression::Gzip)]
    fn test_from_path(#[case] test: &str, #[case] expected: Compression) {
        assert_eq!(Compression::from_path(test), expected);
    }

    #[rstest]
    #[case(b"plain bytes", Compression::None)]
    #[case(b"", Compression::None)]
    #[case(&[0x1F, 0x8B, 0x08, 0x00], Compression::Gzip)]
    #[case(&[0x1F], Compression::None)]
    fn test_from_magic_bytes(#[case] bytes: &[u8], #[case] expected: Compression) {
        assert_eq!(Compression::from_magic_bytes(bytes), expected);
        assert_eq!(<&[u8] as Into<Compression>>::into(bytes), expected);
    }
}
