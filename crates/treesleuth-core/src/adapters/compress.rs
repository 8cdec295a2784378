/// Streaming compression keyed by algorithm name.
///
/// Consumers pick the codec with a plain string (the same way a config
/// file or CLI flag would carry it); unknown names are a typed error
/// rather than a silent default.
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

/// Supported compression codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Zlib,
    Deflate,
}

#[derive(Debug, Error)]
pub enum CompressError {
    #[error("unknown compression algorithm '{0}' (expected gzip, zlib, or deflate)")]
    UnknownAlgorithm(String),

    #[error("compression failed")]
    Io(#[from] io::Error),
}

impl FromStr for Codec {
    type Err = CompressError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "gzip" | "gz" => Ok(Codec::Gzip),
            "zlib" => Ok(Codec::Zlib),
            "deflate" => Ok(Codec::Deflate),
            other => Err(CompressError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl Codec {
    /// Canonical name, round-trippable through `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Zlib => "zlib",
            Codec::Deflate => "deflate",
        }
    }
}

/// Compress `content` with the given codec at the default level.
pub fn compress(codec: Codec, content: &[u8]) -> Result<Vec<u8>, CompressError> {
    let level = Compression::default();
    let out = match codec {
        Codec::Gzip => {
            let mut enc = GzEncoder::new(Vec::new(), level);
            enc.write_all(content)?;
            enc.finish()?
        }
        Codec::Zlib => {
            let mut enc = ZlibEncoder::new(Vec::new(), level);
            enc.write_all(content)?;
            enc.finish()?
        }
        Codec::Deflate => {
            let mut enc = DeflateEncoder::new(Vec::new(), level);
            enc.write_all(content)?;
            enc.finish()?
        }
    };
    Ok(out)
}
