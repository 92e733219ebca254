//! Transfer-size compression of minified output.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::{Error, Result};

/// Reports how large code is after transfer compression.
pub trait Compressor: Send + Sync {
    fn compressed_len(&self, data: &[u8]) -> Result<u64>;
}

/// gzip at the default level.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipCompressor;

impl GzipCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for GzipCompressor {
    fn compressed_len(&self, data: &[u8]) -> Result<u64> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
        encoder.write_all(data).map_err(Error::Compress)?;
        let compressed = encoder.finish().map_err(Error::Compress)?;
        Ok(compressed.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repetitive_input_shrinks() {
        let data = "export const value = 1;\n".repeat(200);
        let len = GzipCompressor::new().compressed_len(data.as_bytes()).unwrap();
        assert!(len > 0);
        assert!(len < data.len() as u64);
    }

    #[test]
    fn empty_input_still_has_a_header() {
        assert!(GzipCompressor::new().compressed_len(b"").unwrap() > 0);
    }
}
